//! Resource locations as the target document stores them.

use std::fmt;

use serde::{Serialize, Serializer};

/// A split resource URL.
///
/// Hierarchical URLs (`http://user@host/path`) use `userinfo`, `host` and
/// `path`. Opaque URLs
/// such as embedded `data:` payloads keep everything after the scheme's
/// colon in `opaque` and leave the other parts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Url {
    /// Scheme without the trailing colon, e.g. `http` or `data`.
    pub scheme: String,
    /// Opaque part for non-hierarchical URLs.
    pub opaque: Option<String>,
    /// `user` or `user:password`, without the trailing `@`.
    pub userinfo: Option<String>,
    /// Host, including a port when one was given.
    pub host: Option<String>,
    /// Absolute path, possibly empty.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: Option<String>,
    /// Fragment without the leading `#`.
    pub fragment: Option<String>,
}

impl Url {
    /// An opaque URL such as `data:,payload`.
    pub fn opaque(scheme: impl Into<String>, opaque: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            opaque: Some(opaque.into()),
            ..Self::default()
        }
    }

    /// A hierarchical URL.
    pub fn hierarchical(
        scheme: impl Into<String>,
        host: Option<String>,
        path: impl Into<String>,
        query: Option<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host,
            path: path.into(),
            query,
            ..Self::default()
        }
    }

    /// Set the credentials part of a hierarchical URL.
    pub fn with_userinfo(mut self, userinfo: Option<String>) -> Self {
        self.userinfo = userinfo;
        self
    }

    /// Set the fragment.
    pub fn with_fragment(mut self, fragment: Option<String>) -> Self {
        self.fragment = fragment;
        self
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if let Some(opaque) = &self.opaque {
            f.write_str(opaque)?;
        } else {
            if let Some(host) = &self.host {
                f.write_str("//")?;
                if let Some(userinfo) = &self.userinfo {
                    write!(f, "{userinfo}@")?;
                }
                f.write_str(host)?;
            }
            f.write_str(&self.path)?;
            if let Some(query) = &self.query {
                write!(f, "?{query}")?;
            }
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl Serialize for Url {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_renders_opaque() {
        assert_eq!(Url::opaque("data", ",file1").to_string(), "data:,file1");
        assert_eq!(Url::opaque("data", ",").to_string(), "data:,");
    }

    #[test]
    fn hierarchical_url_renders_all_parts() {
        let url = Url::hierarchical(
            "http",
            Some("example.com:8080".into()),
            "/file2",
            Some("v=1".into()),
        );
        assert_eq!(url.to_string(), "http://example.com:8080/file2?v=1");
    }

    #[test]
    fn credentials_and_fragment_are_rendered() {
        let url = Url::hierarchical("https", Some("example.com".into()), "/a", Some("x=1".into()))
            .with_userinfo(Some("user:pw".into()))
            .with_fragment(Some("frag".into()));
        assert_eq!(url.to_string(), "https://user:pw@example.com/a?x=1#frag");

        let data = Url::opaque("data", ",text").with_fragment(Some("part".into()));
        assert_eq!(data.to_string(), "data:,text#part");
    }

    #[test]
    fn serializes_as_string() {
        let url = Url::hierarchical("https", Some("example.com".into()), "/a", None);
        assert_eq!(serde_json::to_string(&url).unwrap(), "\"https://example.com/a\"");
    }
}
