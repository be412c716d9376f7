//! # Source Reference Synthesizer
//!
//! Turns the two ways a config names content (inline text or a remote URL
//! with optional compression and hash) into the target's URL-based
//! references. Inline text becomes a `data:` URL; remote URLs are parsed and
//! split into scheme, host, path and query.

use thiserror::Error;

use clct_config::model;
use clct_ignition as ignition;
use clct_ignition::Url;

/// URL schemes the provisioning agent can fetch from.
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "tftp", "s3", "data"];

/// A content reference that cannot be synthesized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The URL does not parse.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        /// The URL as written.
        url: String,
        /// Parser failure.
        source: url::ParseError,
    },

    /// The URL parses but its scheme cannot be fetched.
    #[error("invalid url {url:?}: unsupported scheme {scheme:?}")]
    UnsupportedScheme {
        /// The URL as written.
        url: String,
        /// Its scheme.
        scheme: String,
    },

    /// Both inline and remote contents were given.
    #[error("contents may not set both inline and remote")]
    Conflicting,
}

/// Where a file's contents come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentReference<'a> {
    /// Literal text embedded in the config.
    Inline(&'a str),
    /// Content fetched at provisioning time.
    Remote(&'a model::Remote),
}

impl<'a> ContentReference<'a> {
    /// Classify `contents`. Neither form set means empty inline content.
    pub fn from_contents(contents: &'a model::FileContents) -> Result<Self, SourceError> {
        match (&contents.inline, &contents.remote) {
            (Some(_), Some(_)) => Err(SourceError::Conflicting),
            (Some(text), None) => Ok(Self::Inline(text)),
            (None, Some(remote)) => Ok(Self::Remote(remote)),
            (None, None) => Ok(Self::Inline("")),
        }
    }

    /// Build the target file contents.
    pub fn synthesize(&self) -> Result<ignition::FileContents, SourceError> {
        match self {
            Self::Inline(text) => Ok(ignition::FileContents {
                source: data_url(text),
                compression: None,
                verification: ignition::Verification::default(),
            }),
            Self::Remote(remote) => Ok(ignition::FileContents {
                source: remote_url(&remote.url)?,
                compression: remote.compression.clone(),
                verification: verification(&remote.verification),
            }),
        }
    }
}

/// Build a reference to another provisioning config.
pub fn config_reference(
    reference: &model::ConfigReference,
) -> Result<ignition::ConfigReference, SourceError> {
    Ok(ignition::ConfigReference {
        source: remote_url(&reference.source)?,
        verification: verification(&reference.verification),
    })
}

/// Copy a verification block.
pub fn verification(verification: &model::Verification) -> ignition::Verification {
    ignition::Verification {
        hash: verification.hash.as_ref().map(|hash| ignition::Hash {
            function: hash.function.clone(),
            sum: hash.sum.clone(),
        }),
    }
}

/// Embed `text` in a `data:` URL.
pub fn data_url(text: &str) -> Url {
    Url::opaque("data", format!(",{}", escape(text)))
}

/// Parse and split a remote URL. Every component of `raw` survives,
/// including credentials and fragment.
pub fn remote_url(raw: &str) -> Result<Url, SourceError> {
    let parsed = url::Url::parse(raw).map_err(|source| SourceError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    let scheme = parsed.scheme();
    if !SUPPORTED_SCHEMES.contains(&scheme) {
        return Err(SourceError::UnsupportedScheme {
            url: raw.to_string(),
            scheme: scheme.to_string(),
        });
    }
    if parsed.cannot_be_a_base() {
        let mut opaque = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            opaque.push('?');
            opaque.push_str(query);
        }
        return Ok(Url::opaque(scheme, opaque).with_fragment(fragment(&parsed)));
    }

    let host = parsed.host_str().map(|host| match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    });
    let userinfo = match (parsed.username(), parsed.password()) {
        ("", None) => None,
        (user, None) => Some(user.to_string()),
        (user, Some(password)) => Some(format!("{user}:{password}")),
    };
    Ok(Url::hierarchical(
        scheme,
        host,
        parsed.path(),
        parsed.query().map(str::to_string),
    )
    .with_userinfo(userinfo)
    .with_fragment(fragment(&parsed)))
}

fn fragment(parsed: &url::Url) -> Option<String> {
    parsed.fragment().map(str::to_string)
}

/// Percent-encode everything outside the URI unreserved and sub-delimiter
/// characters.
fn escape(text: &str) -> String {
    const KEEP: &[u8] = b"-_.~!*'();:@&=+$,/?";
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || KEEP.contains(&byte) {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
