//! # Semantic Versions
//!
//! Daemon families (etcd, flannel) carry a `version` field that selects the
//! option schema used to decode the rest of the block. [`Version`] is the
//! validated `major.minor.patch` triple those decisions are made on.
//!
//! Ordering is lexicographic over (major, minor, patch). Pre-release and
//! build suffixes are not accepted.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VersionError;

/// A `major.minor.patch` version with total ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl Version {
    /// Construct a version from its components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || VersionError::Malformed(s.to_string());
        let component = |part: &str| -> Result<u64, VersionError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse().map_err(|_| malformed())
        };

        let mut parts = s.split('.');
        let (Some(major), Some(minor), Some(patch), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        Ok(Self::new(component(major)?, component(minor)?, component(patch)?))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = Version;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a version string of the form major.minor.patch")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Version, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_components() {
        let v: Version = "3.1.12".parse().unwrap();
        assert_eq!(v, Version::new(3, 1, 12));
        assert_eq!(v.to_string(), "3.1.12");
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["", "3", "3.1", "3.1.0.1", "v3.1.0", "3.x.0", "3.1.0-rc1", "+3.1.0", "3..0"] {
            assert!(bad.parse::<Version>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn ordering_is_component_wise() {
        let mut versions: Vec<Version> = ["3.0.0", "2.3.7", "2.10.0", "0.7.1", "3.0.10"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        versions.sort();
        let rendered: Vec<String> = versions.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["0.7.1", "2.3.7", "2.10.0", "3.0.0", "3.0.10"]);
    }

    #[test]
    fn deserializes_from_yaml_string() {
        let v: Version = serde_yaml::from_str("\"2.3.0\"").unwrap();
        assert_eq!(v, Version::new(2, 3, 0));
        let v: Version = serde_yaml::from_str("0.7.0").unwrap();
        assert_eq!(v, Version::new(0, 7, 0));
    }

    #[test]
    fn rejects_float_shaped_versions() {
        assert!(serde_yaml::from_str::<Version>("3.0").is_err());
    }
}
