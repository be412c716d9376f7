//! # Version-Gated Option Schemas
//!
//! The etcd and flannel blocks of a config carry a `version` that selects
//! which historical set of daemon options the rest of the block follows.
//! This module classifies that version against each family's bucket table
//! and decodes the remaining keys into the chosen variant.
//!
//! ## Classification
//!
//! For a version `v` of a family:
//!
//! 1. `v` below the family's oldest version: Error, too old.
//! 2. `v.major` above every known major: Error, too new.
//! 3. `v.major` known, `v.minor` above that major's newest bucket: Warning,
//!    and the newest bucket of that major is used.
//! 4. Otherwise the greatest bucket with `minor <= v.minor` is used.
//!
//! A major inside the known range with no bucket at all is too old.
//!
//! ## Invariants
//!
//! - Any Error leaves [`Resolution::resolved`] empty. The family produces
//!   no output, and nothing outside the family is affected.
//! - Families resolve independently of each other.

use std::fmt;

use serde_yaml::{Mapping, Value};

use clct_core::{FieldPath, PositionIndex, Report, Version};

use crate::error::ResolveError;
use crate::keywords::{self, TypeSchema};
use crate::model::FamilyBlock;

/// Generate a family option struct.
///
/// Each field is optional and maps one YAML key to one environment
/// variable. `env_vars` yields the variables of the fields that are set, in
/// declaration order. `KEYS` lists the YAML keys.
macro_rules! family_options {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $key:ident : $ty:ty => $env:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            $( pub $key: Option<$ty>, )*
        }

        impl $name {
            /// YAML keys this schema accepts, in declaration order.
            pub const KEYS: &'static [&'static str] = &[$(stringify!($key)),*];

            /// `(VARIABLE, value)` for every option that is set.
            pub fn env_vars(&self) -> Vec<(&'static str, String)> {
                let mut vars = Vec::new();
                $(
                    if let Some(value) = &self.$key {
                        vars.push(($env, value.to_string()));
                    }
                )*
                vars
            }
        }
    };
}

pub mod etcd;
pub mod flannel;

pub use etcd::EtcdOptions;
pub use flannel::FlannelOptions;

/// A daemon family with version-gated options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Etcd,
    Flannel,
}

impl Family {
    /// The key of the family's block in the document.
    pub fn name(self) -> &'static str {
        match self {
            Self::Etcd => "etcd",
            Self::Flannel => "flannel",
        }
    }

    /// Oldest supported version.
    pub fn oldest(self) -> Version {
        match self {
            Self::Etcd => Version::new(2, 3, 0),
            Self::Flannel => Version::new(0, 5, 0),
        }
    }

    /// Known `(major, minor)` schema buckets, ascending.
    pub fn buckets(self) -> &'static [(u64, u64)] {
        match self {
            Self::Etcd => &[(2, 3), (3, 0), (3, 1)],
            Self::Flannel => &[(0, 5), (0, 6), (0, 7)],
        }
    }

    /// Declared keywords of the family block.
    pub fn keywords(self) -> &'static TypeSchema {
        match self {
            Self::Etcd => &keywords::ETCD,
            Self::Flannel => &keywords::FLANNEL,
        }
    }

    /// Path of the family block in the document.
    pub fn path(self) -> FieldPath {
        FieldPath::root().join(self.name())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The option schema chosen for a family block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaVariant {
    pub family: Family,
    pub major: u64,
    pub minor: u64,
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Pick the schema bucket for `version`.
///
/// The returned report holds the too-new-minor warning when it applies.
pub fn classify(family: Family, version: &Version) -> Result<(SchemaVariant, Report), ResolveError> {
    if *version < family.oldest() {
        return Err(ResolveError::TooOld { family });
    }
    let buckets = family.buckets();
    let newest_major = buckets.iter().map(|&(major, _)| major).max().unwrap_or(0);
    if version.major > newest_major {
        return Err(ResolveError::TooNew { family });
    }

    let minors = buckets
        .iter()
        .filter(|&&(major, _)| major == version.major)
        .map(|&(_, minor)| minor);
    let Some(newest_minor) = minors.clone().max() else {
        return Err(ResolveError::TooOld { family });
    };

    let variant = |minor| SchemaVariant { family, major: version.major, minor };
    if version.minor > newest_minor {
        let chosen = variant(newest_minor);
        let report = Report::warning(format!(
            "{family} minor version is too new, only options available in {chosen} will be accepted"
        ));
        return Ok((chosen, report));
    }
    match minors.filter(|&minor| minor <= version.minor).max() {
        Some(minor) => Ok((variant(minor), Report::new())),
        None => Err(ResolveError::TooOld { family }),
    }
}

/// A family's option sum type: one variant per schema bucket.
pub trait FamilyOptions: Sized {
    /// The family these options belong to.
    const FAMILY: Family;

    /// Decode `options` into the schema of `variant`.
    fn decode(variant: SchemaVariant, options: Value) -> Result<Self, serde_yaml::Error>;

    /// Keys accepted by `variant`.
    fn keys(variant: SchemaVariant) -> &'static [&'static str];

    /// Deprecation note for `key`, if it is deprecated.
    fn deprecation(_key: &str) -> Option<&'static str> {
        None
    }

    /// Value checks beyond what the types enforce.
    fn validate(&self) -> Vec<(&'static str, ResolveError)> {
        Vec::new()
    }

    /// `(VARIABLE, value)` for every option that is set.
    fn env_vars(&self) -> Vec<(&'static str, String)>;
}

/// A successfully resolved family block.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<O> {
    pub variant: SchemaVariant,
    /// The version as written, used for the image tag.
    pub version: Version,
    pub options: O,
}

/// Outcome of [`resolve`]: the options when resolution succeeded, and the
/// diagnostics found either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<O> {
    pub resolved: Option<Resolved<O>>,
    pub report: Report,
}

impl<O> Resolution<O> {
    fn failed(report: Report) -> Self {
        Self { resolved: None, report }
    }
}

/// Resolve a family block to its option schema and decode its options.
///
/// Diagnostics carry the path of the key or value they are about, and its
/// position when `positions` knows it.
pub fn resolve<O: FamilyOptions>(block: &FamilyBlock, positions: &PositionIndex) -> Resolution<O> {
    let family = O::FAMILY;
    let base = family.path();
    let version_path = base.join("version");
    let at_version = |err: ResolveError| {
        Report::error(err).located(&version_path, positions.value(&version_path))
    };

    let Some(raw) = block.version.as_ref() else {
        let report = Report::error(ResolveError::MissingVersion { family })
            .located(&base, positions.key(&base));
        return Resolution::failed(report);
    };
    let raw = match raw {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return Resolution::failed(at_version(ResolveError::VersionNotScalar { family })),
    };
    let version = match raw.parse::<Version>() {
        Ok(version) => version,
        Err(source) => {
            return Resolution::failed(at_version(ResolveError::MalformedVersion { family, source }))
        }
    };
    let (variant, mut report) = match classify(family, &version) {
        Ok(classified) => classified,
        Err(err) => return Resolution::failed(at_version(err)),
    };
    report.locate(&version_path, positions.value(&version_path));

    report.merge(check_keys::<O>(variant, &block.options, &base, positions));

    let options = match O::decode(variant, Value::Mapping(block.options.clone())) {
        Ok(options) => options,
        Err(err) => {
            let invalid = ResolveError::InvalidOptions { family, message: err.to_string() };
            report.merge(Report::error(invalid).located(&base, positions.key(&base)));
            return Resolution::failed(report);
        }
    };

    let violations = options.validate();
    if !violations.is_empty() {
        for (key, err) in violations {
            let path = base.join(key);
            report.merge(Report::error(err).located(&path, positions.value(&path)));
        }
        return Resolution::failed(report);
    }

    tracing::debug!(%family, %variant, %version, "resolved option schema");
    Resolution {
        resolved: Some(Resolved { variant, version, options }),
        report,
    }
}

/// Warn about keys the chosen variant ignores and keys that are deprecated.
fn check_keys<O: FamilyOptions>(
    variant: SchemaVariant,
    options: &Mapping,
    base: &FieldPath,
    positions: &PositionIndex,
) -> Report {
    let family = O::FAMILY;
    let supported = O::keys(variant);
    let mut report = Report::new();
    for key in options.keys().filter_map(Value::as_str) {
        let path = base.join(key);
        let warning = if supported.contains(&key) {
            O::deprecation(key).map(str::to_string)
        } else if family.keywords().field(key).is_some() {
            Some(format!("{key} is not supported by {family} {variant}; ignored"))
        } else {
            // Unknown to the family; reported by the keyword check.
            None
        };
        if let Some(message) = warning {
            report.merge(Report::warning(message).located(&path, positions.key(&path)));
        }
    }
    report
}
