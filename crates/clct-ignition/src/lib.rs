//! # clct-ignition: Target Provisioning Document
//!
//! Typed representation of the Ignition config consumed by first-boot
//! provisioning. The transpiler only ever builds documents of one version,
//! [`TARGET_VERSION`]; the conversion driver stamps it once per run.
//!
//! ## Serialization
//!
//! Every type serializes to the Ignition JSON layout (camelCase keys).
//! Empty collections, `None` fields and `false` flags are omitted so that a
//! document with nothing but its version stamp serializes to
//! `{"ignition":{"version":"2.3.0"}}`.
//!
//! ## Crate Policy
//!
//! - Plain data only. Validation and lowering live in `clct-convert`.
//! - No dependencies on other `clct-*` crates.

pub mod config;
pub mod url;

pub use config::{
    Config, ConfigReference, Disk, FileContents, FileGroup, FileUser, Filesystem,
    FilesystemCreate, FilesystemMount, Group, Hash, Ignition, IgnitionConfig, Networkd,
    NetworkdUnit, Node, Partition, Passwd, Raid, Storage, StorageFile, Systemd, SystemdUnit,
    SystemdUnitDropIn, User, UserCreate, Verification,
};
pub use url::Url;

/// The single target-schema version every generated document carries.
pub const TARGET_VERSION: &str = "2.3.0";
