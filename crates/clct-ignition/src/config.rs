//! # Ignition Config Types
//!
//! One struct per object of the Ignition 2.3 schema that the transpiler can
//! produce. Field names follow the Rust convention and are renamed to the
//! schema's camelCase on serialization.

use serde::{Serialize, Serializer};

use crate::url::Url;

fn is_false(b: &bool) -> bool {
    !*b
}

/// The root of a generated provisioning document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Version stamp and config references.
    pub ignition: Ignition,
    /// Disks, arrays, filesystems and files.
    #[serde(skip_serializing_if = "Storage::is_empty")]
    pub storage: Storage,
    /// Systemd units.
    #[serde(skip_serializing_if = "Systemd::is_empty")]
    pub systemd: Systemd,
    /// Networkd units.
    #[serde(skip_serializing_if = "Networkd::is_empty")]
    pub networkd: Networkd,
    /// Users and groups.
    #[serde(skip_serializing_if = "Passwd::is_empty")]
    pub passwd: Passwd,
}

impl Config {
    /// An empty document stamped with `version`.
    pub fn stamped(version: impl Into<String>) -> Self {
        Self {
            ignition: Ignition {
                version: version.into(),
                config: IgnitionConfig::default(),
            },
            ..Self::default()
        }
    }
}

/// The `ignition` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ignition {
    /// Target-schema version, e.g. `2.3.0`.
    pub version: String,
    /// Configs to merge with or replace this one.
    #[serde(skip_serializing_if = "IgnitionConfig::is_empty")]
    pub config: IgnitionConfig,
}

/// References to other Ignition configs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IgnitionConfig {
    /// Configs merged on top of this one, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub append: Vec<ConfigReference>,
    /// A config that replaces this one entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<ConfigReference>,
}

impl IgnitionConfig {
    fn is_empty(&self) -> bool {
        self.append.is_empty() && self.replace.is_none()
    }
}

/// A remote config and its optional hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigReference {
    /// Where to fetch the config from.
    pub source: Url,
    /// Expected hash of the fetched bytes.
    #[serde(skip_serializing_if = "Verification::is_empty")]
    pub verification: Verification,
}

/// Integrity check for fetched content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// Hash in `function-sum` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Hash>,
}

impl Verification {
    fn is_empty(&self) -> bool {
        self.hash.is_none()
    }
}

/// A content hash. Serializes as `"<function>-<sum>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hash {
    /// Hash function name, e.g. `sha512`.
    pub function: String,
    /// Hex digest.
    pub sum: String,
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{}-{}", self.function, self.sum))
    }
}

/// The `storage` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Storage {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<Disk>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub raid: Vec<Raid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filesystems: Vec<Filesystem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<StorageFile>,
}

impl Storage {
    fn is_empty(&self) -> bool {
        self.disks.is_empty()
            && self.raid.is_empty()
            && self.filesystems.is_empty()
            && self.files.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    pub device: String,
    #[serde(skip_serializing_if = "is_false")]
    pub wipe_table: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<Partition>,
}

/// A GPT partition. Sizes are whole MiB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(rename = "sizeMiB", skip_serializing_if = "Option::is_none")]
    pub size_mib: Option<u64>,
    #[serde(rename = "startMiB", skip_serializing_if = "Option::is_none")]
    pub start_mib: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(rename = "typeGuid", skip_serializing_if = "Option::is_none")]
    pub type_guid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Raid {
    pub name: String,
    pub level: String,
    pub devices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spares: Option<u32>,
}

/// A filesystem, either to be created on a device or an existing path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filesystem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount: Option<FilesystemMount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilesystemMount {
    pub device: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<FilesystemCreate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilesystemCreate {
    #[serde(skip_serializing_if = "is_false")]
    pub force: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Attributes shared by every filesystem node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    pub filesystem: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<FileUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<FileGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A regular file written during provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageFile {
    #[serde(flatten)]
    pub node: Node,
    pub contents: FileContents,
    /// Permission bits, serialized in decimal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContents {
    pub source: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    #[serde(skip_serializing_if = "Verification::is_empty")]
    pub verification: Verification,
}

/// The `systemd` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Systemd {
    /// Shared by several lowering units; each appends only its own entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<SystemdUnit>,
}

impl Systemd {
    fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemdUnit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "is_false")]
    pub mask: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropins: Vec<SystemdUnitDropIn>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemdUnitDropIn {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

/// The `networkd` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Networkd {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<NetworkdUnit>,
}

impl Networkd {
    fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkdUnit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

/// The `passwd` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Passwd {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

impl Passwd {
    fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ssh_authorized_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create: Option<UserCreate>,
}

/// `useradd` parameters for a user that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gecos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_dir: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_create_home: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_group: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_user_group: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub system: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub no_log_init: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub system: bool,
}
