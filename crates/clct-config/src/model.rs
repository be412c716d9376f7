//! # Intermediate Document Model
//!
//! Typed mirror of the Container Linux Config schema. Every section and
//! collection defaults to empty so that any subset of the document may be
//! given. Unknown keys are ignored here; reporting them is the job of
//! [`crate::unrecognized`].
//!
//! Values are kept exactly as written. Sizes stay strings, URLs stay
//! strings, and family option blocks stay raw mappings until the version
//! resolver decides which schema they follow.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// A complete Container Linux Config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ignition: Ignition,
    pub storage: Storage,
    pub systemd: Systemd,
    pub networkd: Networkd,
    pub passwd: Passwd,
    pub etcd: Option<FamilyBlock>,
    pub flannel: Option<FamilyBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Ignition {
    pub config: IgnitionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IgnitionConfig {
    pub append: Vec<ConfigReference>,
    pub replace: Option<ConfigReference>,
}

/// A reference to another provisioning config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigReference {
    pub source: String,
    pub verification: Verification,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Verification {
    pub hash: Option<Hash>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Hash {
    pub function: String,
    pub sum: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub disks: Vec<Disk>,
    pub raid: Vec<Raid>,
    pub filesystems: Vec<Filesystem>,
    pub files: Vec<File>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Disk {
    pub device: String,
    pub wipe_table: bool,
    pub partitions: Vec<Partition>,
}

/// A partition. `size` and `start` are human dimensions such as `100MB`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Partition {
    pub label: Option<String>,
    pub number: Option<u32>,
    pub size: Option<String>,
    pub start: Option<String>,
    pub guid: Option<String>,
    /// A GUID or one of the well-known aliases such as `raid_partition`.
    pub type_guid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Raid {
    pub name: String,
    pub level: String,
    pub devices: Vec<String>,
    pub spares: Option<u32>,
}

/// A filesystem. Exactly one of `mount` and `path` is expected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Filesystem {
    pub name: String,
    pub mount: Option<Mount>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Mount {
    pub device: String,
    pub format: String,
    pub create: Option<Create>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Create {
    pub force: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct File {
    pub filesystem: String,
    pub path: String,
    pub contents: FileContents,
    pub mode: Option<FileMode>,
    pub user: Option<FileOwner>,
    pub group: Option<FileOwner>,
}

/// File contents, either embedded or fetched at provisioning time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileContents {
    pub inline: Option<String>,
    pub remote: Option<Remote>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Remote {
    pub url: String,
    pub compression: Option<String>,
    pub verification: Verification,
}

/// Owner of a file, by numeric id or by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileOwner {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Unix permission bits.
///
/// Accepts a YAML integer (`420`, `0o644`) or a string holding an octal
/// literal (`"0644"`, `"0o644"`). A plain decimal string is read as decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileMode(pub u32);

impl FileMode {
    fn from_str_radix(s: &str) -> Option<u32> {
        if let Some(octal) = s.strip_prefix("0o") {
            return u32::from_str_radix(octal, 8).ok();
        }
        if s.len() > 1 && s.starts_with('0') {
            return u32::from_str_radix(&s[1..], 8).ok();
        }
        s.parse().ok()
    }
}

impl<'de> Deserialize<'de> for FileMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModeVisitor;

        impl Visitor<'_> for ModeVisitor {
            type Value = FileMode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a file mode as an integer or an octal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FileMode, E> {
                u32::try_from(v)
                    .map(FileMode)
                    .map_err(|_| E::custom(format!("file mode {v} is out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FileMode, E> {
                u32::try_from(v)
                    .map(FileMode)
                    .map_err(|_| E::custom(format!("file mode {v} is out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FileMode, E> {
                FileMode::from_str_radix(v.trim())
                    .map(FileMode)
                    .ok_or_else(|| E::custom(format!("invalid file mode {v:?}")))
            }
        }

        deserializer.deserialize_any(ModeVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Systemd {
    pub units: Vec<SystemdUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemdUnit {
    pub name: String,
    pub enable: bool,
    pub enabled: Option<bool>,
    pub mask: bool,
    pub contents: Option<String>,
    pub dropins: Vec<SystemdUnitDropIn>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemdUnitDropIn {
    pub name: String,
    pub contents: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Networkd {
    pub units: Vec<NetworkdUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkdUnit {
    pub name: String,
    pub contents: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Passwd {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub password_hash: Option<String>,
    pub ssh_authorized_keys: Vec<String>,
    pub create: Option<UserCreate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserCreate {
    pub uid: Option<u32>,
    pub gecos: Option<String>,
    pub home_dir: Option<String>,
    pub no_create_home: bool,
    pub primary_group: Option<String>,
    pub groups: Vec<String>,
    pub no_user_group: bool,
    pub system: bool,
    pub no_log_init: bool,
    pub shell: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Group {
    pub name: String,
    pub gid: Option<u32>,
    pub password_hash: Option<String>,
    pub system: bool,
}

/// A daemon family block (`etcd:` or `flannel:`) before version dispatch.
///
/// `version` is kept as an untyped value so that a malformed or non-scalar
/// version is a diagnostic on the family rather than a decode failure of
/// the whole document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FamilyBlock {
    #[serde(default)]
    pub version: Option<serde_yaml::Value>,
    /// Every other key of the block.
    #[serde(flatten)]
    pub options: serde_yaml::Mapping,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let cfg = decode("passwd:\n  users:\n    - name: core\n");
        assert_eq!(cfg.passwd.users.len(), 1);
        assert!(cfg.storage.disks.is_empty());
        assert!(cfg.etcd.is_none());
    }

    #[test]
    fn partitions_keep_raw_dimensions() {
        let cfg = decode(
            "storage:\n  disks:\n    - device: /dev/sda\n      wipe_table: true\n      partitions:\n        - label: ROOT\n          number: 7\n          size: 100MB\n          start: 50MB\n",
        );
        let disk = &cfg.storage.disks[0];
        assert!(disk.wipe_table);
        let part = &disk.partitions[0];
        assert_eq!(part.size.as_deref(), Some("100MB"));
        assert_eq!(part.start.as_deref(), Some("50MB"));
        assert_eq!(part.number, Some(7));
    }

    #[test]
    fn file_mode_accepts_integers_and_octal_strings() {
        for (yaml, expected) in [
            ("mode: 420", 420),
            ("mode: 0o644", 0o644),
            ("mode: \"0644\"", 0o644),
            ("mode: \"0o400\"", 0o400),
            ("mode: \"420\"", 420),
        ] {
            let file: File = serde_yaml::from_str(yaml).unwrap();
            assert_eq!(file.mode, Some(FileMode(expected)), "{yaml}");
        }
    }

    #[test]
    fn file_mode_rejects_garbage() {
        assert!(serde_yaml::from_str::<File>("mode: \"rw-r--r--\"").is_err());
        assert!(serde_yaml::from_str::<File>("mode: -1").is_err());
    }

    #[test]
    fn family_block_separates_version_from_options() {
        let cfg = decode("etcd:\n  version: 3.0.15\n  name: node1\n  snapshot_count: 10\n");
        let etcd = cfg.etcd.unwrap();
        assert_eq!(etcd.version.as_ref().and_then(serde_yaml::Value::as_str), Some("3.0.15"));
        assert_eq!(etcd.options.len(), 2);
        assert!(etcd.options.contains_key("name"));
        assert!(!etcd.options.contains_key("version"));
    }

    #[test]
    fn family_version_of_any_shape_decodes() {
        let cfg = decode("etcd:\n  version: [3]\nflannel:\n  version: 0.7\n");
        assert!(cfg.etcd.unwrap().version.unwrap().is_sequence());
        assert!(cfg.flannel.unwrap().version.unwrap().is_number());
    }

    #[test]
    fn user_create_empty_mapping_is_present() {
        let cfg = decode("passwd:\n  users:\n    - name: user 3\n      create: {}\n");
        assert_eq!(cfg.passwd.users[0].create, Some(UserCreate::default()));
    }
}
