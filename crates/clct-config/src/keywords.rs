//! # Declared Keywords
//!
//! Static table of the keys each section of the schema declares. The
//! unrecognized-field detector walks the input in lock-step with these
//! tables; the typed model in [`crate::model`] must declare the same keys.
//!
//! ## Design
//!
//! Tables are `&'static` data, not derived from the model by reflection.
//! Family sections list `version` plus the union of every option key any
//! schema variant of the family accepts, reusing the key lists generated
//! alongside the option structs so the two cannot drift apart.

use crate::families::etcd::{Etcd2, Etcd3_1};
use crate::families::flannel::Flannel0_7;

/// How the value under a declared key is checked.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A scalar; nothing below it is checked.
    Scalar,
    /// A list of scalars.
    ScalarList,
    /// A nested section with its own declared keys.
    Struct(&'static TypeSchema),
    /// A list of nested sections.
    StructList(&'static TypeSchema),
}

/// One declared key.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Key as written in the document.
    pub key: &'static str,
    /// What the value is.
    pub kind: FieldKind,
}

/// The declared keys of one section.
#[derive(Debug)]
pub struct TypeSchema {
    /// Section name, for logs.
    pub name: &'static str,
    /// Keys with structure below them or a fixed meaning.
    pub fields: &'static [Field],
    /// Additional scalar-valued keys, grouped by where they come from.
    pub scalar_sets: &'static [&'static [&'static str]],
}

impl TypeSchema {
    /// Look up `key`. Keys in `scalar_sets` resolve to [`FieldKind::Scalar`].
    pub fn field(&self, key: &str) -> Option<FieldKind> {
        if let Some(field) = self.fields.iter().find(|f| f.key == key) {
            return Some(field.kind);
        }
        self.scalar_sets
            .iter()
            .any(|set| set.contains(&key))
            .then_some(FieldKind::Scalar)
    }
}

const fn scalar(key: &'static str) -> Field {
    Field { key, kind: FieldKind::Scalar }
}

const fn scalars(key: &'static str) -> Field {
    Field { key, kind: FieldKind::ScalarList }
}

const fn section(key: &'static str, schema: &'static TypeSchema) -> Field {
    Field { key, kind: FieldKind::Struct(schema) }
}

const fn list(key: &'static str, schema: &'static TypeSchema) -> Field {
    Field { key, kind: FieldKind::StructList(schema) }
}

macro_rules! schema {
    ($name:literal, &[$($field:expr),* $(,)?] $(,)?) => {
        TypeSchema { name: $name, fields: &[$($field),*], scalar_sets: &[] }
    };
}

/// The document root.
pub static CONFIG: TypeSchema = schema!(
    "config",
    &[
        section("ignition", &IGNITION),
        section("storage", &STORAGE),
        section("systemd", &SYSTEMD),
        section("networkd", &NETWORKD),
        section("passwd", &PASSWD),
        section("etcd", &ETCD),
        section("flannel", &FLANNEL),
    ],
);

pub static IGNITION: TypeSchema = schema!("ignition", &[section("config", &IGNITION_CONFIG)]);

pub static IGNITION_CONFIG: TypeSchema = schema!(
    "ignition.config",
    &[list("append", &CONFIG_REFERENCE), section("replace", &CONFIG_REFERENCE)],
);

pub static CONFIG_REFERENCE: TypeSchema = schema!(
    "config_reference",
    &[scalar("source"), section("verification", &VERIFICATION)],
);

pub static VERIFICATION: TypeSchema = schema!("verification", &[section("hash", &HASH)]);

pub static HASH: TypeSchema = schema!("hash", &[scalar("function"), scalar("sum")]);

pub static STORAGE: TypeSchema = schema!(
    "storage",
    &[
        list("disks", &DISK),
        list("raid", &RAID),
        list("filesystems", &FILESYSTEM),
        list("files", &FILE),
    ],
);

pub static DISK: TypeSchema = schema!(
    "disk",
    &[scalar("device"), scalar("wipe_table"), list("partitions", &PARTITION)],
);

pub static PARTITION: TypeSchema = schema!(
    "partition",
    &[
        scalar("label"),
        scalar("number"),
        scalar("size"),
        scalar("start"),
        scalar("guid"),
        scalar("type_guid"),
    ],
);

pub static RAID: TypeSchema = schema!(
    "raid",
    &[scalar("name"), scalar("level"), scalars("devices"), scalar("spares")],
);

pub static FILESYSTEM: TypeSchema = schema!(
    "filesystem",
    &[scalar("name"), section("mount", &MOUNT), scalar("path")],
);

pub static MOUNT: TypeSchema = schema!(
    "mount",
    &[scalar("device"), scalar("format"), section("create", &CREATE)],
);

pub static CREATE: TypeSchema = schema!("create", &[scalar("force"), scalars("options")]);

pub static FILE: TypeSchema = schema!(
    "file",
    &[
        scalar("filesystem"),
        scalar("path"),
        section("contents", &FILE_CONTENTS),
        scalar("mode"),
        section("user", &FILE_OWNER),
        section("group", &FILE_OWNER),
    ],
);

pub static FILE_CONTENTS: TypeSchema = schema!(
    "file_contents",
    &[scalar("inline"), section("remote", &REMOTE)],
);

pub static REMOTE: TypeSchema = schema!(
    "remote",
    &[scalar("url"), scalar("compression"), section("verification", &VERIFICATION)],
);

pub static FILE_OWNER: TypeSchema = schema!("file_owner", &[scalar("id"), scalar("name")]);

pub static SYSTEMD: TypeSchema = schema!("systemd", &[list("units", &SYSTEMD_UNIT)]);

pub static SYSTEMD_UNIT: TypeSchema = schema!(
    "systemd_unit",
    &[
        scalar("name"),
        scalar("enable"),
        scalar("enabled"),
        scalar("mask"),
        scalar("contents"),
        list("dropins", &SYSTEMD_DROPIN),
    ],
);

pub static SYSTEMD_DROPIN: TypeSchema = schema!("systemd_dropin", &[scalar("name"), scalar("contents")]);

pub static NETWORKD: TypeSchema = schema!("networkd", &[list("units", &NETWORKD_UNIT)]);

pub static NETWORKD_UNIT: TypeSchema = schema!("networkd_unit", &[scalar("name"), scalar("contents")]);

pub static PASSWD: TypeSchema = schema!("passwd", &[list("users", &USER), list("groups", &GROUP)]);

pub static USER: TypeSchema = schema!(
    "user",
    &[
        scalar("name"),
        scalar("password_hash"),
        scalars("ssh_authorized_keys"),
        section("create", &USER_CREATE),
    ],
);

pub static USER_CREATE: TypeSchema = schema!(
    "user_create",
    &[
        scalar("uid"),
        scalar("gecos"),
        scalar("home_dir"),
        scalar("no_create_home"),
        scalar("primary_group"),
        scalars("groups"),
        scalar("no_user_group"),
        scalar("system"),
        scalar("no_log_init"),
        scalar("shell"),
    ],
);

pub static GROUP: TypeSchema = schema!(
    "group",
    &[scalar("name"), scalar("gid"), scalar("password_hash"), scalar("system")],
);

/// `etcd`: `version` plus every key of every etcd option schema.
pub static ETCD: TypeSchema = TypeSchema {
    name: "etcd",
    fields: &[scalar("version")],
    scalar_sets: &[Etcd3_1::KEYS, Etcd2::KEYS],
};

/// `flannel`: `version` plus every key of every flannel option schema.
pub static FLANNEL: TypeSchema = TypeSchema {
    name: "flannel",
    fields: &[scalar("version")],
    scalar_sets: &[Flannel0_7::KEYS],
};
