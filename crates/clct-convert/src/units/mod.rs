//! # Conversion Units
//!
//! One unit per top-level concern of the target document. [`units()`] is the
//! single place the registration order is written down; the driver runs
//! units and merges their reports in exactly this order.
//!
//! | # | Unit | Owns |
//! |---|------|------|
//! | 1 | `ignition` | `ignition.config.append`, `ignition.config.replace` |
//! | 2 | `disks` | `storage.disks` |
//! | 3 | `raid` | `storage.raid` |
//! | 4 | `filesystems` | `storage.filesystems` |
//! | 5 | `files` | `storage.files` |
//! | 6 | `systemd` | user-declared entries of `systemd.units` |
//! | 7 | `networkd` | `networkd.units` |
//! | 8 | `passwd` | `passwd.users`, `passwd.groups` |
//! | 9 | `etcd` | the `etcd-member.service` entry of `systemd.units` |
//! | 10 | `flannel` | the `flanneld.service` entry of `systemd.units` |

use std::fmt;

use clct_config::model::FamilyBlock;
use clct_config::{resolve, Config, FamilyOptions};
use clct_core::{FieldPath, PositionIndex, Report};
use clct_ignition as ignition;

use crate::dropin::{enabled_unit_with_dropin, service_contents};

mod disks;
mod etcd;
mod files;
mod filesystems;
mod flannel;
mod ignition_config;
mod networkd;
mod passwd;
mod raid;
mod systemd;

pub use disks::{LowerDisks, TYPE_GUID_ALIASES};
pub use etcd::LowerEtcd;
pub use files::LowerFiles;
pub use filesystems::LowerFilesystems;
pub use flannel::LowerFlannel;
pub use ignition_config::LowerIgnition;
pub use networkd::LowerNetworkd;
pub use passwd::LowerPasswd;
pub use raid::LowerRaid;
pub use systemd::LowerSystemd;

/// A field-lowering step.
///
/// A unit reads any part of the input but writes only the part of the
/// target it owns. It never fails as a whole: problems are returned as
/// report entries and the offending items are left out.
pub trait ConversionUnit: Send + Sync {
    /// Short name, used in logs.
    fn name(&self) -> &'static str;

    /// Lower the owned part of `input` into `out`.
    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report;
}

impl fmt::Debug for dyn ConversionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConversionUnit").field(&self.name()).finish()
    }
}

/// Every unit, in registration order.
pub fn units() -> Vec<Box<dyn ConversionUnit>> {
    vec![
        Box::new(LowerIgnition),
        Box::new(LowerDisks),
        Box::new(LowerRaid),
        Box::new(LowerFilesystems),
        Box::new(LowerFiles),
        Box::new(LowerSystemd),
        Box::new(LowerNetworkd),
        Box::new(LowerPasswd),
        Box::new(LowerEtcd),
        Box::new(LowerFlannel),
    ]
}

/// An error about the value at `path`, positioned when the index knows it.
fn error_at(err: impl fmt::Display, path: &FieldPath, positions: &PositionIndex) -> Report {
    Report::error(err).located(path, positions.value(path))
}

/// Log and report a dropped collection item.
fn dropped(unit: &'static str, path: &FieldPath, report: Report) -> Report {
    tracing::debug!(unit, path = %path, entries = report.len(), "dropped item");
    report
}

/// Where a daemon family lands in the target.
struct FamilyUnit {
    unit: &'static str,
    dropin: &'static str,
    image_tag: &'static str,
}

/// Resolve a family block and append its systemd unit when it resolves.
fn lower_family<O: FamilyOptions>(
    target: &FamilyUnit,
    block: Option<&FamilyBlock>,
    positions: &PositionIndex,
    out: &mut ignition::Config,
) -> Report {
    let Some(block) = block else {
        return Report::new();
    };
    let resolution = resolve::<O>(block, positions);
    let Some(resolved) = resolution.resolved else {
        tracing::debug!(family = %O::FAMILY, "family dropped");
        return resolution.report;
    };

    let mut vars = resolved.options.env_vars();
    vars.push((target.image_tag, format!("v{}", resolved.version)));
    out.systemd.units.push(enabled_unit_with_dropin(
        target.unit,
        target.dropin,
        service_contents(&vars),
    ));
    resolution.report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_order_is_fixed() {
        let names: Vec<_> = units().iter().map(|u| u.name()).collect();
        assert_eq!(
            names,
            [
                "ignition",
                "disks",
                "raid",
                "filesystems",
                "files",
                "systemd",
                "networkd",
                "passwd",
                "etcd",
                "flannel"
            ]
        );
    }

    #[test]
    fn units_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>(_: &T) {}
        assert_send_sync(&units());
    }
}
