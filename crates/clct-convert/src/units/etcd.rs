use clct_config::{Config, EtcdOptions};
use clct_core::{PositionIndex, Report};
use clct_ignition as ignition;

use super::{lower_family, ConversionUnit, FamilyUnit};

const ETCD: FamilyUnit = FamilyUnit {
    unit: "etcd-member.service",
    dropin: "20-clct-etcd-member.conf",
    image_tag: "ETCD_IMAGE_TAG",
};

/// The `etcd` block, as a drop-in on `etcd-member.service`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerEtcd;

impl ConversionUnit for LowerEtcd {
    fn name(&self) -> &'static str {
        "etcd"
    }

    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        lower_family::<EtcdOptions>(&ETCD, input.etcd.as_ref(), positions, out)
    }
}
