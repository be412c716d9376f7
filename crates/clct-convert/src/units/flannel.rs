use clct_config::{Config, FlannelOptions};
use clct_core::{PositionIndex, Report};
use clct_ignition as ignition;

use super::{lower_family, ConversionUnit, FamilyUnit};

const FLANNEL: FamilyUnit = FamilyUnit {
    unit: "flanneld.service",
    dropin: "20-clct-flannel.conf",
    image_tag: "FLANNEL_IMAGE_TAG",
};

/// The `flannel` block, as a drop-in on `flanneld.service`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerFlannel;

impl ConversionUnit for LowerFlannel {
    fn name(&self) -> &'static str {
        "flannel"
    }

    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        lower_family::<FlannelOptions>(&FLANNEL, input.flannel.as_ref(), positions, out)
    }
}
