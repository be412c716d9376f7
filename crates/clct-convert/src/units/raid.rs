use clct_config::Config;
use clct_core::{PositionIndex, Report};
use clct_ignition as ignition;

use super::ConversionUnit;

/// `storage.raid`, copied through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerRaid;

impl ConversionUnit for LowerRaid {
    fn name(&self) -> &'static str {
        "raid"
    }

    fn lower(&self, input: &Config, _positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        out.storage.raid.extend(input.storage.raid.iter().map(|array| ignition::Raid {
            name: array.name.clone(),
            level: array.level.clone(),
            devices: array.devices.clone(),
            spares: array.spares,
        }));
        Report::new()
    }
}
