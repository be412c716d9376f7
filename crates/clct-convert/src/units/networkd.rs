use clct_config::Config;
use clct_core::{field_path, PositionIndex, Report};
use clct_ignition as ignition;

use super::{dropped, error_at, ConversionUnit};

const UNIT_EXTENSIONS: &[&str] = &[".link", ".netdev", ".network"];

/// `networkd.units`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerNetworkd;

impl ConversionUnit for LowerNetworkd {
    fn name(&self) -> &'static str {
        "networkd"
    }

    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        let mut report = Report::new();
        for (i, unit) in input.networkd.units.iter().enumerate() {
            if !UNIT_EXTENSIONS.iter().any(|ext| unit.name.ends_with(ext)) {
                let path = field_path!["networkd", "units", i, "name"];
                let err = error_at("invalid networkd unit extension", &path, positions);
                report.merge(dropped(self.name(), &path, err));
                continue;
            }
            out.networkd.units.push(ignition::NetworkdUnit {
                name: unit.name.clone(),
                contents: unit.contents.clone(),
            });
        }
        report
    }
}
