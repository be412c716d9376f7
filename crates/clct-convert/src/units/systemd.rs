use clct_config::Config;
use clct_core::{field_path, PositionIndex, Report};
use clct_ignition as ignition;

use super::{dropped, error_at, ConversionUnit};

/// Unit types systemd accepts, by file extension.
const UNIT_EXTENSIONS: &[&str] = &[
    ".service",
    ".socket",
    ".device",
    ".mount",
    ".automount",
    ".swap",
    ".target",
    ".path",
    ".timer",
    ".snapshot",
    ".slice",
    ".scope",
];

/// User-declared `systemd.units`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerSystemd;

impl ConversionUnit for LowerSystemd {
    fn name(&self) -> &'static str {
        "systemd"
    }

    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        let mut report = Report::new();
        for (i, unit) in input.systemd.units.iter().enumerate() {
            if !UNIT_EXTENSIONS.iter().any(|ext| unit.name.ends_with(ext)) {
                let path = field_path!["systemd", "units", i, "name"];
                let err = error_at("invalid systemd unit extension", &path, positions);
                report.merge(dropped(self.name(), &path, err));
                continue;
            }
            out.systemd.units.push(ignition::SystemdUnit {
                name: unit.name.clone(),
                enabled: unit.enabled.or(unit.enable.then_some(true)),
                mask: unit.mask,
                contents: unit.contents.clone(),
                dropins: unit
                    .dropins
                    .iter()
                    .map(|dropin| ignition::SystemdUnitDropIn {
                        name: dropin.name.clone(),
                        contents: dropin.contents.clone(),
                    })
                    .collect(),
            });
        }
        report
    }
}
