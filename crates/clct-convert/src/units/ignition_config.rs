use clct_config::Config;
use clct_core::{field_path, PositionIndex, Report};
use clct_ignition as ignition;

use super::{dropped, error_at, ConversionUnit};
use crate::source::config_reference;

/// `ignition.config.append` and `ignition.config.replace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerIgnition;

impl ConversionUnit for LowerIgnition {
    fn name(&self) -> &'static str {
        "ignition"
    }

    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        let mut report = Report::new();
        let config = &input.ignition.config;

        for (i, reference) in config.append.iter().enumerate() {
            match config_reference(reference) {
                Ok(lowered) => out.ignition.config.append.push(lowered),
                Err(err) => {
                    let path = field_path!["ignition", "config", "append", i, "source"];
                    report.merge(dropped(self.name(), &path, error_at(err, &path, positions)));
                }
            }
        }

        if let Some(reference) = &config.replace {
            match config_reference(reference) {
                Ok(lowered) => out.ignition.config.replace = Some(lowered),
                Err(err) => {
                    let path = field_path!["ignition", "config", "replace", "source"];
                    report.merge(dropped(self.name(), &path, error_at(err, &path, positions)));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clct_config::model::ConfigReference;

    fn reference(source: &str) -> ConfigReference {
        ConfigReference { source: source.into(), ..ConfigReference::default() }
    }

    #[test]
    fn bad_append_entry_keeps_siblings() {
        let mut input = Config::default();
        input.ignition.config.append = vec![
            reference("http://example.com/test1"),
            reference("::nope::"),
            reference("http://example.com/test2"),
        ];
        let mut out = ignition::Config::default();
        let report = LowerIgnition.lower(&input, &PositionIndex::empty(), &mut out);

        let sources: Vec<_> = out.ignition.config.append.iter().map(|r| r.source.to_string()).collect();
        assert_eq!(sources, ["http://example.com/test1", "http://example.com/test2"]);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(
            report.entries()[0].path.as_ref().map(ToString::to_string).as_deref(),
            Some("ignition.config.append[1].source")
        );
    }

    #[test]
    fn replace_is_lowered() {
        let mut input = Config::default();
        input.ignition.config.replace = Some(reference("http://example.com/test3"));
        let mut out = ignition::Config::default();
        let report = LowerIgnition.lower(&input, &PositionIndex::empty(), &mut out);
        assert!(report.is_empty());
        let replace = out.ignition.config.replace.unwrap();
        assert_eq!(replace.source.path, "/test3");
    }
}
