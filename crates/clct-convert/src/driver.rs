//! The conversion driver: runs every unit over one document.

use clct_config::Document;
use clct_core::Report;
use clct_ignition::{self as ignition, TARGET_VERSION};

use crate::units::{units, ConversionUnit};

/// An ordered set of conversion units.
#[derive(Debug)]
pub struct Converter {
    units: Vec<Box<dyn ConversionUnit>>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// A converter running every registered unit.
    pub fn new() -> Self {
        Self::with_units(units())
    }

    /// A converter running exactly `units`, in the given order.
    pub fn with_units(units: Vec<Box<dyn ConversionUnit>>) -> Self {
        Self { units }
    }

    /// Names of the units, in run order.
    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|unit| unit.name()).collect()
    }

    /// Lower `document` into a target config.
    ///
    /// Never fails. Problems are in the returned report, and the output
    /// holds everything that could be lowered.
    pub fn convert(&self, document: &Document) -> (ignition::Config, Report) {
        let mut out = ignition::Config::stamped(TARGET_VERSION);
        let mut report = Report::new();
        for unit in &self.units {
            let unit_report = unit.lower(&document.config, document.positions(), &mut out);
            if !unit_report.is_empty() {
                tracing::debug!(
                    unit = unit.name(),
                    errors = unit_report.errors().count(),
                    warnings = unit_report.warnings().count(),
                    "unit reported"
                );
            }
            report.merge(unit_report);
        }
        tracing::info!(entries = report.len(), fatal = report.is_fatal(), "conversion finished");
        (out, report)
    }
}

/// Lower `document` with every registered unit.
pub fn convert(document: &Document) -> (ignition::Config, Report) {
    Converter::new().convert(document)
}
