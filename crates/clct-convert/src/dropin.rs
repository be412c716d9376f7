//! Systemd drop-ins that configure a daemon through environment variables.

use std::fmt::Write as _;

use clct_ignition::{SystemdUnit, SystemdUnitDropIn};

/// Render a `[Service]` section with one `Environment=` line per variable.
pub fn service_contents<K: AsRef<str>, V: AsRef<str>>(vars: &[(K, V)]) -> String {
    let mut out = String::from("[Service]\n");
    for (key, value) in vars {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Environment=\"{}={}\"", key.as_ref(), value.as_ref());
    }
    out
}

/// An enabled unit carrying a single drop-in.
pub fn enabled_unit_with_dropin(unit: &str, dropin: &str, contents: String) -> SystemdUnit {
    SystemdUnit {
        name: unit.to_string(),
        enabled: Some(true),
        dropins: vec![SystemdUnitDropIn {
            name: dropin.to_string(),
            contents: Some(contents),
        }],
        ..SystemdUnit::default()
    }
}
