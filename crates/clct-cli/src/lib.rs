//! # clct-cli: The `ct` Command
//!
//! Reads a Container Linux Config from a file or stdin, prints every
//! diagnostic to stderr, and writes the Ignition config as JSON to a file
//! or stdout.
//!
//! ## Exit Status
//!
//! `ct` fails (exit 1) when the input cannot be read or decoded, when any
//! diagnostic has error severity, when the input contains keys no section
//! declares, or when the output cannot be written. Warnings alone never
//! fail a run.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; everything else is here so it can
//!   be tested without spawning a process.
//! - No conversion logic. Decoding and lowering belong to `clct-config` and
//!   `clct-convert`.

pub mod transpile;

pub use transpile::{run_transpile, transpile, TranspileArgs, Transpiled};
