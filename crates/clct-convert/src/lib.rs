//! # clct-convert: Lowering a Config Into an Ignition Document
//!
//! The conversion pipeline. A [`Converter`] owns the ordered list of
//! [`ConversionUnit`]s built by [`units()`]; each unit reads the whole
//! intermediate model and fills in the part of the target document it
//! owns.
//!
//! ## Invariants
//!
//! - The target is created empty and stamped with
//!   [`clct_ignition::TARGET_VERSION`] before any unit runs.
//! - Unit reports are merged in registration order.
//! - A failing collection item is diagnosed and dropped; its siblings are
//!   kept in input order. A failing daemon family drops only that family.
//! - Units own disjoint parts of the target. `systemd.units` is shared
//!   append-only: each unit only appends its own entries.
//!
//! ## Crate Policy
//!
//! - No panics on any input the config decoder accepts.
//! - No network I/O. Remote contents are referenced, never fetched.

pub mod dropin;
pub mod driver;
pub mod source;
pub mod units;

pub use driver::{convert, Converter};
pub use source::{ContentReference, SourceError};
pub use units::{units, ConversionUnit};
