//! # clct-core: Foundational Types for the Config Transpiler
//!
//! This crate is the leaf of the transpiler workspace. It defines the types
//! every other crate shares: the diagnostic [`Report`], [`FieldPath`]
//! addresses, source [`Position`]s, the decoded [`NodeTree`], semantic
//! [`Version`]s, and the MiB [`SizeValue`] normalizer.
//!
//! ## Key Design Principles
//!
//! 1. **Reports are values, not control flow.** Every operation that can
//!    find a problem returns a [`Report`] next to its result. Nothing in this
//!    crate aborts on a diagnostic; the consumer decides what is fatal.
//!
//! 2. **Positions are decoration.** A [`Position`] is attached to a report
//!    entry only when the [`PositionIndex`] knows the location of the
//!    offending field. Validation logic never depends on it.
//!
//! 3. **Exact sizes.** [`SizeValue`] never rounds. A magnitude that is not a
//!    whole number of MiB is rejected.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `clct-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod dimension;
pub mod error;
pub mod node;
pub mod path;
pub mod report;
pub mod version;

pub use dimension::{parse_dimension, SizeValue, MIB};
pub use error::{DimensionError, StructuralError, VersionError};
pub use node::{NodeTree, Position, PositionIndex};
pub use path::{FieldPath, PathSegment};
pub use report::{Entry, Report, Severity};
pub use version::Version;
