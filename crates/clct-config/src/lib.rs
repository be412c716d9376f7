//! # clct-config: The Human-Authored Config Model
//!
//! Everything the transpiler knows about its *input*: the typed
//! intermediate model a Container Linux Config decodes into, the static
//! table of keywords each section declares, and the version-gated option
//! schemas of the etcd and flannel daemon families.
//!
//! ## Entry Points
//!
//! - [`parse`] decodes bytes into a [`Document`] (typed model, generic
//!   tree, position index) plus a [`Report`](clct_core::Report). Only a
//!   document that cannot be decoded at all is an error.
//! - [`has_unrecognized_keys`] walks the generic tree against
//!   [`keywords::CONFIG`] and warns about every key no section declares.
//! - [`families::resolve`] picks the option schema for a family block from
//!   its embedded version and decodes the options into it.
//!
//! ## Crate Policy
//!
//! - Depends only on `clct-core` internally.
//! - The intermediate model is read-only after [`parse`]; nothing in this
//!   crate builds target output.

pub mod error;
pub mod families;
pub mod keywords;
pub mod model;
pub mod parse;
pub mod unrecognized;

pub use error::ResolveError;
pub use families::{resolve, EtcdOptions, Family, FamilyOptions, FlannelOptions, Resolution, SchemaVariant};
pub use keywords::{Field, FieldKind, TypeSchema};
pub use model::Config;
pub use parse::{parse, Document};
pub use unrecognized::has_unrecognized_keys;
