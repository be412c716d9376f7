//! # Node Tree: Decoded Input With Source Positions
//!
//! The transpiler decodes its input twice: once into the generic
//! `serde_yaml::Value` tree (for keyword checks) and once into the typed
//! intermediate model. Neither carries source locations, so this module
//! also replays the document through the `saphyr-parser` event stream and
//! records where every key and value starts, keyed by [`FieldPath`].
//!
//! ## Invariants
//!
//! - The position index is best effort. If the event stream cannot be
//!   built the index is empty and diagnostics simply carry no position.
//! - Lines and columns are 1-based.

use std::collections::HashMap;
use std::fmt;

use saphyr_parser::{Event, Parser};

use crate::error::StructuralError;
use crate::path::FieldPath;

/// A 1-based line/column location in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// Create a position from 1-based coordinates.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Source positions of keys and values, keyed by their [`FieldPath`].
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    values: HashMap<FieldPath, Position>,
    keys: HashMap<FieldPath, Position>,
}

impl PositionIndex {
    /// An index that knows no positions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index by walking the YAML event stream of `source`.
    ///
    /// Only the first document of a stream is indexed. Anchored aliases are
    /// recorded at the alias site. Non-scalar mapping keys and everything
    /// beneath them are skipped.
    pub fn build(source: &str) -> Result<Self, saphyr_parser::ScanError> {
        let mut index = Self::default();
        let mut stack: Vec<Frame> = Vec::new();
        for item in Parser::new_from_str(source) {
            let (event, span) = item?;
            let position = Position::new(span.start.line(), span.start.col() + 1);

            match event {
                Event::DocumentEnd => break,
                Event::Scalar(value, ..) => match claim(&mut stack) {
                    Claim::Key(frame) => {
                        let key = value.to_string();
                        index.keys.insert(frame.path.join(key.as_str()), position);
                        frame.key = KeyState::Named(key);
                    }
                    Claim::Value(path) => {
                        index.values.insert(path, position);
                    }
                    Claim::Ignored => {}
                },
                Event::Alias(..) => match claim(&mut stack) {
                    Claim::Key(frame) => frame.key = KeyState::Complex,
                    Claim::Value(path) => {
                        index.values.insert(path, position);
                    }
                    Claim::Ignored => {}
                },
                Event::MappingStart(..) | Event::SequenceStart(..) => {
                    let is_map = matches!(event, Event::MappingStart(..));
                    let frame = match claim(&mut stack) {
                        Claim::Value(path) => {
                            index.values.insert(path.clone(), position);
                            if is_map {
                                Frame::map(path)
                            } else {
                                Frame::seq(path)
                            }
                        }
                        Claim::Key(frame) => {
                            frame.key = KeyState::Complex;
                            Frame::ignored()
                        }
                        Claim::Ignored => Frame::ignored(),
                    };
                    stack.push(frame);
                }
                Event::MappingEnd | Event::SequenceEnd => {
                    stack.pop();
                }
                _ => {}
            }
        }

        Ok(index)
    }

    /// Position of the value at `path`.
    pub fn value(&self, path: &FieldPath) -> Option<Position> {
        self.values.get(path).copied()
    }

    /// Position of the mapping key that introduces `path`.
    pub fn key(&self, path: &FieldPath) -> Option<Position> {
        self.keys.get(path).copied()
    }

    /// Number of indexed values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no value positions are known.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug)]
enum KeyState {
    Awaiting,
    Named(String),
    Complex,
}

#[derive(Debug)]
enum FrameKind {
    Map,
    Seq { next: usize },
    Ignored,
}

#[derive(Debug)]
struct Frame {
    path: FieldPath,
    kind: FrameKind,
    key: KeyState,
}

impl Frame {
    fn map(path: FieldPath) -> Self {
        Self { path, kind: FrameKind::Map, key: KeyState::Awaiting }
    }

    fn seq(path: FieldPath) -> Self {
        Self { path, kind: FrameKind::Seq { next: 0 }, key: KeyState::Awaiting }
    }

    fn ignored() -> Self {
        Self { path: FieldPath::root(), kind: FrameKind::Ignored, key: KeyState::Awaiting }
    }
}

enum Claim<'a> {
    /// The next node is a mapping key.
    Key(&'a mut Frame),
    /// The next node is a value at this path.
    Value(FieldPath),
    /// The next node lives under something that is not indexed.
    Ignored,
}

/// Decide what role the next node plays given the innermost open container.
fn claim(stack: &mut [Frame]) -> Claim<'_> {
    let Some(frame) = stack.last_mut() else {
        return Claim::Value(FieldPath::root());
    };
    match frame.kind {
        FrameKind::Ignored => Claim::Ignored,
        FrameKind::Seq { ref mut next } => {
            let path = frame.path.join(*next);
            *next += 1;
            Claim::Value(path)
        }
        FrameKind::Map => match std::mem::replace(&mut frame.key, KeyState::Awaiting) {
            KeyState::Awaiting => Claim::Key(frame),
            KeyState::Named(key) => Claim::Value(frame.path.join(key)),
            KeyState::Complex => Claim::Ignored,
        },
    }
}

/// The generic decode of a document together with its position index.
#[derive(Debug, Clone)]
pub struct NodeTree {
    /// Generic mapping/sequence/scalar tree.
    pub root: serde_yaml::Value,
    /// Where each key and value of `root` starts in the source.
    pub positions: PositionIndex,
}

impl NodeTree {
    /// Decode `input` into a generic tree and index its positions.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError`] if the input is not UTF-8 or not YAML.
    pub fn decode(input: &[u8]) -> Result<Self, StructuralError> {
        let source = std::str::from_utf8(input)?;
        let root: serde_yaml::Value =
            serde_yaml::from_str(source).map_err(|e| StructuralError::from_yaml(&e))?;
        let positions = PositionIndex::build(source).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "position index unavailable; diagnostics will be unpositioned");
            PositionIndex::empty()
        });
        Ok(Self { root, positions })
    }

    /// Returns true when the document has no content at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_null()
    }
}
