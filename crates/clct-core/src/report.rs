//! # Diagnostic Reports
//!
//! A [`Report`] is an ordered list of severity-tagged [`Entry`] values.
//! Every stage of the transpiler returns one alongside its result, and
//! reports are merged upward by concatenation.
//!
//! ## Invariants
//!
//! - Entry order is discovery order. [`Report::merge`] appends, so merging
//!   is associative but not commutative. Callers rely on that order.
//! - A report never aborts anything on its own. Whether an
//!   [`Severity::Error`] entry is fatal is decided by the consumer.
//! - Position and path attribution are optional decoration added after an
//!   entry is created; they never change its severity or message.

use std::fmt;

use crate::node::Position;
use crate::path::FieldPath;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Recoverable; conversion output is still complete.
    Warning,
    /// The owning item or family was excluded from the output.
    Error,
}

impl Severity {
    /// Lowercase label used when rendering entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Severity of the diagnostic.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Source location of the offending value, when known.
    pub position: Option<Position>,
    /// Structural address of the offending value, when known.
    pub path: Option<FieldPath>,
}

impl Entry {
    /// An entry with no attribution.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            position: None,
            path: None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(position) = self.position {
            write!(f, " at {position}")?;
        }
        Ok(())
    }
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<Entry>,
}

impl Report {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a single error or message into a one-entry report.
    pub fn from_error(err: impl fmt::Display, severity: Severity) -> Self {
        Self {
            entries: vec![Entry::new(severity, err.to_string())],
        }
    }

    /// One-entry warning report.
    pub fn warning(message: impl fmt::Display) -> Self {
        Self::from_error(message, Severity::Warning)
    }

    /// One-entry error report.
    pub fn error(message: impl fmt::Display) -> Self {
        Self::from_error(message, Severity::Error)
    }

    /// Append a single entry.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Append every entry of `other`, preserving both orders.
    pub fn merge(&mut self, other: Report) {
        self.entries.extend(other.entries);
    }

    /// Attach `position` to every entry that does not have one yet.
    pub fn add_position(&mut self, position: Position) {
        for entry in self.entries.iter_mut().filter(|e| e.position.is_none()) {
            entry.position = Some(position);
        }
    }

    /// Attach `path` to every entry that does not have one yet.
    pub fn add_path(&mut self, path: &FieldPath) {
        for entry in self.entries.iter_mut().filter(|e| e.path.is_none()) {
            entry.path = Some(path.clone());
        }
    }

    /// Attach `path`, and its position when `position` is known.
    ///
    /// This is the usual way to localize an item-scoped report: the path is
    /// always available, the position only when the index has it.
    pub fn locate(&mut self, path: &FieldPath, position: Option<Position>) {
        self.add_path(path);
        if let Some(position) = position {
            self.add_position(position);
        }
    }

    /// Builder form of [`Report::locate`].
    pub fn located(mut self, path: &FieldPath, position: Option<Position>) -> Self {
        self.locate(path, position);
        self
    }

    /// All entries in discovery order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Consume the report and return its entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true when any entry is an error.
    pub fn is_fatal(&self) -> bool {
        self.entries.iter().any(|e| e.severity == Severity::Error)
    }

    /// Iterate over error entries only.
    pub fn errors(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.severity == Severity::Error)
    }

    /// Iterate over warning entries only.
    pub fn warnings(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.severity == Severity::Warning)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl From<Entry> for Report {
    fn from(entry: Entry) -> Self {
        Self {
            entries: vec![entry],
        }
    }
}

impl Extend<Entry> for Report {
    fn extend<T: IntoIterator<Item = Entry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl FromIterator<Report> for Report {
    fn from_iter<T: IntoIterator<Item = Report>>(iter: T) -> Self {
        let mut merged = Report::new();
        for report in iter {
            merged.merge(report);
        }
        merged
    }
}

impl IntoIterator for Report {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_path;
    use proptest::prelude::*;

    #[test]
    fn empty_report_renders_empty_string() {
        assert_eq!(Report::new().to_string(), "");
        assert!(!Report::new().is_fatal());
    }

    #[test]
    fn from_error_wraps_one_entry() {
        let r = Report::from_error("document is empty", Severity::Warning);
        assert_eq!(r.len(), 1);
        assert_eq!(r.entries()[0].severity, Severity::Warning);
        assert_eq!(r.to_string(), "warning: document is empty\n");
        assert!(!r.is_fatal());
    }

    #[test]
    fn position_is_rendered_when_present() {
        let mut r = Report::error("invalid networkd unit extension");
        r.add_position(Position::new(4, 13));
        assert_eq!(
            r.to_string(),
            "error: invalid networkd unit extension at line 4, column 13\n"
        );
    }

    #[test]
    fn add_position_keeps_existing_positions() {
        let mut first = Report::error("a");
        first.add_position(Position::new(1, 1));
        let mut r = Report::new();
        r.merge(first);
        r.merge(Report::warning("b"));
        r.add_position(Position::new(9, 9));
        assert_eq!(r.entries()[0].position, Some(Position::new(1, 1)));
        assert_eq!(r.entries()[1].position, Some(Position::new(9, 9)));
    }

    #[test]
    fn locate_attaches_path_even_without_position() {
        let path = field_path!["storage", "files", 2usize, "contents"];
        let r = Report::error("bad url").located(&path, None);
        assert_eq!(r.entries()[0].path.as_ref(), Some(&path));
        assert_eq!(r.entries()[0].position, None);
    }

    #[test]
    fn merge_preserves_discovery_order() {
        let mut r = Report::warning("first");
        r.merge(Report::error("second"));
        r.merge(Report::warning("third"));
        let messages: Vec<_> = r.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
        assert!(r.is_fatal());
        assert_eq!(r.errors().count(), 1);
        assert_eq!(r.warnings().count(), 2);
    }

    fn report_strategy() -> impl Strategy<Value = Report> {
        prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 0..5).prop_map(|items| {
            items
                .into_iter()
                .map(|(msg, fatal)| {
                    let severity = if fatal { Severity::Error } else { Severity::Warning };
                    Report::from_error(msg, severity)
                })
                .collect()
        })
    }

    proptest! {
        /// Merging is associative: (a + b) + c == a + (b + c).
        #[test]
        fn merge_is_associative(a in report_strategy(), b in report_strategy(), c in report_strategy()) {
            let mut left = a.clone();
            left.merge(b.clone());
            left.merge(c.clone());

            let mut bc = b;
            bc.merge(c);
            let mut right = a;
            right.merge(bc);

            prop_assert_eq!(left, right);
        }

        /// Merging never drops or reorders entries.
        #[test]
        fn merge_is_concatenation(a in report_strategy(), b in report_strategy()) {
            let mut merged = a.clone();
            merged.merge(b.clone());
            let expected: Vec<Entry> = a.into_iter().chain(b).collect();
            prop_assert_eq!(merged.into_entries(), expected);
        }
    }
}
