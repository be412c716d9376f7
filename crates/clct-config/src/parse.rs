//! Decoding input bytes into a [`Document`].

use clct_core::{NodeTree, PositionIndex, Report, StructuralError};

use crate::keywords;
use crate::model::Config;
use crate::unrecognized::has_unrecognized_keys;

/// A decoded config: the typed model plus the generic tree it came from.
#[derive(Debug, Clone)]
pub struct Document {
    /// Typed intermediate model.
    pub config: Config,
    /// Generic tree and position index of the same input.
    pub tree: NodeTree,
}

impl Document {
    /// Source positions of the input.
    pub fn positions(&self) -> &PositionIndex {
        &self.tree.positions
    }

    /// Run the unrecognized-keyword check over the whole document.
    pub fn check_keywords(&self) -> (bool, Report) {
        has_unrecognized_keys(&self.tree.root, &keywords::CONFIG, &self.tree.positions)
    }
}

/// Decode `input` into a [`Document`].
///
/// An empty input is not an error: it yields the default config and a
/// single `document is empty` warning.
///
/// # Errors
///
/// Returns [`StructuralError`] when the input is not UTF-8, is not YAML, or
/// does not fit the schema's types (for example a string where a list is
/// declared).
pub fn parse(input: &[u8]) -> Result<(Document, Report), StructuralError> {
    let tree = NodeTree::decode(input)?;
    if tree.is_empty() {
        tracing::debug!("input document is empty");
        let document = Document { config: Config::default(), tree };
        return Ok((document, Report::warning("document is empty")));
    }

    let config: Config = serde_yaml::from_slice(input).map_err(|e| StructuralError::from_yaml(&e))?;
    tracing::debug!(positions = tree.positions.len(), "decoded input document");
    Ok((Document { config, tree }, Report::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileMode, NetworkdUnit};
    use clct_core::Severity;

    #[test]
    fn empty_input_warns() {
        for input in ["", "\n", "# only a comment\n"] {
            let (doc, report) = parse(input.as_bytes()).unwrap();
            assert_eq!(doc.config, Config::default());
            assert_eq!(report.len(), 1, "{input:?}");
            assert_eq!(report.entries()[0].severity, Severity::Warning);
            assert_eq!(report.to_string(), "warning: document is empty\n");
        }
    }

    #[test]
    fn invalid_values_survive_parsing() {
        let (doc, report) =
            parse(b"networkd:\n  units:\n    - name: bad.blah\n      contents: not valid\n").unwrap();
        assert!(report.is_empty());
        assert_eq!(
            doc.config.networkd.units,
            vec![NetworkdUnit { name: "bad.blah".into(), contents: Some("not valid".into()) }]
        );
    }

    #[test]
    fn type_mismatch_is_structural_with_position() {
        let err = parse(b"storage:\n  disks: not-a-list\n").unwrap_err();
        assert!(matches!(err, StructuralError::Decode { .. }));
        assert_eq!(err.position().map(|p| p.line), Some(2));
    }

    #[test]
    fn scalar_root_is_structural() {
        assert!(parse(b"just a string\n").is_err());
    }

    #[test]
    fn parses_storage_files() {
        let (doc, _) = parse(
            b"storage:\n  files:\n    - path: /opt/file1\n      filesystem: root\n      mode: 0o644\n      contents:\n        inline: file1\n",
        )
        .unwrap();
        let file = &doc.config.storage.files[0];
        assert_eq!(file.mode, Some(FileMode(0o644)));
        assert_eq!(file.contents.inline.as_deref(), Some("file1"));
    }

    #[test]
    fn check_keywords_reports_unknown_keys() {
        let (doc, _) = parse(b"foo: bar\n").unwrap();
        let (found, report) = doc.check_keywords();
        assert!(found);
        assert_eq!(report.entries()[0].message, "unrecognized keyword: foo");
    }
}
