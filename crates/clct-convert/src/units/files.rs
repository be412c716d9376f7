use clct_config::model::{File, FileOwner};
use clct_config::Config;
use clct_core::{field_path, FieldPath, PositionIndex, Report};
use clct_ignition as ignition;

use super::{dropped, error_at, ConversionUnit};
use crate::source::{ContentReference, SourceError};

/// `storage.files`, with contents turned into URL references.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerFiles;

impl ConversionUnit for LowerFiles {
    fn name(&self) -> &'static str {
        "files"
    }

    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        let mut report = Report::new();
        for (i, file) in input.storage.files.iter().enumerate() {
            let path = field_path!["storage", "files", i];
            match lower_file(file) {
                Ok(lowered) => out.storage.files.push(lowered),
                Err(err) => {
                    let at = error_path(&path, &err);
                    report.merge(dropped(self.name(), &path, error_at(err, &at, positions)));
                }
            }
        }
        report
    }
}

fn lower_file(file: &File) -> Result<ignition::StorageFile, SourceError> {
    let contents = ContentReference::from_contents(&file.contents)?.synthesize()?;
    Ok(ignition::StorageFile {
        node: ignition::Node {
            filesystem: file.filesystem.clone(),
            path: file.path.clone(),
            user: file.user.as_ref().map(|owner| {
                let (id, name) = owner_parts(owner);
                ignition::FileUser { id, name }
            }),
            group: file.group.as_ref().map(|owner| {
                let (id, name) = owner_parts(owner);
                ignition::FileGroup { id, name }
            }),
        },
        contents,
        mode: file.mode.map(|mode| mode.0),
    })
}

fn owner_parts(owner: &FileOwner) -> (Option<i64>, Option<String>) {
    (owner.id, owner.name.clone())
}

/// The most specific input location a contents error is about.
fn error_path(file: &FieldPath, err: &SourceError) -> FieldPath {
    let contents = file.join("contents");
    match err {
        SourceError::Conflicting => contents,
        SourceError::InvalidUrl { .. } | SourceError::UnsupportedScheme { .. } => {
            contents.join("remote").join("url")
        }
    }
}
