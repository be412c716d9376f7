use clct_config::model::Filesystem;
use clct_config::Config;
use clct_core::{field_path, PositionIndex, Report};
use clct_ignition as ignition;

use super::{dropped, error_at, ConversionUnit};

/// `storage.filesystems`. Each must name either a device to mount or an
/// existing path, never both.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerFilesystems;

impl ConversionUnit for LowerFilesystems {
    fn name(&self) -> &'static str {
        "filesystems"
    }

    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        let mut report = Report::new();
        for (i, filesystem) in input.storage.filesystems.iter().enumerate() {
            match lower_filesystem(filesystem) {
                Ok(lowered) => out.storage.filesystems.push(lowered),
                Err(message) => {
                    let path = field_path!["storage", "filesystems", i];
                    report.merge(dropped(self.name(), &path, error_at(message, &path, positions)));
                }
            }
        }
        report
    }
}

fn lower_filesystem(filesystem: &Filesystem) -> Result<ignition::Filesystem, &'static str> {
    match (&filesystem.mount, &filesystem.path) {
        (Some(_), Some(_)) => Err("filesystem must set either mount or path, not both"),
        (None, None) => Err("filesystem must set either mount or path"),
        (None, Some(path)) => Ok(ignition::Filesystem {
            name: filesystem.name.clone(),
            mount: None,
            path: Some(path.clone()),
        }),
        (Some(mount), None) => Ok(ignition::Filesystem {
            name: filesystem.name.clone(),
            mount: Some(ignition::FilesystemMount {
                device: mount.device.clone(),
                format: mount.format.clone(),
                create: mount.create.as_ref().map(|create| ignition::FilesystemCreate {
                    force: create.force,
                    options: create.options.clone(),
                }),
            }),
            path: None,
        }),
    }
}
