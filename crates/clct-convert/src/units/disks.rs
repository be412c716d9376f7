use clct_config::model::Partition;
use clct_config::Config;
use clct_core::{field_path, parse_dimension, FieldPath, PositionIndex, Report};
use clct_ignition as ignition;

use super::{dropped, error_at, ConversionUnit};

/// Well-known partition type names and the GPT type GUIDs they stand for.
pub const TYPE_GUID_ALIASES: &[(&str, &str)] = &[
    ("raid_containing_root", "be9067b9-ea49-4f15-b4f6-f36f8c9e1818"),
    ("linux_filesystem_data", "0fc63daf-8483-4772-8e79-3d69d8477de4"),
    ("swap_partition", "0657fd6d-a4ab-43c4-84e5-0933c84b4f4f"),
    ("raid_partition", "a19d880f-05fc-4d3b-a006-743f0f84911e"),
];

/// `storage.disks`, with partition sizes normalized to MiB.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerDisks;

impl ConversionUnit for LowerDisks {
    fn name(&self) -> &'static str {
        "disks"
    }

    fn lower(&self, input: &Config, positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        let mut report = Report::new();
        for (i, disk) in input.storage.disks.iter().enumerate() {
            let mut lowered = ignition::Disk {
                device: disk.device.clone(),
                wipe_table: disk.wipe_table,
                partitions: Vec::with_capacity(disk.partitions.len()),
            };
            for (j, partition) in disk.partitions.iter().enumerate() {
                let path = field_path!["storage", "disks", i, "partitions", j];
                match lower_partition(partition, &path, positions) {
                    Ok(part) => lowered.partitions.push(part),
                    Err(err) => report.merge(dropped(self.name(), &path, err)),
                }
            }
            out.storage.disks.push(lowered);
        }
        report
    }
}

fn lower_partition(
    partition: &Partition,
    path: &FieldPath,
    positions: &PositionIndex,
) -> Result<ignition::Partition, Report> {
    let dimension = |key: &str, raw: &Option<String>| -> Result<Option<u64>, Report> {
        let Some(raw) = raw else {
            return Ok(None);
        };
        parse_dimension(raw).map_err(|err| error_at(err, &path.join(key), positions))
    };
    let size_mib = dimension("size", &partition.size)?;
    let start_mib = dimension("start", &partition.start)?;

    let type_guid = partition.type_guid.as_deref().map(|guid| {
        TYPE_GUID_ALIASES
            .iter()
            .find(|(alias, _)| *alias == guid)
            .map_or(guid, |&(_, expanded)| expanded)
            .to_string()
    });

    Ok(ignition::Partition {
        label: partition.label.clone(),
        number: partition.number,
        size_mib,
        start_mib,
        guid: partition.guid.clone(),
        type_guid,
    })
}
