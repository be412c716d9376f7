//! End-to-end lowering of decoded configs.

use clct_config::{parse, Config, Document};
use clct_convert::{convert, ConversionUnit, Converter};
use clct_core::{Position, PositionIndex, Report, Severity};
use clct_ignition as ignition;
use serde_json::json;

fn document(input: &str) -> Document {
    let (document, report) = parse(input.as_bytes()).unwrap();
    assert!(report.is_empty(), "{report}");
    document
}

fn lowered(input: &str) -> (serde_json::Value, Report) {
    let (out, report) = convert(&document(input));
    (serde_json::to_value(&out).unwrap(), report)
}

#[test]
fn complete_config() {
    let (out, report) = lowered(
        "ignition:
  config:
    append:
      - source: http://example.com/test1
        verification:
          hash:
            function: sha512
            sum: abc
storage:
  disks:
    - device: /dev/sda
      wipe_table: true
      partitions:
        - label: ROOT
          number: 7
          size: 100MB
          start: 50MB
          type_guid: raid_partition
  raid:
    - name: fast
      level: raid0
      devices: [/dev/sdc, /dev/sdd]
  filesystems:
    - name: filesystem1
      mount:
        device: /dev/disk/by-partlabel/ROOT
        format: btrfs
        create:
          force: true
          options: [-L, ROOT]
  files:
    - filesystem: filesystem1
      path: /opt/file1
      contents:
        inline: file1
      mode: 420
      user:
        id: 500
    - filesystem: filesystem1
      path: /opt/file2
      contents:
        remote:
          url: http://example.com/file2
          compression: gzip
systemd:
  units:
    - name: test1.service
      enable: true
      contents: test1 contents
networkd:
  units:
    - name: test.network
      contents: test config
passwd:
  users:
    - name: core
      ssh_authorized_keys: [key1]
      create:
        uid: 1010
        groups: [wheel]
  groups:
    - name: group 1
      gid: 1000
etcd:
  version: 3.0.15
  name: node1
",
    );
    assert!(report.is_empty(), "{report}");
    assert_eq!(
        out,
        json!({
            "ignition": {
                "version": "2.3.0",
                "config": {
                    "append": [{
                        "source": "http://example.com/test1",
                        "verification": { "hash": "sha512-abc" }
                    }]
                }
            },
            "storage": {
                "disks": [{
                    "device": "/dev/sda",
                    "wipeTable": true,
                    "partitions": [{
                        "label": "ROOT",
                        "number": 7,
                        "sizeMiB": 100,
                        "startMiB": 50,
                        "typeGuid": "a19d880f-05fc-4d3b-a006-743f0f84911e"
                    }]
                }],
                "raid": [{
                    "name": "fast",
                    "level": "raid0",
                    "devices": ["/dev/sdc", "/dev/sdd"]
                }],
                "filesystems": [{
                    "name": "filesystem1",
                    "mount": {
                        "device": "/dev/disk/by-partlabel/ROOT",
                        "format": "btrfs",
                        "create": { "force": true, "options": ["-L", "ROOT"] }
                    }
                }],
                "files": [
                    {
                        "filesystem": "filesystem1",
                        "path": "/opt/file1",
                        "user": { "id": 500 },
                        "contents": { "source": "data:,file1" },
                        "mode": 420
                    },
                    {
                        "filesystem": "filesystem1",
                        "path": "/opt/file2",
                        "contents": {
                            "source": "http://example.com/file2",
                            "compression": "gzip"
                        }
                    }
                ]
            },
            "systemd": {
                "units": [
                    { "name": "test1.service", "enabled": true, "contents": "test1 contents" },
                    {
                        "name": "etcd-member.service",
                        "enabled": true,
                        "dropins": [{
                            "name": "20-clct-etcd-member.conf",
                            "contents": "[Service]\nEnvironment=\"ETCD_NAME=node1\"\nEnvironment=\"ETCD_IMAGE_TAG=v3.0.15\"\n"
                        }]
                    }
                ]
            },
            "networkd": {
                "units": [{ "name": "test.network", "contents": "test config" }]
            },
            "passwd": {
                "users": [{
                    "name": "core",
                    "sshAuthorizedKeys": ["key1"],
                    "create": { "uid": 1010, "groups": ["wheel"] }
                }],
                "groups": [{ "name": "group 1", "gid": 1000 }]
            }
        })
    );
}

#[test]
fn failing_family_does_not_affect_the_other() {
    let (document, _) = parse(
        b"etcd:\n  version: 2.3.0\n  proxy: sometimes\nflannel:\n  version: 0.6.0\n  etcd_prefix: /net\n",
    )
    .unwrap();
    let (out, report) = convert(&document);

    let names: Vec<_> = out.systemd.units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["flanneld.service"]);
    assert_eq!(report.errors().count(), 1);
    let entry = &report.entries()[0];
    assert_eq!(entry.path.as_ref().unwrap().to_string(), "etcd.proxy");
    assert_eq!(entry.position, Some(Position::new(3, 10)));
}

#[test]
fn non_scalar_family_version_only_drops_that_family() {
    let (document, report) =
        parse(b"etcd:\n  version: [3, 0]\nflannel:\n  version: 0.7.0\n").unwrap();
    assert!(report.is_empty());
    let (out, report) = convert(&document);

    let names: Vec<_> = out.systemd.units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["flanneld.service"]);
    assert_eq!(report.to_string(), "error: etcd version must be a scalar at line 2, column 12\n");
}

#[test]
fn failing_items_keep_their_siblings_in_order() {
    let (out, report) = lowered(
        "systemd:
  units:
    - name: a.service
    - name: b.bogus
    - name: c.timer
networkd:
  units:
    - name: d.link
    - name: e.txt
",
    );
    assert_eq!(
        out["systemd"]["units"],
        json!([{ "name": "a.service" }, { "name": "c.timer" }])
    );
    assert_eq!(out["networkd"]["units"], json!([{ "name": "d.link" }]));
    let messages: Vec<_> = report.entries().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        ["invalid systemd unit extension", "invalid networkd unit extension"]
    );
    assert_eq!(report.entries()[0].position, Some(Position::new(4, 13)));
}

#[derive(Debug)]
struct Tag(&'static str);

impl ConversionUnit for Tag {
    fn name(&self) -> &'static str {
        self.0
    }

    fn lower(&self, _input: &Config, _positions: &PositionIndex, out: &mut ignition::Config) -> Report {
        out.systemd.units.push(ignition::SystemdUnit {
            name: format!("{}.service", self.0),
            ..ignition::SystemdUnit::default()
        });
        Report::warning(self.0)
    }
}

#[test]
fn reports_merge_in_registration_order() {
    let converter = Converter::with_units(vec![Box::new(Tag("first")), Box::new(Tag("second"))]);
    let (out, report) = converter.convert(&document("passwd: {}\n"));

    let messages: Vec<_> = report.entries().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["first", "second"]);
    assert!(report.entries().iter().all(|e| e.severity == Severity::Warning));
    assert_eq!(out.systemd.units[1].name, "second.service");
    assert_eq!(out.ignition.version, "2.3.0");
}

#[test]
fn flannel_warning_precedes_lowering() {
    let (out, report) = lowered("flannel:\n  version: 0.8.1\n  interface: eth1\n");
    assert_eq!(report.len(), 1);
    assert_eq!(report.entries()[0].severity, Severity::Warning);
    assert_eq!(report.entries()[0].position, Some(Position::new(2, 12)));
    assert_eq!(out["systemd"]["units"][0]["name"], "flanneld.service");
}
