//! Every ```` ```yaml ```` block in `docs/*.md` must convert without a
//! single diagnostic.

use std::fs;
use std::path::PathBuf;

fn docs_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs")
}

fn yaml_sections(markdown: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    for line in markdown.lines() {
        if line == "```" {
            if let Some(lines) = current.take().filter(|lines| !lines.is_empty()) {
                sections.push(lines.join("\n"));
            }
        } else if let Some(lines) = current.as_mut() {
            lines.push(line);
        } else if line == "```yaml" {
            current = Some(Vec::new());
        }
    }
    sections
}

#[test]
fn extracts_only_yaml_blocks() {
    let markdown = "text\n```\nct --pretty\n```\n```yaml\na: 1\nb: 2\n```\n";
    assert_eq!(yaml_sections(markdown), ["a: 1\nb: 2"]);
}

#[test]
fn documented_configs_are_clean() {
    let mut checked = 0;
    for entry in fs::read_dir(docs_dir()).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let markdown = fs::read_to_string(&path).unwrap();
        for yaml in yaml_sections(&markdown) {
            let transpiled = clct_cli::transpile(yaml.as_bytes())
                .unwrap_or_else(|e| panic!("{}: {e}\n{yaml}", path.display()));
            assert!(
                transpiled.report.is_empty() && !transpiled.unrecognized,
                "{}: non-empty report:\n{}\n{yaml}",
                path.display(),
                transpiled.report
            );
            checked += 1;
        }
    }
    assert!(checked > 0, "no yaml blocks found");
}
