//! Reading, checking, converting and writing one config.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;

use clct_core::{Report, StructuralError};
use clct_ignition as ignition;

/// Input, output and formatting flags.
#[derive(Args, Debug, Clone, Default)]
pub struct TranspileArgs {
    /// Read the config from FILE instead of stdin.
    #[arg(long, value_name = "FILE")]
    pub in_file: Option<PathBuf>,

    /// Write the Ignition config to FILE instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub out_file: Option<PathBuf>,

    /// Indent the output JSON.
    #[arg(long)]
    pub pretty: bool,
}

/// The result of decoding and converting one input.
#[derive(Debug, Clone)]
pub struct Transpiled {
    /// Decoder, keyword check and conversion diagnostics, in that order.
    pub report: Report,
    /// Whether the keyword check found keys no section declares.
    pub unrecognized: bool,
    /// The converted config.
    pub config: ignition::Config,
}

impl Transpiled {
    /// Fail unless the config may be written.
    pub fn accept(&self) -> anyhow::Result<()> {
        if self.report.is_fatal() {
            bail!("config has errors, aborting");
        }
        if self.unrecognized {
            bail!("unrecognized keys in input, aborting");
        }
        Ok(())
    }

    /// Serialize the converted config.
    pub fn render(&self, pretty: bool) -> anyhow::Result<String> {
        if pretty {
            let mut out = serde_json::to_string_pretty(&self.config)
                .context("failed to serialize ignition config")?;
            out.push('\n');
            Ok(out)
        } else {
            serde_json::to_string(&self.config).context("failed to serialize ignition config")
        }
    }
}

/// Decode, check and convert `input`.
///
/// # Errors
///
/// Returns the decoder's [`StructuralError`] when `input` cannot be decoded
/// at all. Every other problem is in [`Transpiled::report`].
pub fn transpile(input: &[u8]) -> Result<Transpiled, StructuralError> {
    let (document, mut report) = clct_config::parse(input)?;
    let (unrecognized, keywords) = document.check_keywords();
    report.merge(keywords);
    let (config, converted) = clct_convert::convert(&document);
    report.merge(converted);
    Ok(Transpiled { report, unrecognized, config })
}

/// Run `ct` with `args`. The report is printed to stderr even when the run
/// fails.
pub fn run_transpile(args: &TranspileArgs) -> anyhow::Result<()> {
    let input = read_input(args.in_file.as_deref())?;
    let transpiled = transpile(&input).context("failed to decode config")?;
    eprint!("{}", transpiled.report);
    tracing::debug!(
        errors = transpiled.report.errors().count(),
        warnings = transpiled.report.warnings().count(),
        "conversion reported"
    );

    transpiled.accept()?;
    let output = transpiled.render(args.pretty)?;
    write_output(args.out_file.as_deref(), output.as_bytes())?;
    tracing::info!(bytes = output.len(), "wrote ignition config");
    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, output: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output).context("failed to write stdout")?;
            stdout.flush().context("failed to write stdout")
        }
    }
}
