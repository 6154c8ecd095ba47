//! Line-by-line driver behind the `gcode-cmd` binary.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::{Config, OutputFormat};
use crate::parser::LineParser;

/// Counts of what a run processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub parsed: usize,
    pub rejected: usize,
}

impl std::ops::AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.parsed += other.parsed;
        self.rejected += other.rejected;
    }
}

/// Parse every line of `reader` and write one output line per command.
///
/// Blank lines are skipped. Lines that are not commands are logged and
/// counted, or abort the run when `strict` is set.
pub fn process<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    parser: &LineParser,
    format: OutputFormat,
    strict: bool,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match parser.parse(line.as_str()) {
            Ok(cmd) => cmd,
            Err(err) if strict => bail!("line {}: {}", index + 1, err),
            Err(err) => {
                log::warn!("line {}: {}", index + 1, err);
                summary.rejected += 1;
                continue;
            }
        };

        match format {
            OutputFormat::Text => writeln!(out, "{}", cmd)?,
            OutputFormat::Canonical => writeln!(out, "{}", cmd.canonical_line())?,
            OutputFormat::Debug => writeln!(out, "{:?}", cmd)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &cmd)?;
                writeln!(out)?;
            }
        }
        summary.parsed += 1;
    }

    Ok(summary)
}

/// Entry point for the binary
pub fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(path) = &config.config_file {
        log::info!("using config file {}", path.display());
    }

    let parser = config.line_parser();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut summary = Summary::default();

    if config.inputs.is_empty() {
        summary += process(io::stdin().lock(), &mut out, &parser, config.format, config.strict)?;
    }
    for input in &config.inputs {
        summary += process_input(input, &mut out, &parser, &config)?;
    }

    out.flush()?;
    log::info!(
        "{} commands parsed, {} lines rejected",
        summary.parsed,
        summary.rejected
    );
    Ok(())
}

fn process_input<W: Write>(
    input: &Path,
    out: &mut W,
    parser: &LineParser,
    config: &Config,
) -> Result<Summary> {
    if input == Path::new("-") {
        return process(io::stdin().lock(), out, parser, config.format, config.strict);
    }

    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    process(BufReader::new(file), out, parser, config.format, config.strict)
        .with_context(|| format!("processing {}", input.display()))
}
