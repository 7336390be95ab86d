use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use dhcpublisher::{BatchSummary, PrintPdfRenderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dhcpublisher",
    about = "Batch-publish DHC document collections: unzip, render to PDF, or both",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Action selector: 1 = unzip, 2 = convert, 3 = unzip then convert.
    mode: Option<String>,

    /// Mode-dependent directory arguments.
    dirs: Vec<PathBuf>,
}

/// What one invocation should do, derived from the raw mode token and the
/// directory arguments. Anything malformed maps to `Usage`.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Unzip { source: PathBuf, target: PathBuf },
    Convert { target: PathBuf },
    UnzipConvert { source: PathBuf, target: PathBuf },
    Usage,
}

impl Action {
    fn from_args(mode: Option<&str>, dirs: &[PathBuf]) -> Self {
        let Some(mode) = mode else {
            return Action::Usage;
        };
        match (mode.parse::<u32>(), dirs) {
            (Ok(1), [source, target]) => Action::Unzip {
                source: source.clone(),
                target: target.clone(),
            },
            (Ok(2), [target]) => Action::Convert {
                target: target.clone(),
            },
            (Ok(3), [source, target]) => Action::UnzipConvert {
                source: source.clone(),
                target: target.clone(),
            },
            _ => Action::Usage,
        }
    }
}

fn usage() {
    println!("Usage");
    println!("=====");
    println!("Unzip: dhcpublisher 1 dhcDir targetDir");
    println!("PDF: dhcpublisher 2 dirWithUnzippedDhcs");
    println!("Unzip+PDF: dhcpublisher 3 dhcDir targetDir");
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        usage();
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            usage();
            return Ok(());
        }
    };

    match Action::from_args(cli.mode.as_deref(), &cli.dirs) {
        Action::Unzip { source, target } => {
            let summary = dhcpublisher::unzip_all(&source, &target)?;
            report("Unzipped", &summary);
        }
        Action::Convert { target } => {
            let summary = dhcpublisher::convert_all(&target, &PrintPdfRenderer)?;
            report("Converted", &summary);
        }
        Action::UnzipConvert { source, target } => {
            let outcome = dhcpublisher::publish(&source, &target)?;
            report("Unzipped", &outcome.unzipped);
            report("Converted", &outcome.converted);
        }
        Action::Usage => usage(),
    }
    Ok(())
}

fn report(verb: &str, summary: &BatchSummary) {
    println!(
        "{verb} {} of {} item(s), {} failure(s).",
        summary.succeeded,
        summary.total(),
        summary.failures.len()
    );
    for failure in &summary.failures {
        println!("  failed: {failure}");
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn mode_1_requires_source_and_target() {
        assert_eq!(
            Action::from_args(Some("1"), &dirs(&["in", "out"])),
            Action::Unzip {
                source: PathBuf::from("in"),
                target: PathBuf::from("out"),
            }
        );
        assert_eq!(Action::from_args(Some("1"), &dirs(&["in"])), Action::Usage);
        assert_eq!(
            Action::from_args(Some("1"), &dirs(&["a", "b", "c"])),
            Action::Usage
        );
    }

    #[test]
    fn mode_2_requires_exactly_one_dir() {
        assert_eq!(
            Action::from_args(Some("2"), &dirs(&["out"])),
            Action::Convert {
                target: PathBuf::from("out"),
            }
        );
        assert_eq!(
            Action::from_args(Some("2"), &dirs(&["a", "b"])),
            Action::Usage
        );
        assert_eq!(Action::from_args(Some("2"), &[]), Action::Usage);
    }

    #[test]
    fn mode_3_requires_source_and_target() {
        assert_eq!(
            Action::from_args(Some("3"), &dirs(&["in", "out"])),
            Action::UnzipConvert {
                source: PathBuf::from("in"),
                target: PathBuf::from("out"),
            }
        );
        assert_eq!(Action::from_args(Some("3"), &[]), Action::Usage);
    }

    #[test]
    fn out_of_range_and_non_numeric_modes_fall_back_to_usage() {
        assert_eq!(
            Action::from_args(Some("9"), &dirs(&["a", "b"])),
            Action::Usage
        );
        assert_eq!(Action::from_args(Some("0"), &dirs(&["a"])), Action::Usage);
        assert_eq!(
            Action::from_args(Some("convert"), &dirs(&["a"])),
            Action::Usage
        );
        assert_eq!(Action::from_args(None, &[]), Action::Usage);
    }
}
