//! Unzip a directory of DHC archives and render each collection to PDF.
//!
//! Usage:
//!   cargo run --example publish_dir -- dhcDir targetDir

use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <dhcDir> <targetDir>", args[0]);
        process::exit(1);
    }

    match dhcpublisher::publish(&args[1], &args[2]) {
        Ok(outcome) => {
            println!(
                "Unzipped {}/{}, converted {}/{}",
                outcome.unzipped.succeeded,
                outcome.unzipped.total(),
                outcome.converted.succeeded,
                outcome.converted.total()
            );
            for failure in outcome
                .unzipped
                .failures
                .iter()
                .chain(&outcome.converted.failures)
            {
                eprintln!("  - {failure}");
            }
        }
        Err(e) => {
            eprintln!("Publishing failed: {e}");
            process::exit(1);
        }
    }
}
