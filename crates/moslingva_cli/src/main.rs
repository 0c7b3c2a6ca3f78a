//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open an archive from an optional JSON config path and print a
//!   deterministic status summary.
//! - Verify `moslingva_core` linkage without any UI runtime.
//!
//! Usage: `moslingva_cli [--seed] [config.json]`

use log::info;
use moslingva_core::{core_version, init_logging_from_config, Archive, ArchiveConfig};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut seed = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--seed" {
            seed = true;
        } else {
            config_path = Some(arg);
        }
    }

    match run(config_path, seed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("moslingva_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>, seed: bool) -> Result<(), Box<dyn Error>> {
    let config = match config_path {
        Some(path) => ArchiveConfig::from_json_file(path)?,
        None => ArchiveConfig::default(),
    };
    init_logging_from_config(&config)?;

    let mut archive = Archive::open(config)?;
    if seed {
        let inserted = archive.seed_starter_lexicon()?;
        info!("event=cli_seed module=cli status=ok inserted={inserted}");
    }
    let progress = archive.alphabet_progress()?;
    let status = serde_json::json!({
        "version": core_version(),
        "glyphs": archive.load_characters()?.len(),
        "words": archive.load_words()?.len(),
        "categories": archive.list_categories()?,
        "grammar_notes": archive.list_grammar_notes()?.len(),
        "alphabet": progress,
    });
    info!("event=cli_status module=cli status=ok");
    println!("{}", serde_json::to_string_pretty(&status)?);

    archive.shutdown()?;
    Ok(())
}
