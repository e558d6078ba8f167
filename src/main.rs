//! jmdict-sqlite CLI - converts a JMdict JSON snapshot into a SQLite database

use anyhow::Context;
use clap::Parser;
use indicatif::HumanDuration;
use jmdict_sqlite::config;
use jmdict_sqlite::ui::{self, Icons};
use jmdict_sqlite::{
    ConvertOptions, ConvertSummary, Converter, DbStats, DictionaryDocument, DictionaryStore,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "jmdict-sqlite")]
#[command(version)]
#[command(about = "Convert a JMdict JSON snapshot into a normalized SQLite database")]
#[command(long_about = r#"
Reads a complete jmdict-simplified JSON document and writes it into a SQLite
database with one table per entity (words, kanji, kana, sense, gloss, tags,
dictionary_info). All rows are written in a single transaction: either the
whole document is converted or nothing is.

Example usage:
  jmdict-sqlite jmdict-eng-3.5.0.json jmdict.db
  jmdict-sqlite --fresh jmdict-eng-3.6.0.json jmdict.db
"#)]
struct Cli {
    /// Path to the JMdict JSON document
    input: PathBuf,

    /// Path to the SQLite database (created if missing)
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Delete existing words before converting
    #[arg(long)]
    fresh: bool,

    /// Only log, no summary output
    #[arg(short, long)]
    quiet: bool,

    /// Path to a configuration file (defaults to ./jmdict-sqlite.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            ui::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.verbose, config.log.as_deref());

    let quiet = cli.quiet || config.quiet || jmdict_sqlite::output::is_quiet();
    let options = ConvertOptions {
        fresh: cli.fresh || config.fresh,
    };

    match run(&cli.input, &cli.output, options, quiet) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if quiet => {
            tracing::error!("Error converting {}: {:#}", cli.input.display(), e);
            ExitCode::FAILURE
        }
        Err(e) => {
            ui::error(&format!("Error converting JSON: {:#}", e));
            tracing::debug!("Conversion of {} failed: {:?}", cli.input.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, configured: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(configured.unwrap_or("info")))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(input: &Path, output: &Path, options: ConvertOptions, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        ui::header("Converting JMdict to SQLite");
        ui::info(Icons::FILE, "Input", &input.display().to_string());
        ui::info(Icons::DATABASE, "Database", &output.display().to_string());
        println!();
    }

    config::ensure_db_dir(output)
        .with_context(|| format!("failed to create directory for {}", output.display()))?;

    // The store owns the connection; it is closed when this function returns,
    // whichever way it returns.
    let mut store = DictionaryStore::open(output)
        .with_context(|| format!("failed to initialize schema in {}", output.display()))?;

    if !quiet {
        ui::phase("Loading document");
    }
    let spinner = (!quiet).then(|| ui::Spinner::new("Reading JSON"));
    let loaded = DictionaryDocument::from_path(input);
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let doc = loaded.with_context(|| format!("failed to load {}", input.display()))?;
    tracing::info!("Loaded {} words and {} tags", doc.words.len(), doc.tags.len());

    if !quiet {
        ui::phase("Writing rows");
    }
    let mut converter = Converter::new(options);
    if !quiet {
        converter = converter.with_progress(ui::word_progress());
    }
    let summary = converter
        .convert(&mut store, &doc)
        .context("conversion rolled back, nothing was written")?;

    tracing::info!("Successfully converted {} words", summary.words);

    let stats = store.stats()?;
    tracing::debug!("{}", stats);

    if !quiet {
        print_summary(&stats, &summary);
        ui::timing(&format!("Complete in {}", HumanDuration(started.elapsed())));
    }

    Ok(())
}

fn print_summary(stats: &DbStats, summary: &ConvertSummary) {
    println!();
    ui::success(&format!("Successfully converted {} words", summary.words));
    if summary.cleared > 0 {
        ui::warn(&format!("Replaced {} previously stored words", summary.cleared));
    }

    ui::section(&format!("{} Written", Icons::BOOK));
    ui::summary_row("words", summary.words);
    ui::summary_row("kanji", summary.kanji);
    ui::summary_row("kana", summary.kana);
    ui::summary_row("senses", summary.senses);
    ui::summary_row("glosses", summary.glosses);
    ui::summary_row("tags", summary.tags);

    ui::section(&format!("{} Database", Icons::STATS));
    println!("{}", ui::stats_table(stats));
}
