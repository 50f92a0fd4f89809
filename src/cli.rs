use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

use crate::config::AuditConfig;
use crate::error::Result;
use crate::ocr::{run_backfill, TesseractConfig, TesseractEngine};
use crate::validate::{consumer_scoring, links, schema, tier_lock};

/// Validation and maintenance passes over the tastings corpus.
#[derive(Parser, Debug)]
#[command(name = "tasting-audit", version)]
pub struct Cli {
    /// Repository root holding data/, schema/ and public/
    #[arg(long, global = true, env = "TASTING_AUDIT_ROOT", default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check expert tastings' contributor against the reviewer registry
    Links,
    /// Validate every tasting against schema/tasting.schema.json
    Tastings,
    /// Validate every reviewer record against data/schemas/reviewer.schema.json
    Reviewers,
    /// Check that the experts/consumers folders match contributor.tier
    TierLocks,
    /// Check consumer scoring rules
    ConsumerScoring,
    /// OCR LinkedIn post screenshots into source.original_text
    OcrLinkedin {
        /// Author slug under public/sources/linkedin and data/tastings/experts
        #[arg(long, default_value = "david-reid")]
        author: String,

        /// Tesseract executable
        #[arg(long, env = "TESSERACT_BIN", default_value = "tesseract")]
        tesseract: String,

        /// Tesseract language
        #[arg(long, default_value = "eng")]
        lang: String,
    },
}

pub fn parse_command(args: &[String]) -> std::result::Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

/// Parse, dispatch and return the process exit code.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match parse_command(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 2,
            };
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

pub fn run(cli: &Cli, out: &mut dyn Write) -> i32 {
    let config = AuditConfig::new(&cli.root);
    match dispatch(&cli.command, &config, out) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "pass aborted");
            let _ = writeln!(out, "{err}");
            err.exit_code()
        }
    }
}

fn dispatch(command: &Command, config: &AuditConfig, out: &mut dyn Write) -> Result<i32> {
    match command {
        Command::Links => links::run(config, out),
        Command::Tastings => schema::run_tastings(config, out),
        Command::Reviewers => schema::run_reviewers(config, out),
        Command::TierLocks => tier_lock::run(config, out),
        Command::ConsumerScoring => consumer_scoring::run(config, out),
        Command::OcrLinkedin {
            author,
            tesseract,
            lang,
        } => {
            let mut engine = TesseractEngine::new(TesseractConfig {
                binary_path: tesseract.clone(),
                lang: lang.clone(),
                ..TesseractConfig::default()
            });
            run_backfill(config, author, &mut engine, out)
        }
    }
}
