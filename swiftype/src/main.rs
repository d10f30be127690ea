use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use cadence::{HistorySummary, SessionError, history};
use clap::{Parser, Subcommand};
use derive_more::From;
use thiserror::Error;
use tracing::{info, warn};

use crate::app::App;
use crate::config::{Config, ConfigError};
use crate::store::{HistoryStore, JsonStoreError};
use crate::texts::{BuiltinTexts, TextsError};

mod app;
mod config;
mod keymap;
mod language;
mod logging;
mod report;
mod store;
mod texts;
mod ticker;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding `settings.toml`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More output per occurrence (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Take a typing test (default)
    Practice {
        /// Language code of the text, e.g. `en` or `ar`
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Show recent results
    History {
        /// Number of results to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a summary of all results
    Stats,
    /// List the supported languages
    Languages,
    /// Set the preferred language
    Language { code: String },
    /// Remove all stored results
    Clear,
}

#[derive(Debug, From, Error)]
enum AppError {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Store(JsonStoreError),

    #[error(transparent)]
    Session(SessionError),

    #[error(transparent)]
    Texts(TextsError),

    #[error("Terminal error: {0}")]
    Io(io::Error),

    #[error("Unknown language '{0}'. Run `swiftype languages` to list the supported ones")]
    #[from(skip)]
    UnknownLanguage(String),
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::get(cli.config)?;
    logging::init(cli.verbose, &config.settings.log_level);
    info!(
        config_dir = %config.config_dir.display(),
        data_dir = %config.data_dir.display(),
        "configuration loaded"
    );

    let store = HistoryStore::open(&config.data_dir)?;
    let mut out = io::stdout().lock();

    match cli.command.unwrap_or(Command::Practice { language: None }) {
        Command::Practice { language } => {
            let code = match language {
                Some(code) => code,
                None => store
                    .selected_language()?
                    .unwrap_or_else(|| config.settings.language.clone()),
            };
            let language = language::find(&code).unwrap_or_else(|| {
                let fallback = language::resolve(&code);
                warn!(requested = %code, fallback = fallback.code, "unsupported language");
                fallback
            });

            let texts = BuiltinTexts::load()?;
            let mut app = App::new(texts, store, language, config.settings.session)?;
            app.run()?;
        }
        Command::History { limit } => {
            let records = store.history()?;
            let limit = limit.unwrap_or(config.settings.history_limit);
            report::write_history(&mut out, history::recent(&records, limit))?;
        }
        Command::Stats => {
            let summary = HistorySummary::from_records(&store.history()?);
            report::write_summary(&mut out, &summary, config.settings.goal_wpm)?;
            if let Some(record) = store.last_result()? {
                writeln!(out, "Last result:      {}", report::result_line(&record))?;
            }
        }
        Command::Languages => {
            let selected = store
                .selected_language()?
                .unwrap_or_else(|| config.settings.language.clone());
            report::write_languages(&mut out, language::resolve(&selected).code)?;
        }
        Command::Language { code } => {
            let language =
                language::find(&code).ok_or_else(|| AppError::UnknownLanguage(code.clone()))?;
            store.set_selected_language(language.code)?;
            writeln!(out, "Language set to {} ({})", language.name, language.code)?;
        }
        Command::Clear => {
            let removed = store.clear()?;
            writeln!(out, "Removed {removed} results")?;
        }
    }

    Ok(())
}
