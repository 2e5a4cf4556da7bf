//! Shared runtime state for CLI interactions and command dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::advice::AdviceClient;
use crate::cli::commands;
use crate::cli::output;
use crate::cli::registry::CommandRegistry;
use crate::config::{Config, ConfigManager};
use crate::core::{Session, SystemClock};
use crate::errors::TrackerError;
use crate::storage::JsonStateStore;

/// Overrides the storage root, mainly for scripted test runs.
pub const DATA_DIR_ENV: &str = "SPENDTRACK_DATA_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Failures that abort the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Failures scoped to a single command; reported and then the loop
/// continues.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub config: Config,
    pub advice: AdviceClient,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = match ConfigManager::new() {
            Ok(manager) => manager.load(),
            Err(err) => {
                tracing::warn!("config location unavailable, using defaults: {err}");
                Config::default()
            }
        };
        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| config.data_dir.clone());
        let storage = JsonStateStore::new(data_dir)?;
        let session = Session::open(Box::new(storage), Arc::new(SystemClock));
        let advice = AdviceClient::new(config.advice.clone())?;

        Ok(Self {
            mode,
            registry: commands::default_registry(),
            session,
            config,
            advice,
            last_command: None,
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        "spendtrack> ".to_string()
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub fn report_error(&mut self, err: CommandError) -> Result<(), CliError> {
        output::error(&err);
        Ok(())
    }

    pub fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        output::info("Exiting shell.");
        Ok(true)
    }

    /// Builds a context around an existing session, bypassing config and
    /// environment lookup. Test-only.
    #[cfg(test)]
    pub(crate) fn with_session(session: Session) -> Self {
        Self {
            mode: CliMode::Script,
            registry: commands::default_registry(),
            session,
            config: Config::default(),
            advice: AdviceClient::new(Config::default().advice)
                .expect("advice client for tests"),
            last_command: None,
            running: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}
