use crate::app::{ResourceKind, ScreenAction};
use crate::core::list::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "bank-crud")]
#[command(about = "List and edit users, accounts and transactions of the banking API")]
pub struct CliConfig {
    /// TOML config file with `[api]`, `[resources]` and `[logging]` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overrides `api.base_url`
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(value_enum)]
    pub resource: ResourceKind,

    #[command(subcommand)]
    pub command: PageCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PageCommand {
    /// Show the list
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Fetch one record as JSON
    Show { id: String },
    /// Submit the create form, `--data` holds the form fields as JSON
    Create {
        #[arg(long)]
        data: String,
    },
    /// Select a record and submit the edit form
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete { id: String },
}

impl From<PageCommand> for ScreenAction {
    fn from(command: PageCommand) -> Self {
        match command {
            PageCommand::List { format } => ScreenAction::List { format },
            PageCommand::Show { id } => ScreenAction::Show { id },
            PageCommand::Create { data } => ScreenAction::Create { data },
            PageCommand::Update { id, data } => ScreenAction::Update { id, data },
            PageCommand::Delete { id } => ScreenAction::Delete { id },
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            validate_url("base_url", base_url)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
