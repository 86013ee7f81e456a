use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

const ENV_PREFIX: &str = "INVOICE_";

/// Command line overrides for the environment configuration
#[derive(Parser, Debug, Default)]
#[command(name = "invoice-form", about = "Edit an invoice in the terminal")]
pub struct Cli {
    /// Currency code the new invoice starts with
    #[arg(long)]
    pub currency: Option<String>,

    /// Days between the invoice date and its due date
    #[arg(long)]
    pub due_days: Option<i64>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Configuration for the application
#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Sender details pre-filled into the "From" group
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub from_address: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_due_days")]
    pub due_days: i64,

    /// Logging stays off unless a file is given; the terminal is in raw mode.
    pub log_file: Option<PathBuf>,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_due_days() -> i64 {
    5
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from `INVOICE_*` environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize prefixed environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;

        Ok(config)
    }

    /// Apply command line flags on top of the environment values
    pub fn with_overrides(mut self, cli: Cli) -> Self {
        if let Some(currency) = cli.currency {
            self.currency = currency;
        }
        if let Some(due_days) = cli.due_days {
            self.due_days = due_days;
        }
        if cli.log_file.is_some() {
            self.log_file = cli.log_file;
        }
        self
    }
}

/// Load the environment configuration and merge command line flags into it
pub fn init() -> Result<Config> {
    let cli = Cli::parse();

    let config = Config::load()?.with_overrides(cli);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::prefixed(ENV_PREFIX)
            .from_iter(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<Vec<_>>(),
            )
            .unwrap()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = from_pairs(&[]);

        assert_eq!(config.currency, "USD");
        assert_eq!(config.due_days, 5);
        assert_eq!(config.log_filter, "info");
        assert!(config.from_name.is_empty());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn prefixed_variables_are_read() {
        let config = from_pairs(&[
            ("INVOICE_FROM_NAME", "Acme Ltd"),
            ("INVOICE_CURRENCY", "EUR"),
            ("INVOICE_DUE_DAYS", "30"),
            ("INVOICE_LOG_FILE", "/tmp/invoice.log"),
            ("OTHER_CURRENCY", "JPY"),
        ]);

        assert_eq!(config.from_name, "Acme Ltd");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.due_days, 30);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/invoice.log")));
    }

    #[test]
    fn cli_flags_override_environment() {
        let config = from_pairs(&[("INVOICE_CURRENCY", "EUR"), ("INVOICE_DUE_DAYS", "30")]);

        let cli = Cli::parse_from(["invoice-form", "--currency", "GBP", "--log-file", "form.log"]);
        let config = config.with_overrides(cli);

        assert_eq!(config.currency, "GBP");
        assert_eq!(config.due_days, 30);
        assert_eq!(config.log_file, Some(PathBuf::from("form.log")));
    }
}
