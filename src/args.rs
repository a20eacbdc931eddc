use std::path::PathBuf;

use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Password};
use url::Url;

use crate::config::{
    Config, DEFAULT_API_BASE, DEFAULT_DIR_PREFIX, DEFAULT_EXTENSION, DEFAULT_OLDEST,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use crate::error::Error;

/// Archive the full history of every public Slack channel to JSON files.
#[derive(Parser, Debug)]
#[command(name = "slack-history")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Slack API token. Prompted for when not given.
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base url of the Slack Web API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: Url,

    /// Messages requested per history page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)))]
    pub page_size: u32,

    /// Only archive messages newer than this Slack timestamp
    #[arg(long, default_value = DEFAULT_OLDEST)]
    pub oldest: String,

    /// Directory the run's output directory is created in
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Prefix of the output directory name
    #[arg(long, default_value = DEFAULT_DIR_PREFIX)]
    pub dir_prefix: String,

    /// Extension of each channel's archive file
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Pretty-print archive files
    #[arg(long)]
    pub pretty: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Args {
    pub fn into_config(self) -> Result<Config, Error> {
        let token = match self.token {
            Some(token) => token,
            None => prompt_password_input("Enter Slack token: ")?,
        };

        if token.trim().is_empty() {
            return Err(Error::Config("no Slack token given".to_string()));
        }

        let mut config = Config::new(token, self.api_base);
        config.page_size = self.page_size;
        config.oldest = self.oldest;
        config.output_root = self.output;
        config.dir_prefix = self.dir_prefix;
        config.extension = self.extension;
        config.pretty = self.pretty;

        Ok(config)
    }
}

fn prompt_password_input(prompt: &str) -> Result<String, Error> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()
        .map_err(|e| Error::Config(format!("could not read token: {e}")))
}
