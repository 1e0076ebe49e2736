use clap::Parser;
use trove_storefront::config::{API_URL_VAR, HIDE_DRAFTS_VAR, LOG_FILE_VAR};

#[derive(Debug, Parser)]
#[command(
    name = "trove_storefront",
    version,
    about = "Browse and book curated experiences from the terminal"
)]
pub struct CliArgs {
    /// Print a catalogue summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the backend base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Page to open on start (e.g. upcoming, all-experiences, cart)
    #[arg(long, value_name = "PAGE")]
    pub page: Option<String>,

    /// Show only ACTIVE experiences
    #[arg(long = "hide-drafts")]
    pub hide_drafts: bool,

    /// Write logs to this file in terminal mode
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var(API_URL_VAR, url);
        }
        if self.hide_drafts {
            std::env::set_var(HIDE_DRAFTS_VAR, "1");
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(LOG_FILE_VAR, path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Headless output was requested, or stdout is not a terminal.
    pub fn wants_headless(&self) -> bool {
        self.headless || self.json || !atty::is(atty::Stream::Stdout)
    }
}
