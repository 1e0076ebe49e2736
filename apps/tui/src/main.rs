mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trove_storefront::config::{init_app_config, AppConfig};
use trove_storefront::navigation::Page;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;
    let headless = args.wants_headless();
    init_tracing(&config, headless)?;

    info!(
        api = %config.api_base_url,
        include_drafts = config.status_policy.include_drafts,
        headless,
        "starting storefront"
    );

    let mut app = App::new(&config)?;
    if let Some(name) = &args.page {
        let page = Page::parse(name).ok_or_else(|| eyre!("Unknown page: {name}"))?;
        app.go_to(page);
    }

    if headless {
        return event::run_headless(&app, args.json).await;
    }

    app.start();

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app);
    terminal::cleanup(true, true);

    result
}

/// Terminal mode logs to a file so output does not tear the screen;
/// headless mode logs to stderr.
fn init_tracing(config: &AppConfig, headless: bool) -> Result<()> {
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if headless {
        builder.with_writer(std::io::stderr).init();
    } else {
        let file = File::create(&config.log_file)
            .wrap_err_with(|| format!("Failed to open log file {}", config.log_file.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    Ok(())
}
