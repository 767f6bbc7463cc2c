use std::path::PathBuf;

use anyhow::Context;
use checkout_app::platform::{
    app,
    console::Console,
    logging::{self, LogTarget},
    settings::{CheckoutSettings, DEFAULT_SETTINGS_FILE},
};
use checkout_logging::checkout_info;
use clap::Parser;

/// Console checkout demo.
#[derive(Parser)]
#[command(name = "checkout")]
#[command(
    about = "Walk through the checkout workflows against a simulated backend",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Settings file (RON); defaults are used when it does not exist
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,

    /// Write the effective settings to the settings file and exit
    #[arg(long)]
    write_settings: bool,

    /// Log unhandled actions as warnings
    #[arg(long)]
    warn_on_skip: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = CheckoutSettings::load(&cli.settings)
        .with_context(|| format!("loading settings from {:?}", cli.settings))?;
    if cli.write_settings {
        settings
            .save(&cli.settings)
            .with_context(|| format!("writing settings to {:?}", cli.settings))?;
        println!("Settings written to {:?}", cli.settings);
        return Ok(());
    }
    settings.warn_on_skip |= cli.warn_on_skip;

    logging::initialize(cli.log, &settings, settings.level()?);
    checkout_info!("Checkout demo starting");

    app::run(settings, Console::stdin()).await
}
