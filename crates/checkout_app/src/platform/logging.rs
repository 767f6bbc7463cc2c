//! Maps the `--log` flag onto a logging destination.
use checkout_logging::LogDestination;
use clap::ValueEnum;
use log::LevelFilter;

use super::settings::CheckoutSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogTarget {
    /// Write to the settings' log file.
    #[default]
    File,
    /// Write to the terminal. Mixes with the console prompts.
    Terminal,
    Both,
}

pub fn destination(target: LogTarget, settings: &CheckoutSettings) -> LogDestination {
    match target {
        LogTarget::File => LogDestination::File(settings.log_file.clone()),
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::Both => LogDestination::Both(settings.log_file.clone()),
    }
}

pub fn initialize(target: LogTarget, settings: &CheckoutSettings, level: LevelFilter) {
    checkout_logging::initialize(&destination(target, settings), level);
}
