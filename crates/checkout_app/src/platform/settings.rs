//! Demo settings stored as RON next to the binary.
//!
//! A missing file is not an error: defaults are used and can be written back
//! with [`CheckoutSettings::save`].
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use checkout_logging::{checkout_info, DEFAULT_LOG_FILE};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "./checkout_settings.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Payment methods the demo merchant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemoMethod {
    NewCard,
    Wallet,
    SavedCards,
    GooglePay,
    SberBank,
    Sbp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    pub shop_title: String,
    pub shop_subtitle: String,
    pub amount_minor_units: i64,
    pub currency: String,
    /// Fee charged for Google Pay; zero makes it tokenize straight away.
    pub google_pay_fee_minor_units: i64,
    pub methods: Vec<DemoMethod>,
    pub return_url: String,
    pub log_file: PathBuf,
    pub log_level: String,
    pub warn_on_skip: bool,
    /// Simulated backend round-trip.
    pub latency_ms: u64,
    pub wallet_app_installed: bool,
    /// Wallet payments need this code before a token is issued.
    pub require_payment_auth: bool,
    pub confirmation_code: String,
    pub code_attempts: u32,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            shop_title: "Demo shop".to_string(),
            shop_subtitle: "Order #1".to_string(),
            amount_minor_units: 12_500,
            currency: "RUB".to_string(),
            google_pay_fee_minor_units: 0,
            methods: vec![
                DemoMethod::NewCard,
                DemoMethod::Wallet,
                DemoMethod::SavedCards,
                DemoMethod::GooglePay,
                DemoMethod::Sbp,
            ],
            return_url: "https://shop.example/checkout/return".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: "info".to_string(),
            warn_on_skip: false,
            latency_ms: 300,
            wallet_app_installed: false,
            require_payment_auth: true,
            confirmation_code: "1234".to_string(),
            code_attempts: 3,
        }
    }
}

impl CheckoutSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                checkout_info!("No settings at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings: Self = ron::from_str(&content)?;
        settings.level()?;
        checkout_info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn level(&self) -> Result<LevelFilter, SettingsError> {
        self.log_level
            .parse()
            .map_err(|_| SettingsError::LogLevel(self.log_level.clone()))
    }
}
