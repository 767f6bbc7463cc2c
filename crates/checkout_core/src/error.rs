use thiserror::Error;

/// Business failure carried by `*Failed` actions and error states.
///
/// Kept `Clone + PartialEq` so it can live inside state values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("no internet connection")]
    NoInternet,
    #[error("api error {status} ({code})")]
    Api {
        status: u16,
        code: String,
        description: Option<String>,
    },
    #[error("payment authorization failed: {0}")]
    PaymentAuth(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("continuation panicked: {0}")]
    Panicked(String),
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl CheckoutError {
    pub fn api(status: u16, code: impl Into<String>) -> Self {
        CheckoutError::Api {
            status,
            code: code.into(),
            description: None,
        }
    }

    /// Short machine-friendly label, used for analytics arguments.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutError::NoInternet => "noInternet",
            CheckoutError::Api { .. } => "api",
            CheckoutError::PaymentAuth(_) => "paymentAuth",
            CheckoutError::Cancelled => "cancelled",
            CheckoutError::Panicked(_) => "panicked",
            CheckoutError::Unknown(_) => "unknown",
        }
    }
}
