//! Checkout engine: async runtime for workflow reducers and the use cases
//! that connect them to backend gateways.
mod config;
mod context;
mod engine;
mod error;
pub mod gateway;
mod reporter;
mod types;
pub mod use_cases;

pub use config::RuntimeConfig;
pub use context::{CheckoutContext, Gateways};
pub use engine::Runtime;
pub use error::EngineError;
pub use gateway::{
    AuthGateway, CodeCheck, PaymentAuthGateway, PaymentMethodGateway, TokenizeGateway,
    TokenizeOutcome, UnbindGateway,
};
pub use reporter::LogReporter;
pub use types::{ChannelSource, Host, RunOutcome, Source, UseCase};
