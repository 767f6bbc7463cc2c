//! Checkout core: pure workflow reducers and their vocabulary.
pub mod analytics;
pub mod contract;
mod error;
mod logic;
pub mod model;
pub mod money_auth;
pub mod payment_auth;
pub mod payment_options;
pub mod tokenize;
pub mod unbind_card;

pub use analytics::{Analytics, AnalyticsEvent, EventMapper, Reporter, Tracked};
pub use contract::{
    ContractAction, ContractCommand, ContractContent, ContractEffect, ContractLogic, ContractState,
};
pub use error::CheckoutError;
pub use logic::{Command, Continuation, Logic, Out, OutOf};
pub use money_auth::{
    MoneyAuthAction, MoneyAuthCommand, MoneyAuthEffect, MoneyAuthLogic, MoneyAuthState,
};
pub use payment_auth::{
    PaymentAuthAction, PaymentAuthCommand, PaymentAuthEffect, PaymentAuthLogic, PaymentAuthState,
};
pub use payment_options::{
    PaymentOptionListAction, PaymentOptionListCommand, PaymentOptionListEffect,
    PaymentOptionListLogic, PaymentOptionListState,
};
pub use tokenize::{
    TokenizeAction, TokenizeCommand, TokenizeEffect, TokenizeLogic, TokenizeState,
};
pub use unbind_card::{
    UnbindCardAction, UnbindCardCommand, UnbindCardEffect, UnbindCardLogic, UnbindCardState,
};
