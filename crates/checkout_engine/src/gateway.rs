//! Narrow collaborator traits the use cases depend on.
//!
//! Each one covers a single backend concern so hosts can back them with a
//! network client, a local store or a test double independently.
use async_trait::async_trait;
use checkout_core::model::{
    Amount, PaymentAuthData, PaymentOption, SelectedOption, TokenOutputModel, TokenizeInputModel,
};
use checkout_core::CheckoutError;

#[async_trait]
pub trait PaymentMethodGateway: Send + Sync {
    /// Option picked for the current checkout, with the merchant's terms.
    async fn selected_option(&self) -> Result<SelectedOption, CheckoutError>;

    async fn payment_options(&self) -> Result<Vec<PaymentOption>, CheckoutError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeOutcome {
    Token(TokenOutputModel),
    /// The charge must be confirmed with a second factor before a token is issued.
    PaymentAuthRequired(Amount),
}

#[async_trait]
pub trait TokenizeGateway: Send + Sync {
    async fn tokenize(&self, model: &TokenizeInputModel) -> Result<TokenizeOutcome, CheckoutError>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn logout(&self) -> Result<(), CheckoutError>;

    async fn wallet_app_available(&self) -> Result<bool, CheckoutError>;

    async fn save_token(
        &self,
        token: &str,
        user_account: Option<&str>,
    ) -> Result<(), CheckoutError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeCheck {
    Accepted,
    WrongAnswer(PaymentAuthData),
    AttemptsExceeded,
}

#[async_trait]
pub trait PaymentAuthGateway: Send + Sync {
    async fn start(
        &self,
        amount: &Amount,
        link_wallet_to_app: bool,
    ) -> Result<PaymentAuthData, CheckoutError>;

    async fn check_code(&self, code: &str) -> Result<CodeCheck, CheckoutError>;
}

#[async_trait]
pub trait UnbindGateway: Send + Sync {
    async fn unbind(&self, payment_instrument_id: &str) -> Result<(), CheckoutError>;
}
