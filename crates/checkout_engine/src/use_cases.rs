use std::sync::Arc;

use async_trait::async_trait;
use checkout_core::{
    CheckoutError, ContractAction, ContractCommand, MoneyAuthAction, MoneyAuthCommand,
    PaymentAuthAction, PaymentAuthCommand, PaymentOptionListAction, PaymentOptionListCommand,
    TokenizeAction, TokenizeCommand, UnbindCardAction, UnbindCardCommand,
};
use checkout_logging::checkout_debug;

use crate::gateway::{
    AuthGateway, CodeCheck, PaymentAuthGateway, PaymentMethodGateway, TokenizeGateway,
    TokenizeOutcome, UnbindGateway,
};
use crate::UseCase;

pub struct ContractUseCase {
    payment_methods: Arc<dyn PaymentMethodGateway>,
    auth: Arc<dyn AuthGateway>,
}

impl ContractUseCase {
    pub fn new(payment_methods: Arc<dyn PaymentMethodGateway>, auth: Arc<dyn AuthGateway>) -> Self {
        Self {
            payment_methods,
            auth,
        }
    }
}

#[async_trait]
impl UseCase<ContractCommand> for ContractUseCase {
    async fn execute(&self, command: ContractCommand) -> Result<ContractAction, CheckoutError> {
        match command {
            ContractCommand::SelectPaymentOption => {
                let selected = self.payment_methods.selected_option().await?;
                Ok(ContractAction::LoadContractSuccess(selected))
            }
            ContractCommand::Logout => {
                self.auth.logout().await?;
                Ok(ContractAction::LogoutSuccessful)
            }
        }
    }
}

pub struct TokenizeUseCase {
    gateway: Arc<dyn TokenizeGateway>,
}

impl TokenizeUseCase {
    pub fn new(gateway: Arc<dyn TokenizeGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl UseCase<TokenizeCommand> for TokenizeUseCase {
    async fn execute(&self, command: TokenizeCommand) -> Result<TokenizeAction, CheckoutError> {
        let TokenizeCommand::Tokenize(model) = command;
        match self.gateway.tokenize(&model).await? {
            TokenizeOutcome::Token(output) => Ok(TokenizeAction::TokenizeSuccess(output)),
            TokenizeOutcome::PaymentAuthRequired(charge) => {
                checkout_debug!(
                    "tokenize of option {} needs confirmation",
                    model.payment_option_id
                );
                Ok(TokenizeAction::PaymentAuthRequired(charge))
            }
        }
    }
}

pub struct PaymentOptionsUseCase {
    payment_methods: Arc<dyn PaymentMethodGateway>,
    auth: Arc<dyn AuthGateway>,
    unbind: Arc<dyn UnbindGateway>,
}

impl PaymentOptionsUseCase {
    pub fn new(
        payment_methods: Arc<dyn PaymentMethodGateway>,
        auth: Arc<dyn AuthGateway>,
        unbind: Arc<dyn UnbindGateway>,
    ) -> Self {
        Self {
            payment_methods,
            auth,
            unbind,
        }
    }
}

#[async_trait]
impl UseCase<PaymentOptionListCommand> for PaymentOptionsUseCase {
    async fn execute(
        &self,
        command: PaymentOptionListCommand,
    ) -> Result<PaymentOptionListAction, CheckoutError> {
        match command {
            PaymentOptionListCommand::LoadOptions { after_auth } => {
                let options = self.payment_methods.payment_options().await?;
                if options.is_empty() {
                    return Err(CheckoutError::Unknown(
                        "no payment options available".to_string(),
                    ));
                }
                Ok(PaymentOptionListAction::LoadPaymentOptionListSuccess {
                    options,
                    after_auth,
                })
            }
            PaymentOptionListCommand::Logout => {
                self.auth.logout().await?;
                Ok(PaymentOptionListAction::LogoutSuccessful)
            }
            PaymentOptionListCommand::Unbind { instrument_id } => {
                self.unbind.unbind(&instrument_id).await?;
                Ok(PaymentOptionListAction::UnbindSuccess)
            }
        }
    }
}

pub struct UnbindCardUseCase {
    gateway: Arc<dyn UnbindGateway>,
}

impl UnbindCardUseCase {
    pub fn new(gateway: Arc<dyn UnbindGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl UseCase<UnbindCardCommand> for UnbindCardUseCase {
    async fn execute(&self, command: UnbindCardCommand) -> Result<UnbindCardAction, CheckoutError> {
        let UnbindCardCommand::Unbind(card) = command;
        self.gateway.unbind(&card.payment_instrument_id).await?;
        Ok(UnbindCardAction::UnbindSuccess)
    }
}

pub struct MoneyAuthUseCase {
    gateway: Arc<dyn AuthGateway>,
}

impl MoneyAuthUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl UseCase<MoneyAuthCommand> for MoneyAuthUseCase {
    async fn execute(&self, command: MoneyAuthCommand) -> Result<MoneyAuthAction, CheckoutError> {
        match command {
            MoneyAuthCommand::ResolveAuthType => {
                let app2app_available = self.gateway.wallet_app_available().await?;
                Ok(MoneyAuthAction::AuthTypeResolved { app2app_available })
            }
            MoneyAuthCommand::SaveToken {
                token,
                user_account,
            } => {
                self.gateway
                    .save_token(&token, user_account.as_deref())
                    .await?;
                Ok(MoneyAuthAction::AuthTokenSaved { user_account })
            }
        }
    }
}

pub struct PaymentAuthUseCase {
    gateway: Arc<dyn PaymentAuthGateway>,
}

impl PaymentAuthUseCase {
    pub fn new(gateway: Arc<dyn PaymentAuthGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl UseCase<PaymentAuthCommand> for PaymentAuthUseCase {
    async fn execute(
        &self,
        command: PaymentAuthCommand,
    ) -> Result<PaymentAuthAction, CheckoutError> {
        match command {
            PaymentAuthCommand::StartAuth {
                amount,
                link_wallet_to_app,
            } => {
                let data = self.gateway.start(&amount, link_wallet_to_app).await?;
                Ok(PaymentAuthAction::StartSuccess(data))
            }
            PaymentAuthCommand::CheckCode { code } => {
                let action = match self.gateway.check_code(&code).await? {
                    CodeCheck::Accepted => PaymentAuthAction::ProcessAuthSuccess,
                    CodeCheck::WrongAnswer(data) => PaymentAuthAction::ProcessAuthWrongAnswer(data),
                    CodeCheck::AttemptsExceeded => PaymentAuthAction::ProcessAuthVerifyExceeded,
                };
                Ok(action)
            }
        }
    }
}
