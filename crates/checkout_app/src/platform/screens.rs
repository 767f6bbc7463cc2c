//! Console hosts: each prints its workflow and reports how it ended.
use std::fmt::Display;

use async_trait::async_trait;
use checkout_core::model::{
    Amount, OptionId, PaymentMethodKind, PaymentOption, TokenOutputModel, TokenizeInputModel,
};
use checkout_core::{
    ContractAction, ContractEffect, ContractState, MoneyAuthAction, MoneyAuthEffect,
    MoneyAuthState, PaymentAuthAction, PaymentAuthEffect, PaymentAuthState,
    PaymentOptionListAction, PaymentOptionListEffect, PaymentOptionListState, TokenizeAction,
    TokenizeEffect, TokenizeState,
};
use checkout_engine::{CheckoutContext, Host};
use checkout_logging::{checkout_info, checkout_warn};
use chrono::Local;
use tokio::sync::mpsc::UnboundedSender;

use super::console::{
    parse_money_auth_command, parse_payment_auth_command, Console, ConsoleSource,
};

pub fn say(message: impl Display) {
    println!("[{}] {}", Local::now().format("%H:%M:%S"), message);
}

pub fn format_amount(amount: &Amount) -> String {
    let sign = if amount.minor_units < 0 { "-" } else { "" };
    let units = amount.minor_units.unsigned_abs();
    format!("{sign}{}.{:02} {}", units / 100, units % 100, amount.currency)
}

pub fn describe_option(option: &PaymentOption) -> String {
    let name = match &option.kind {
        PaymentMethodKind::NewCard => "Bank card".to_string(),
        PaymentMethodKind::Wallet { wallet_id, balance } => {
            format!("Wallet {wallet_id} (balance {})", format_amount(balance))
        }
        PaymentMethodKind::AbstractWallet => "Wallet (log in)".to_string(),
        PaymentMethodKind::LinkedCard(card) => format!("Wallet card {}", card.pan_fragment),
        PaymentMethodKind::SavedBankCard(card) => {
            format!("Saved card {}******{}", card.first6, card.last4)
        }
        PaymentMethodKind::GooglePay => "Google Pay".to_string(),
        PaymentMethodKind::SberBank => "SberPay".to_string(),
        PaymentMethodKind::Sbp => "SBP".to_string(),
    };
    match option.fee.as_ref().filter(|fee| !fee.is_zero()) {
        Some(fee) => format!("{}) {name}, fee {}", option.id, format_amount(fee)),
        None => format!("{}) {name}", option.id),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsOutcome {
    Proceed(OptionId),
    Cancelled,
}

/// Payment method list. Wallet login runs as a nested money-auth screen.
pub struct OptionsScreen {
    context: CheckoutContext,
    console: Console,
    inject: UnboundedSender<Option<PaymentOptionListAction>>,
    pub outcome: Option<OptionsOutcome>,
}

impl OptionsScreen {
    pub fn new(
        context: CheckoutContext,
        console: Console,
        inject: UnboundedSender<Option<PaymentOptionListAction>>,
    ) -> Self {
        Self {
            context,
            console,
            inject,
            outcome: None,
        }
    }

    fn finish(&mut self, outcome: OptionsOutcome) {
        self.outcome = Some(outcome);
        let _ = self.inject.send(None);
    }

    async fn log_in(&mut self) {
        let mut money_auth = self.context.money_auth(MoneyAuthScreen::default());
        let (_inject, mut source) =
            ConsoleSource::new(self.console.clone(), parse_money_auth_command);
        money_auth.invoke(MoneyAuthAction::RequireAuth).await;
        money_auth.run(&mut source).await;

        let next = match money_auth.host().logged_in {
            Some(true) => PaymentOptionListAction::PaymentAuthSuccess,
            _ => PaymentOptionListAction::PaymentAuthCancel,
        };
        let _ = self.inject.send(Some(next));
    }

    async fn confirm_unbind(&mut self, option: PaymentOption) {
        let PaymentMethodKind::SavedBankCard(card) = &option.kind else {
            say("Cards linked to the wallet are managed in the wallet app.");
            return;
        };
        say(format!("Unbind {}? (yes/no)", describe_option(&option)));
        if self.console.read_line().await.as_deref() == Some("yes") {
            let _ = self.inject.send(Some(PaymentOptionListAction::ClickOnUnbind {
                instrument_id: card.payment_instrument_id.clone(),
            }));
        }
    }
}

#[async_trait]
impl Host<PaymentOptionListState, PaymentOptionListEffect, PaymentOptionListAction>
    for OptionsScreen
{
    async fn show_state(
        &mut self,
        state: &PaymentOptionListState,
    ) -> Option<PaymentOptionListAction> {
        match state {
            PaymentOptionListState::Loading => say("Loading payment methods..."),
            PaymentOptionListState::Content(options) => {
                say("Choose a payment method:");
                for option in options {
                    say(describe_option(option));
                }
                say("Commands: pick <id>, unbind <id>, reload, logout, cancel");
            }
            PaymentOptionListState::Error(error) => {
                say(format!("Could not load payment methods: {error}. Type reload."));
            }
            PaymentOptionListState::WaitingForAuthState(_) => say("Waiting for wallet login..."),
        }
        None
    }

    async fn show_effect(&mut self, effect: PaymentOptionListEffect) {
        match effect {
            PaymentOptionListEffect::ProceedWithPaymentMethod { option_id, .. } => {
                self.finish(OptionsOutcome::Proceed(option_id));
            }
            PaymentOptionListEffect::RequireAuth => self.log_in().await,
            PaymentOptionListEffect::ShowUnbindScreen(option) => self.confirm_unbind(option).await,
            PaymentOptionListEffect::UnbindSuccess => say("Card unbound."),
            PaymentOptionListEffect::UnbindFailed => say("Could not unbind the card."),
            PaymentOptionListEffect::Cancel => self.finish(OptionsOutcome::Cancelled),
        }
    }
}

#[derive(Default)]
pub struct MoneyAuthScreen {
    pub logged_in: Option<bool>,
}

#[async_trait]
impl Host<MoneyAuthState, MoneyAuthEffect, MoneyAuthAction> for MoneyAuthScreen {
    async fn show_state(&mut self, state: &MoneyAuthState) -> Option<MoneyAuthAction> {
        if let MoneyAuthState::ResolvingAuthType = state {
            say("Preparing wallet login...");
        }
        None
    }

    async fn show_effect(&mut self, effect: MoneyAuthEffect) {
        match effect {
            MoneyAuthEffect::ShowInAppAuth => {
                say("Wallet login: type login <token> [account] or back");
            }
            MoneyAuthEffect::StartApp2App => {
                say("Opening the wallet app. Paste its answer: login <token> [account] or back");
            }
            MoneyAuthEffect::AuthSuccess { user_account } => {
                checkout_info!("Logged in to wallet {:?}", user_account);
                say("Logged in.");
                self.logged_in = Some(true);
            }
            MoneyAuthEffect::AuthFailed(error) => {
                checkout_warn!("Wallet login failed: {}", error);
                say(format!("Login failed: {error}. Type retry or back."));
            }
            MoneyAuthEffect::Cancelled => self.logged_in = Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractOutcome {
    Tokenize(TokenizeInputModel),
    Restart,
    Cancel,
}

/// Order confirmation. Fee-free Google Pay skips the confirmation prompt.
pub struct ContractScreen {
    inject: UnboundedSender<Option<ContractAction>>,
    pub outcome: Option<ContractOutcome>,
}

impl ContractScreen {
    pub fn new(inject: UnboundedSender<Option<ContractAction>>) -> Self {
        Self {
            inject,
            outcome: None,
        }
    }
}

#[async_trait]
impl Host<ContractState, ContractEffect, ContractAction> for ContractScreen {
    async fn show_state(&mut self, state: &ContractState) -> Option<ContractAction> {
        match state {
            ContractState::Loading => say("Loading order..."),
            ContractState::Content(content) => {
                say(format!("{}: {}", content.shop_title, content.shop_subtitle));
                say(format!(
                    "Pay {} with {}",
                    format_amount(&content.option.charge),
                    describe_option(&content.option)
                ));
                say(format!(
                    "Save payment method: {}, link wallet: {}",
                    content.should_save_payment_method, content.allow_wallet_linking
                ));
                say("Commands: pay [csc], save on|off, link on|off, back, logout");
            }
            ContractState::GooglePay(_) => {
                say("Paying with Google Pay...");
                return Some(ContractAction::Tokenize { csc: None });
            }
            ContractState::Error(error) => {
                say(format!("Could not load order: {error}. Type retry."));
            }
        }
        None
    }

    async fn show_effect(&mut self, effect: ContractEffect) {
        match effect {
            ContractEffect::ShowTokenize(model) => {
                self.outcome = Some(ContractOutcome::Tokenize(model));
                let _ = self.inject.send(None);
            }
            ContractEffect::StartGooglePay(charge) => {
                say(format!("Google Pay sheet for {}", format_amount(&charge)));
            }
            ContractEffect::RestartProcess => self.outcome = Some(ContractOutcome::Restart),
            ContractEffect::CancelProcess => self.outcome = Some(ContractOutcome::Cancel),
        }
    }
}

/// Tokenization progress. A second-factor request runs the payment-auth screen.
pub struct TokenizeScreen {
    context: CheckoutContext,
    console: Console,
    inject: UnboundedSender<Option<TokenizeAction>>,
    pub token: Option<TokenOutputModel>,
}

impl TokenizeScreen {
    pub fn new(
        context: CheckoutContext,
        console: Console,
        inject: UnboundedSender<Option<TokenizeAction>>,
    ) -> Self {
        Self {
            context,
            console,
            inject,
            token: None,
        }
    }

    async fn confirm_payment(&mut self, charge: Amount, allow_wallet_linking: bool) {
        let mut payment_auth = self.context.payment_auth(PaymentAuthScreen::default());
        let (_inject, mut source) =
            ConsoleSource::new(self.console.clone(), parse_payment_auth_command);
        payment_auth
            .invoke(PaymentAuthAction::Start {
                amount: charge,
                link_wallet_to_app: allow_wallet_linking,
            })
            .await;
        payment_auth.run(&mut source).await;

        let next = match payment_auth.host().confirmed {
            Some(true) => TokenizeAction::PaymentAuthSuccess,
            _ => TokenizeAction::PaymentAuthCancel,
        };
        let _ = self.inject.send(Some(next));
    }
}

#[async_trait]
impl Host<TokenizeState, TokenizeEffect, TokenizeAction> for TokenizeScreen {
    async fn show_state(&mut self, state: &TokenizeState) -> Option<TokenizeAction> {
        match state {
            TokenizeState::Start => {}
            TokenizeState::Tokenize(_) => say("Processing payment..."),
            TokenizeState::TokenizeError(_, error) => {
                say(format!("Payment failed: {error}. Type retry or cancel."));
            }
        }
        None
    }

    async fn show_effect(&mut self, effect: TokenizeEffect) {
        match effect {
            TokenizeEffect::TokenizeComplete(output) => self.token = Some(output),
            TokenizeEffect::PaymentAuthRequired {
                charge,
                allow_wallet_linking,
            } => self.confirm_payment(charge, allow_wallet_linking).await,
            TokenizeEffect::CancelTokenize => say("Payment cancelled."),
        }
    }
}

#[derive(Default)]
pub struct PaymentAuthScreen {
    pub confirmed: Option<bool>,
}

#[async_trait]
impl Host<PaymentAuthState, PaymentAuthEffect, PaymentAuthAction> for PaymentAuthScreen {
    async fn show_state(&mut self, state: &PaymentAuthState) -> Option<PaymentAuthAction> {
        match state {
            PaymentAuthState::Loading => say("Sending confirmation code..."),
            PaymentAuthState::InputCode(data) => {
                let attempts = data
                    .attempts_left
                    .map(|left| format!(", {left} attempts left"))
                    .unwrap_or_default();
                say(format!(
                    "Enter the {}-digit code{attempts} (or cancel)",
                    data.code_length
                ));
            }
            PaymentAuthState::InputCodeProcess(..) => say("Checking code..."),
            PaymentAuthState::InputCodeVerifyExceeded(data) => say(format!(
                "No attempts left. A new code can be requested in {} s; type cancel.",
                data.next_session_seconds
            )),
            PaymentAuthState::StartError(error) => {
                say(format!("Could not send the code: {error}. Type cancel."));
            }
            PaymentAuthState::ProcessError(_, error) => {
                say(format!("Could not check the code: {error}. Enter it again."));
            }
        }
        None
    }

    async fn show_effect(&mut self, effect: PaymentAuthEffect) {
        self.confirmed = Some(matches!(effect, PaymentAuthEffect::ShowSuccess));
    }
}
