//! Telemetry as a reducer decorator.
//!
//! [`Analytics`] wraps any [`Logic`] with the same signature. A mapper picks
//! the actions worth reporting; the wrapped reducer's output is returned
//! untouched, so decorators compose freely.
use std::sync::Arc;

use crate::contract::{ContractAction, ContractState};
use crate::logic::{Logic, OutOf};
use crate::money_auth::{MoneyAuthAction, MoneyAuthState};
use crate::payment_auth::{PaymentAuthAction, PaymentAuthState};
use crate::payment_options::{PaymentOptionListAction, PaymentOptionListState};
use crate::tokenize::{TokenizeAction, TokenizeState};
use crate::unbind_card::{UnbindCardAction, UnbindCardState};

/// Analytics sink. Called synchronously; implementations must not block.
pub trait Reporter: Send + Sync {
    fn report(&self, name: &str, args: &[(&str, String)]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub args: Vec<(&'static str, String)>,
}

impl AnalyticsEvent {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.args.push((key, value.into()));
        self
    }
}

/// Plain function mapper, so decorated logic has a nameable type.
pub type EventMapper<L> =
    fn(&<L as Logic>::State, &<L as Logic>::Action) -> Option<AnalyticsEvent>;

pub type Tracked<L> = Analytics<L, EventMapper<L>>;

pub struct Analytics<L, F> {
    inner: L,
    reporter: Arc<dyn Reporter>,
    mapper: F,
}

impl<L, F> Analytics<L, F>
where
    L: Logic,
    F: Fn(&L::State, &L::Action) -> Option<AnalyticsEvent> + Send + Sync + 'static,
{
    pub fn new(inner: L, reporter: Arc<dyn Reporter>, mapper: F) -> Self {
        Self {
            inner,
            reporter,
            mapper,
        }
    }
}

impl<L, F> Logic for Analytics<L, F>
where
    L: Logic,
    F: Fn(&L::State, &L::Action) -> Option<AnalyticsEvent> + Send + Sync + 'static,
{
    type State = L::State;
    type Action = L::Action;
    type Effect = L::Effect;
    type Command = L::Command;

    fn reduce(&self, state: L::State, action: L::Action) -> OutOf<Self> {
        if let Some(event) = (self.mapper)(&state, &action) {
            let args: Vec<(&str, String)> = event
                .args
                .iter()
                .map(|(key, value)| (*key, value.clone()))
                .collect();
            self.reporter.report(event.name, &args);
        }
        self.inner.reduce(state, action)
    }
}

pub fn tokenize_events(state: &TokenizeState, action: &TokenizeAction) -> Option<AnalyticsEvent> {
    match (state, action) {
        (TokenizeState::Tokenize(model), TokenizeAction::TokenizeSuccess(output)) => Some(
            AnalyticsEvent::new("actionTokenize")
                .arg("paymentMethodType", output.option.method_type())
                .arg("savePaymentMethod", model.save_payment_method.to_string()),
        ),
        (_, TokenizeAction::TokenizeFailed(error)) => {
            Some(AnalyticsEvent::new("actionTokenizeFailed").arg("error", error.kind()))
        }
        (_, TokenizeAction::PaymentAuthRequired(_)) => {
            Some(AnalyticsEvent::new("actionPaymentAuthorizationRequired"))
        }
        _ => None,
    }
}

pub fn contract_events(state: &ContractState, action: &ContractAction) -> Option<AnalyticsEvent> {
    match (state, action) {
        (ContractState::Loading, ContractAction::LoadContractSuccess(selected)) => Some(
            AnalyticsEvent::new("screenPaymentContract")
                .arg("paymentMethodType", selected.option.method_type()),
        ),
        (ContractState::Loading, ContractAction::LoadContractFailed(error)) => {
            Some(AnalyticsEvent::new("screenError").arg("error", error.kind()))
        }
        (ContractState::Content(_), ContractAction::Logout) => {
            Some(AnalyticsEvent::new("actionLogout"))
        }
        _ => None,
    }
}

pub fn payment_option_events(
    state: &PaymentOptionListState,
    action: &PaymentOptionListAction,
) -> Option<AnalyticsEvent> {
    match (state, action) {
        (
            PaymentOptionListState::Loading,
            PaymentOptionListAction::LoadPaymentOptionListSuccess { options, .. },
        ) => Some(
            AnalyticsEvent::new("screenPaymentOptions")
                .arg("optionCount", options.len().to_string()),
        ),
        (_, PaymentOptionListAction::UnbindSuccess) => {
            Some(AnalyticsEvent::new("actionUnbindBankCard").arg("status", "success"))
        }
        (_, PaymentOptionListAction::UnbindFailed(_)) => {
            Some(AnalyticsEvent::new("actionUnbindBankCard").arg("status", "fail"))
        }
        (PaymentOptionListState::Content(_), PaymentOptionListAction::Logout) => {
            Some(AnalyticsEvent::new("actionLogout"))
        }
        _ => None,
    }
}

pub fn unbind_card_events(
    state: &UnbindCardState,
    action: &UnbindCardAction,
) -> Option<AnalyticsEvent> {
    match (state, action) {
        (UnbindCardState::Initial, UnbindCardAction::StartDisplayData { linked_card, .. }) => {
            let kind = if linked_card.is_some() { "wallet" } else { "bankCard" };
            Some(AnalyticsEvent::new("screenUnbindCard").arg("cardType", kind))
        }
        (UnbindCardState::LoadingUnbinding(_), UnbindCardAction::UnbindSuccess) => {
            Some(AnalyticsEvent::new("actionUnbindBankCard").arg("status", "success"))
        }
        (UnbindCardState::LoadingUnbinding(_), UnbindCardAction::UnbindFailed(_)) => {
            Some(AnalyticsEvent::new("actionUnbindBankCard").arg("status", "fail"))
        }
        _ => None,
    }
}

pub fn money_auth_events(
    state: &MoneyAuthState,
    action: &MoneyAuthAction,
) -> Option<AnalyticsEvent> {
    match (state, action) {
        (MoneyAuthState::Authorize(auth_type), MoneyAuthAction::Authorized { token, .. }) => {
            let status = if token.is_some() { "success" } else { "canceled" };
            Some(
                AnalyticsEvent::new("actionMoneyAuthLogin")
                    .arg("authType", auth_type.label())
                    .arg("status", status),
            )
        }
        (_, MoneyAuthAction::AuthFailed(error)) => Some(
            AnalyticsEvent::new("actionMoneyAuthLogin")
                .arg("status", "fail")
                .arg("error", error.kind()),
        ),
        _ => None,
    }
}

pub fn payment_auth_events(
    state: &PaymentAuthState,
    action: &PaymentAuthAction,
) -> Option<AnalyticsEvent> {
    match (state, action) {
        (PaymentAuthState::InputCodeProcess(..), PaymentAuthAction::ProcessAuthSuccess) => Some(
            AnalyticsEvent::new("actionPaymentAuthorization").arg("status", "success"),
        ),
        (PaymentAuthState::InputCodeProcess(..), PaymentAuthAction::ProcessAuthWrongAnswer(_)) => {
            Some(AnalyticsEvent::new("actionPaymentAuthorization").arg("status", "wrongAnswer"))
        }
        (_, PaymentAuthAction::ProcessAuthFailed(error)) => Some(
            AnalyticsEvent::new("actionPaymentAuthorization")
                .arg("status", "fail")
                .arg("error", error.kind()),
        ),
        _ => None,
    }
}
