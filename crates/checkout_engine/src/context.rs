use std::sync::Arc;

use checkout_core::analytics::{
    contract_events, money_auth_events, payment_auth_events, payment_option_events,
    tokenize_events, unbind_card_events,
};
use checkout_core::{
    Analytics, ContractAction, ContractEffect, ContractLogic, ContractState, EventMapper,
    MoneyAuthAction, MoneyAuthEffect, MoneyAuthLogic, MoneyAuthState, PaymentAuthAction,
    PaymentAuthEffect, PaymentAuthLogic, PaymentAuthState, PaymentOptionListAction,
    PaymentOptionListEffect, PaymentOptionListLogic, PaymentOptionListState, Reporter,
    TokenizeAction, TokenizeEffect, TokenizeLogic, TokenizeState, Tracked, UnbindCardAction,
    UnbindCardEffect, UnbindCardLogic, UnbindCardState,
};

use crate::gateway::{
    AuthGateway, PaymentAuthGateway, PaymentMethodGateway, TokenizeGateway, UnbindGateway,
};
use crate::use_cases::{
    ContractUseCase, MoneyAuthUseCase, PaymentAuthUseCase, PaymentOptionsUseCase,
    TokenizeUseCase, UnbindCardUseCase,
};
use crate::{Host, Runtime, RuntimeConfig};

/// Backend collaborators shared by every workflow of one checkout.
#[derive(Clone)]
pub struct Gateways {
    pub payment_methods: Arc<dyn PaymentMethodGateway>,
    pub tokenize: Arc<dyn TokenizeGateway>,
    pub auth: Arc<dyn AuthGateway>,
    pub payment_auth: Arc<dyn PaymentAuthGateway>,
    pub unbind: Arc<dyn UnbindGateway>,
}

impl Gateways {
    /// Use one object for every concern.
    pub fn shared<G>(gateway: Arc<G>) -> Self
    where
        G: PaymentMethodGateway
            + TokenizeGateway
            + AuthGateway
            + PaymentAuthGateway
            + UnbindGateway
            + 'static,
    {
        Self {
            payment_methods: gateway.clone(),
            tokenize: gateway.clone(),
            auth: gateway.clone(),
            payment_auth: gateway.clone(),
            unbind: gateway,
        }
    }
}

/// Builds ready-to-run workflows: decorated logic, use case and config wired
/// together. One context per checkout screen stack; nothing here is global.
#[derive(Clone)]
pub struct CheckoutContext {
    gateways: Gateways,
    reporter: Arc<dyn Reporter>,
    warn_on_skip: bool,
}

impl CheckoutContext {
    pub fn new(gateways: Gateways, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            gateways,
            reporter,
            warn_on_skip: false,
        }
    }

    pub fn with_warn_on_skip(mut self, warn_on_skip: bool) -> Self {
        self.warn_on_skip = warn_on_skip;
        self
    }

    fn config(&self, flow: &'static str) -> RuntimeConfig {
        RuntimeConfig::new(flow).with_warn_on_skip(self.warn_on_skip)
    }

    pub fn tokenize<H>(&self, host: H) -> Runtime<Tracked<TokenizeLogic>, H>
    where
        H: Host<TokenizeState, TokenizeEffect, TokenizeAction>,
    {
        let logic = Analytics::new(
            TokenizeLogic,
            self.reporter.clone(),
            tokenize_events as EventMapper<TokenizeLogic>,
        );
        let use_case = TokenizeUseCase::new(self.gateways.tokenize.clone());
        Runtime::new(
            logic,
            TokenizeState::Start,
            Arc::new(use_case),
            host,
            self.config("tokenize"),
        )
    }

    pub fn contract<H>(&self, host: H) -> Runtime<Tracked<ContractLogic>, H>
    where
        H: Host<ContractState, ContractEffect, ContractAction>,
    {
        let logic = Analytics::new(
            ContractLogic,
            self.reporter.clone(),
            contract_events as EventMapper<ContractLogic>,
        );
        let use_case = ContractUseCase::new(
            self.gateways.payment_methods.clone(),
            self.gateways.auth.clone(),
        );
        Runtime::new(
            logic,
            ContractState::Loading,
            Arc::new(use_case),
            host,
            self.config("contract"),
        )
    }

    pub fn payment_options<H>(&self, host: H) -> Runtime<Tracked<PaymentOptionListLogic>, H>
    where
        H: Host<PaymentOptionListState, PaymentOptionListEffect, PaymentOptionListAction>,
    {
        let logic = Analytics::new(
            PaymentOptionListLogic,
            self.reporter.clone(),
            payment_option_events as EventMapper<PaymentOptionListLogic>,
        );
        let use_case = PaymentOptionsUseCase::new(
            self.gateways.payment_methods.clone(),
            self.gateways.auth.clone(),
            self.gateways.unbind.clone(),
        );
        Runtime::new(
            logic,
            PaymentOptionListState::Loading,
            Arc::new(use_case),
            host,
            self.config("payment-options"),
        )
    }

    pub fn unbind_card<H>(&self, host: H) -> Runtime<Tracked<UnbindCardLogic>, H>
    where
        H: Host<UnbindCardState, UnbindCardEffect, UnbindCardAction>,
    {
        let logic = Analytics::new(
            UnbindCardLogic,
            self.reporter.clone(),
            unbind_card_events as EventMapper<UnbindCardLogic>,
        );
        let use_case = UnbindCardUseCase::new(self.gateways.unbind.clone());
        Runtime::new(
            logic,
            UnbindCardState::Initial,
            Arc::new(use_case),
            host,
            self.config("unbind-card"),
        )
    }

    pub fn money_auth<H>(&self, host: H) -> Runtime<Tracked<MoneyAuthLogic>, H>
    where
        H: Host<MoneyAuthState, MoneyAuthEffect, MoneyAuthAction>,
    {
        let logic = Analytics::new(
            MoneyAuthLogic,
            self.reporter.clone(),
            money_auth_events as EventMapper<MoneyAuthLogic>,
        );
        let use_case = MoneyAuthUseCase::new(self.gateways.auth.clone());
        Runtime::new(
            logic,
            MoneyAuthState::WaitingForAuthStarted,
            Arc::new(use_case),
            host,
            self.config("money-auth"),
        )
    }

    pub fn payment_auth<H>(&self, host: H) -> Runtime<Tracked<PaymentAuthLogic>, H>
    where
        H: Host<PaymentAuthState, PaymentAuthEffect, PaymentAuthAction>,
    {
        let logic = Analytics::new(
            PaymentAuthLogic,
            self.reporter.clone(),
            payment_auth_events as EventMapper<PaymentAuthLogic>,
        );
        let use_case = PaymentAuthUseCase::new(self.gateways.payment_auth.clone());
        Runtime::new(
            logic,
            PaymentAuthState::Loading,
            Arc::new(use_case),
            host,
            self.config("payment-auth"),
        )
    }
}
