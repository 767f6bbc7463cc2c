#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use checkout_core::model::{
    Amount, Confirmation, PaymentAuthData, PaymentMethodKind, PaymentOption, SavePaymentMethod,
    SelectedOption, TokenOutputModel, TokenizeInputModel, TokenizeInstrument,
};
use checkout_core::{CheckoutError, Reporter};
use checkout_engine::{
    AuthGateway, CodeCheck, Host, PaymentAuthGateway, PaymentMethodGateway, TokenizeGateway,
    TokenizeOutcome, UnbindGateway,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(checkout_logging::initialize_for_tests);
}

pub fn rub(minor_units: i64) -> Amount {
    Amount::new(minor_units, "RUB")
}

pub fn option(id: u32, kind: PaymentMethodKind) -> PaymentOption {
    PaymentOption {
        id,
        charge: rub(10_000),
        fee: None,
        save_payment_method_allowed: true,
        kind,
    }
}

pub fn selected(option: PaymentOption) -> SelectedOption {
    SelectedOption {
        shop_title: "Shop".to_string(),
        shop_subtitle: "Order #1".to_string(),
        option,
        allowed_methods: 3,
        save_payment_method: SavePaymentMethod::Off,
        confirmation: Confirmation::None,
        user_authorized: false,
    }
}

pub fn tokenize_model(option_id: u32) -> TokenizeInputModel {
    TokenizeInputModel {
        payment_option_id: option_id,
        save_payment_method: false,
        save_payment_instrument: false,
        allow_wallet_linking: true,
        confirmation: Confirmation::None,
        instrument: TokenizeInstrument::Option,
    }
}

pub fn token_output(token: &str) -> TokenOutputModel {
    TokenOutputModel {
        token: token.to_string(),
        option: option(1, PaymentMethodKind::NewCard),
        instrument: None,
    }
}

pub fn auth_data(attempts_left: Option<u32>) -> PaymentAuthData {
    PaymentAuthData {
        code_length: 4,
        attempts_left,
        next_session_seconds: 60,
    }
}

/// Host that records everything it is shown and may chain an action per state.
pub struct RecordingHost<S, E, A> {
    pub states: Vec<S>,
    pub effects: Vec<E>,
    chain: fn(&S) -> Option<A>,
}

impl<S, E, A> RecordingHost<S, E, A> {
    pub fn new() -> Self {
        Self::chaining(|_| None)
    }

    pub fn chaining(chain: fn(&S) -> Option<A>) -> Self {
        Self {
            states: Vec::new(),
            effects: Vec::new(),
            chain,
        }
    }
}

#[async_trait]
impl<S, E, A> Host<S, E, A> for RecordingHost<S, E, A>
where
    S: Clone + Send + Sync + 'static,
    E: Send + 'static,
    A: Send + 'static,
{
    async fn show_state(&mut self, state: &S) -> Option<A> {
        self.states.push(state.clone());
        (self.chain)(state)
    }

    async fn show_effect(&mut self, effect: E) {
        self.effects.push(effect);
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn names(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, name: &str, _args: &[(&str, String)]) {
        self.events.lock().unwrap().push(name.to_string());
    }
}

/// In-memory backend with scripted answers and call counters.
pub struct FakeGateway {
    pub selected: Mutex<Result<SelectedOption, CheckoutError>>,
    pub options: Mutex<Vec<PaymentOption>>,
    pub tokenize_outcomes: Mutex<Vec<Result<TokenizeOutcome, CheckoutError>>>,
    pub code_checks: Mutex<Vec<CodeCheck>>,
    pub wallet_app: bool,
    pub unbound: Mutex<Vec<String>>,
    pub saved_tokens: Mutex<Vec<String>>,
    pub logouts: AtomicUsize,
    pub tokenize_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            selected: Mutex::new(Ok(selected(option(1, PaymentMethodKind::NewCard)))),
            options: Mutex::new(Vec::new()),
            tokenize_outcomes: Mutex::new(Vec::new()),
            code_checks: Mutex::new(Vec::new()),
            wallet_app: false,
            unbound: Mutex::new(Vec::new()),
            saved_tokens: Mutex::new(Vec::new()),
            logouts: AtomicUsize::new(0),
            tokenize_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PaymentMethodGateway for FakeGateway {
    async fn selected_option(&self) -> Result<SelectedOption, CheckoutError> {
        self.selected.lock().unwrap().clone()
    }

    async fn payment_options(&self) -> Result<Vec<PaymentOption>, CheckoutError> {
        Ok(self.options.lock().unwrap().clone())
    }
}

#[async_trait]
impl TokenizeGateway for FakeGateway {
    async fn tokenize(
        &self,
        _model: &TokenizeInputModel,
    ) -> Result<TokenizeOutcome, CheckoutError> {
        self.tokenize_calls.fetch_add(1, Ordering::SeqCst);
        let mut outcomes = self.tokenize_outcomes.lock().unwrap();
        if outcomes.is_empty() {
            Ok(TokenizeOutcome::Token(token_output("tok")))
        } else {
            outcomes.remove(0)
        }
    }
}

#[async_trait]
impl AuthGateway for FakeGateway {
    async fn logout(&self) -> Result<(), CheckoutError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn wallet_app_available(&self) -> Result<bool, CheckoutError> {
        Ok(self.wallet_app)
    }

    async fn save_token(
        &self,
        token: &str,
        _user_account: Option<&str>,
    ) -> Result<(), CheckoutError> {
        self.saved_tokens.lock().unwrap().push(token.to_string());
        Ok(())
    }
}

#[async_trait]
impl PaymentAuthGateway for FakeGateway {
    async fn start(
        &self,
        _amount: &Amount,
        _link_wallet_to_app: bool,
    ) -> Result<PaymentAuthData, CheckoutError> {
        Ok(auth_data(Some(3)))
    }

    async fn check_code(&self, _code: &str) -> Result<CodeCheck, CheckoutError> {
        let mut checks = self.code_checks.lock().unwrap();
        if checks.is_empty() {
            Ok(CodeCheck::Accepted)
        } else {
            Ok(checks.remove(0))
        }
    }
}

#[async_trait]
impl UnbindGateway for FakeGateway {
    async fn unbind(&self, payment_instrument_id: &str) -> Result<(), CheckoutError> {
        self.unbound
            .lock()
            .unwrap()
            .push(payment_instrument_id.to_string());
        Ok(())
    }
}
