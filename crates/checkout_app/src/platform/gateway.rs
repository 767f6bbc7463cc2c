//! In-memory backend driving the console demo.
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use checkout_core::model::{
    Amount, BankCardInstrument, Confirmation, OptionId, PaymentAuthData, PaymentMethodKind,
    PaymentOption, SavePaymentMethod, SelectedOption, TokenOutputModel, TokenizeInputModel,
    TokenizeInstrument,
};
use checkout_core::CheckoutError;
use checkout_engine::{
    AuthGateway, CodeCheck, PaymentAuthGateway, PaymentMethodGateway, TokenizeGateway,
    TokenizeOutcome, UnbindGateway,
};
use checkout_logging::{checkout_debug, checkout_info};
use url::Url;

use super::settings::{CheckoutSettings, DemoMethod};

const WALLET_ID: &str = "4100116075156746";
const NEXT_SESSION_SECONDS: u32 = 60;

struct DemoState {
    user_account: Option<String>,
    selected: Option<OptionId>,
    saved_cards: Vec<BankCardInstrument>,
    attempts_left: u32,
    payment_confirmed: bool,
    issued_tokens: u32,
}

pub struct DemoGateway {
    settings: CheckoutSettings,
    latency: Duration,
    state: Mutex<DemoState>,
}

impl DemoGateway {
    pub fn new(settings: &CheckoutSettings) -> Self {
        Self {
            settings: settings.clone(),
            latency: Duration::from_millis(settings.latency_ms),
            state: Mutex::new(DemoState {
                user_account: None,
                selected: None,
                saved_cards: vec![BankCardInstrument {
                    payment_instrument_id: "instr-demo-1".to_string(),
                    first6: "555555".to_string(),
                    last4: "4477".to_string(),
                    csc_required: true,
                }],
                attempts_left: settings.code_attempts,
                payment_confirmed: false,
                issued_tokens: 0,
            }),
        }
    }

    pub fn select(&self, option_id: OptionId) -> Result<(), CheckoutError> {
        checkout_info!("Selected payment option {}", option_id);
        self.state()?.selected = Some(option_id);
        Ok(())
    }

    pub fn is_logged_in(&self) -> Result<bool, CheckoutError> {
        Ok(self.state()?.user_account.is_some())
    }

    fn state(&self) -> Result<MutexGuard<'_, DemoState>, CheckoutError> {
        self.state
            .lock()
            .map_err(|_| CheckoutError::Unknown("demo backend state poisoned".to_string()))
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn amount(&self, minor_units: i64) -> Amount {
        Amount::new(minor_units, self.settings.currency.clone())
    }

    fn options(&self, state: &DemoState) -> Vec<PaymentOption> {
        let charge = self.amount(self.settings.amount_minor_units);
        let mut kinds = Vec::new();
        for method in &self.settings.methods {
            match method {
                DemoMethod::NewCard => kinds.push((PaymentMethodKind::NewCard, None)),
                DemoMethod::Wallet => {
                    let kind = match state.user_account {
                        Some(_) => PaymentMethodKind::Wallet {
                            wallet_id: WALLET_ID.to_string(),
                            balance: self.amount(1_000_000),
                        },
                        None => PaymentMethodKind::AbstractWallet,
                    };
                    kinds.push((kind, None));
                }
                DemoMethod::SavedCards => kinds.extend(
                    state
                        .saved_cards
                        .iter()
                        .map(|card| (PaymentMethodKind::SavedBankCard(card.clone()), None)),
                ),
                DemoMethod::GooglePay => {
                    let fee = self.amount(self.settings.google_pay_fee_minor_units);
                    kinds.push((PaymentMethodKind::GooglePay, Some(fee)));
                }
                DemoMethod::SberBank => kinds.push((PaymentMethodKind::SberBank, None)),
                DemoMethod::Sbp => kinds.push((PaymentMethodKind::Sbp, None)),
            }
        }

        kinds
            .into_iter()
            .zip(1..)
            .map(|((kind, fee), id)| PaymentOption {
                id,
                charge: charge.clone(),
                fee,
                save_payment_method_allowed: matches!(
                    kind,
                    PaymentMethodKind::NewCard | PaymentMethodKind::SavedBankCard(_)
                ),
                kind,
            })
            .collect()
    }

    fn find_option(&self, state: &DemoState, id: OptionId) -> Result<PaymentOption, CheckoutError> {
        self.options(state)
            .into_iter()
            .find(|option| option.id == id)
            .ok_or_else(|| CheckoutError::api(404, "payment_option_not_found"))
    }
}

#[async_trait]
impl PaymentMethodGateway for DemoGateway {
    async fn selected_option(&self) -> Result<SelectedOption, CheckoutError> {
        self.round_trip().await;
        let return_url = Url::parse(&self.settings.return_url)
            .map_err(|err| CheckoutError::Unknown(format!("bad return url: {err}")))?;
        let state = self.state()?;
        let id = state
            .selected
            .ok_or_else(|| CheckoutError::Unknown("no payment option selected".to_string()))?;
        let option = self.find_option(&state, id)?;
        let confirmation = match option.kind {
            PaymentMethodKind::SberBank | PaymentMethodKind::Sbp => {
                Confirmation::MobileApplication { return_url }
            }
            _ => Confirmation::Redirect { return_url },
        };
        Ok(SelectedOption {
            shop_title: self.settings.shop_title.clone(),
            shop_subtitle: self.settings.shop_subtitle.clone(),
            allowed_methods: self.options(&state).len(),
            save_payment_method: SavePaymentMethod::UserSelects,
            confirmation,
            user_authorized: state.user_account.is_some(),
            option,
        })
    }

    async fn payment_options(&self) -> Result<Vec<PaymentOption>, CheckoutError> {
        self.round_trip().await;
        let state = self.state()?;
        Ok(self.options(&state))
    }
}

#[async_trait]
impl TokenizeGateway for DemoGateway {
    async fn tokenize(&self, model: &TokenizeInputModel) -> Result<TokenizeOutcome, CheckoutError> {
        self.round_trip().await;
        let mut state = self.state()?;
        let option = self.find_option(&state, model.payment_option_id)?;

        let wallet_payment = matches!(
            (&option.kind, &model.instrument),
            (PaymentMethodKind::Wallet { .. }, TokenizeInstrument::Option)
        );
        if wallet_payment && self.settings.require_payment_auth && !state.payment_confirmed {
            checkout_debug!("Wallet payment of option {} needs a code", option.id);
            return Ok(TokenizeOutcome::PaymentAuthRequired(option.charge));
        }

        state.payment_confirmed = false;
        state.issued_tokens += 1;
        let instrument = match &model.instrument {
            TokenizeInstrument::SavedBankCard { instrument, .. } => Some(instrument.clone()),
            _ => None,
        };
        Ok(TokenizeOutcome::Token(TokenOutputModel {
            token: format!("demo-token-{}", state.issued_tokens),
            option,
            instrument,
        }))
    }
}

#[async_trait]
impl AuthGateway for DemoGateway {
    async fn logout(&self) -> Result<(), CheckoutError> {
        self.round_trip().await;
        self.state()?.user_account = None;
        Ok(())
    }

    async fn wallet_app_available(&self) -> Result<bool, CheckoutError> {
        Ok(self.settings.wallet_app_installed)
    }

    async fn save_token(
        &self,
        token: &str,
        user_account: Option<&str>,
    ) -> Result<(), CheckoutError> {
        if token.is_empty() {
            return Err(CheckoutError::api(401, "invalid_token"));
        }
        self.state()?.user_account = Some(user_account.unwrap_or(WALLET_ID).to_string());
        Ok(())
    }
}

#[async_trait]
impl PaymentAuthGateway for DemoGateway {
    async fn start(
        &self,
        _amount: &Amount,
        _link_wallet_to_app: bool,
    ) -> Result<PaymentAuthData, CheckoutError> {
        self.round_trip().await;
        let mut state = self.state()?;
        state.attempts_left = self.settings.code_attempts;
        Ok(PaymentAuthData {
            code_length: self.settings.confirmation_code.chars().count(),
            attempts_left: Some(state.attempts_left),
            next_session_seconds: NEXT_SESSION_SECONDS,
        })
    }

    async fn check_code(&self, code: &str) -> Result<CodeCheck, CheckoutError> {
        self.round_trip().await;
        let mut state = self.state()?;
        if code == self.settings.confirmation_code {
            state.payment_confirmed = true;
            return Ok(CodeCheck::Accepted);
        }
        state.attempts_left = state.attempts_left.saturating_sub(1);
        if state.attempts_left == 0 {
            return Ok(CodeCheck::AttemptsExceeded);
        }
        Ok(CodeCheck::WrongAnswer(PaymentAuthData {
            code_length: self.settings.confirmation_code.chars().count(),
            attempts_left: Some(state.attempts_left),
            next_session_seconds: NEXT_SESSION_SECONDS,
        }))
    }
}

#[async_trait]
impl UnbindGateway for DemoGateway {
    async fn unbind(&self, payment_instrument_id: &str) -> Result<(), CheckoutError> {
        self.round_trip().await;
        let mut state = self.state()?;
        let before = state.saved_cards.len();
        state
            .saved_cards
            .retain(|card| card.payment_instrument_id != payment_instrument_id);
        if state.saved_cards.len() == before {
            return Err(CheckoutError::api(404, "payment_instrument_not_found"));
        }
        Ok(())
    }
}
