//! Payment option list: choosing a method, wallet login, unbinding saved cards.
use crate::logic::{Command, Logic, Out, OutOf};
use crate::model::{OptionId, PaymentMethodKind, PaymentOption};
use crate::CheckoutError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOptionListState {
    Loading,
    Content(Vec<PaymentOption>),
    Error(CheckoutError),
    /// User picked the wallet placeholder and is logging in.
    WaitingForAuthState(Vec<PaymentOption>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOptionListAction {
    Load,
    LoadPaymentOptionListSuccess {
        options: Vec<PaymentOption>,
        after_auth: bool,
    },
    LoadPaymentOptionListFailed(CheckoutError),
    ProceedWithPaymentMethod {
        option_id: OptionId,
        instrument_id: Option<String>,
    },
    PaymentAuthSuccess,
    PaymentAuthCancel,
    Logout,
    LogoutSuccessful,
    LogoutFailed(CheckoutError),
    OpenUnbindScreen {
        option_id: OptionId,
    },
    ClickOnUnbind {
        instrument_id: String,
    },
    UnbindSuccess,
    UnbindFailed(CheckoutError),
    ClickOnCancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOptionListEffect {
    ProceedWithPaymentMethod {
        option_id: OptionId,
        instrument_id: Option<String>,
    },
    RequireAuth,
    ShowUnbindScreen(PaymentOption),
    UnbindSuccess,
    UnbindFailed,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOptionListCommand {
    LoadOptions { after_auth: bool },
    Logout,
    Unbind { instrument_id: String },
}

impl Command for PaymentOptionListCommand {
    type Action = PaymentOptionListAction;

    fn failed(&self, error: CheckoutError) -> PaymentOptionListAction {
        match self {
            PaymentOptionListCommand::LoadOptions { .. } => {
                PaymentOptionListAction::LoadPaymentOptionListFailed(error)
            }
            PaymentOptionListCommand::Logout => PaymentOptionListAction::LogoutFailed(error),
            PaymentOptionListCommand::Unbind { .. } => PaymentOptionListAction::UnbindFailed(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentOptionListLogic;

impl Logic for PaymentOptionListLogic {
    type State = PaymentOptionListState;
    type Action = PaymentOptionListAction;
    type Effect = PaymentOptionListEffect;
    type Command = PaymentOptionListCommand;

    fn reduce(
        &self,
        state: PaymentOptionListState,
        action: PaymentOptionListAction,
    ) -> OutOf<Self> {
        use PaymentOptionListAction as A;
        use PaymentOptionListState as S;

        match (state, action) {
            (S::Loading | S::Content(_) | S::Error(_), A::Load) => Out::new(S::Loading)
                .input(PaymentOptionListCommand::LoadOptions { after_auth: false }),

            (
                S::Loading,
                A::LoadPaymentOptionListSuccess {
                    options,
                    after_auth,
                },
            ) => options_loaded(options, after_auth),
            (S::Loading, A::LoadPaymentOptionListFailed(error)) => {
                Out::new(S::Error(error)).source()
            }

            (
                S::Content(options),
                A::ProceedWithPaymentMethod {
                    option_id,
                    instrument_id,
                },
            ) => proceed(options, option_id, instrument_id),

            (S::WaitingForAuthState(_), A::PaymentAuthSuccess) => Out::new(S::Loading)
                .input(PaymentOptionListCommand::LoadOptions { after_auth: true }),
            (S::WaitingForAuthState(options), A::PaymentAuthCancel) => {
                if options.len() == 1 {
                    Out::new(S::WaitingForAuthState(options))
                        .output(PaymentOptionListEffect::Cancel)
                } else {
                    Out::new(S::Content(options)).source()
                }
            }

            (S::Content(options), A::Logout) => {
                Out::new(S::Content(options)).input(PaymentOptionListCommand::Logout)
            }
            (S::Content(_), A::LogoutSuccessful) => Out::new(S::Loading)
                .input(PaymentOptionListCommand::LoadOptions { after_auth: false }),
            (S::Content(options), A::LogoutFailed(_)) => Out::new(S::Content(options)).source(),

            (S::Content(options), A::OpenUnbindScreen { option_id }) => {
                match options.iter().find(|option| option.id == option_id).cloned() {
                    Some(option) if is_unbindable(&option) => Out::new(S::Content(options))
                        .output(PaymentOptionListEffect::ShowUnbindScreen(option))
                        .source(),
                    _ => Out::skip(S::Content(options)),
                }
            }
            (S::Content(_), A::ClickOnUnbind { instrument_id }) => {
                Out::new(S::Loading).input(PaymentOptionListCommand::Unbind { instrument_id })
            }
            (S::Loading, A::UnbindSuccess) => Out::new(S::Loading)
                .output(PaymentOptionListEffect::UnbindSuccess)
                .input(PaymentOptionListCommand::LoadOptions { after_auth: false }),
            (S::Loading, A::UnbindFailed(_)) => Out::new(S::Loading)
                .output(PaymentOptionListEffect::UnbindFailed)
                .input(PaymentOptionListCommand::LoadOptions { after_auth: false }),

            (state @ (S::Content(_) | S::Error(_)), A::ClickOnCancel) => {
                Out::new(state).output(PaymentOptionListEffect::Cancel)
            }

            (state, _) => Out::skip(state),
        }
    }
}

fn proceed(
    options: Vec<PaymentOption>,
    option_id: OptionId,
    instrument_id: Option<String>,
) -> OutOf<PaymentOptionListLogic> {
    match options.iter().find(|option| option.id == option_id) {
        Some(option) if option.requires_auth() => {
            Out::new(PaymentOptionListState::WaitingForAuthState(options))
                .output(PaymentOptionListEffect::RequireAuth)
                .source()
        }
        Some(_) => Out::new(PaymentOptionListState::Content(options))
            .output(PaymentOptionListEffect::ProceedWithPaymentMethod {
                option_id,
                instrument_id,
            })
            .source(),
        None => Out::skip(PaymentOptionListState::Content(options)),
    }
}

fn options_loaded(options: Vec<PaymentOption>, after_auth: bool) -> OutOf<PaymentOptionListLogic> {
    // A lone option leaves nothing to choose.
    if let [only] = options.as_slice() {
        let option_id = only.id;
        return proceed(options, option_id, None);
    }
    if after_auth {
        if let Some(wallet_id) = auto_proceed_target(&options) {
            return Out::new(PaymentOptionListState::Content(options))
                .output(PaymentOptionListEffect::ProceedWithPaymentMethod {
                    option_id: wallet_id,
                    instrument_id: None,
                })
                .source();
        }
    }
    Out::new(PaymentOptionListState::Content(options)).source()
}

/// After a wallet login the list is skipped when the wallet is the only
/// sensible choice: a concrete wallet exists and no linked card needs picking.
fn auto_proceed_target(options: &[PaymentOption]) -> Option<OptionId> {
    let has_linked_cards = options
        .iter()
        .any(|option| matches!(option.kind, PaymentMethodKind::LinkedCard(_)));
    if has_linked_cards {
        return None;
    }
    options
        .iter()
        .find(|option| matches!(option.kind, PaymentMethodKind::Wallet { .. }))
        .map(|option| option.id)
}

fn is_unbindable(option: &PaymentOption) -> bool {
    matches!(
        option.kind,
        PaymentMethodKind::LinkedCard(_) | PaymentMethodKind::SavedBankCard(_)
    )
}
