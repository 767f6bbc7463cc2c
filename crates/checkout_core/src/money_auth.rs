//! Wallet login, either inside this app or by handing off to the wallet app.
use crate::logic::{Command, Logic, Out, OutOf};
use crate::model::AuthType;
use crate::CheckoutError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyAuthState {
    WaitingForAuthStarted,
    ResolvingAuthType,
    Authorize(AuthType),
    CompleteAuth,
    CancelAuth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyAuthAction {
    RequireAuth,
    AuthTypeResolved {
        app2app_available: bool,
    },
    /// Login finished; a missing token means the user backed out.
    Authorized {
        token: Option<String>,
        user_account: Option<String>,
    },
    AuthTokenSaved {
        user_account: Option<String>,
    },
    AuthFailed(CheckoutError),
    AuthCancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyAuthEffect {
    ShowInAppAuth,
    StartApp2App,
    AuthSuccess { user_account: Option<String> },
    AuthFailed(CheckoutError),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyAuthCommand {
    /// Checks whether the wallet app can be opened on this device.
    ResolveAuthType,
    SaveToken {
        token: String,
        user_account: Option<String>,
    },
}

impl Command for MoneyAuthCommand {
    type Action = MoneyAuthAction;

    fn failed(&self, error: CheckoutError) -> MoneyAuthAction {
        match self {
            // Without an answer the in-app flow is always available.
            MoneyAuthCommand::ResolveAuthType => MoneyAuthAction::AuthTypeResolved {
                app2app_available: false,
            },
            MoneyAuthCommand::SaveToken { .. } => MoneyAuthAction::AuthFailed(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoneyAuthLogic;

impl Logic for MoneyAuthLogic {
    type State = MoneyAuthState;
    type Action = MoneyAuthAction;
    type Effect = MoneyAuthEffect;
    type Command = MoneyAuthCommand;

    fn reduce(&self, state: MoneyAuthState, action: MoneyAuthAction) -> OutOf<Self> {
        use MoneyAuthAction as A;
        use MoneyAuthState as S;

        match (state, action) {
            (S::WaitingForAuthStarted, A::RequireAuth) => {
                Out::new(S::ResolvingAuthType).input(MoneyAuthCommand::ResolveAuthType)
            }
            (S::ResolvingAuthType, A::AuthTypeResolved { app2app_available }) => {
                if app2app_available {
                    Out::new(S::Authorize(AuthType::App2App))
                        .output(MoneyAuthEffect::StartApp2App)
                        .source()
                } else {
                    Out::new(S::Authorize(AuthType::InApp))
                        .output(MoneyAuthEffect::ShowInAppAuth)
                        .source()
                }
            }
            (
                S::Authorize(_),
                A::Authorized {
                    token: Some(token),
                    user_account,
                },
            ) => Out::new(S::CompleteAuth).input(MoneyAuthCommand::SaveToken {
                token,
                user_account,
            }),
            (S::Authorize(_), A::Authorized { token: None, .. } | A::AuthCancelled) => {
                Out::new(S::CancelAuth).output(MoneyAuthEffect::Cancelled)
            }
            (S::CompleteAuth, A::AuthTokenSaved { user_account }) => {
                Out::new(S::CompleteAuth).output(MoneyAuthEffect::AuthSuccess { user_account })
            }
            (S::Authorize(_) | S::CompleteAuth, A::AuthFailed(error)) => {
                Out::new(S::WaitingForAuthStarted)
                    .output(MoneyAuthEffect::AuthFailed(error))
                    .source()
            }
            (state, _) => Out::skip(state),
        }
    }
}
