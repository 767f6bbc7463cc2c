//! Second-factor confirmation of a charge (one-time code).
use crate::logic::{Command, Logic, Out, OutOf};
use crate::model::{Amount, PaymentAuthData};
use crate::CheckoutError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAuthState {
    Loading,
    InputCode(PaymentAuthData),
    InputCodeProcess(String, PaymentAuthData),
    InputCodeVerifyExceeded(PaymentAuthData),
    StartError(CheckoutError),
    ProcessError(PaymentAuthData, CheckoutError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAuthAction {
    Start {
        amount: Amount,
        link_wallet_to_app: bool,
    },
    StartSuccess(PaymentAuthData),
    StartFailed(CheckoutError),
    ProcessAuthRequired {
        code: String,
    },
    ProcessAuthSuccess,
    ProcessAuthWrongAnswer(PaymentAuthData),
    ProcessAuthVerifyExceeded,
    ProcessAuthFailed(CheckoutError),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAuthEffect {
    ShowSuccess,
    CancelAuth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAuthCommand {
    StartAuth {
        amount: Amount,
        link_wallet_to_app: bool,
    },
    CheckCode {
        code: String,
    },
}

impl Command for PaymentAuthCommand {
    type Action = PaymentAuthAction;

    fn failed(&self, error: CheckoutError) -> PaymentAuthAction {
        match self {
            PaymentAuthCommand::StartAuth { .. } => PaymentAuthAction::StartFailed(error),
            PaymentAuthCommand::CheckCode { .. } => PaymentAuthAction::ProcessAuthFailed(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentAuthLogic;

impl Logic for PaymentAuthLogic {
    type State = PaymentAuthState;
    type Action = PaymentAuthAction;
    type Effect = PaymentAuthEffect;
    type Command = PaymentAuthCommand;

    fn reduce(&self, state: PaymentAuthState, action: PaymentAuthAction) -> OutOf<Self> {
        use PaymentAuthAction as A;
        use PaymentAuthState as S;

        match (state, action) {
            (state, A::Cancel) => Out::new(state).output(PaymentAuthEffect::CancelAuth),

            (
                S::Loading | S::StartError(_),
                A::Start {
                    amount,
                    link_wallet_to_app,
                },
            ) => Out::new(S::Loading).input(PaymentAuthCommand::StartAuth {
                amount,
                link_wallet_to_app,
            }),
            (S::Loading, A::StartSuccess(data)) => Out::new(S::InputCode(data)).source(),
            (S::Loading, A::StartFailed(error)) => Out::new(S::StartError(error)).source(),

            // Codes of the wrong length never reach the server.
            (S::InputCode(data) | S::ProcessError(data, _), A::ProcessAuthRequired { code })
                if code.chars().count() == data.code_length =>
            {
                Out::new(S::InputCodeProcess(code.clone(), data))
                    .input(PaymentAuthCommand::CheckCode { code })
            }

            (state @ S::InputCodeProcess(..), A::ProcessAuthSuccess) => {
                Out::new(state).output(PaymentAuthEffect::ShowSuccess)
            }
            (S::InputCodeProcess(..), A::ProcessAuthWrongAnswer(data)) => {
                Out::new(S::InputCode(data)).source()
            }
            (S::InputCodeProcess(_, data), A::ProcessAuthVerifyExceeded) => {
                Out::new(S::InputCodeVerifyExceeded(data)).source()
            }
            (S::InputCodeProcess(_, data), A::ProcessAuthFailed(error)) => {
                Out::new(S::ProcessError(data, error)).source()
            }

            (state, _) => Out::skip(state),
        }
    }
}
