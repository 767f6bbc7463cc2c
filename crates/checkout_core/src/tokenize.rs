//! Tokenization of the selected payment instrument.
use crate::logic::{Command, Logic, Out, OutOf};
use crate::model::{Amount, TokenOutputModel, TokenizeInputModel};
use crate::CheckoutError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeState {
    Start,
    Tokenize(TokenizeInputModel),
    TokenizeError(TokenizeInputModel, CheckoutError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeAction {
    Tokenize(TokenizeInputModel),
    TokenizeSuccess(TokenOutputModel),
    TokenizeFailed(CheckoutError),
    /// The API wants the user to confirm the charge with a second factor first.
    PaymentAuthRequired(Amount),
    PaymentAuthSuccess,
    PaymentAuthCancel,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeEffect {
    TokenizeComplete(TokenOutputModel),
    PaymentAuthRequired {
        charge: Amount,
        allow_wallet_linking: bool,
    },
    CancelTokenize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeCommand {
    Tokenize(TokenizeInputModel),
}

impl Command for TokenizeCommand {
    type Action = TokenizeAction;

    fn failed(&self, error: CheckoutError) -> TokenizeAction {
        TokenizeAction::TokenizeFailed(error)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenizeLogic;

impl Logic for TokenizeLogic {
    type State = TokenizeState;
    type Action = TokenizeAction;
    type Effect = TokenizeEffect;
    type Command = TokenizeCommand;

    fn reduce(&self, state: TokenizeState, action: TokenizeAction) -> OutOf<Self> {
        match (state, action) {
            (
                TokenizeState::Start | TokenizeState::TokenizeError(..),
                TokenizeAction::Tokenize(model),
            ) => Out::new(TokenizeState::Tokenize(model.clone()))
                .input(TokenizeCommand::Tokenize(model)),

            (TokenizeState::Tokenize(model), TokenizeAction::TokenizeSuccess(output)) => {
                Out::new(TokenizeState::Tokenize(model))
                    .output(TokenizeEffect::TokenizeComplete(output))
            }
            (TokenizeState::Tokenize(model), TokenizeAction::TokenizeFailed(error)) => {
                Out::new(TokenizeState::TokenizeError(model, error)).source()
            }
            (TokenizeState::Tokenize(model), TokenizeAction::PaymentAuthRequired(charge)) => {
                let allow_wallet_linking = model.allow_wallet_linking;
                Out::new(TokenizeState::Tokenize(model))
                    .output(TokenizeEffect::PaymentAuthRequired {
                        charge,
                        allow_wallet_linking,
                    })
                    .source()
            }
            (TokenizeState::Tokenize(model), TokenizeAction::PaymentAuthSuccess) => {
                Out::new(TokenizeState::Tokenize(model.clone()))
                    .input(TokenizeCommand::Tokenize(model))
            }
            (TokenizeState::Tokenize(_), TokenizeAction::PaymentAuthCancel) => {
                Out::new(TokenizeState::Start).output(TokenizeEffect::CancelTokenize)
            }
            (state @ TokenizeState::TokenizeError(..), TokenizeAction::Cancel) => {
                Out::new(state).output(TokenizeEffect::CancelTokenize)
            }

            (state, _) => Out::skip(state),
        }
    }
}
