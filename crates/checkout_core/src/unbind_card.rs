//! Details screen for a saved card, with the option to unbind it.
use crate::logic::{Command, Logic, Out, OutOf};
use crate::model::{BankCardInstrument, LinkedCard};
use crate::CheckoutError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnbindCardState {
    Initial,
    /// Card bound inside the wallet; unbinding happens in the wallet itself.
    ContentLinkedWallet(LinkedCard),
    ContentLinkedBankCard(BankCardInstrument),
    /// Stays here after the request completes; the effect carries the outcome.
    LoadingUnbinding(BankCardInstrument),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnbindCardAction {
    StartDisplayData {
        linked_card: Option<LinkedCard>,
        bank_card: Option<BankCardInstrument>,
    },
    StartUnbinding,
    UnbindSuccess,
    UnbindFailed(CheckoutError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnbindCardEffect {
    UnbindComplete(BankCardInstrument),
    UnbindFailed(BankCardInstrument),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnbindCardCommand {
    Unbind(BankCardInstrument),
}

impl Command for UnbindCardCommand {
    type Action = UnbindCardAction;

    fn failed(&self, error: CheckoutError) -> UnbindCardAction {
        UnbindCardAction::UnbindFailed(error)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnbindCardLogic;

impl Logic for UnbindCardLogic {
    type State = UnbindCardState;
    type Action = UnbindCardAction;
    type Effect = UnbindCardEffect;
    type Command = UnbindCardCommand;

    fn reduce(&self, state: UnbindCardState, action: UnbindCardAction) -> OutOf<Self> {
        match (state, action) {
            (
                state @ (UnbindCardState::Initial | UnbindCardState::LoadingUnbinding(_)),
                UnbindCardAction::StartDisplayData {
                    linked_card,
                    bank_card,
                },
            ) => match (linked_card, bank_card) {
                (Some(card), _) => Out::new(UnbindCardState::ContentLinkedWallet(card)).source(),
                (None, Some(card)) => {
                    Out::new(UnbindCardState::ContentLinkedBankCard(card)).source()
                }
                (None, None) => Out::skip(state),
            },
            (UnbindCardState::ContentLinkedBankCard(card), UnbindCardAction::StartUnbinding) => {
                Out::new(UnbindCardState::LoadingUnbinding(card.clone()))
                    .input(UnbindCardCommand::Unbind(card))
            }
            (UnbindCardState::LoadingUnbinding(card), UnbindCardAction::UnbindSuccess) => {
                Out::new(UnbindCardState::LoadingUnbinding(card.clone()))
                    .output(UnbindCardEffect::UnbindComplete(card))
            }
            (UnbindCardState::LoadingUnbinding(card), UnbindCardAction::UnbindFailed(_)) => {
                Out::new(UnbindCardState::LoadingUnbinding(card.clone()))
                    .output(UnbindCardEffect::UnbindFailed(card))
                    .source()
            }
            (state, _) => Out::skip(state),
        }
    }
}
