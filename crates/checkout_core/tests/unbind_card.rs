mod common;

use checkout_core::{
    CheckoutError, Continuation, Logic, UnbindCardAction, UnbindCardCommand, UnbindCardEffect,
    UnbindCardLogic, UnbindCardState,
};
use common::{bank_card, init_logging, linked_card};
use pretty_assertions::assert_eq;

#[test]
fn bank_card_reference_shows_bank_card_content() {
    init_logging();
    let out = UnbindCardLogic.reduce(
        UnbindCardState::Initial,
        UnbindCardAction::StartDisplayData {
            linked_card: None,
            bank_card: Some(bank_card()),
        },
    );

    assert_eq!(out.state, UnbindCardState::ContentLinkedBankCard(bank_card()));
    assert!(!matches!(out.state, UnbindCardState::ContentLinkedWallet(_)));
}

#[test]
fn wallet_card_reference_shows_wallet_content() {
    init_logging();
    let out = UnbindCardLogic.reduce(
        UnbindCardState::Initial,
        UnbindCardAction::StartDisplayData {
            linked_card: Some(linked_card()),
            bank_card: None,
        },
    );

    assert_eq!(out.state, UnbindCardState::ContentLinkedWallet(linked_card()));
}

#[test]
fn no_card_reference_is_skipped() {
    init_logging();
    let out = UnbindCardLogic.reduce(
        UnbindCardState::Initial,
        UnbindCardAction::StartDisplayData {
            linked_card: None,
            bank_card: None,
        },
    );

    assert!(out.is_skip());
    assert_eq!(out.state, UnbindCardState::Initial);
}

#[test]
fn unbinding_outcome_is_carried_by_effect() {
    init_logging();
    let out = UnbindCardLogic.reduce(
        UnbindCardState::ContentLinkedBankCard(bank_card()),
        UnbindCardAction::StartUnbinding,
    );
    assert_eq!(out.state, UnbindCardState::LoadingUnbinding(bank_card()));
    assert_eq!(
        out.continuations,
        vec![Continuation::Input(UnbindCardCommand::Unbind(bank_card()))]
    );

    let success = UnbindCardLogic.reduce(out.state.clone(), UnbindCardAction::UnbindSuccess);
    assert_eq!(success.state, UnbindCardState::LoadingUnbinding(bank_card()));
    assert_eq!(
        success.continuations,
        vec![Continuation::Output(UnbindCardEffect::UnbindComplete(
            bank_card()
        ))]
    );

    let failure = UnbindCardLogic.reduce(
        out.state,
        UnbindCardAction::UnbindFailed(CheckoutError::NoInternet),
    );
    assert_eq!(failure.state, UnbindCardState::LoadingUnbinding(bank_card()));
    assert_eq!(
        failure.continuations,
        vec![
            Continuation::Output(UnbindCardEffect::UnbindFailed(bank_card())),
            Continuation::Source,
        ]
    );
}

#[test]
fn wallet_cards_cannot_be_unbound_here() {
    init_logging();
    let state = UnbindCardState::ContentLinkedWallet(linked_card());

    let out = UnbindCardLogic.reduce(state.clone(), UnbindCardAction::StartUnbinding);

    assert!(out.is_skip());
    assert_eq!(out.state, state);
}
