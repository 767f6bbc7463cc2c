#![allow(dead_code)]

use std::sync::Once;

use checkout_core::model::{
    Amount, BankCardInstrument, Confirmation, LinkedCard, PaymentMethodKind, PaymentOption,
    SavePaymentMethod, SelectedOption, TokenOutputModel, TokenizeInputModel, TokenizeInstrument,
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

pub fn wallet(id: u32) -> PaymentOption {
    option(
        id,
        PaymentMethodKind::Wallet {
            wallet_id: "41001".to_string(),
            balance: rub(50_000),
        },
    )
}

pub fn linked_card() -> LinkedCard {
    LinkedCard {
        card_id: "card-1".to_string(),
        pan_fragment: "5555 55** **** 4444".to_string(),
        name: None,
    }
}

pub fn bank_card() -> BankCardInstrument {
    BankCardInstrument {
        payment_instrument_id: "instr-1".to_string(),
        first6: "555555".to_string(),
        last4: "4444".to_string(),
        csc_required: true,
    }
}

pub fn selected(option: PaymentOption, allowed_methods: usize) -> SelectedOption {
    SelectedOption {
        shop_title: "Shop".to_string(),
        shop_subtitle: "Order #1".to_string(),
        option,
        allowed_methods,
        save_payment_method: SavePaymentMethod::UserSelects,
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
