use checkout_app::platform::console::{
    parse_contract_command, parse_money_auth_command, parse_options_command,
    parse_payment_auth_command, tokenize_commands, ConsoleSource,
};
use checkout_core::model::{Confirmation, TokenizeInputModel, TokenizeInstrument};
use checkout_core::{
    ContractAction, MoneyAuthAction, PaymentAuthAction, PaymentOptionListAction, TokenizeAction,
};
use checkout_engine::Source;

mod common;

#[test]
fn option_list_commands() {
    assert_eq!(
        parse_options_command("pick 3"),
        Some(PaymentOptionListAction::ProceedWithPaymentMethod {
            option_id: 3,
            instrument_id: None,
        })
    );
    assert_eq!(
        parse_options_command("pick 2 card-7"),
        Some(PaymentOptionListAction::ProceedWithPaymentMethod {
            option_id: 2,
            instrument_id: Some("card-7".to_string()),
        })
    );
    assert_eq!(
        parse_options_command("unbind 3"),
        Some(PaymentOptionListAction::OpenUnbindScreen { option_id: 3 })
    );
    assert_eq!(parse_options_command("reload"), Some(PaymentOptionListAction::Load));
    assert_eq!(parse_options_command("cancel"), Some(PaymentOptionListAction::ClickOnCancel));
    assert_eq!(parse_options_command("pick three"), None);
    assert_eq!(parse_options_command("cancel now"), None);
}

#[test]
fn contract_commands() {
    assert_eq!(
        parse_contract_command("pay"),
        Some(ContractAction::Tokenize { csc: None })
    );
    assert_eq!(
        parse_contract_command("pay 123"),
        Some(ContractAction::Tokenize {
            csc: Some("123".to_string()),
        })
    );
    assert_eq!(
        parse_contract_command("save on"),
        Some(ContractAction::ChangeSavePaymentMethod(true))
    );
    assert_eq!(
        parse_contract_command("link no"),
        Some(ContractAction::ChangeAllowWalletLinking(false))
    );
    assert_eq!(parse_contract_command("back"), Some(ContractAction::RestartProcess));
    assert_eq!(parse_contract_command("save maybe"), None);
}

#[test]
fn auth_commands() {
    assert_eq!(
        parse_money_auth_command("login tok-1 4100"),
        Some(MoneyAuthAction::Authorized {
            token: Some("tok-1".to_string()),
            user_account: Some("4100".to_string()),
        })
    );
    assert_eq!(parse_money_auth_command("back"), Some(MoneyAuthAction::AuthCancelled));
    assert_eq!(parse_money_auth_command("login"), None);

    assert_eq!(
        parse_payment_auth_command("0420"),
        Some(PaymentAuthAction::ProcessAuthRequired {
            code: "0420".to_string(),
        })
    );
    assert_eq!(parse_payment_auth_command("cancel"), Some(PaymentAuthAction::Cancel));
    assert_eq!(parse_payment_auth_command("12a4"), None);
}

#[test]
fn tokenize_retry_repeats_the_request() {
    let model = TokenizeInputModel {
        payment_option_id: 1,
        save_payment_method: false,
        save_payment_instrument: false,
        allow_wallet_linking: false,
        confirmation: Confirmation::None,
        instrument: TokenizeInstrument::Option,
    };
    let parse = tokenize_commands(model.clone());

    assert_eq!(parse("retry"), Some(TokenizeAction::Tokenize(model)));
    assert_eq!(parse("cancel"), Some(TokenizeAction::Cancel));
    assert_eq!(parse("pay"), None);
}

#[tokio::test]
async fn injected_actions_win_over_typed_lines() {
    let console = common::scripted_console(&["", "nonsense", "  reload  ", "cancel"]);
    let (inject, mut source) = ConsoleSource::new(console, parse_options_command);

    inject
        .send(Some(PaymentOptionListAction::PaymentAuthSuccess))
        .expect("inject");

    assert_eq!(
        source.next_action().await,
        Some(PaymentOptionListAction::PaymentAuthSuccess)
    );
    assert_eq!(source.next_action().await, Some(PaymentOptionListAction::Load));
    assert_eq!(
        source.next_action().await,
        Some(PaymentOptionListAction::ClickOnCancel)
    );
    assert_eq!(source.next_action().await, None);
}

#[tokio::test]
async fn injected_none_closes_the_source() {
    let console = common::scripted_console(&["reload"]);
    let (inject, mut source) = ConsoleSource::new(console, parse_options_command);

    inject.send(None).expect("inject");

    assert_eq!(source.next_action().await, None);
    assert_eq!(source.next_action().await, Some(PaymentOptionListAction::Load));
}
