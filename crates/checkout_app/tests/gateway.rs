use checkout_app::platform::gateway::DemoGateway;
use checkout_app::platform::screens::{describe_option, format_amount};
use checkout_app::platform::settings::CheckoutSettings;
use checkout_core::model::{
    Amount, Confirmation, PaymentMethodKind, TokenizeInputModel, TokenizeInstrument,
};
use checkout_engine::{
    AuthGateway, CodeCheck, PaymentAuthGateway, PaymentMethodGateway, TokenizeGateway,
    TokenizeOutcome, UnbindGateway,
};

mod common;

fn wallet_payment(option_id: u32) -> TokenizeInputModel {
    TokenizeInputModel {
        payment_option_id: option_id,
        save_payment_method: false,
        save_payment_instrument: false,
        allow_wallet_linking: false,
        confirmation: Confirmation::None,
        instrument: TokenizeInstrument::Option,
    }
}

#[tokio::test]
async fn wallet_is_abstract_until_login() {
    common::init_logging();
    let gateway = DemoGateway::new(&common::instant_settings());

    let options = gateway.payment_options().await.expect("options");
    let ids: Vec<_> = options.iter().map(|option| option.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(options[1].kind, PaymentMethodKind::AbstractWallet);
    assert!(options[1].requires_auth());
    assert!(matches!(options[2].kind, PaymentMethodKind::SavedBankCard(_)));

    gateway.save_token("tok-1", None).await.expect("login");
    assert!(gateway.is_logged_in().expect("state"));

    let options = gateway.payment_options().await.expect("options");
    assert!(matches!(options[1].kind, PaymentMethodKind::Wallet { .. }));

    gateway.logout().await.expect("logout");
    assert!(!gateway.is_logged_in().expect("state"));
}

#[tokio::test]
async fn empty_token_is_rejected() {
    let gateway = DemoGateway::new(&common::instant_settings());
    assert!(gateway.save_token("", None).await.is_err());
    assert!(!gateway.is_logged_in().expect("state"));
}

#[tokio::test]
async fn selected_option_needs_a_selection() {
    common::init_logging();
    let gateway = DemoGateway::new(&common::instant_settings());
    assert!(gateway.selected_option().await.is_err());

    gateway.select(5).expect("select");
    let selected = gateway.selected_option().await.expect("selected");
    assert_eq!(selected.option.kind, PaymentMethodKind::Sbp);
    assert_eq!(selected.allowed_methods, 5);
    assert!(matches!(
        selected.confirmation,
        Confirmation::MobileApplication { .. }
    ));

    gateway.select(1).expect("select");
    let selected = gateway.selected_option().await.expect("selected");
    assert!(matches!(selected.confirmation, Confirmation::Redirect { .. }));
}

#[tokio::test]
async fn wallet_payment_needs_the_confirmation_code() {
    common::init_logging();
    let gateway = DemoGateway::new(&common::instant_settings());
    gateway.save_token("tok-1", Some("4100-demo")).await.expect("login");

    let charge = match gateway.tokenize(&wallet_payment(2)).await.expect("tokenize") {
        TokenizeOutcome::PaymentAuthRequired(charge) => charge,
        other => panic!("expected payment auth, got {other:?}"),
    };
    assert_eq!(charge, Amount::new(12_500, "RUB"));

    let data = gateway.start(&charge, false).await.expect("start");
    assert_eq!(data.code_length, 4);
    assert_eq!(data.attempts_left, Some(3));

    match gateway.check_code("0000").await.expect("check") {
        CodeCheck::WrongAnswer(data) => assert_eq!(data.attempts_left, Some(2)),
        other => panic!("expected wrong answer, got {other:?}"),
    }
    assert_eq!(gateway.check_code("1234").await.expect("check"), CodeCheck::Accepted);

    match gateway.tokenize(&wallet_payment(2)).await.expect("tokenize") {
        TokenizeOutcome::Token(output) => {
            assert_eq!(output.token, "demo-token-1");
            assert_eq!(output.option.id, 2);
        }
        other => panic!("expected token, got {other:?}"),
    }

    // The confirmation covers one payment only.
    assert!(matches!(
        gateway.tokenize(&wallet_payment(2)).await.expect("tokenize"),
        TokenizeOutcome::PaymentAuthRequired(_)
    ));
}

#[tokio::test]
async fn code_attempts_run_out() {
    let settings = CheckoutSettings {
        code_attempts: 2,
        ..common::instant_settings()
    };
    let gateway = DemoGateway::new(&settings);

    gateway.start(&Amount::new(100, "RUB"), false).await.expect("start");
    assert!(matches!(
        gateway.check_code("1111").await.expect("check"),
        CodeCheck::WrongAnswer(_)
    ));
    assert_eq!(
        gateway.check_code("2222").await.expect("check"),
        CodeCheck::AttemptsExceeded
    );
}

#[tokio::test]
async fn wallet_pays_directly_without_payment_auth() {
    let settings = CheckoutSettings {
        require_payment_auth: false,
        ..common::instant_settings()
    };
    let gateway = DemoGateway::new(&settings);
    gateway.save_token("tok-1", None).await.expect("login");

    assert!(matches!(
        gateway.tokenize(&wallet_payment(2)).await.expect("tokenize"),
        TokenizeOutcome::Token(_)
    ));
}

#[tokio::test]
async fn unbinding_removes_the_saved_card() {
    common::init_logging();
    let gateway = DemoGateway::new(&common::instant_settings());

    gateway.unbind("instr-demo-1").await.expect("unbind");

    let options = gateway.payment_options().await.expect("options");
    assert_eq!(options.len(), 4);
    assert!(options
        .iter()
        .all(|option| !matches!(option.kind, PaymentMethodKind::SavedBankCard(_))));
    assert!(gateway.unbind("instr-demo-1").await.is_err());
}

#[tokio::test]
async fn options_read_as_a_menu() {
    let gateway = DemoGateway::new(&CheckoutSettings {
        google_pay_fee_minor_units: 1_050,
        ..common::instant_settings()
    });
    let options = gateway.payment_options().await.expect("options");
    let menu: Vec<_> = options.iter().map(describe_option).collect();

    assert_eq!(
        menu,
        vec![
            "1) Bank card",
            "2) Wallet (log in)",
            "3) Saved card 555555******4477",
            "4) Google Pay, fee 10.50 RUB",
            "5) SBP",
        ]
    );
    let saveable: Vec<_> = options
        .iter()
        .filter(|option| option.save_payment_method_allowed)
        .map(|option| option.id)
        .collect();
    assert_eq!(saveable, vec![1, 3]);
}

#[test]
fn amounts_print_in_major_units() {
    assert_eq!(format_amount(&Amount::new(12_500, "RUB")), "125.00 RUB");
    assert_eq!(format_amount(&Amount::new(7, "EUR")), "0.07 EUR");
    assert_eq!(format_amount(&Amount::new(-1_999, "USD")), "-19.99 USD");
}
