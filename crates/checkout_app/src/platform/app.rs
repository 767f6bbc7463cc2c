use std::sync::Arc;

use anyhow::Result;
use checkout_core::model::{OptionId, TokenOutputModel, TokenizeInputModel};
use checkout_core::{ContractAction, PaymentOptionListAction, TokenizeAction};
use checkout_engine::{CheckoutContext, Gateways, LogReporter};
use checkout_logging::checkout_info;

use super::console::{
    parse_contract_command, parse_options_command, tokenize_commands, Console, ConsoleSource,
};
use super::gateway::DemoGateway;
use super::screens::{
    format_amount, say, ContractOutcome, ContractScreen, OptionsOutcome, OptionsScreen,
    TokenizeScreen,
};
use super::settings::CheckoutSettings;

pub async fn run(settings: CheckoutSettings, console: Console) -> Result<()> {
    let gateway = Arc::new(DemoGateway::new(&settings));
    let context = CheckoutContext::new(Gateways::shared(gateway.clone()), Arc::new(LogReporter))
        .with_warn_on_skip(settings.warn_on_skip);

    match checkout(&context, &gateway, &console).await? {
        Some(output) => {
            say(format!(
                "Paid {} with token {}",
                format_amount(&output.option.charge),
                output.token
            ));
            if gateway.is_logged_in()? {
                say("Wallet session kept for the next checkout.");
            }
        }
        None => say("Checkout cancelled."),
    }
    Ok(())
}

/// Walk the user from the payment method list to a payment token.
///
/// `None` when the user cancels or input runs out.
pub async fn checkout(
    context: &CheckoutContext,
    gateway: &DemoGateway,
    console: &Console,
) -> Result<Option<TokenOutputModel>> {
    loop {
        let Some(option_id) = choose_option(context, console).await else {
            return Ok(None);
        };
        gateway.select(option_id)?;

        let model = match confirm_contract(context, console).await {
            Some(ContractOutcome::Tokenize(model)) => model,
            Some(ContractOutcome::Restart) => continue,
            Some(ContractOutcome::Cancel) | None => return Ok(None),
        };

        if let Some(output) = tokenize(context, console, model).await {
            checkout_info!("Checkout finished with option {}", output.option.id);
            return Ok(Some(output));
        }
    }
}

async fn choose_option(context: &CheckoutContext, console: &Console) -> Option<OptionId> {
    let (inject, mut source) = ConsoleSource::new(console.clone(), parse_options_command);
    let screen = OptionsScreen::new(context.clone(), console.clone(), inject);
    let mut runtime = context.payment_options(screen);

    runtime.invoke(PaymentOptionListAction::Load).await;
    runtime.run(&mut source).await;
    match runtime.host().outcome {
        Some(OptionsOutcome::Proceed(option_id)) => Some(option_id),
        Some(OptionsOutcome::Cancelled) | None => None,
    }
}

async fn confirm_contract(context: &CheckoutContext, console: &Console) -> Option<ContractOutcome> {
    let (inject, mut source) = ConsoleSource::new(console.clone(), parse_contract_command);
    let mut runtime = context.contract(ContractScreen::new(inject));

    runtime.invoke(ContractAction::Load).await;
    runtime.run(&mut source).await;
    runtime.host().outcome.clone()
}

async fn tokenize(
    context: &CheckoutContext,
    console: &Console,
    model: TokenizeInputModel,
) -> Option<TokenOutputModel> {
    let (inject, mut source) =
        ConsoleSource::new(console.clone(), tokenize_commands(model.clone()));
    let screen = TokenizeScreen::new(context.clone(), console.clone(), inject);
    let mut runtime = context.tokenize(screen);

    runtime.invoke(TokenizeAction::Tokenize(model)).await;
    runtime.run(&mut source).await;
    runtime.host_mut().token.take()
}
