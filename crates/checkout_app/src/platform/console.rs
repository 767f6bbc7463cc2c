//! Line-based user input shared by every screen of the demo.
use std::sync::Arc;

use async_trait::async_trait;
use checkout_core::model::TokenizeInputModel;
use checkout_core::{
    ContractAction, MoneyAuthAction, PaymentAuthAction, PaymentOptionListAction, TokenizeAction,
};
use checkout_engine::Source;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};

use super::screens::say;

/// Shared handle to the lines typed by the user.
#[derive(Clone)]
pub struct Console {
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl Console {
    /// Forward stdin lines from a background task.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(rx)),
        }
    }

    /// Next non-empty line, trimmed. `None` once input is exhausted.
    pub async fn read_line(&self) -> Option<String> {
        let mut lines = self.lines.lock().await;
        loop {
            let line = lines.recv().await?;
            let line = line.trim();
            if !line.is_empty() {
                return Some(line.to_string());
            }
        }
    }
}

/// Source that parses console lines into workflow actions.
///
/// Screens can inject actions (or `None` to close the source) through the
/// sender returned by [`ConsoleSource::new`]; injected items win over input.
pub struct ConsoleSource<A, P> {
    console: Console,
    injected: mpsc::UnboundedReceiver<Option<A>>,
    parse: P,
}

impl<A, P> ConsoleSource<A, P>
where
    P: Fn(&str) -> Option<A>,
{
    pub fn new(console: Console, parse: P) -> (mpsc::UnboundedSender<Option<A>>, Self) {
        let (tx, injected) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                console,
                injected,
                parse,
            },
        )
    }
}

#[async_trait]
impl<A, P> Source<A> for ConsoleSource<A, P>
where
    A: Send + 'static,
    P: Fn(&str) -> Option<A> + Send,
{
    async fn next_action(&mut self) -> Option<A> {
        if let Ok(item) = self.injected.try_recv() {
            return item;
        }
        loop {
            let line = self.console.read_line().await?;
            match (self.parse)(&line) {
                Some(action) => return Some(action),
                None => say(format!("unknown command {line:?}")),
            }
        }
    }
}

fn switch(word: Option<&str>) -> Option<bool> {
    match word {
        Some("on") | Some("yes") => Some(true),
        Some("off") | Some("no") => Some(false),
        _ => None,
    }
}

pub fn parse_options_command(line: &str) -> Option<PaymentOptionListAction> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("pick"), Some(id)) => {
            let option_id = id.parse().ok()?;
            Some(PaymentOptionListAction::ProceedWithPaymentMethod {
                option_id,
                instrument_id: words.next().map(str::to_string),
            })
        }
        (Some("unbind"), Some(id)) => Some(PaymentOptionListAction::OpenUnbindScreen {
            option_id: id.parse().ok()?,
        }),
        (Some("reload"), None) => Some(PaymentOptionListAction::Load),
        (Some("logout"), None) => Some(PaymentOptionListAction::Logout),
        (Some("cancel"), None) => Some(PaymentOptionListAction::ClickOnCancel),
        _ => None,
    }
}

pub fn parse_contract_command(line: &str) -> Option<ContractAction> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("pay"), csc) => Some(ContractAction::Tokenize {
            csc: csc.map(str::to_string),
        }),
        (Some("save"), value) => switch(value).map(ContractAction::ChangeSavePaymentMethod),
        (Some("link"), value) => switch(value).map(ContractAction::ChangeAllowWalletLinking),
        (Some("retry"), None) => Some(ContractAction::Retry),
        (Some("back"), None) => Some(ContractAction::RestartProcess),
        (Some("logout"), None) => Some(ContractAction::Logout),
        _ => None,
    }
}

pub fn parse_money_auth_command(line: &str) -> Option<MoneyAuthAction> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("login"), Some(token)) => Some(MoneyAuthAction::Authorized {
            token: Some(token.to_string()),
            user_account: words.next().map(str::to_string),
        }),
        (Some("back"), None) => Some(MoneyAuthAction::AuthCancelled),
        (Some("retry"), None) => Some(MoneyAuthAction::RequireAuth),
        _ => None,
    }
}

pub fn parse_payment_auth_command(line: &str) -> Option<PaymentAuthAction> {
    match line {
        "cancel" => Some(PaymentAuthAction::Cancel),
        code if code.chars().all(|c| c.is_ascii_digit()) => {
            Some(PaymentAuthAction::ProcessAuthRequired {
                code: code.to_string(),
            })
        }
        _ => None,
    }
}

/// Tokenize commands need the request being retried.
pub fn tokenize_commands(model: TokenizeInputModel) -> impl Fn(&str) -> Option<TokenizeAction> {
    move |line| match line {
        "retry" => Some(TokenizeAction::Tokenize(model.clone())),
        "cancel" => Some(TokenizeAction::Cancel),
        _ => None,
    }
}
