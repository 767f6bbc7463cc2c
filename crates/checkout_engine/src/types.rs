use async_trait::async_trait;
use checkout_core::{CheckoutError, Command};
use tokio::sync::mpsc;

/// Executes a reducer command against external collaborators.
///
/// An `Err` is not fatal: the runtime turns it into the command's failure
/// action before feeding it back to the reducer.
#[async_trait]
pub trait UseCase<C: Command>: Send + Sync {
    async fn execute(&self, command: C) -> Result<C::Action, CheckoutError>;
}

/// Supplier of externally triggered actions (user input).
///
/// `None` means the source is closed and will never produce another action.
#[async_trait]
pub trait Source<A: Send + 'static>: Send {
    async fn next_action(&mut self) -> Option<A>;
}

/// The screen hosting a workflow.
#[async_trait]
pub trait Host<S, E, A>: Send
where
    S: Sync + 'static,
    E: Send + 'static,
    A: Send + 'static,
{
    /// Render a state. A returned action is reduced immediately.
    async fn show_state(&mut self, state: &S) -> Option<A>;

    /// Deliver a one-shot effect.
    async fn show_effect(&mut self, effect: E);
}

/// Source backed by an unbounded channel; closes when every sender is dropped.
pub struct ChannelSource<A> {
    rx: mpsc::UnboundedReceiver<A>,
}

impl<A> ChannelSource<A> {
    pub fn new() -> (mpsc::UnboundedSender<A>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

#[async_trait]
impl<A: Send + 'static> Source<A> for ChannelSource<A> {
    async fn next_action(&mut self) -> Option<A> {
        self.rx.recv().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<S> {
    /// Nothing in flight and nothing to listen for: a terminal effect was delivered.
    Finished(S),
    /// The source closed while the workflow was waiting for input.
    SourceClosed(S),
}

impl<S> RunOutcome<S> {
    pub fn state(&self) -> &S {
        match self {
            RunOutcome::Finished(state) | RunOutcome::SourceClosed(state) => state,
        }
    }

    pub fn into_state(self) -> S {
        match self {
            RunOutcome::Finished(state) | RunOutcome::SourceClosed(state) => state,
        }
    }
}
