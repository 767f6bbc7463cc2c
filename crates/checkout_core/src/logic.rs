//! Reducer contract shared by every workflow.
use std::fmt::Debug;

use crate::CheckoutError;

/// Asynchronous operation a reducer asks the runtime to perform.
///
/// The runtime executes it through a use case and feeds the resulting action
/// back into the same reducer. When execution fails, [`Command::failed`]
/// supplies the action that reports the failure instead.
pub trait Command: Clone + Debug + Send + Sync + 'static {
    type Action: Send + 'static;

    fn failed(&self, error: CheckoutError) -> Self::Action;
}

/// One step the runtime performs after a reducer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation<C, E> {
    /// Run a command; its result re-enters the reducer.
    Input(C),
    /// Deliver a one-shot effect to the host.
    Output(E),
    /// Re-arm the external action source.
    Source,
}

/// Reducer verdict: the next state plus the continuations to run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Out<S, C, E> {
    pub state: S,
    pub continuations: Vec<Continuation<C, E>>,
    skipped: bool,
}

impl<S, C, E> Out<S, C, E> {
    /// New state with no continuations yet.
    pub fn new(state: S) -> Self {
        Self {
            state,
            continuations: Vec::new(),
            skipped: false,
        }
    }

    /// Default transition for unhandled pairs: keep the state, listen again.
    pub fn skip(state: S) -> Self {
        Self {
            state,
            continuations: vec![Continuation::Source],
            skipped: true,
        }
    }

    pub fn input(mut self, command: C) -> Self {
        self.continuations.push(Continuation::Input(command));
        self
    }

    pub fn output(mut self, effect: E) -> Self {
        self.continuations.push(Continuation::Output(effect));
        self
    }

    pub fn source(mut self) -> Self {
        self.continuations.push(Continuation::Source);
        self
    }

    pub fn into_parts(self) -> (S, Vec<Continuation<C, E>>) {
        (self.state, self.continuations)
    }

    pub fn is_skip(&self) -> bool {
        self.skipped
    }

    pub fn awaits_source(&self) -> bool {
        self.continuations
            .iter()
            .any(|c| matches!(c, Continuation::Source))
    }

    pub fn inputs(&self) -> impl Iterator<Item = &C> {
        self.continuations.iter().filter_map(|c| match c {
            Continuation::Input(command) => Some(command),
            _ => None,
        })
    }

    pub fn outputs(&self) -> impl Iterator<Item = &E> {
        self.continuations.iter().filter_map(|c| match c {
            Continuation::Output(effect) => Some(effect),
            _ => None,
        })
    }

    /// True when nothing further can happen: no input to await, no source to listen to.
    pub fn is_terminal(&self) -> bool {
        !self
            .continuations
            .iter()
            .any(|c| matches!(c, Continuation::Input(_) | Continuation::Source))
    }
}

/// Pure business logic of one workflow: `(State, Action) -> Out`.
pub trait Logic: Send + Sync + 'static {
    type State: Clone + Debug + PartialEq + Send + Sync + 'static;
    type Action: Clone + Debug + Send + 'static;
    type Effect: Debug + Send + 'static;
    type Command: Command<Action = Self::Action>;

    fn reduce(&self, state: Self::State, action: Self::Action) -> OutOf<Self>;
}

pub type OutOf<L> = Out<<L as Logic>::State, <L as Logic>::Command, <L as Logic>::Effect>;
