use std::collections::VecDeque;
use std::sync::Arc;

use checkout_core::{CheckoutError, Command, Continuation, Logic};
use checkout_logging::{checkout_debug, checkout_info, checkout_warn};
use futures_util::future;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{EngineError, Host, RunOutcome, RuntimeConfig, Source, UseCase};

/// The continuation currently running for a workflow. There is at most one.
struct InFlight<C: Command> {
    generation: u64,
    command: C,
    cancel: CancellationToken,
    handle: JoinHandle<Option<C::Action>>,
}

impl<C: Command> InFlight<C> {
    fn cancel(self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

enum Event<C: Command, A> {
    Completed {
        generation: u64,
        command: C,
        result: Result<Option<C::Action>, JoinError>,
    },
    External(Option<A>),
}

/// Drives one workflow instance: owns its state, reduces actions, runs
/// continuations one at a time and hands states and effects to the host.
pub struct Runtime<L: Logic, H> {
    logic: L,
    use_case: Arc<dyn UseCase<L::Command>>,
    host: H,
    config: RuntimeConfig,
    initial: L::State,
    state: L::State,
    /// Last action passed to `invoke` since construction or `reset`.
    trigger: Option<L::Action>,
    in_flight: Option<InFlight<L::Command>>,
    generation: u64,
    /// Listen to the source. Set by a source continuation, cleared once an
    /// action is taken from it or when a triggering action is dispatched.
    source_armed: bool,
    /// The source handed to the current `run` has ended.
    source_closed: bool,
}

impl<L, H> Runtime<L, H>
where
    L: Logic,
    H: Host<L::State, L::Effect, L::Action>,
{
    pub fn new(
        logic: L,
        initial: L::State,
        use_case: Arc<dyn UseCase<L::Command>>,
        host: H,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            logic,
            use_case,
            host,
            config,
            state: initial.clone(),
            initial,
            trigger: None,
            in_flight: None,
            generation: 0,
            source_armed: true,
            source_closed: false,
        }
    }

    pub fn state(&self) -> &L::State {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_started(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start the workflow with its triggering action.
    ///
    /// Does nothing while a continuation is outstanding, so the operation an
    /// earlier call started is never duplicated. Once it has completed the
    /// next call dispatches again.
    pub async fn invoke(&mut self, action: L::Action) {
        if self.in_flight.is_some() {
            checkout_debug!(
                "[{}] invoke ignored, operation outstanding: {:?}",
                self.config.flow,
                action
            );
            return;
        }
        self.trigger = Some(action.clone());
        self.source_armed = false;
        self.dispatch(action, true).await;
    }

    /// Re-run the triggering action from the initial state.
    pub async fn retry(&mut self) -> Result<(), EngineError> {
        let action = self.trigger.clone().ok_or(EngineError::NotStarted)?;
        checkout_info!("[{}] retry {:?}", self.config.flow, action);
        self.cancel_in_flight();
        self.state = self.initial.clone();
        self.source_armed = false;
        self.dispatch(action, true).await;
        Ok(())
    }

    /// Cancel the running continuation and return to the not-started state.
    pub fn reset(&mut self) {
        checkout_info!("[{}] reset", self.config.flow);
        self.cancel_in_flight();
        self.trigger = None;
        self.state = self.initial.clone();
        self.source_armed = true;
        self.source_closed = false;
    }

    /// Feed continuation results and source actions into the reducer until
    /// the workflow has nothing left to wait for.
    pub async fn run<S>(&mut self, source: &mut S) -> RunOutcome<L::State>
    where
        S: Source<L::Action>,
    {
        self.source_closed = false;
        loop {
            let listening = self.source_armed && !self.source_closed;
            if self.in_flight.is_none() && !listening {
                if self.source_armed && self.source_closed {
                    checkout_debug!("[{}] source closed", self.config.flow);
                    return RunOutcome::SourceClosed(self.state.clone());
                }
                checkout_debug!("[{}] finished in {:?}", self.config.flow, self.state);
                return RunOutcome::Finished(self.state.clone());
            }

            let event = tokio::select! {
                (generation, command, result) = wait_in_flight(self.in_flight.as_mut()) => {
                    Event::Completed { generation, command, result }
                }
                action = source.next_action(), if listening => Event::External(action),
            };

            match event {
                Event::Completed {
                    generation,
                    command,
                    result,
                } => {
                    self.in_flight = None;
                    if let Some(action) = self.completion_action(generation, command, result) {
                        self.dispatch(action, false).await;
                    }
                }
                Event::External(Some(action)) => {
                    self.source_armed = false;
                    self.dispatch(action, false).await;
                }
                Event::External(None) => {
                    self.source_closed = true;
                }
            }
        }
    }

    fn completion_action(
        &self,
        generation: u64,
        command: L::Command,
        result: Result<Option<L::Action>, JoinError>,
    ) -> Option<L::Action> {
        if generation != self.generation {
            checkout_debug!(
                "[{}] dropping stale result of {:?}",
                self.config.flow,
                command
            );
            return None;
        }
        match result {
            Ok(Some(action)) => Some(action),
            Ok(None) => None,
            Err(err) if err.is_cancelled() => None,
            Err(err) => {
                checkout_warn!(
                    "[{}] continuation {:?} panicked: {}",
                    self.config.flow,
                    command,
                    err
                );
                Some(command.failed(CheckoutError::Panicked(err.to_string())))
            }
        }
    }

    async fn dispatch(&mut self, action: L::Action, force_render: bool) {
        let mut pending = VecDeque::from([action]);
        let mut force_render = force_render;

        while let Some(action) = pending.pop_front() {
            checkout_debug!(
                "[{}] reduce {:?} in {:?}",
                self.config.flow,
                action,
                self.state
            );
            let out = self.logic.reduce(self.state.clone(), action);
            if out.is_skip() {
                if self.config.warn_on_skip {
                    checkout_warn!("[{}] unhandled action in {:?}", self.config.flow, out.state);
                } else {
                    checkout_debug!("[{}] unhandled action in {:?}", self.config.flow, out.state);
                }
            }
            let terminal = out.is_terminal();
            let (state, continuations) = out.into_parts();

            let changed = state != self.state;
            self.state = state;
            if changed || force_render {
                if let Some(chained) = self.host.show_state(&self.state).await {
                    pending.push_back(chained);
                }
            }
            force_render = false;

            for continuation in continuations {
                match continuation {
                    Continuation::Input(command) => self.launch(command),
                    Continuation::Output(effect) => {
                        checkout_debug!("[{}] effect {:?}", self.config.flow, effect);
                        self.host.show_effect(effect).await;
                    }
                    Continuation::Source => self.source_armed = true,
                }
            }
            if terminal {
                self.source_armed = false;
            }
        }
    }

    fn launch(&mut self, command: L::Command) {
        if let Some(previous) = self.in_flight.take() {
            checkout_info!(
                "[{}] {:?} superseded by {:?}",
                self.config.flow,
                previous.command,
                command
            );
            previous.cancel();
        }

        self.generation += 1;
        let cancel = CancellationToken::new();
        let use_case = self.use_case.clone();
        let task_cancel = cancel.clone();
        let task_command = command.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_cancel.cancelled() => None,
                result = use_case.execute(task_command.clone()) => Some(match result {
                    Ok(action) => action,
                    Err(error) => task_command.failed(error),
                }),
            }
        });

        checkout_debug!("[{}] launched {:?}", self.config.flow, command);
        self.in_flight = Some(InFlight {
            generation: self.generation,
            command,
            cancel,
            handle,
        });
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            checkout_info!("[{}] cancelled {:?}", self.config.flow, in_flight.command);
            in_flight.cancel();
        }
    }
}

impl<L: Logic, H> Drop for Runtime<L, H> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel();
        }
    }
}

async fn wait_in_flight<C: Command>(
    slot: Option<&mut InFlight<C>>,
) -> (u64, C, Result<Option<C::Action>, JoinError>) {
    match slot {
        Some(in_flight) => {
            let result = (&mut in_flight.handle).await;
            (in_flight.generation, in_flight.command.clone(), result)
        }
        None => future::pending().await,
    }
}
