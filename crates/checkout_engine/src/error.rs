use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("retry requested before the workflow was invoked")]
    NotStarted,
}
