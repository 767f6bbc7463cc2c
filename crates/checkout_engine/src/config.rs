#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Name used in log lines.
    pub flow: &'static str,
    /// Log skipped transitions at warn level instead of debug.
    pub warn_on_skip: bool,
}

impl RuntimeConfig {
    pub fn new(flow: &'static str) -> Self {
        Self {
            flow,
            ..Self::default()
        }
    }

    pub fn with_warn_on_skip(mut self, warn_on_skip: bool) -> Self {
        self.warn_on_skip = warn_on_skip;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            flow: "workflow",
            warn_on_skip: false,
        }
    }
}
