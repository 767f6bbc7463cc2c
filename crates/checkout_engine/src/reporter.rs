use checkout_core::Reporter;
use checkout_logging::checkout_info;
use serde_json::{Map, Value};

/// Reporter that writes each event to the log as one JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn render(name: &str, args: &[(&str, String)]) -> String {
        let args: Map<String, Value> = args
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.clone())))
            .collect();
        let mut event = Map::new();
        event.insert("event".to_string(), Value::String(name.to_string()));
        event.insert("args".to_string(), Value::Object(args));
        Value::Object(event).to_string()
    }
}

impl Reporter for LogReporter {
    fn report(&self, name: &str, args: &[(&str, String)]) {
        checkout_info!("analytics {}", Self::render(name, args));
    }
}
