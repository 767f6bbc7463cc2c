#![allow(dead_code)]

use std::sync::Once;

use checkout_app::platform::console::Console;
use checkout_app::platform::settings::CheckoutSettings;
use tokio::sync::mpsc;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(checkout_logging::initialize_for_tests);
}

/// Settings for tests: no simulated latency.
pub fn instant_settings() -> CheckoutSettings {
    CheckoutSettings {
        latency_ms: 0,
        ..CheckoutSettings::default()
    }
}

/// Console fed with a fixed script; input ends after the last line.
pub fn scripted_console(lines: &[&str]) -> Console {
    let (tx, rx) = mpsc::unbounded_channel();
    for line in lines {
        let _ = tx.send(line.to_string());
    }
    Console::from_receiver(rx)
}
