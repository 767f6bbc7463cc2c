pub mod app;
pub mod console;
pub mod gateway;
pub mod logging;
pub mod screens;
pub mod settings;
