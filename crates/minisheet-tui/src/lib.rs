pub mod app;
pub mod config;
pub mod controller;
pub mod logging;
pub mod views;

pub use config::Args;
pub use controller::Controller;
