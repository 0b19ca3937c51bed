//! grusin - retained-mode UI toolkit core
//!
//! Modules:
//! - config: runtime settings
//! - logging: tracing setup
//! - ui: control tree, message dispatch, input state machine, rendering

pub mod config;
pub mod logging;
pub mod ui;

pub use config::UiConfig;
pub use ui::core::error::{Result, UiError};
pub use ui::core::runtime::{ControlOptions, TickStatus, Ui};
