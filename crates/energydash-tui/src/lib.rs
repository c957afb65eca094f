//! # energydash-tui
//!
//! Interactive terminal dashboard using ratatui with Elm architecture.

pub mod anova;
pub mod bridge;
pub mod chart;
pub mod footer;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod styles;
pub mod table;

pub use bridge::TuiLogWriter;
pub use logs::LogPanel;
pub use messages::TuiMessage;
pub use model::{Focus, TuiApp};
