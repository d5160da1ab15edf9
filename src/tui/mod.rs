//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Home with model menu and backend status
//! - Parameter form per risk model, with progress and result views
//! - Suggestion form

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{Worker, WorkerHandle, WorkerProgress};
