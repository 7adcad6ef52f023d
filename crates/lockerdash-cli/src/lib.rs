//! lockerdash CLI Library
//!
//! Terminal admin console for the smart-locker backend.
//! Provides both TUI (ratatui) and headless snapshot modes.

pub mod actions;
pub mod app;
pub mod headless;
pub mod sync;
pub mod tui;
pub mod ui;
