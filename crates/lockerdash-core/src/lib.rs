//! `lockerdash` Core Library
//!
//! Shared functionality for the smart-locker admin console:
//! - REST client and wire types for the locker backend
//! - List views with full-replace rendering and status badges
//! - Client-side substring filtering
//! - Toast queue and structured customer form
//! - Cancellable fixed-interval poller
//! - Configuration resolution and tracing setup

pub mod api;
pub mod charts;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod poller;
pub mod status;
pub mod toast;
pub mod tracing_init;
pub mod view;

pub use api::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use toast::{Severity, ToastQueue};
pub use view::{ListView, ViewKind};
