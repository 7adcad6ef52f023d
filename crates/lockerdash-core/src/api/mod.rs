//! Locker backend API integration.
//!
//! Provides a reqwest-based client for the backend's `/api` endpoints,
//! covering customers, lockers, reservations, payments, notifications and
//! summary statistics.

mod client;
pub mod types;


pub use client::ApiClient;
pub use types::{
    Customer, CustomerUpdate, Locker, NewCustomer, Notification, Payment, Reservation, Stats,
};
