//! Locker backend response and request types.
//!
//! Deserialization structs matching the backend's JSON. Only the fields the
//! dashboard renders are required; everything else is optional or ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Customer account (`/api/customers`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Storage unit (`/api/lockers`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Locker {
    #[serde(default)]
    pub id: Option<i64>,
    /// Backends send either `"L101"` or a bare number.
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
    pub status: String,
    #[serde(default)]
    pub assigned_user_name: Option<String>,
}

/// Locker reservation (`/api/reservations`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reservation {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub locker_id: Option<i64>,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: String,
}

/// Payment record (`/api/payments`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Payment {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub amount: f64,
    #[serde(default)]
    pub payment_date: Option<String>,
    pub status: String,
}

/// Dashboard notification (`/api/notifications`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
}

/// Summary counters (`/api/stats`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub active_lockers: u64,
    #[serde(default)]
    pub total_lockers: u64,
    #[serde(default)]
    pub pending_payments: u64,
}

/// Body of `POST /api/customers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCustomer {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /api/customers/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CustomerUpdate {
    pub fn set_active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}

/// Failure body; `error` is shown to the user verbatim.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}
