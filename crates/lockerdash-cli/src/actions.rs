//! Customer write actions and their toast/refetch outcome.
//!
//! Every action ends in exactly one toast. Only a successful write asks for
//! the customers view to be fetched again.

use tracing::{error, info, warn};

use lockerdash_core::api::{CustomerUpdate, NewCustomer};
use lockerdash_core::form::Submission;
use lockerdash_core::{ApiClient, Error, Severity, ViewKind};

/// A write request against `/api/customers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerAction {
    Create(NewCustomer),
    Update { id: i64, update: CustomerUpdate },
    Deactivate { id: i64 },
    Activate { id: i64 },
}

impl From<Submission> for CustomerAction {
    fn from(s: Submission) -> Self {
        match s {
            Submission::Create(body) => Self::Create(body),
            Submission::Update { id, update } => Self::Update { id, update },
        }
    }
}

impl CustomerAction {
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::Create(_) => "Customer created successfully",
            Self::Update { .. } => "Customer updated successfully",
            Self::Deactivate { .. } => "Customer deactivated successfully",
            Self::Activate { .. } => "Customer activated successfully",
        }
    }

    pub const fn failure_message(&self) -> &'static str {
        match self {
            Self::Create(_) => "Failed to create customer",
            Self::Update { .. } => "Failed to update customer",
            Self::Deactivate { .. } => "Failed to deactivate customer",
            Self::Activate { .. } => "Failed to activate customer",
        }
    }

    const fn verb(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update { .. } => "update",
            Self::Deactivate { .. } => "deactivate",
            Self::Activate { .. } => "activate",
        }
    }
}

/// What the UI does once an action has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub message: String,
    pub severity: Severity,
    /// View to fetch again; only set on success.
    pub refetch: Option<ViewKind>,
}

/// Send `action` to the backend and describe the outcome.
pub async fn execute(api: &ApiClient, action: CustomerAction) -> ActionOutcome {
    let result = match &action {
        CustomerAction::Create(body) => api.create_customer(body).await,
        CustomerAction::Update { id, update } => api.update_customer(*id, update).await,
        CustomerAction::Deactivate { id } => {
            api.update_customer(*id, &CustomerUpdate::set_active(false))
                .await
        }
        CustomerAction::Activate { id } => {
            api.update_customer(*id, &CustomerUpdate::set_active(true))
                .await
        }
    };
    outcome_for(&action, result)
}

/// Map a write result onto its toast and refetch decision.
pub fn outcome_for(action: &CustomerAction, result: lockerdash_core::Result<()>) -> ActionOutcome {
    match result {
        Ok(()) => {
            info!(action = action.verb(), "customer action succeeded");
            ActionOutcome {
                message: action.success_message().to_string(),
                severity: Severity::Success,
                refetch: Some(ViewKind::Customers),
            }
        }
        Err(e @ Error::Api { .. }) => {
            warn!(action = action.verb(), error = %e, "customer action rejected");
            ActionOutcome {
                message: e
                    .server_message()
                    .unwrap_or_else(|| action.failure_message())
                    .to_string(),
                severity: Severity::Danger,
                refetch: None,
            }
        }
        Err(e) => {
            error!(action = action.verb(), error = %e, "Error during customer {}", action.verb());
            ActionOutcome {
                message: action.failure_message().to_string(),
                severity: Severity::Danger,
                refetch: None,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn success_refetches_customers_once() {
        let out = outcome_for(&CustomerAction::Activate { id: 1 }, Ok(()));
        assert_eq!(out.message, "Customer activated successfully");
        assert_eq!(out.severity, Severity::Success);
        assert_eq!(out.refetch, Some(ViewKind::Customers));
    }

    fn every_action() -> [CustomerAction; 4] {
        [
            CustomerAction::Create(NewCustomer {
                username: "a".into(),
                email: "a@x".into(),
                password: "p".into(),
            }),
            CustomerAction::Update {
                id: 1,
                update: CustomerUpdate::default(),
            },
            CustomerAction::Deactivate { id: 1 },
            CustomerAction::Activate { id: 1 },
        ]
    }

    #[test]
    fn every_successful_action_refetches_customers() {
        for action in every_action() {
            let out = outcome_for(&action, Ok(()));
            assert_eq!(out.message, action.success_message());
            assert_eq!(out.severity, Severity::Success, "{action:?}");
            assert_eq!(out.refetch, Some(ViewKind::Customers), "{action:?}");
        }
    }

    #[test]
    fn every_failed_action_skips_refetch() {
        for action in every_action() {
            let out = outcome_for(
                &action,
                Err(Error::Api {
                    status: 500,
                    message: None,
                }),
            );
            assert_eq!(out.message, action.failure_message());
            assert!(out.refetch.is_none(), "{action:?}");
        }
    }

    #[test]
    fn api_failure_uses_server_message_and_skips_refetch() {
        let out = outcome_for(
            &CustomerAction::Update {
                id: 1,
                update: CustomerUpdate::default(),
            },
            Err(Error::Api {
                status: 400,
                message: Some("email taken".into()),
            }),
        );
        assert_eq!(out.message, "email taken");
        assert_eq!(out.severity, Severity::Danger);
        assert!(out.refetch.is_none());
    }

    #[test]
    fn api_failure_without_message_falls_back() {
        let out = outcome_for(
            &CustomerAction::Deactivate { id: 1 },
            Err(Error::Api {
                status: 500,
                message: None,
            }),
        );
        assert_eq!(out.message, "Failed to deactivate customer");
        assert!(out.refetch.is_none());
    }

    #[test]
    fn transport_or_parse_failure_is_generic() {
        let parse = serde_json::from_str::<u8>("x").unwrap_err();
        let out = outcome_for(
            &CustomerAction::Create(NewCustomer {
                username: "a".into(),
                email: "a@x".into(),
                password: "p".into(),
            }),
            Err(Error::Parse(parse)),
        );
        assert_eq!(out.message, "Failed to create customer");
        assert_eq!(out.severity, Severity::Danger);
        assert!(out.refetch.is_none());
    }

    #[test]
    fn submission_converts_to_action() {
        let action: CustomerAction = Submission::Update {
            id: 3,
            update: CustomerUpdate::set_active(true),
        }
        .into();
        assert!(matches!(action, CustomerAction::Update { id: 3, .. }));
    }
}
