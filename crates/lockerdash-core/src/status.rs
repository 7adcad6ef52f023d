//! Status string → badge colour mapping.

/// Visual severity class of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Success,
    Primary,
    Warning,
    Danger,
    Secondary,
}

impl BadgeColor {
    /// Map a status-like string onto its badge colour. Matching is
    /// case-insensitive; unknown values are `Secondary`.
    pub fn for_status(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "occupied" | "active" | "completed" | "success" => Self::Success,
            "available" | "info" => Self::Primary,
            "pending" | "warning" => Self::Warning,
            "cancelled" | "error" | "danger" => Self::Danger,
            _ => Self::Secondary,
        }
    }
}
