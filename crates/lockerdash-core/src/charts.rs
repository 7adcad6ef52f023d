//! Summary chart data.
//!
//! Locker occupancy comes from the polled stats; the user and payment
//! breakdowns come from the rows the list views currently hold.

use crate::api::{Customer, Payment, Stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserChart {
    pub active: u64,
    pub passive: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockerChart {
    pub full: u64,
    pub empty: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentChart {
    pub completed: u64,
    pub pending: u64,
    pub cancelled: u64,
}

/// Data behind the three summary charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChartSet {
    pub users: UserChart,
    pub lockers: LockerChart,
    pub payments: PaymentChart,
    /// Total registered users as reported by the stats endpoint.
    pub total_users: Option<u64>,
}

impl ChartSet {
    pub fn compute(stats: Option<&Stats>, customers: &[Customer], payments: &[Payment]) -> Self {
        let mut users = UserChart::default();
        for c in customers {
            if c.active {
                users.active += 1;
            } else {
                users.passive += 1;
            }
        }

        let lockers = stats.map_or_else(LockerChart::default, |s| LockerChart {
            full: s.active_lockers,
            empty: s.total_lockers.saturating_sub(s.active_lockers),
        });

        let mut pay = PaymentChart::default();
        for p in payments {
            match p.status.to_lowercase().as_str() {
                "completed" => pay.completed += 1,
                "pending" => pay.pending += 1,
                "cancelled" => pay.cancelled += 1,
                _ => {}
            }
        }

        Self {
            users,
            lockers,
            payments: pay,
            total_users: stats.map(|s| s.users),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(status: &str) -> Payment {
        Payment {
            id: 1,
            user_id: None,
            amount: 10.0,
            payment_date: None,
            status: status.into(),
        }
    }

    #[test]
    fn lockers_come_from_stats() {
        let stats = Stats {
            users: 16,
            active_lockers: 11,
            total_lockers: 15,
            pending_payments: 5,
        };
        let charts = ChartSet::compute(Some(&stats), &[], &[]);
        assert_eq!(charts.lockers, LockerChart { full: 11, empty: 4 });
        assert_eq!(charts.total_users, Some(16));
    }

    #[test]
    fn no_stats_yet_means_empty_locker_chart() {
        let charts = ChartSet::compute(None, &[], &[]);
        assert_eq!(charts.lockers, LockerChart::default());
        assert!(charts.total_users.is_none());
    }

    #[test]
    fn payments_and_users_are_counted_from_rows() {
        let customers = vec![
            Customer {
                id: 1,
                username: "a".into(),
                email: "a@x".into(),
                active: true,
                role: None,
                created_at: None,
            },
            Customer {
                id: 2,
                username: "b".into(),
                email: "b@x".into(),
                active: false,
                role: None,
                created_at: None,
            },
        ];
        let payments = vec![
            payment("completed"),
            payment("Pending"),
            payment("pending"),
            payment("refunded"),
        ];
        let charts = ChartSet::compute(None, &customers, &payments);
        assert_eq!(charts.users, UserChart { active: 1, passive: 1 });
        assert_eq!(
            charts.payments,
            PaymentChart {
                completed: 1,
                pending: 2,
                cancelled: 0
            }
        );
    }
}
