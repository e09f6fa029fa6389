//! Financial figures aggregated over imported appointments.

use serde::Serialize;

use crate::status::{ActionType, AppointmentStatus};

/// The monetary slice of one appointment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialEntry {
    pub status: AppointmentStatus,
    pub action_type: Option<ActionType>,
    pub commission: Option<f64>,
    pub cart_amount: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FinancialStats {
    pub total_commission: f64,
    /// Realized appointments imported from sale actions.
    pub total_sales: i64,
    pub total_cart_amount: f64,
    /// Share of realized appointments, in percent. 0 when there are none.
    pub validation_rate: f64,
}

pub fn aggregate(entries: &[FinancialEntry]) -> FinancialStats {
    let realized = entries
        .iter()
        .filter(|e| e.status == AppointmentStatus::Realized)
        .count();

    let validation_rate = if entries.is_empty() {
        0.0
    } else {
        realized as f64 / entries.len() as f64 * 100.0
    };

    FinancialStats {
        total_commission: entries.iter().filter_map(|e| e.commission).sum(),
        total_sales: entries
            .iter()
            .filter(|e| {
                e.status == AppointmentStatus::Realized && e.action_type == Some(ActionType::Sale)
            })
            .count() as i64,
        total_cart_amount: entries.iter().filter_map(|e| e.cart_amount).sum(),
        validation_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: AppointmentStatus, action_type: Option<ActionType>) -> FinancialEntry {
        FinancialEntry {
            status,
            action_type,
            commission: Some(10.0),
            cart_amount: Some(100.0),
        }
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        assert_eq!(aggregate(&[]), FinancialStats::default());
    }

    #[test]
    fn aggregates_mixed_ledger() {
        let entries = [
            entry(AppointmentStatus::Realized, Some(ActionType::Sale)),
            entry(AppointmentStatus::Realized, Some(ActionType::Lead)),
            entry(AppointmentStatus::Pending, Some(ActionType::Sale)),
            FinancialEntry {
                status: AppointmentStatus::Planned,
                action_type: None,
                commission: None,
                cart_amount: None,
            },
        ];
        let stats = aggregate(&entries);
        assert!((stats.total_commission - 30.0).abs() < f64::EPSILON);
        assert!((stats.total_cart_amount - 300.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_sales, 1);
        assert!((stats.validation_rate - 50.0).abs() < f64::EPSILON);
    }
}
