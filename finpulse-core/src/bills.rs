//! Recurring bills

use crate::finance::RecurringBill;

/// How many upcoming bills the dashboard shows
pub const UPCOMING_LIMIT: usize = 3;

/// Bills still due this month, soonest first.
///
/// `today_day` is the day of month (1-31). Bills whose due day already passed are
/// dropped rather than rolled over to next month.
pub fn upcoming_bills(bills: &[RecurringBill], today_day: u32, limit: usize) -> Vec<RecurringBill> {
    let mut sorted = bills.to_vec();
    sorted.sort_by_key(|b| b.due_day);
    sorted
        .into_iter()
        .filter(|b| u32::from(b.due_day) >= today_day)
        .take(limit)
        .collect()
}

pub fn monthly_total(bills: &[RecurringBill]) -> f64 {
    bills.iter().map(|b| b.amount).sum()
}
