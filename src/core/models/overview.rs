/// Headline numbers across all collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewStats {
    pub identities: usize,
    pub active_identities: usize,
    pub burned_identities: usize,
    pub websites: usize,
    pub active_websites: usize,
    pub cards: usize,
    pub active_cards: usize,
    pub orders: usize,
    pub pending_orders: usize,
    /// Sum of completed order amounts, currencies not converted.
    pub completed_revenue: f64,
    pub completed_commission: f64,
    /// Non-refunded orders whose reminder is overdue or within a week.
    pub reminders_due: usize,
}
