//! Savings goal progress

use crate::finance::Goal;

impl Goal {
    /// Rounded percentage of the target reached; 0 for a non-positive target
    pub fn percent_complete(&self) -> u32 {
        if self.target_amount <= 0.0 {
            return 0;
        }
        (self.current_amount / self.target_amount * 100.0)
            .round()
            .max(0.0) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.target_amount > 0.0 && self.current_amount >= self.target_amount
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    /// Add a contribution; the saved amount never exceeds the target
    pub fn with_progress(mut self, amount: f64) -> Self {
        self.current_amount = self.target_amount.min(self.current_amount + amount);
        self
    }
}
