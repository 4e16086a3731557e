//! finpulse-core: finance records and the pure calculators behind the dashboard
//! (health score, debt payoff order, net worth, budgets, goals, bills, reports).

pub mod achievements;
pub mod bills;
pub mod budget;
pub mod debts;
pub mod finance;
pub mod format;
pub mod goals;
pub mod health;
pub mod portfolio;
pub mod reports;
pub mod snapshot;
pub mod time;

pub use achievements::{Achievement, AchievementKind, RecordCounts, achievements};
pub use bills::{UPCOMING_LIMIT, monthly_total, upcoming_bills};
pub use budget::{BudgetSummary, EnvelopeStatus, EnvelopeUsage, envelope_usage};
pub use debts::{DebtTotals, PayoffStrategy, prioritize};
pub use finance::{
    Asset, AssetKind, BudgetEnvelope, Currency, Debt, Goal, Investment, InvestmentKind,
    PaymentMethod, Recurrence, RecurringBill, Transaction, TransactionKind,
};
pub use format::{format_currency, mask_email};
pub use health::{
    FinancialAnalysis, FinancialSnapshot, HealthBand, MAX_TIPS, ScoreBreakdown, Summary, Tip,
    evaluate,
};
pub use portfolio::PortfolioSummary;
pub use reports::{
    CategoryTotal, Timeframe, TransactionFilter, TrendPoint, expenses_by_category,
    filter_transactions, monthly_trend,
};
pub use snapshot::{MonthlyCashFlow, NetWorth};
pub use time::{YearMonth, current_month, local_today};
