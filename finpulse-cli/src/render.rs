//! Terminal text for everything the CLI prints. The core crate only hands back
//! tagged values; the words live here.

use std::fmt::Write;

use chrono::NaiveDate;
use finpulse_core::{
    Achievement, AchievementKind, Asset, AssetKind, BudgetSummary, CategoryTotal, Currency, Debt,
    DebtTotals, EnvelopeStatus, EnvelopeUsage, FinancialAnalysis, Goal, HealthBand, Investment,
    InvestmentKind, MonthlyCashFlow, NetWorth, PayoffStrategy, PortfolioSummary, RecurringBill,
    ScoreBreakdown, Summary, Timeframe, Tip, Transaction, TransactionKind, TrendPoint, YearMonth,
    format_currency,
};

pub fn summary_text(summary: Summary) -> &'static str {
    match summary {
        Summary::AddCashFlow => "Add your income and expenses for a complete analysis.",
        Summary::AddTransactions => "Add transactions to receive your analysis.",
        Summary::Excellent => "Your financial health is excellent! Keep up the great work.",
        Summary::OnTrack => "You are on the right track. Stay focused on your goals.",
        Summary::RoomForImprovement => {
            "Your finances have room for improvement. Focus and discipline will pay off."
        }
        Summary::NeedsAttention => {
            "Your financial situation needs attention. Let's put together an action plan."
        }
    }
}

/// Title and description of a tip
pub fn tip_text(tip: Tip) -> (&'static str, &'static str) {
    match tip {
        Tip::RecordTransactions => (
            "Record your transactions",
            "Start by adding this month's income and expenses for an accurate analysis.",
        ),
        Tip::CreateEnvelopes => (
            "Create budget envelopes",
            "Set spending limits for categories such as food and leisure.",
        ),
        Tip::SetFinancialGoal => (
            "Set a financial goal",
            "A clear objective, like a trip, makes saving easier.",
        ),
        Tip::RecordIncome => (
            "Record your income",
            "Add your sources of income to get a complete analysis.",
        ),
        Tip::RecordExpenses => (
            "Record your expenses",
            "Log your spending to see where your money is going.",
        ),
        Tip::DefineGoal => (
            "Define a goal",
            "A goal is a great starting point for planning.",
        ),
        Tip::DetailedBudget => (
            "Build a detailed budget",
            "Use budget envelopes to plan and control spending by category.",
        ),
        Tip::AccelerateDebtPayoff => (
            "Accelerate debt payoff",
            "Try the avalanche or snowball strategy to clear debts faster.",
        ),
        Tip::BuildEmergencyFund => (
            "Build your emergency fund",
            "Keep 3 to 6 months of essential expenses somewhere safe and easy to reach.",
        ),
        Tip::AutomateInvestments => (
            "Automate your investments",
            "Schedule an automatic monthly transfer to your investment account.",
        ),
        Tip::ReviewGoals => (
            "Review your goals",
            "Make sure your financial goals still match your life plans.",
        ),
        Tip::IncreaseIncome => (
            "Increase your income",
            "Look for new income sources such as freelance work or investments.",
        ),
    }
}

fn band_label(band: HealthBand) -> &'static str {
    match band {
        HealthBand::Poor => "poor",
        HealthBand::Fair => "fair",
        HealthBand::Healthy => "healthy",
    }
}

pub fn achievement_text(kind: AchievementKind) -> (&'static str, &'static str) {
    match kind {
        AchievementKind::FirstTransaction => ("First step", "You recorded your first transaction."),
        AchievementKind::FirstBudget => ("Budgeter", "You created your first budget envelope."),
        AchievementKind::FirstGoal => ("Dreamer", "Your first goal is set. Let's reach it!"),
        AchievementKind::DebtSlayer => ("Debt slayer", "You added a debt to keep track of."),
        AchievementKind::Investor => ("Investor", "You started tracking your investments."),
    }
}

/// Ratios can be infinite when a denominator is zero.
fn finite_or_na(value: f64, show: impl Fn(f64) -> String) -> String {
    if value.is_finite() {
        show(value)
    } else {
        "n/a".to_string()
    }
}

fn breakdown_lines(out: &mut String, b: &ScoreBreakdown) {
    let _ = writeln!(
        out,
        "  {:<16} {:>10}  {:>2}/50",
        "Savings rate",
        finite_or_na(b.savings_rate, |v| format!("{:.1}%", v * 100.0)),
        b.savings_points
    );
    let _ = writeln!(
        out,
        "  {:<16} {:>10}  {:>2}/30",
        "Debt to assets",
        finite_or_na(b.debt_to_asset_ratio, |v| format!("{v:.2}")),
        b.debt_points
    );
    let _ = writeln!(
        out,
        "  {:<16} {:>10}  {:>2}/20",
        "Emergency fund",
        finite_or_na(b.emergency_fund_months, |v| format!("{v:.1} mo")),
        b.emergency_points
    );
}

pub fn health(analysis: &FinancialAnalysis, month: YearMonth) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Financial health ({month}): {}/100 [{}]",
        analysis.score,
        band_label(analysis.band())
    );
    let _ = writeln!(out, "\"{}\"", summary_text(analysis.summary));

    if let Some(b) = &analysis.breakdown {
        out.push('\n');
        breakdown_lines(&mut out, b);
    }

    if !analysis.tips.is_empty() {
        out.push_str("\nTips:\n");
        for (i, tip) in analysis.tips.iter().enumerate() {
            let (title, description) = tip_text(*tip);
            let _ = writeln!(out, "{}. {title}", i + 1);
            let _ = writeln!(out, "   {description}");
        }
    }
    out
}

pub fn debt_plan(debts: &[Debt], strategy: PayoffStrategy, currency: Currency) -> String {
    let mut out = String::new();
    if debts.is_empty() {
        out.push_str("No debts recorded. Add one with: finpulse add debt\n");
        return out;
    }

    let totals = DebtTotals::of(debts);
    let _ = writeln!(out, "Payoff plan ({strategy})");
    let _ = writeln!(
        out,
        "Total owed: {} | minimum payments: {}/month\n",
        format_currency(totals.total_balance, currency),
        format_currency(totals.total_minimum_payments, currency)
    );
    for (i, d) in debts.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} | {} at {:.2}% | min {} | id={}",
            i + 1,
            d.name,
            format_currency(d.total_amount, currency),
            d.interest_rate,
            format_currency(d.minimum_payment, currency),
            d.id
        );
    }
    out
}

fn status_label(status: EnvelopeStatus) -> &'static str {
    match status {
        EnvelopeStatus::OnTrack => "ok",
        EnvelopeStatus::Warning => "warning",
        EnvelopeStatus::Overspent => "OVERSPENT",
    }
}

pub fn budget(usage: &[EnvelopeUsage], month: YearMonth, currency: Currency) -> String {
    let mut out = String::new();
    if usage.is_empty() {
        out.push_str("No budget envelopes yet. Add one with: finpulse add envelope\n");
        return out;
    }

    let _ = writeln!(out, "Budget for {month}\n");
    for u in usage {
        let _ = writeln!(
            out,
            "- {:<20} {} of {} ({:.0}%) {} left [{}] id={}",
            u.envelope.name,
            format_currency(u.spent, currency),
            format_currency(u.envelope.budgeted_amount, currency),
            u.percent,
            format_currency(u.remaining, currency),
            status_label(u.status),
            u.envelope.id
        );
    }
    let total = BudgetSummary::of(usage);
    let _ = writeln!(
        out,
        "\nBudgeted {} | spent {} | remaining {}",
        format_currency(total.total_budgeted, currency),
        format_currency(total.total_spent, currency),
        format_currency(total.remaining(), currency)
    );
    out
}

pub fn goals(goals: &[Goal], today: NaiveDate, currency: Currency) -> String {
    let mut out = String::new();
    if goals.is_empty() {
        out.push_str("No goals yet. Add one with: finpulse add goal\n");
        return out;
    }
    for g in goals {
        let when = if g.is_complete() {
            "done".to_string()
        } else {
            let days = (g.target_date - today).num_days();
            if days < 0 {
                format!("{} days overdue", -days)
            } else {
                format!("{days} days left")
            }
        };
        let _ = writeln!(
            out,
            "- {} | {} of {} ({}%) | {} | id={}",
            g.name,
            format_currency(g.current_amount, currency),
            format_currency(g.target_amount, currency),
            g.percent_complete(),
            when,
            g.id
        );
    }
    out
}

/// `all` switches the heading from "upcoming" to the full list.
pub fn bills(listed: &[RecurringBill], total: f64, all: bool, currency: Currency) -> String {
    let mut out = String::new();
    if listed.is_empty() {
        out.push_str(if all {
            "No bills yet. Add one with: finpulse add bill\n"
        } else {
            "No bills due for the rest of the month.\n"
        });
    } else {
        out.push_str(if all { "Bills:\n" } else { "Upcoming bills:\n" });
        for b in listed {
            let _ = writeln!(
                out,
                "- day {:>2}: {} {} | id={}",
                b.due_day,
                b.name,
                format_currency(b.amount, currency),
                b.id
            );
        }
    }
    let _ = writeln!(out, "Monthly bills total: {}", format_currency(total, currency));
    out
}

pub fn achievements(list: &[Achievement]) -> String {
    let mut out = String::new();
    let unlocked = list.iter().filter(|a| a.unlocked).count();
    let _ = writeln!(out, "Achievements {unlocked}/{}\n", list.len());
    for a in list {
        let (title, description) = achievement_text(a.kind);
        let mark = if a.unlocked { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "{mark} {title}: {description}");
    }
    out
}

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

pub fn transactions(txns: &[Transaction], currency: Currency) -> String {
    let mut out = String::new();
    if txns.is_empty() {
        out.push_str("No matching transactions.\n");
        return out;
    }
    for t in txns {
        let _ = writeln!(
            out,
            "{} {:<7} {:>14} | {} | {} | {} | id={}",
            t.date.format("%Y-%m-%d"),
            kind_label(t.kind),
            format_currency(t.signed_amount(), currency),
            t.category,
            t.description,
            t.payment_method.label(),
            t.id
        );
    }
    let income: f64 = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expenses: f64 = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
    let _ = writeln!(
        out,
        "\n{} transactions | in {} | out {}",
        txns.len(),
        format_currency(income, currency),
        format_currency(expenses, currency)
    );
    out
}

fn investment_kind_label(kind: InvestmentKind) -> &'static str {
    match kind {
        InvestmentKind::Stock => "stock",
        InvestmentKind::RealEstateFund => "real estate fund",
        InvestmentKind::Crypto => "crypto",
        InvestmentKind::FixedIncome => "fixed income",
        InvestmentKind::Other => "other",
    }
}

pub fn portfolio(investments: &[Investment], currency: Currency) -> String {
    let mut out = String::new();
    if investments.is_empty() {
        out.push_str("No investments yet. Add one with: finpulse add investment\n");
        return out;
    }
    for i in investments {
        let _ = writeln!(
            out,
            "- {} ({}) | {} x {} = {} | {} ({:+.2}%) | id={}",
            i.name,
            investment_kind_label(i.kind),
            i.quantity,
            format_currency(i.current_price, currency),
            format_currency(i.market_value(), currency),
            format_currency(i.gain_loss(), currency),
            i.performance_pct(),
            i.id
        );
    }
    let p = PortfolioSummary::of(investments);
    let _ = writeln!(
        out,
        "\nTotal {} | invested {} | {} ({:+.2}%)",
        format_currency(p.total_value, currency),
        format_currency(p.total_cost, currency),
        format_currency(p.gain_loss(), currency),
        p.performance_pct()
    );
    out
}

fn asset_kind_label(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::RealEstate => "real estate",
        AssetKind::Vehicle => "vehicle",
        AssetKind::Other => "other",
    }
}

pub fn assets(assets: &[Asset], currency: Currency) -> String {
    let mut out = String::new();
    if assets.is_empty() {
        out.push_str("No assets yet. Add one with: finpulse add asset\n");
        return out;
    }
    for a in assets {
        let _ = writeln!(
            out,
            "- {} ({}) | worth {} | paid {} | {} | id={}",
            a.name,
            asset_kind_label(a.kind),
            format_currency(a.current_value, currency),
            format_currency(a.purchase_price, currency),
            format_currency(a.appreciation(), currency),
            a.id
        );
    }
    let total: f64 = assets.iter().map(|a| a.current_value).sum();
    let _ = writeln!(out, "\nTotal {}", format_currency(total, currency));
    out
}

pub fn report(
    by_category: &[CategoryTotal],
    trend: &[TrendPoint],
    month: YearMonth,
    timeframe: Timeframe,
    currency: Currency,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Spending by category ({month})");
    if by_category.is_empty() {
        out.push_str("  no expenses recorded\n");
    } else {
        let total: f64 = by_category.iter().map(|c| c.amount).sum();
        for c in by_category {
            let share = if total > 0.0 { c.amount / total * 100.0 } else { 0.0 };
            let _ = writeln!(
                out,
                "  {:<20} {:>14} {:>5.1}%",
                c.category,
                format_currency(c.amount, currency),
                share
            );
        }
    }

    let _ = writeln!(out, "\nIncome vs expenses ({timeframe})");
    for p in trend {
        let _ = writeln!(
            out,
            "  {}  in {:>14}  out {:>14}  net {:>14}",
            p.month,
            format_currency(p.income, currency),
            format_currency(p.expenses, currency),
            format_currency(p.income - p.expenses, currency)
        );
    }
    out
}

/// Inputs for the one-screen overview
pub struct Dashboard<'a> {
    pub greeting: &'a str,
    pub month: YearMonth,
    pub cash_flow: MonthlyCashFlow,
    pub net_worth: NetWorth,
    pub analysis: &'a FinancialAnalysis,
    pub investments: &'a [Investment],
    pub upcoming: &'a [RecurringBill],
}

pub fn dashboard(d: &Dashboard<'_>, currency: Currency) -> String {
    let money = |v: f64| format_currency(v, currency);
    let mut out = String::new();

    if d.greeting.is_empty() {
        let _ = writeln!(out, "Overview for {}\n", d.month);
    } else {
        let _ = writeln!(out, "Hello, {}! Overview for {}\n", d.greeting, d.month);
    }

    let _ = writeln!(out, "Income:    {}", money(d.cash_flow.income));
    let _ = writeln!(out, "Expenses:  {}", money(d.cash_flow.expenses));
    let _ = writeln!(out, "Net:       {}\n", money(d.cash_flow.net()));

    let nw = &d.net_worth;
    let _ = writeln!(out, "Net worth: {}", money(nw.net_worth()));
    let _ = writeln!(out, "  cash         {}", money(nw.cash_balance));
    let _ = writeln!(out, "  investments  {}", money(nw.investments_value));
    let _ = writeln!(out, "  assets       {}", money(nw.physical_assets_value));
    let owed_sign = if nw.debts_total > 0.0 { "-" } else { " " };
    let _ = writeln!(out, "  debts       {owed_sign}{}", money(nw.debts_total));

    if !d.investments.is_empty() {
        let p = PortfolioSummary::of(d.investments);
        let _ = writeln!(
            out,
            "\nPortfolio: {} ({:+.2}%, {})",
            money(p.total_value),
            p.performance_pct(),
            money(p.gain_loss())
        );
    }

    let _ = writeln!(
        out,
        "\nHealth score: {}/100 [{}]",
        d.analysis.score,
        band_label(d.analysis.band())
    );
    if let Some(tip) = d.analysis.tips.first() {
        let _ = writeln!(out, "Top tip: {}", tip_text(*tip).0);
    }

    if !d.upcoming.is_empty() {
        out.push_str("\nNext bills:\n");
        for b in d.upcoming {
            let _ = writeln!(out, "- day {:>2}: {} {}", b.due_day, b.name, money(b.amount));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use finpulse_core::{FinancialSnapshot, evaluate};

    fn feb() -> YearMonth {
        YearMonth::new(2026, 2).unwrap()
    }

    #[test]
    fn test_health_reference_snapshot() {
        let a = evaluate(&FinancialSnapshot::new(5000.0, 3500.0, 2000.0, 10000.0));
        let text = health(&a, feb());
        assert!(text.starts_with("Financial health (2026-02): 90/100 [healthy]"));
        assert!(text.contains(summary_text(Summary::Excellent)));
        assert!(text.contains("30.0%"));
        assert!(text.contains("1. Build your emergency fund"));
        assert!(text.contains("3. Review your goals"));
    }

    #[test]
    fn test_health_infinite_ratios_render_as_na() {
        // no income, some expenses: savings rate is -inf
        let a = evaluate(&FinancialSnapshot::new(0.0, 100.0, 0.0, 0.0));
        let text = health(&a, feb());
        assert!(text.contains("n/a"));
        assert!(!text.contains("inf"));
    }

    #[test]
    fn test_health_onboarding_has_no_breakdown() {
        let a = evaluate(&FinancialSnapshot::new(0.0, 0.0, 0.0, 0.0));
        let text = health(&a, feb());
        assert!(text.contains("0/100 [poor]"));
        assert!(text.contains("Record your income"));
        assert!(!text.contains("Savings rate"));
    }

    #[test]
    fn test_every_tip_has_text() {
        let all = [
            Tip::RecordTransactions,
            Tip::CreateEnvelopes,
            Tip::SetFinancialGoal,
            Tip::RecordIncome,
            Tip::RecordExpenses,
            Tip::DefineGoal,
            Tip::DetailedBudget,
            Tip::AccelerateDebtPayoff,
            Tip::BuildEmergencyFund,
            Tip::AutomateInvestments,
            Tip::ReviewGoals,
            Tip::IncreaseIncome,
        ];
        for tip in all {
            let (title, description) = tip_text(tip);
            assert!(!title.is_empty() && !description.is_empty());
        }
    }

    #[test]
    fn test_debt_plan_lists_in_given_order() {
        let debts = vec![
            Debt::new("b", "Card", 5000.0, 20.0, 250.0),
            Debt::new("a", "Loan", 500.0, 10.0, 50.0),
        ];
        let text = debt_plan(&debts, PayoffStrategy::Avalanche, Currency::Usd);
        assert!(text.contains("Payoff plan (avalanche)"));
        assert!(text.contains("Total owed: $5,500.00"));
        let card = text.find("1. Card").unwrap();
        let loan = text.find("2. Loan").unwrap();
        assert!(card < loan);
    }

    #[test]
    fn test_achievements_counts_unlocked() {
        let list = vec![
            Achievement {
                kind: AchievementKind::FirstTransaction,
                unlocked: true,
            },
            Achievement {
                kind: AchievementKind::Investor,
                unlocked: false,
            },
        ];
        let text = achievements(&list);
        assert!(text.starts_with("Achievements 1/2"));
        assert!(text.contains("[x] First step"));
        assert!(text.contains("[ ] Investor"));
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    #[test]
    fn test_transactions_show_ids_and_totals() {
        let txns = vec![
            Transaction::new("t2", day(9), "Mercado", 120.0, TransactionKind::Expense, "Food"),
            Transaction::new("t1", day(1), "Payroll", 5000.0, TransactionKind::Income, "Salary"),
        ];
        let text = transactions(&txns, Currency::Brl);
        assert!(text.starts_with("2026-02-09 expense"));
        assert!(text.contains("-R$ 120,00"));
        assert!(text.contains("id=t2"));
        assert!(text.contains("id=t1"));
        assert!(text.contains("2 transactions | in R$ 5.000,00 | out R$ 120,00"));
        assert_eq!(transactions(&[], Currency::Brl), "No matching transactions.\n");
    }

    #[test]
    fn test_portfolio_per_position() {
        let inv = vec![Investment {
            id: "inv1".into(),
            name: "Index fund".into(),
            kind: InvestmentKind::Stock,
            quantity: 10.0,
            purchase_price: 20.0,
            current_price: 25.0,
        }];
        let text = portfolio(&inv, Currency::Usd);
        assert!(text.contains("- Index fund (stock) | 10 x $25.00 = $250.00 | $50.00 (+25.00%) | id=inv1"));
        assert!(text.contains("Total $250.00 | invested $200.00"));
    }

    #[test]
    fn test_assets_show_appreciation() {
        let list = vec![Asset {
            id: "car".into(),
            name: "Car".into(),
            kind: AssetKind::Vehicle,
            purchase_price: 60000.0,
            current_value: 45000.0,
        }];
        let text = assets(&list, Currency::Usd);
        assert!(text.contains("- Car (vehicle) | worth $45,000.00 | paid $60,000.00 | -$15,000.00 | id=car"));
        assert!(text.contains("Total $45,000.00"));
    }

    #[test]
    fn test_report_sections() {
        let cats = vec![
            CategoryTotal {
                category: "Housing".into(),
                amount: 750.0,
            },
            CategoryTotal {
                category: "Food".into(),
                amount: 250.0,
            },
        ];
        let trend = vec![
            TrendPoint {
                month: YearMonth::new(2026, 1).unwrap(),
                income: 0.0,
                expenses: 0.0,
            },
            TrendPoint {
                month: feb(),
                income: 2000.0,
                expenses: 1000.0,
            },
        ];
        let text = report(&cats, &trend, feb(), Timeframe::SixMonths, Currency::Usd);
        assert!(text.contains("Spending by category (2026-02)"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("Income vs expenses (6m)"));
        assert!(text.contains("2026-01"));
        let housing = text.find("Housing").unwrap();
        let food = text.find("Food").unwrap();
        assert!(housing < food);
    }

    #[test]
    fn test_bills_show_ids() {
        let list = vec![RecurringBill {
            id: "net".into(),
            name: "Internet".into(),
            amount: 99.9,
            due_day: 10,
        }];
        let text = bills(&list, 99.9, true, Currency::Usd);
        assert!(text.starts_with("Bills:"));
        assert!(text.contains("- day 10: Internet $99.90 | id=net"));
    }

    #[test]
    fn test_dashboard_without_debts_has_no_minus() {
        let analysis = evaluate(&FinancialSnapshot::new(1000.0, 500.0, 0.0, 500.0));
        let d = Dashboard {
            greeting: "",
            month: feb(),
            cash_flow: MonthlyCashFlow {
                income: 1000.0,
                expenses: 500.0,
            },
            net_worth: NetWorth {
                cash_balance: 500.0,
                ..NetWorth::default()
            },
            analysis: &analysis,
            investments: &[],
            upcoming: &[],
        };
        let text = dashboard(&d, Currency::Brl);
        assert!(text.contains("  debts        R$ 0,00"));
        assert!(!text.contains("-R$ 0,00"));

        let with_debt = Dashboard {
            net_worth: NetWorth {
                debts_total: 300.0,
                ..NetWorth::default()
            },
            ..d
        };
        assert!(dashboard(&with_debt, Currency::Brl).contains("  debts       -R$ 300,00"));
    }
}
