//! Deterministic category rules for imported transactions that arrive without one.
//!
//! Keyword matching on the description; first rule that matches wins.

use finpulse_core::TransactionKind;

/// Category assigned when nothing matches
pub const UNCATEGORIZED: &str = "Other";

struct Rule {
    category: &'static str,
    keywords: &'static [&'static str],
}

const EXPENSE_RULES: &[Rule] = &[
    Rule {
        category: "Housing",
        keywords: &["RENT", "ALUGUEL", "LEASE", "CONDOMINIO", "MORTGAGE", "LANDLORD"],
    },
    Rule {
        category: "Utilities",
        keywords: &["ELECTRIC", "ENERGIA", "WATER", "INTERNET", "PHONE", "GAS BILL"],
    },
    Rule {
        category: "Food",
        keywords: &[
            "GROCERY", "MERCADO", "SUPERMARKET", "RESTAURANT", "IFOOD", "UBER EATS",
            "DOORDASH", "PADARIA", "BAKERY",
        ],
    },
    Rule {
        category: "Transport",
        keywords: &["UBER", "99APP", "FUEL", "POSTO", "GASOLINE", "PARKING", "METRO", "TOLL"],
    },
    Rule {
        category: "Health",
        keywords: &["PHARMACY", "FARMACIA", "DROGARIA", "CLINIC", "HOSPITAL", "DENTIST"],
    },
    Rule {
        category: "Education",
        keywords: &["TUITION", "SCHOOL", "UNIVERSITY", "COURSE", "UDEMY"],
    },
    Rule {
        category: "Subscriptions",
        keywords: &[
            "NETFLIX", "SPOTIFY", "DISNEY", "HBO", "YOUTUBE", "ICLOUD", "APPLE.COM/BILL",
            "AMAZON PRIME", "GYM",
        ],
    },
    Rule {
        category: "Debt Payment",
        keywords: &["CARD PAYMENT", "FATURA", "LOAN", "EMPRESTIMO", "FINANCING"],
    },
];

const INCOME_RULES: &[Rule] = &[
    Rule {
        category: "Salary",
        keywords: &["PAYROLL", "SALARY", "SALARIO", "DIRECT DEPOSIT"],
    },
    Rule {
        category: "Freelance",
        keywords: &["FREELANCE", "INVOICE", "CONSULTING"],
    },
    Rule {
        category: "Investments",
        keywords: &["DIVIDEND", "DIVIDENDO", "INTEREST", "RENDIMENTO", "JUROS"],
    },
    Rule {
        category: "Refund",
        keywords: &["REFUND", "ESTORNO", "CASHBACK"],
    },
];

/// Pick a category from the description and direction of a transaction.
pub fn categorize(description: &str, kind: TransactionKind) -> &'static str {
    let desc = description.to_uppercase();
    let rules = match kind {
        TransactionKind::Expense => EXPENSE_RULES,
        TransactionKind::Income => INCOME_RULES,
    };

    rules
        .iter()
        .find(|r| r.keywords.iter().any(|k| desc.contains(k)))
        .map(|r| r.category)
        .unwrap_or(UNCATEGORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_rules() {
        assert_eq!(categorize("Aluguel apto 42", TransactionKind::Expense), "Housing");
        assert_eq!(categorize("IFOOD *Pizzaria", TransactionKind::Expense), "Food");
        assert_eq!(categorize("Spotify premium", TransactionKind::Expense), "Subscriptions");
        assert_eq!(categorize("Posto Shell", TransactionKind::Expense), "Transport");
    }

    #[test]
    fn test_food_delivery_before_rides() {
        // "UBER EATS" must not land in Transport
        assert_eq!(categorize("UBER EATS order", TransactionKind::Expense), "Food");
        assert_eq!(categorize("UBER trip", TransactionKind::Expense), "Transport");
    }

    #[test]
    fn test_income_rules() {
        assert_eq!(categorize("ACME PAYROLL", TransactionKind::Income), "Salary");
        assert_eq!(categorize("Estorno compra", TransactionKind::Income), "Refund");
        // Expense keywords do not apply to income
        assert_eq!(categorize("Rent received", TransactionKind::Income), UNCATEGORIZED);
    }

    #[test]
    fn test_default_category() {
        assert_eq!(categorize("???", TransactionKind::Expense), UNCATEGORIZED);
    }
}
