use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use finpulse_core::{
    Asset, AssetKind, BudgetEnvelope, Debt, Goal, Investment, InvestmentKind, PaymentMethod,
    PayoffStrategy, Recurrence, RecurringBill, Timeframe, Transaction, TransactionFilter,
    TransactionKind, UPCOMING_LIMIT, YearMonth, current_month, evaluate, expenses_by_category,
    filter_transactions, local_today, monthly_total, monthly_trend, upcoming_bills,
};
use finpulse_ledger::{
    Entity, Ledger, categorize, export_transactions_csv, import_transactions_csv,
};
use std::path::PathBuf;
use tracing::{debug, info};

mod config;
mod logging;
mod render;
mod setup;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "finpulse",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINPULSE_BUILD_SHA"), ")"),
    about = "Personal finance tracker: health score, debt plan, budgets and goals"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive setup: currency, timezone, profile; writes ~/.finpulse/*
    Init,

    /// Financial health score for the current month
    Health {
        /// Month to score as YYYY-MM (default: current month in your timezone)
        #[arg(long, value_parser = parse_month)]
        month: Option<YearMonth>,

        #[arg(long)]
        json: bool,
    },

    /// Debts in payoff order
    Debts {
        #[arg(long, default_value = "avalanche")]
        strategy: PayoffStrategy,

        #[arg(long)]
        json: bool,
    },

    /// One-screen overview: cash flow, net worth, score, next bills
    Summary,

    /// Envelope spending for a month
    Budget {
        #[arg(long, value_parser = parse_month)]
        month: Option<YearMonth>,
    },

    /// Goal progress
    Goals,

    /// Bills still due this month
    Bills {
        /// How many to show (default: 3)
        #[arg(long, default_value_t = UPCOMING_LIMIT)]
        limit: usize,

        /// Every bill by due day, including ones already past this month
        #[arg(long)]
        all: bool,
    },

    /// Transactions, newest first
    Transactions {
        #[arg(long = "type")]
        kind: Option<TransactionKind>,
        #[arg(long)]
        category: Option<String>,
        /// YYYY-MM
        #[arg(long, value_parser = parse_month)]
        month: Option<YearMonth>,
        #[arg(long)]
        json: bool,
    },

    /// Investment positions with gain/loss
    Portfolio,

    /// Physical assets with appreciation
    Assets,

    /// Spending by category and the income/expense trend
    Report {
        /// Trend window: 6m, 12m or ytd
        #[arg(long, default_value = "6m")]
        timeframe: Timeframe,
        #[arg(long)]
        json: bool,
    },

    /// Unlocked milestones
    Achievements,

    /// Add a record, or replace one by passing --id
    Add {
        #[command(subcommand)]
        record: AddCommand,
    },

    /// Delete a record
    Remove { kind: RecordKind, id: String },

    /// Put money towards a goal (capped at the goal's target)
    Progress { goal_id: String, amount: f64 },

    /// Import transactions from a CSV statement
    Import {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Export all transactions to CSV
    Export {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AddCommand {
    Transaction {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: f64,
        #[arg(long = "type")]
        kind: TransactionKind,
        /// Picked from the description when omitted
        #[arg(long)]
        category: Option<String>,
        /// YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "debit-card")]
        payment_method: PaymentMethod,
        #[arg(long, default_value = "none")]
        recurrence: Recurrence,
        /// Budget envelope id
        #[arg(long)]
        envelope: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Debt {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        total: f64,
        /// Percent per month
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        minimum: f64,
    },
    Goal {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        target: f64,
        #[arg(long, default_value_t = 0.0)]
        current: f64,
        /// YYYY-MM-DD
        #[arg(long)]
        target_date: NaiveDate,
    },
    Envelope {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        budget: f64,
    },
    Investment {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long = "type", default_value = "other")]
        kind: InvestmentKind,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        purchase_price: f64,
        #[arg(long)]
        current_price: f64,
    },
    Bill {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        due_day: u8,
    },
    Asset {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long = "type", default_value = "other")]
        kind: AssetKind,
        #[arg(long)]
        purchase_price: f64,
        #[arg(long)]
        current_value: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RecordKind {
    Transaction,
    Debt,
    Goal,
    Envelope,
    Investment,
    Bill,
    Asset,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn parse_month(s: &str) -> Result<YearMonth> {
    let (y, m) = s
        .trim()
        .split_once('-')
        .with_context(|| format!("expected YYYY-MM, got '{s}'"))?;
    let year = y.parse().with_context(|| format!("bad year in '{s}'"))?;
    let month = m.parse().with_context(|| format!("bad month in '{s}'"))?;
    YearMonth::new(year, month)
}

/// Loaded config and ledger for one command
struct Session {
    cfg: Config,
    ledger_path: PathBuf,
    ledger: Ledger,
    now: DateTime<Utc>,
}

impl Session {
    fn open(cfg: Config) -> Result<Self> {
        let ledger_path = cfg.ledger_path()?;
        let ledger = Ledger::load(&ledger_path)
            .with_context(|| format!("load ledger {}", ledger_path.display()))?;
        Ok(Self {
            cfg,
            ledger_path,
            ledger,
            now: Utc::now(),
        })
    }

    fn month(&self) -> Result<YearMonth> {
        current_month(&self.cfg.general.timezone, self.now)
    }

    fn today(&self) -> Result<NaiveDate> {
        local_today(&self.cfg.general.timezone, self.now)
    }

    fn save(&self) -> Result<()> {
        self.ledger
            .save(&self.ledger_path)
            .with_context(|| format!("save ledger {}", self.ledger_path.display()))
    }

    fn add<T: Entity>(&mut self, record: T) -> Result<()> {
        let id = self.ledger.upsert(record)?;
        self.save()?;
        println!("Saved {} {id}", T::KIND);
        Ok(())
    }

    fn remove<T: Entity>(&mut self, id: &str) -> Result<()> {
        self.ledger.remove::<T>(id)?;
        self.save()?;
        println!("Removed {} {id}", T::KIND);
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init_logging(&cfg.logging.level);
    debug!(command = ?cli.command, "starting");

    match cli.command {
        Command::Init => setup::run_setup()?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                println!("# ledger: {}", cfg.ledger_path()?.display());
            }
        },

        command => run(command, Session::open(cfg)?)?,
    }

    Ok(())
}

fn run(command: Command, mut s: Session) -> Result<()> {
    let currency = s.cfg.general.currency;

    match command {
        Command::Health { month, json } => {
            let month = match month {
                Some(m) => m,
                None => s.month()?,
            };
            let snapshot = s.ledger.snapshot(month);
            let analysis = evaluate(&snapshot);
            if json {
                let out = serde_json::json!({
                    "month": month.to_string(),
                    "snapshot": snapshot,
                    "analysis": analysis,
                    "band": analysis.band(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", render::health(&analysis, month));
            }
        }

        Command::Debts { strategy, json } => {
            let plan = s.ledger.debt_plan(strategy);
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", render::debt_plan(&plan, strategy, currency));
            }
        }

        Command::Summary => {
            let month = s.month()?;
            let today = s.today()?;
            let profile = state::read_profile()?;
            let analysis = evaluate(&s.ledger.snapshot(month));
            let investments = s.ledger.records::<Investment>();
            let upcoming = upcoming_bills(
                &s.ledger.records::<RecurringBill>(),
                today.day(),
                UPCOMING_LIMIT,
            );
            let greeting = profile.display_name();
            let dashboard = render::Dashboard {
                greeting: &greeting,
                month,
                cash_flow: s.ledger.cash_flow(month),
                net_worth: s.ledger.net_worth(),
                analysis: &analysis,
                investments: &investments,
                upcoming: &upcoming,
            };
            print!("{}", render::dashboard(&dashboard, currency));
        }

        Command::Budget { month } => {
            let month = match month {
                Some(m) => m,
                None => s.month()?,
            };
            print!("{}", render::budget(&s.ledger.envelope_usage(month), month, currency));
        }

        Command::Goals => {
            let today = s.today()?;
            print!("{}", render::goals(&s.ledger.records::<Goal>(), today, currency));
        }

        Command::Bills { limit, all } => {
            let bills = s.ledger.records::<RecurringBill>();
            let listed = if all {
                upcoming_bills(&bills, 1, bills.len())
            } else {
                upcoming_bills(&bills, s.today()?.day(), limit)
            };
            print!("{}", render::bills(&listed, monthly_total(&bills), all, currency));
        }

        Command::Transactions {
            kind,
            category,
            month,
            json,
        } => {
            let filter = TransactionFilter {
                kind,
                category,
                month,
            };
            let txns = filter_transactions(&s.ledger.records::<Transaction>(), &filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&txns)?);
            } else {
                print!("{}", render::transactions(&txns, currency));
            }
        }

        Command::Portfolio => {
            print!("{}", render::portfolio(&s.ledger.records::<Investment>(), currency));
        }

        Command::Assets => {
            print!("{}", render::assets(&s.ledger.records::<Asset>(), currency));
        }

        Command::Report { timeframe, json } => {
            let month = s.month()?;
            let txns = s.ledger.records::<Transaction>();
            let by_category = expenses_by_category(&txns, month);
            let trend = monthly_trend(&txns, timeframe, month);
            if json {
                let out = serde_json::json!({
                    "month": month.to_string(),
                    "timeframe": timeframe,
                    "expensesByCategory": by_category,
                    "trend": trend,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!(
                    "{}",
                    render::report(&by_category, &trend, month, timeframe, currency)
                );
            }
        }

        Command::Achievements => {
            print!("{}", render::achievements(&s.ledger.achievements()));
        }

        Command::Add { record } => add_record(&mut s, record)?,

        Command::Remove { kind, id } => match kind {
            RecordKind::Transaction => s.remove::<Transaction>(&id)?,
            RecordKind::Debt => s.remove::<Debt>(&id)?,
            RecordKind::Goal => s.remove::<Goal>(&id)?,
            RecordKind::Envelope => s.remove::<BudgetEnvelope>(&id)?,
            RecordKind::Investment => s.remove::<Investment>(&id)?,
            RecordKind::Bill => s.remove::<RecurringBill>(&id)?,
            RecordKind::Asset => s.remove::<Asset>(&id)?,
        },

        Command::Progress { goal_id, amount } => {
            let goal = s.ledger.add_goal_progress(&goal_id, amount)?;
            println!(
                "{}: {} of {} ({}%)",
                goal.name,
                finpulse_core::format_currency(goal.current_amount, currency),
                finpulse_core::format_currency(goal.target_amount, currency),
                goal.percent_complete()
            );
            if goal.is_complete() {
                println!("Goal reached!");
            }
            s.save()?;
        }

        Command::Import { csv } => {
            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }
            let report = import_transactions_csv(&csv)
                .with_context(|| format!("importing {}", csv.display()))?;
            let imported = report.transactions.len();
            for txn in report.transactions {
                s.ledger.upsert(txn)?;
            }
            s.save()?;
            info!(imported, skipped = report.skipped, "import finished");
            println!(
                "Imported {imported} transactions from {} ({} rows skipped)",
                csv.display(),
                report.skipped
            );
        }

        Command::Export { csv } => {
            let txns = s.ledger.records::<Transaction>();
            export_transactions_csv(&csv, &txns)
                .with_context(|| format!("exporting to {}", csv.display()))?;
            println!("Exported {} transactions to {}", txns.len(), csv.display());
        }

        Command::Init | Command::Config { .. } => unreachable!("handled before the ledger is opened"),
    }

    Ok(())
}

fn add_record(s: &mut Session, record: AddCommand) -> Result<()> {
    match record {
        AddCommand::Transaction {
            id,
            description,
            amount,
            kind,
            category,
            date,
            payment_method,
            recurrence,
            envelope,
            tags,
        } => {
            let date = match date {
                Some(d) => d,
                None => s.today()?,
            };
            let category =
                category.unwrap_or_else(|| categorize(&description, kind).to_string());
            let mut txn = Transaction::new(
                id.unwrap_or_default(),
                date,
                description,
                amount,
                kind,
                category,
            )
            .with_payment_method(payment_method);
            txn.recurrence = recurrence;
            txn.envelope_id = envelope;
            txn.tags = tags;
            s.add(txn)
        }
        AddCommand::Debt {
            id,
            name,
            total,
            rate,
            minimum,
        } => s.add(Debt::new(id.unwrap_or_default(), name, total, rate, minimum)),
        AddCommand::Goal {
            id,
            name,
            target,
            current,
            target_date,
        } => s.add(Goal {
            id: id.unwrap_or_default(),
            name,
            target_amount: target,
            current_amount: current,
            target_date,
        }),
        AddCommand::Envelope { id, name, budget } => s.add(BudgetEnvelope {
            id: id.unwrap_or_default(),
            name,
            budgeted_amount: budget,
        }),
        AddCommand::Investment {
            id,
            name,
            kind,
            quantity,
            purchase_price,
            current_price,
        } => s.add(Investment {
            id: id.unwrap_or_default(),
            name,
            kind,
            quantity,
            purchase_price,
            current_price,
        }),
        AddCommand::Bill {
            id,
            name,
            amount,
            due_day,
        } => s.add(RecurringBill {
            id: id.unwrap_or_default(),
            name,
            amount,
            due_day,
        }),
        AddCommand::Asset {
            id,
            name,
            kind,
            purchase_price,
            current_value,
        } => s.add(Asset {
            id: id.unwrap_or_default(),
            name,
            kind,
            purchase_price,
            current_value,
        }),
    }
}
