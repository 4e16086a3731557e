use anyhow::{Context, Result};
use finpulse_core::{Currency, current_month};
use finpulse_ledger::Ledger;
use std::io::{self, Write};

use crate::config::{Config, load_config, save_config};
use crate::state::{Profile, profile_path, write_profile};

fn prompt(label: &str, default: &str) -> Result<String> {
    if default.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{default}]: ");
    }
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    let s = s.trim();
    Ok(if s.is_empty() { default.to_string() } else { s.to_string() })
}

fn prompt_currency(default: Currency) -> Result<Currency> {
    loop {
        let raw = prompt("Currency (BRL, USD, EUR)", default.code())?;
        match raw.parse::<Currency>() {
            Ok(c) => return Ok(c),
            Err(e) => println!("{e}"),
        }
    }
}

fn prompt_timezone(default: &str) -> Result<String> {
    loop {
        let tz = prompt("Timezone (IANA name)", default)?;
        match current_month(&tz, chrono::Utc::now()) {
            Ok(_) => return Ok(tz),
            Err(e) => println!("{e}"),
        }
    }
}

pub fn run_setup() -> Result<()> {
    println!("Finpulse setup\n");
    let mut cfg: Config = load_config()?;

    let name = prompt("Your name (optional)", "")?;
    let email = prompt("Email (optional)", "")?;
    cfg.general.currency = prompt_currency(cfg.general.currency)?;
    cfg.general.timezone = prompt_timezone(&cfg.general.timezone)?;

    let config_file = save_config(&cfg)?;
    write_profile(&Profile {
        created_at_utc: Some(chrono::Utc::now().to_rfc3339()),
        name,
        email,
    })?;

    let ledger_file = cfg.ledger_path()?;
    if !ledger_file.exists() {
        Ledger::default()
            .save(&ledger_file)
            .with_context(|| format!("create {}", ledger_file.display()))?;
    }

    println!("\nWrote:");
    println!("- {}", config_file.display());
    println!("- {}", profile_path()?.display());
    println!("- {}", ledger_file.display());

    println!("\nNext recommended steps:");
    println!("- finpulse import --csv statement.csv");
    println!("- finpulse add envelope --name Food --budget 800");
    println!("- finpulse health");

    Ok(())
}
