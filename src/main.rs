use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use family_finance::api::run_http_server;
use family_finance::config::{ADDR_ENV, LOCALE_ENV, ServerConfig};
use family_finance::core::{
    SpendingBreakdown, compound_interest, evaluate_budget_rule, periods_to_goal, savings_rate,
};

#[derive(Debug, Parser)]
#[command(
    name = "family-finance",
    about = "Household finance calculations: 50/30/20 budget, goals, portfolio and growth"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the JSON HTTP API.
    Serve {
        #[arg(long, env = ADDR_ENV, help = "Listen address, e.g. 0.0.0.0:8080")]
        addr: Option<String>,
        #[arg(long, env = LOCALE_ENV, help = "Default locale for formatted values (pt-BR, en-US)")]
        locale: Option<String>,
    },
    /// Score a monthly spending split against the 50/30/20 rule.
    Budget {
        #[arg(long)]
        income: f64,
        #[arg(long, default_value_t = 0.0)]
        essentials: f64,
        #[arg(long, default_value_t = 0.0)]
        lifestyle: f64,
        #[arg(long, default_value_t = 0.0)]
        investments: f64,
    },
    /// Share of income left after spending, in percent.
    SavingsRate {
        #[arg(long)]
        income: f64,
        #[arg(long)]
        spending: f64,
    },
    /// Project a balance with compound interest and optional periodic deposits.
    Compound {
        #[arg(long)]
        principal: f64,
        #[arg(long, help = "Interest per period in percent, e.g. 1 for 1%")]
        rate: f64,
        #[arg(long)]
        periods: u32,
        #[arg(long, default_value_t = 0.0)]
        deposit: f64,
    },
    /// Number of periods until a savings target is reached.
    TimeToGoal {
        #[arg(long, default_value_t = 0.0)]
        start: f64,
        #[arg(long)]
        target: f64,
        #[arg(long)]
        deposit: f64,
        #[arg(long, default_value_t = 0.0, help = "Interest per period in percent")]
        rate: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { addr, locale } => {
            let config = ServerConfig::resolve(addr.as_deref(), locale.as_deref())?;
            run_http_server(config).await?;
        }
        Command::Budget {
            income,
            essentials,
            lifestyle,
            investments,
        } => {
            let spending = SpendingBreakdown {
                essentials,
                lifestyle,
                investments,
            };
            print_json(&evaluate_budget_rule(income, &spending))?;
        }
        Command::SavingsRate { income, spending } => {
            print_json(&json!({ "savingsRate": savings_rate(income, spending) }))?;
        }
        Command::Compound {
            principal,
            rate,
            periods,
            deposit,
        } => {
            print_json(&json!({
                "balance": compound_interest(principal, rate, periods, deposit),
            }))?;
        }
        Command::TimeToGoal {
            start,
            target,
            deposit,
            rate,
        } => {
            let periods = periods_to_goal(start, target, deposit, rate);
            print_json(&json!({ "reachable": periods.is_some(), "periods": periods }))?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_subcommand_has_help_text() {
        let cli = Cli::command();
        for sub in cli.get_subcommands() {
            assert!(
                sub.get_about().is_some(),
                "{} has no help text",
                sub.get_name()
            );
        }
    }

    #[test]
    fn savings_rate_parses_from_flags() {
        let cli = Cli::try_parse_from([
            "family-finance",
            "savings-rate",
            "--income",
            "10000",
            "--spending",
            "8000",
        ])
        .expect("valid arguments");
        assert!(matches!(
            cli.command,
            Command::SavingsRate { income, spending } if income == 10_000.0 && spending == 8_000.0
        ));
    }
}
