//! Command-line front end over the analytics and record services.

pub mod dates;
pub mod output;

use std::{ffi::OsString, path::PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, ConfigManager};
use crate::core::{
    errors::FinanceError,
    services::{
        AnalyticsService, GoalService, GoalStatsQuery, NewGoal, NewTransaction, PeriodQuery,
        TransactionService,
    },
    time::{Clock, FixedClock, SystemClock},
};
use crate::domain::{PeriodToken, TransactionKind};
use crate::storage::JsonStore;
use crate::utils::paths;

use dates::{parse_instant, parse_optional, DayBound};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error("{0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "finance_core_cli",
    version,
    about = "Expense, payment and goal analytics over locally stored records"
)]
pub struct Cli {
    /// Base directory holding configuration and records
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Period statistics for expenses or payments
    Stats(StatsArgs),
    /// Goal statistics for goals created within a period
    Goals(GoalsArgs),
    /// Record an expense or payment
    AddTransaction(AddTransactionArgs),
    /// Soft-delete a transaction
    DeleteTransaction(DeleteTransactionArgs),
    /// List live transactions, newest first
    ListTransactions(ListTransactionsArgs),
    /// Create a budget goal
    AddGoal(AddGoalArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Args, Debug)]
pub struct RangeArgs {
    /// weekly, monthly, quarterly, yearly or custom
    #[arg(long)]
    pub period: Option<PeriodToken>,
    /// Range start (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub start: Option<String>,
    /// Range end (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub end: Option<String>,
    /// Evaluate as if the current instant were this date
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(long)]
    pub user: Uuid,
    #[arg(long, default_value = "expense")]
    pub kind: TransactionKind,
    #[command(flatten)]
    pub range: RangeArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct GoalsArgs {
    #[arg(long)]
    pub user: Uuid,
    #[command(flatten)]
    pub range: RangeArgs,
    /// Number of upcoming goals to report
    #[arg(long)]
    pub closest: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct AddTransactionArgs {
    #[arg(long)]
    pub user: Uuid,
    #[arg(long)]
    pub amount: f64,
    #[arg(long, default_value = "expense")]
    pub kind: TransactionKind,
    #[arg(long)]
    pub category: Option<String>,
    /// Defaults to the current instant
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteTransactionArgs {
    #[arg(long)]
    pub user: Uuid,
    #[arg(long)]
    pub id: Uuid,
}

#[derive(Args, Debug)]
pub struct ListTransactionsArgs {
    #[arg(long)]
    pub user: Uuid,
    #[arg(long)]
    pub kind: Option<TransactionKind>,
}

#[derive(Args, Debug)]
pub struct AddGoalArgs {
    #[arg(long)]
    pub user: Uuid,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub target: f64,
    #[arg(long)]
    pub deadline: String,
}

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> Result<String, CliError> {
    execute(Cli::parse())
}

/// Runs the CLI against an explicit argument list (the first item is the binary name).
pub fn run_with_args<I, T>(args: I) -> Result<String, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|err| CliError::Input(err.to_string()))?;
    execute(cli)
}

/// Records and configuration resolved for one invocation.
struct Context {
    config: Config,
    store: JsonStore,
}

impl Context {
    fn open(home: Option<PathBuf>) -> Result<Self, CliError> {
        let manager = ConfigManager::with_base_dir(paths::resolve_base(home))?;
        let config = manager.load()?;
        crate::init_with_level(&config.log_level);
        let store = JsonStore::new(config.data_root(manager.base_dir()))?;
        Ok(Self { config, store })
    }
}

pub fn execute(cli: Cli) -> Result<String, CliError> {
    let ctx = Context::open(cli.home)?;
    match cli.command {
        Command::Stats(args) => stats(&ctx, args),
        Command::Goals(args) => goals(&ctx, args),
        Command::AddTransaction(args) => add_transaction(&ctx, args),
        Command::DeleteTransaction(args) => {
            let deleted =
                TransactionService::soft_delete(&ctx.store, &SystemClock, args.user, args.id)?;
            output::to_json(&deleted)
        }
        Command::ListTransactions(args) => {
            let txns = TransactionService::list(&ctx.store, args.user, args.kind)?;
            output::to_json(&txns)
        }
        Command::AddGoal(args) => {
            let input = NewGoal {
                user_id: args.user,
                name: args.name,
                target_amount: args.target,
                deadline: parse_instant(&args.deadline, DayBound::End)?,
            };
            let goal = GoalService::create(&ctx.store, &SystemClock, input)?;
            output::to_json(&goal)
        }
    }
}

fn stats(ctx: &Context, args: StatsArgs) -> Result<String, CliError> {
    let query = period_query(&args.range, ctx.config.default_period)?;
    let clock = clock_for(args.range.now.as_deref())?;
    let report =
        AnalyticsService::get_stats_by_period(&ctx.store, clock.as_ref(), args.user, args.kind, &query)?;
    match args.format {
        OutputFormat::Json => output::to_json(&report),
        OutputFormat::Text => Ok(output::render_stats(&report)),
    }
}

fn goals(ctx: &Context, args: GoalsArgs) -> Result<String, CliError> {
    let range = period_query(&args.range, ctx.config.default_period)?;
    let closest = args.closest.unwrap_or(ctx.config.closest_goals);
    let clock = clock_for(args.range.now.as_deref())?;
    let stats = GoalService::get_goal_stats_by_period(
        &ctx.store,
        clock.as_ref(),
        args.user,
        &GoalStatsQuery::new(range, closest),
    )?;
    match args.format {
        OutputFormat::Json => output::to_json(&stats),
        OutputFormat::Text => Ok(output::render_goals(&stats)),
    }
}

fn add_transaction(ctx: &Context, args: AddTransactionArgs) -> Result<String, CliError> {
    let date = match args.date.as_deref() {
        Some(raw) => parse_instant(raw, DayBound::Start)?,
        None => Utc::now(),
    };
    let input = NewTransaction {
        user_id: args.user,
        kind: args.kind,
        amount: args.amount,
        date,
        category: args.category,
        description: args.description,
    };
    let txn = TransactionService::record(&ctx.store, &SystemClock, input)?;
    output::to_json(&txn)
}

/// Explicit bounds without `--period` select a custom range.
fn period_query(range: &RangeArgs, default_period: PeriodToken) -> Result<PeriodQuery, CliError> {
    let has_bounds = range.start.is_some() || range.end.is_some();
    let period = range.period.unwrap_or(if has_bounds {
        PeriodToken::Custom
    } else {
        default_period
    });
    Ok(PeriodQuery {
        period,
        start_date: parse_optional(range.start.as_deref(), DayBound::Start)?,
        end_date: parse_optional(range.end.as_deref(), DayBound::End)?,
    })
}

fn clock_for(now: Option<&str>) -> Result<Box<dyn Clock>, CliError> {
    Ok(match now {
        Some(raw) => Box::new(FixedClock(parse_instant(raw, DayBound::Start)?)),
        None => Box::new(SystemClock),
    })
}
