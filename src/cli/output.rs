use colored::Colorize;
use serde::Serialize;

use crate::domain::{GoalStats, GoalStatus, StatsReport};

use super::CliError;

pub fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|err| CliError::Command(err.to_string()))
}

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn section(title: &str) -> String {
    format!("{}\n", title.bold().underline())
}

/// Human-readable dashboard for a period report.
pub fn render_stats(report: &StatsReport) -> String {
    let mut out = section(&format!("{} {} stats", capitalize(report.period.as_str()), report.kind));
    out.push_str(&format!(
        "Range:          {} to {}\n",
        report.interval.first_day(),
        report.interval.last_day()
    ));
    out.push_str(&format!("Total:          {}\n", money(report.stats.total_spent).green()));
    out.push_str(&format!("Daily average:  {}\n", money(report.stats.daily_average)));
    out.push_str(&format!("Transactions:   {}\n", report.stats.transaction_count));
    out.push_str(&format!("Tracking streak: {} day(s)\n", report.tracking_streak));

    let velocity = match report.velocity.percent_change {
        Some(change) if change >= 5.0 => report.velocity.message.red().to_string(),
        Some(change) if change <= -5.0 => report.velocity.message.green().to_string(),
        _ => report.velocity.message.dimmed().to_string(),
    };
    out.push_str(&format!("Velocity:       {}\n", velocity));

    if !report.stats.categories.is_empty() {
        out.push('\n');
        out.push_str(&section("Categories"));
        for entry in &report.stats.categories {
            out.push_str(&format!("  {:<24} {:>12}\n", entry.category, money(entry.amount)));
        }
    }

    out.push('\n');
    out.push_str(&section("Trend"));
    for point in &report.stats.trend {
        out.push_str(&format!("  {:<10} {:>12}\n", point.label, money(point.amount)));
    }
    out
}

/// Human-readable goal summary.
pub fn render_goals(stats: &GoalStats) -> String {
    let mut out = section(&format!("{} goal stats", capitalize(stats.period.as_str())));
    out.push_str(&format!(
        "Range:      {} to {}\n",
        stats.interval.first_day(),
        stats.interval.last_day()
    ));
    out.push_str(&format!("Goals:      {}\n", stats.total_goals));
    let by_status: Vec<String> = GoalStatus::ALL
        .iter()
        .map(|status| {
            let count = stats.status_counts.get(*status);
            format!("{}: {}", capitalize(status.as_str()), count)
        })
        .collect();
    out.push_str(&format!("Status:     {}\n", by_status.join("  ")));
    let overdue = stats.overdue_goals.to_string();
    out.push_str(&format!(
        "Overdue:    {}\n",
        if stats.overdue_goals > 0 { overdue.red().to_string() } else { overdue }
    ));
    if !stats.closest_goals.is_empty() {
        out.push('\n');
        out.push_str(&section("Upcoming deadlines"));
        for goal in &stats.closest_goals {
            let progress = goal
                .progress_percent
                .map(|pct| format!("{:.0}%", pct))
                .unwrap_or_else(|| "-".into());
            out.push_str(&format!(
                "  {:<24} {} ({} day(s)) {:>6}\n",
                goal.name,
                goal.deadline.date_naive(),
                goal.days_remaining,
                progress
            ));
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
