mod common;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;

const USER: &str = "6f9619ff-8b86-d011-b42d-00cf4fc964ff";

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("finance_core_cli").unwrap();
    cmd.arg("--home").arg(home).env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is json")
}

fn add_expense(home: &std::path::Path, amount: &str, date: &str, category: &str) -> Value {
    json_stdout(cli(home).args([
        "add-transaction",
        "--user",
        USER,
        "--amount",
        amount,
        "--date",
        date,
        "--category",
        category,
    ]))
}

#[test]
fn weekly_stats_from_recorded_expenses() {
    let home = common::temp_base();
    add_expense(&home, "20", "2024-06-05", "Food");
    add_expense(&home, "30", "2024-06-08", "Rent");

    let report = json_stdout(cli(&home).args([
        "stats", "--user", USER, "--period", "weekly", "--now", "2024-06-10",
    ]));
    assert_eq!(report["period"], "weekly");
    assert_eq!(report["stats"]["total_spent"], 50.0);
    assert_eq!(report["stats"]["trend"].as_array().unwrap().len(), 7);
    assert_eq!(report["stats"]["categories"][0]["category"], "Rent");
    assert_eq!(report["velocity"]["message"], "no data from previous period");
    assert!(report["velocity"]["percent_change"].is_null());
}

#[test]
fn deleted_transaction_disappears_from_listing() {
    let home = common::temp_base();
    let recorded = add_expense(&home, "12.5", "2024-06-05", "Coffee");
    let id = recorded["id"].as_str().expect("id").to_string();

    cli(&home)
        .args(["delete-transaction", "--user", USER, "--id", &id])
        .assert()
        .success()
        .stdout(contains("deleted_at"));

    let listed = json_stdout(cli(&home).args(["list-transactions", "--user", USER]));
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[test]
fn custom_period_without_bounds_fails() {
    let home = common::temp_base();
    cli(&home)
        .args(["stats", "--user", USER, "--period", "custom"])
        .assert()
        .failure()
        .stderr(contains("Invalid argument"));
}

#[test]
fn text_format_renders_a_dashboard() {
    let home = common::temp_base();
    add_expense(&home, "40", "2024-03-02", "Travel");
    cli(&home)
        .args([
            "stats", "--user", USER, "--start", "2024-03-01", "--end", "2024-03-03", "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(contains("Daily average"))
        .stdout(contains("velocity not available for custom periods"))
        .stdout(contains("Travel"));
}

#[test]
fn goal_stats_count_created_goals() {
    let home = common::temp_base();
    cli(&home)
        .args([
            "add-goal", "--user", USER, "--name", "Holiday", "--target", "900", "--deadline",
            "2999-01-01",
        ])
        .assert()
        .success()
        .stdout(contains("Holiday"));

    let stats = json_stdout(cli(&home).args(["goals", "--user", USER, "--period", "weekly"]));
    assert_eq!(stats["total_goals"], 1);
    assert_eq!(stats["status_counts"]["active"], 1);
    assert_eq!(stats["closest_goals"][0]["name"], "Holiday");
}
