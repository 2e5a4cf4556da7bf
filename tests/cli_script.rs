use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn script_command(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendtrack_cli").unwrap();
    cmd.env("SPENDTRACK_CLI_SCRIPT", "1")
        .env("SPENDTRACK_DATA_DIR", data_dir.path())
        .env_remove("SPENDTRACK_API_KEY");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let data = TempDir::new().unwrap();
    let input = "budget 15000\nadd 200 1 Lunch\nlist\nsummary\nexit\n";

    script_command(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Monthly budget set to"))
        .stdout(contains("Logged"))
        .stdout(contains("Food & Drinks"))
        .stdout(contains("Remaining:"));

    let json = std::fs::read_to_string(data.path().join("expenses.json")).unwrap();
    assert!(json.contains("\"Lunch\""));
}

#[test]
fn unknown_commands_echo_a_suggestion_and_keep_going() {
    let data = TempDir::new().unwrap();
    let input = "lst\nexit\n";

    script_command(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Unknown command `lst`"))
        .stdout(contains("Suggestion: `list`?"));
}

#[test]
fn insight_without_credentials_prints_the_fallback() {
    let data = TempDir::new().unwrap();
    let input = "add 120 2 metro card\ninsight\nexit\n";

    script_command(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("AI insights currently unavailable"));
}

#[test]
fn insight_on_an_empty_ledger_skips_the_provider() {
    let data = TempDir::new().unwrap();
    let input = "insight\nexit\n";

    script_command(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Add some expenses to see AI-powered financial advice!"));
}

#[test]
fn export_writes_quoted_csv() {
    let data = TempDir::new().unwrap();
    let out = data.path().join("out.csv");
    let input = format!(
        "add 120 3 \"books, pens\"\nexport {}\nexit\n",
        out.display()
    );

    script_command(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Exported 1 records"));

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Date,Category,Amount,Note"));
    assert!(csv.contains("\"books, pens\""));
}

#[test]
fn clear_empties_the_stored_ledger() {
    let data = TempDir::new().unwrap();
    let input = "add 10\nadd 20\nclear\nlist\nexit\n";

    script_command(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Cleared 2 expenses"))
        .stdout(contains("No expenses logged yet."));

    let json = std::fs::read_to_string(data.path().join("expenses.json")).unwrap();
    assert_eq!(json.trim(), "[]");
}

#[test]
fn invalid_amounts_are_reported_without_creating_records() {
    let data = TempDir::new().unwrap();
    let input = "add notanumber\nadd -5\nlist\nexit\n";

    script_command(&data)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("is not a number"))
        .stdout(contains("amount must be a positive number"))
        .stdout(contains("No expenses logged yet."));
}
