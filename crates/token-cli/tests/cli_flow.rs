use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_token"))
}

/// Command with an isolated config home and no inherited token settings.
fn token(config_home: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("TOKEN_CONFIG")
        .env_remove("TOKEN_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_scenario(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write scenario");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

const PASSING: &str = r#"
name = "basic"

[deploy]
initial_supply = 1000
signers = ["addr1", "addr2"]

[[step]]
name = "owner pays addr1"
op = "transfer"
to = "addr1"
amount = 50
[step.expect]
balance_changes = { owner = -50, addr1 = 50 }
events = [{ kind = "transfer", from = "owner", to = "addr1", amount = 50 }]

[[step]]
name = "addr1 overspends"
op = "transfer"
caller = "addr1"
to = "addr2"
amount = 51
[step.expect]
error = "insufficient_balance"
events = []

[[step]]
op = "approve"
spender = "addr2"
amount = 100

[[step]]
op = "transfer_from"
caller = "addr2"
owner = "owner"
to = "addr1"
amount = 30
[step.expect]
balances = { owner = 920, addr1 = 80 }
allowances = [{ owner = "owner", spender = "addr2", amount = 70 }]
"#;

const FAILING: &str = r#"
[[step]]
op = "transfer"
to = "addr1"
amount = 50
[step.expect]
balances = { addr1 = 49 }
"#;

#[test]
fn test_cli_run_passing_scenario_plain() {
    let dir = TempDir::new().unwrap();
    let scenario = write_scenario(dir.path(), "basic.toml", PASSING);

    let output = token(dir.path())
        .arg("run")
        .arg(&scenario)
        .output()
        .expect("run scenario");

    assert!(
        output.status.success(),
        "run failed: stdout={}, stderr={}",
        stdout(&output),
        stderr(&output)
    );
    let out = stdout(&output);
    assert!(out.contains("token run"));
    assert!(out.contains("step=1 op=transfer caller=owner amount=50 error=none events=1"));
    assert!(out.contains("step=2 op=transfer caller=addr1"));
    assert!(out.contains("error=insufficient_balance"));
    assert!(out.contains("balance account=owner"));
    assert!(out.contains("amount=920"));
    assert!(out.contains("status=ok"));
    assert!(out.contains("failed=0"));
}

#[test]
fn test_cli_run_json_report() {
    let dir = TempDir::new().unwrap();
    let scenario = write_scenario(dir.path(), "basic.toml", PASSING);

    let output = token(dir.path())
        .args(["run", "--json"])
        .arg(&scenario)
        .output()
        .expect("run scenario");
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(value["scenario"], "basic");
    assert_eq!(value["passed"], true);
    assert_eq!(value["summary"]["total"], 4);
    assert_eq!(value["total_supply"], 1000);
    assert_eq!(value["events_recorded"], 4);
    assert_eq!(value["steps"][3]["events"][0]["kind"], "approval");
    assert_eq!(value["steps"][3]["events"][0]["amount"], 70);
    assert_eq!(value["steps"][3]["events"][1]["kind"], "transfer");
    assert_eq!(value["steps"][1]["error"]["kind"], "insufficient_balance");
}

#[test]
fn test_cli_run_failing_scenario_exit_code() {
    let dir = TempDir::new().unwrap();
    let scenario = write_scenario(dir.path(), "failing.toml", FAILING);

    let output = token(dir.path())
        .arg("run")
        .arg(&scenario)
        .output()
        .expect("run scenario");

    assert_eq!(output.status.code(), Some(6));
    assert!(stdout(&output).contains("balance of addr1: expected 49, got 50"));
    assert!(stderr(&output).contains("1 of 1 steps did not pass"));
}

#[test]
fn test_cli_run_missing_scenario() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let output = token(dir.path())
        .arg("run")
        .arg(&missing)
        .output()
        .expect("run scenario");

    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("No scenario found at"));
    assert!(err.contains(&*missing.to_string_lossy()));
}

#[test]
fn test_cli_run_malformed_scenario() {
    let dir = TempDir::new().unwrap();
    let scenario = write_scenario(dir.path(), "bad.toml", "[[step]]\nop = \"mint\"\n");

    let output = token(dir.path())
        .arg("run")
        .arg(&scenario)
        .output()
        .expect("run scenario");

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Invalid scenario"));
}

#[test]
fn test_cli_misspelled_keys_are_invalid_input() {
    let dir = TempDir::new().unwrap();
    let cases = [
        (
            "expects.toml",
            "[[step]]\nop = \"transfer\"\nto = \"addr1\"\namount = 5\nexpects = { balances = { addr1 = 999 } }\n",
            "expects",
        ),
        (
            "caler.toml",
            "[[step]]\nop = \"transfer\"\ncaler = \"addr1\"\nto = \"owner\"\namount = 5\n",
            "caler",
        ),
        (
            "steps.toml",
            "[[steps]]\nop = \"transfer\"\nto = \"addr1\"\namount = 5\n",
            "steps",
        ),
    ];

    for (file, contents, key) in cases {
        let scenario = write_scenario(dir.path(), file, contents);
        for command in ["run", "check"] {
            let output = token(dir.path())
                .arg(command)
                .arg(&scenario)
                .output()
                .expect("run token");
            assert_eq!(output.status.code(), Some(4), "{} {}", command, file);
            let err = stderr(&output);
            assert!(err.contains("Invalid scenario"), "{}", err);
            assert!(err.contains(key), "{}", err);
        }
    }
}

#[test]
fn test_cli_bundled_demos_pass() {
    let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let dir = TempDir::new().unwrap();

    for name in ["token.toml", "allowances.toml"] {
        let output = token(dir.path())
            .arg("run")
            .arg(demos.join(name))
            .output()
            .expect("run demo");
        assert!(
            output.status.success(),
            "{} failed: stdout={}, stderr={}",
            name,
            stdout(&output),
            stderr(&output)
        );
        assert!(stdout(&output).contains("status=ok"));
    }
}

#[test]
fn test_cli_plain_output_applies_decimals() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(
        &config,
        "[token]\nname = \"Gold\"\nsymbol = \"GLD\"\ndecimals = 2\n",
    )
    .unwrap();
    let scenario = write_scenario(dir.path(), "basic.toml", PASSING);

    let output = token(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&scenario)
        .output()
        .expect("run scenario");
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("step=1 op=transfer caller=owner amount=0.50 "), "{}", out);
    assert!(out.contains("amount=9.20"), "{}", out);

    let json = token(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--json"])
        .arg(&scenario)
        .output()
        .expect("run scenario");
    let value: serde_json::Value = serde_json::from_slice(&json.stdout).expect("json");
    assert_eq!(value["total_supply"], 1000);
}

#[test]
fn test_cli_run_rejects_format_with_json() {
    let dir = TempDir::new().unwrap();
    let scenario = write_scenario(dir.path(), "basic.toml", PASSING);

    let output = token(dir.path())
        .args(["run", "--json", "--format", "plain"])
        .arg(&scenario)
        .output()
        .expect("run scenario");

    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_cli_run_exports_events() {
    let dir = TempDir::new().unwrap();
    let scenario = write_scenario(dir.path(), "basic.toml", PASSING);
    let events = dir.path().join("events.jsonl");

    let output = token(dir.path())
        .args(["--quiet", "run"])
        .arg(&scenario)
        .arg("--events")
        .arg(&events)
        .output()
        .expect("run scenario");
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).is_empty());

    let contents = std::fs::read_to_string(&events).expect("read events");
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("event line"))
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["sequence"], 0);
    assert_eq!(lines[0]["kind"], "transfer");
    assert_eq!(lines[0]["amount"], 50);
    assert_eq!(lines[3]["sequence"], 3);
}

#[test]
fn test_cli_check_reports_accounts() {
    let dir = TempDir::new().unwrap();
    let scenario = write_scenario(dir.path(), "basic.toml", PASSING);

    let output = token(dir.path())
        .args(["check", "--json"])
        .arg(&scenario)
        .output()
        .expect("check scenario");
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["valid"], true);
    assert_eq!(value["steps"], 4);
    assert_eq!(value["holder"], "owner");
    assert_eq!(
        value["accounts"],
        serde_json::json!(["owner", "addr1", "addr2"])
    );
}

#[test]
fn test_cli_init_writes_config_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();

    let init = token(dir.path())
        .args(["init", "--symbol", "GLD", "--decimals", "2", "--initial-supply", "500"])
        .output()
        .expect("run init");
    assert!(init.status.success(), "stderr={}", stderr(&init));

    let config_path = dir.path().join("token").join("config.toml");
    let contents = std::fs::read_to_string(&config_path).expect("read config");
    let value: toml::Value = contents.parse().expect("parse config");
    assert_eq!(
        value
            .get("token")
            .and_then(|section| section.get("symbol"))
            .and_then(|symbol| symbol.as_str()),
        Some("GLD")
    );
    assert_eq!(
        value
            .get("defaults")
            .and_then(|section| section.get("initial_supply"))
            .and_then(|supply| supply.as_integer()),
        Some(500)
    );

    let again = token(dir.path()).arg("init").output().expect("run init");
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("--force"));

    let forced = token(dir.path())
        .args(["init", "--force"])
        .output()
        .expect("run init");
    assert!(forced.status.success());
}

#[test]
fn test_cli_config_default_supply_applies() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[defaults]\ninitial_supply = 7\n").unwrap();
    let scenario = write_scenario(
        dir.path(),
        "supply.json",
        r#"{"step": [{"op": "transfer", "to": "addr1", "amount": 7,
            "expect": {"balances": {"owner": 0, "addr1": 7}}}]}"#,
    );

    let output = token(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["run", "--json"])
        .arg(&scenario)
        .output()
        .expect("run scenario");
    assert!(output.status.success(), "stderr={}", stderr(&output));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["initial_supply"], 7);
    assert_eq!(value["scenario"], "supply");
}

#[test]
fn test_cli_completions() {
    let dir = TempDir::new().unwrap();
    let output = token(dir.path())
        .args(["completions", "bash"])
        .output()
        .expect("run completions");
    assert!(output.status.success());
    assert!(stdout(&output).contains("token"));
}
