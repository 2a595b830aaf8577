use crate::helpers::cli_runner::CliRunner;
use crate::helpers::{stdout_json, write_config};

#[test]
fn defaults_reported_without_file_or_env() {
    let res = CliRunner::new().run(&["cfg"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let json = stdout_json(&res.stdout);
    assert_eq!(json["starting_credits"]["value"], 10_000);
    assert_eq!(json["starting_credits"]["source"], "default");
    assert_eq!(json["seed"]["source"], "default");
}

#[test]
fn env_overrides_file_which_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "starting_credits = 500\nseed = 9\nspeed = 2\n");
    let res = CliRunner::new().run_with_env(
        &["cfg"],
        &[
            ("CASINO_CONFIG", path.to_str().unwrap()),
            ("CASINO_SEED", "123"),
        ],
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let json = stdout_json(&res.stdout);
    assert_eq!(json["starting_credits"]["value"], 500);
    assert_eq!(json["starting_credits"]["source"], "file");
    assert_eq!(json["speed"]["value"], 2);
    assert_eq!(json["seed"]["value"], 123);
    assert_eq!(json["seed"]["source"], "env");
}

#[test]
fn invalid_env_value_is_rejected() {
    let res = CliRunner::new().run_with_env(&["cfg"], &[("CASINO_WIN_RULE", "sideways")]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid"), "{}", res.stderr);
}

#[test]
fn unreadable_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "starting_credits = \"lots\"\n");
    let res = CliRunner::new().run_with_env(&["cfg"], &[("CASINO_CONFIG", path.to_str().unwrap())]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("cannot parse config file"), "{}", res.stderr);
}

#[test]
fn configured_weights_reach_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "[[weights]]\ncard = \"KH\"\ndealer = 7\n\n[[weights]]\ncard = \"2C\"\nplayer = 0\n",
    );
    let res = CliRunner::new().run_with_env(
        &["catalog", "--json"],
        &[("CASINO_CONFIG", path.to_str().unwrap())],
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let rows = stdout_json(&res.stdout);
    let rows = rows.as_array().unwrap();
    let king = rows.iter().find(|r| r["card"] == "KH").unwrap();
    assert_eq!(king["dealer_weight"], 7);
    assert_eq!(king["player_weight"], 1);
    let two = rows.iter().find(|r| r["card"] == "2C").unwrap();
    assert_eq!(two["player_weight"], 0);
    assert_eq!(two["dealer_weight"], 1);
}
