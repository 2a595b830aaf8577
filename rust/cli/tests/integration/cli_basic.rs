use crate::helpers::cli_runner::CliRunner;

#[test]
fn help_lists_all_commands() {
    let res = CliRunner::new().run(&["--help"]);
    assert_eq!(res.exit_code, 0, "--help should exit with code 0");
    for cmd in ["blackjack", "poker", "sim", "stats", "catalog", "freq", "cfg"] {
        assert!(res.stdout.contains(cmd), "help should list `{}`", cmd);
    }
}

#[test]
fn version_prints_and_exits_zero() {
    let res = CliRunner::new().run(&["--version"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.starts_with("casino "), "{}", res.stdout);
}

#[test]
fn unknown_subcommand_shows_command_list_on_stderr() {
    let res = CliRunner::new().run(&["roulette"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stdout.is_empty());
    assert!(
        res.stderr.contains("Commands:"),
        "stderr should list commands\n---stderr---\n{}",
        res.stderr
    );
    assert!(res.stderr.contains("  poker"));
}

#[test]
fn invalid_arguments_exit_two_with_error_on_stderr() {
    let cli = CliRunner::new();

    let res = cli.run(&["sim", "--game", "poker", "--rounds", "0"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("rounds must be >= 1"), "{}", res.stderr);
    assert!(res.stdout.is_empty());

    let res = cli.run(&["blackjack", "--speed", "5"]);
    assert_eq!(res.exit_code, 2);

    let res = cli.run(&["catalog", "--set", "ZZ=1"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Error:"), "{}", res.stderr);
}

#[test]
fn stats_on_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.jsonl");
    let res = CliRunner::new().run(&["stats", "--input", missing.to_str().unwrap()]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Failed to read"), "{}", res.stderr);
}
