use crate::helpers::cli_runner::CliRunner;
use crate::helpers::stdout_json;

#[test]
fn catalog_text_lists_every_card() {
    let res = CliRunner::new().run(&["catalog"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let lines: Vec<&str> = res.stdout.lines().collect();
    assert_eq!(lines.len(), 53);
    assert!(lines[0].starts_with("card"));
    assert!(lines[1].contains("1.92%"), "{}", lines[1]);
}

#[test]
fn catalog_set_shifts_chances() {
    let res = CliRunner::new().run(&["catalog", "--json", "--set", "AS:player=49"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let rows = stdout_json(&res.stdout);
    let ace = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["card"] == "AS")
        .unwrap()
        .clone();
    // 49 out of 51 + 49
    assert_eq!(ace["player_chance"].as_f64().unwrap(), 0.49);
    assert_eq!(ace["dealer_weight"], 1);
}

#[test]
fn catalog_warns_when_all_weights_zero() {
    let mut args = vec!["catalog".to_string()];
    for s in ["C", "S", "H", "D"] {
        for r in ["A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"] {
            args.push("--set".into());
            args.push(format!("{}{}:dealer=0", r, s));
        }
    }
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    let res = CliRunner::new().run(&argv);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stderr.contains("every Dealer weight is zero"), "{}", res.stderr);
}

#[test]
fn freq_is_repeatable_for_a_seed() {
    let cli = CliRunner::new();
    let args = ["freq", "--perspective", "dealer", "--trials", "400", "--seed", "21"];
    let first = cli.run(&args);
    assert_eq!(first.exit_code, 0, "{}", first.stderr);
    assert!(first.stdout.contains("perspective=Dealer trials=400 seed=21"));
    assert!(first.stdout.contains("max deviation:"));
    assert_eq!(first.stdout, cli.run(&args).stdout);
}

#[test]
fn freq_handles_maximum_weights() {
    let dir = tempfile::tempdir().unwrap();
    let config = crate::helpers::write_config(
        dir.path(),
        &crate::helpers::weights_toml(|_| (u32::MAX, 1)),
    );
    let res = CliRunner::new().run_with_env(
        &["freq", "--trials", "200", "--seed", "5"],
        &[("CASINO_CONFIG", config.to_str().unwrap())],
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains(&format!("{:>7}", u32::MAX)));
    assert!(res.stdout.contains("max deviation:"));
}
