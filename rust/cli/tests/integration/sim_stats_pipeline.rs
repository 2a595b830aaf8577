use crate::helpers::cli_runner::CliRunner;
use crate::helpers::{stdout_json, weights_toml, write_config};
use casino_engine::cards::Rank;
use casino_engine::logger::RoundRecord;
use std::fs;

#[test]
fn sim_log_feeds_stats() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("logs").join("poker.jsonl");
    let log = log.to_str().unwrap();
    let cli = CliRunner::new();

    let sim = cli.run(&["sim", "--game", "poker", "--rounds", "25", "--seed", "4", "--log", log]);
    assert_eq!(sim.exit_code, 0, "{}", sim.stderr);
    let summary = stdout_json(&sim.stdout);
    assert_eq!(summary["rounds"], 25);
    assert_eq!(summary["wagered"], 25 * 50);

    let records: Vec<RoundRecord> = fs::read_to_string(log)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 25);
    assert!(records.iter().all(|r| r.seed == Some(4) && r.player.len() == 5));

    let stats = cli.run(&["stats", "--input", log]);
    assert_eq!(stats.exit_code, 0, "{}", stats.stderr);
    let json = stdout_json(&stats.stdout);
    assert_eq!(json["rounds"], 25);
    assert_eq!(json["games"]["poker"]["rounds"], 25);
    assert_eq!(json["games"]["poker"]["wagered"], 25 * 50);
    assert_eq!(json["games"]["poker"]["paid"], summary["paid"]);
}

#[test]
fn rigged_blackjack_always_goes_to_the_house() {
    let dir = tempfile::tempdir().unwrap();
    // player holds 20 from kings and queens, the dealer ties with tens and jacks
    let config = write_config(
        dir.path(),
        &weights_toml(|card| {
            (
                u32::from(matches!(card.rank, Rank::King | Rank::Queen)),
                u32::from(matches!(card.rank, Rank::Ten | Rank::Jack)),
            )
        }),
    );
    let log = dir.path().join("bj.jsonl");
    let log = log.to_str().unwrap();
    let cli = CliRunner::new();
    let env = [("CASINO_CONFIG", config.to_str().unwrap())];

    let sim = cli.run_with_env(
        &["sim", "--game", "blackjack", "--rounds", "3", "--seed", "2", "--bet", "2", "--log", log],
        &env,
    );
    assert_eq!(sim.exit_code, 0, "{}", sim.stderr);
    assert_eq!(stdout_json(&sim.stdout)["balance"], 10_000 - 3 * 100);

    let stats = cli.run(&["stats", "--input", log]);
    let json = stdout_json(&stats.stdout);
    assert_eq!(json["games"]["blackjack"]["outcomes"]["DEALER WON"], 3);
    assert_eq!(json["games"]["blackjack"]["wins"], 0);
}

#[test]
fn stats_skips_corrupted_lines() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("mixed.jsonl");
    let log_str = log.to_str().unwrap();
    let cli = CliRunner::new();

    let sim = cli.run(&["sim", "--game", "blackjack", "--rounds", "4", "--seed", "6", "--log", log_str]);
    assert_eq!(sim.exit_code, 0, "{}", sim.stderr);
    let mut content = fs::read_to_string(&log).unwrap();
    content.push_str("{\"round_id\": broken\n");
    fs::write(&log, content).unwrap();

    let stats = cli.run(&["stats", "--input", log_str]);
    assert_eq!(stats.exit_code, 0, "{}", stats.stderr);
    assert_eq!(stdout_json(&stats.stdout)["rounds"], 4);
    assert!(stats.stderr.contains("Skipped 1 corrupted record(s)"), "{}", stats.stderr);
}

#[test]
fn play_log_records_the_round() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("play.jsonl");
    let log = log.to_str().unwrap();
    let res = CliRunner::new().run_with_input(
        &["blackjack", "--seed", "11", "--no-pacing", "--rounds", "2", "--log", log],
        "deal\nstand\ndeal\nstand\n",
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);

    let lines: Vec<String> = fs::read_to_string(log)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(lines.len(), 2);
    let first: RoundRecord = serde_json::from_str(&lines[0]).unwrap();
    let second: RoundRecord = serde_json::from_str(&lines[1]).unwrap();
    assert!(first.round_id.ends_with("-000001"));
    assert!(second.round_id.ends_with("-000002"));
    assert!(first.dealer.len() >= 2);
    assert_eq!(first.wager, 50);
}
