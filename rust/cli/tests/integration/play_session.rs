use crate::helpers::cli_runner::CliRunner;
use crate::helpers::{weights_toml, write_config};
use casino_engine::cards::{Rank, Suit};

/// Dealer can only draw the ten-to-ace hearts, so the poker river is always
/// a royal flush.
fn royal_river_config(dir: &std::path::Path) -> std::path::PathBuf {
    let body = weights_toml(|card| {
        let royal = card.suit == Suit::Hearts
            && matches!(
                card.rank,
                Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace
            );
        (1, u32::from(royal))
    });
    write_config(dir, &body)
}

#[test]
fn blackjack_round_from_piped_input() {
    let res = CliRunner::new().run_with_input(
        &["blackjack", "--seed", "42", "--rounds", "1", "--no-pacing"],
        "deal\nstand\n",
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Blackjack: seed=42 balance=10000"));
    assert!(res.stdout.contains("Dealer #1 <- ??"));
    assert!(res.stdout.contains("Dealer #1 shows"));
    assert!(res.stdout.contains("Rounds: 1"), "{}", res.stdout);
}

#[test]
fn poker_royal_flush_is_paid() {
    let dir = tempfile::tempdir().unwrap();
    let config = royal_river_config(dir.path());
    let res = CliRunner::new().run_full(
        &["poker", "--seed", "1", "--no-pacing"],
        &[("CASINO_CONFIG", config.to_str().unwrap())],
        Some("deal\nhold 1 2 3 4 5\ndraw\nq\n"),
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("ROYAL FLUSH  +40000"), "{}", res.stdout);
    assert!(res.stdout.contains("Rounds: 1  Final balance: 49950"));
}

#[test]
fn invalid_commands_reprompt() {
    let res = CliRunner::new().run_with_input(
        &["poker", "--seed", "3", "--no-pacing"],
        "bogus\nhit\nhold 0\ndraw\nq\n",
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stderr.contains("Unrecognized command"), "{}", res.stderr);
    assert!(res.stderr.contains("not accepted during Standby"), "{}", res.stderr);
    assert!(res.stdout.contains("Rounds: 0  Final balance: 10000"));
}

#[test]
fn bet_adjustments_are_echoed_and_bounded() {
    let res = CliRunner::new().run_with_input(
        &["blackjack", "--seed", "5", "--no-pacing"],
        "+\n+\n-\nmax\nbet 9\nq\n",
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let bets: Vec<&str> = res
        .stdout
        .lines()
        .filter_map(|l| l.trim_start_matches("> ").strip_prefix("Bet: "))
        .collect();
    assert_eq!(bets, vec!["2", "3", "2", "5"]);
    assert!(res.stderr.contains("Invalid bet: 9"), "{}", res.stderr);
}

#[test]
fn eof_mid_round_forfeits_wager() {
    let res = CliRunner::new().run_with_input(&["poker", "--seed", "8", "--no-pacing"], "deal\n");
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stderr.contains("round abandoned"), "{}", res.stderr);
    assert!(res.stdout.contains("Rounds: 0  Final balance: 9950"));
}

#[test]
fn broke_player_inserts_credits_and_plays_on() {
    let res = CliRunner::new().run_full(
        &["poker", "--seed", "4", "--no-pacing"],
        &[("CASINO_CREDITS", "40")],
        Some("deal\ninsert\ndeal\ndraw\nwithdraw\nq\n"),
    );
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stderr.contains("Invalid bet: 1"), "{}", res.stderr);
    assert!(res.stdout.contains("Inserted 2000. Balance: 2040"), "{}", res.stdout);
    assert!(res.stdout.contains("Withdrew "), "{}", res.stdout);
    assert!(res.stdout.contains("Rounds: 1  Final balance: 0"), "{}", res.stdout);
}
