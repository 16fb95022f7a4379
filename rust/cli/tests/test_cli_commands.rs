use std::fs;

use serde_json::Value;
use tempfile::TempDir;

struct Output {
    code: i32,
    stdout: String,
    stderr: String,
}

fn arena(args: &[&str]) -> Output {
    let mut argv = vec!["arena"];
    argv.extend_from_slice(args);
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = arena_cli::run(argv, &mut out, &mut err);
    Output {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

#[test]
fn help_goes_to_stdout_and_succeeds() {
    let res = arena(&["--help"]);
    assert_eq!(res.code, 0);
    assert!(res.stdout.contains("eval-hand"));
    assert!(res.stderr.is_empty());
}

#[test]
fn unknown_command_lists_commands() {
    let res = arena(&["shuffle-up"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Commands:"));
    for c in ["run", "bots", "cfg", "deal", "eval-hand"] {
        assert!(res.stderr.contains(c), "missing {c}");
    }
}

#[test]
fn eval_hand_ranks_royal_flush() {
    let res = arena(&["eval-hand", "AS", "KS", "QS", "JS", "TS", "2H", "3D"]);
    assert_eq!(res.code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Royal Flush"));
}

#[test]
fn eval_hand_rejects_too_few_cards() {
    let res = arena(&["eval-hand", "AS", "KS"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Invalid input"));
}

#[test]
fn deal_is_reproducible_and_checked() {
    let a = arena(&["deal", "--players", "6", "--seed", "42"]);
    let b = arena(&["deal", "--players", "6", "--seed", "42"]);
    assert_eq!(a.code, 0);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.contains("Remaining: 35"));
    assert!(a.stdout.contains("Deck check: ok"));
}

#[test]
fn bots_lists_and_checks() {
    let res = arena(&["bots"]);
    assert_eq!(res.code, 0);
    assert!(res.stdout.contains("aggressive"));

    let res = arena(&["bots", "--check", "x=random", "--check", "y=oracle"]);
    assert_eq!(res.code, 2);
    assert!(res.stdout.contains("x: ok"));
    assert!(res.stdout.contains("unknown strategy"));
}

#[test]
fn run_writes_hand_log_and_standings() {
    let dir = TempDir::new().unwrap();
    let hands = dir.path().join("logs/hands.jsonl");
    let standings = dir.path().join("standings.json");
    let res = arena(&[
        "run",
        "--bot",
        "alice=baseline",
        "--bot",
        "bob=aggressive",
        "--bot",
        "carol=random",
        "--seed",
        "9",
        "--max-hands",
        "40",
        "--output",
        hands.to_str().unwrap(),
        "--standings",
        standings.to_str().unwrap(),
    ]);
    assert_eq!(res.code, 0, "{}", res.stderr);
    assert!(res.stdout.starts_with("Seed: 9"));
    assert!(res.stdout.contains("Winner:"));

    let played: u64 = res
        .stdout
        .lines()
        .find_map(|l| l.strip_prefix("Hands played: "))
        .unwrap()
        .parse()
        .unwrap();
    assert!(played > 0 && played <= 40);

    let log = fs::read_to_string(&hands).unwrap();
    assert_eq!(log.lines().count() as u64, played);
    for line in log.lines() {
        let record: Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["seed"].as_u64(), Some(9));
    }

    let report: Value = serde_json::from_str(&fs::read_to_string(&standings).unwrap()).unwrap();
    assert_eq!(report["hands_played"].as_u64(), Some(played));
    assert_eq!(report["interrupted"].as_bool(), Some(false));
    let rows = report["standings"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    let chips: u64 = rows.iter().map(|r| r["chips"].as_u64().unwrap()).sum();
    assert_eq!(chips, 3000);
}

#[test]
fn run_rejects_bad_roster_entries() {
    let res = arena(&["run", "--bot", "a=random", "--bot", "b=psychic"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("bot \"b\""));
    assert!(res.stderr.contains("unknown strategy"));
}

#[test]
fn run_needs_two_players() {
    let res = arena(&["run", "--bot", "solo=baseline", "--seed", "1"]);
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("at least 2"));
}

#[test]
fn same_seed_same_tournament() {
    let args = [
        "run", "--bot", "a=random", "--bot", "b=aggressive", "--seed", "17", "--max-hands", "25",
    ];
    let first = arena(&args);
    let second = arena(&args);
    assert_eq!(first.code, 0);
    assert_eq!(first.stdout, second.stdout);
}
