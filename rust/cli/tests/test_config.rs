use std::fs;

use serde_json::Value;
use serial_test::serial;
use tempfile::TempDir;

const VARS: &[&str] = &[
    "ARENA_CONFIG",
    "ARENA_STARTING_CHIPS",
    "ARENA_SMALL_BLIND",
    "ARENA_BIG_BLIND",
    "ARENA_BLIND_INTERVAL",
    "ARENA_BLIND_FACTOR",
    "ARENA_TIME_LIMIT_MS",
    "ARENA_MAX_FAULTS",
    "ARENA_MAX_HANDS",
    "ARENA_SEED",
];

fn clear_env() {
    for key in VARS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn set(key: &str, value: &str) {
    unsafe {
        std::env::set_var(key, value);
    }
}

fn cfg() -> (i32, String, String) {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = arena_cli::run(["arena", "cfg"], &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn defaults_are_reported_with_their_source() {
    clear_env();
    let (code, out, _) = cfg();
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["starting_chips"]["value"].as_u64(), Some(1000));
    assert_eq!(json["starting_chips"]["source"].as_str(), Some("default"));
    assert_eq!(json["max_hands"]["value"].as_u64(), Some(1000));
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arena.toml");
    fs::write(&path, "starting_chips = 5000\nbig_blind = 50\nseed = 1\n").unwrap();
    set("ARENA_CONFIG", path.to_str().unwrap());
    set("ARENA_SEED", "77");

    let (code, out, err) = cfg();
    clear_env();
    assert_eq!(code, 0, "{err}");
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["starting_chips"]["value"].as_u64(), Some(5000));
    assert_eq!(json["starting_chips"]["source"].as_str(), Some("file"));
    assert_eq!(json["big_blind"]["source"].as_str(), Some("file"));
    assert_eq!(json["seed"]["value"].as_u64(), Some(77));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["small_blind"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn unparsable_env_value_fails() {
    clear_env();
    set("ARENA_BIG_BLIND", "lots");
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("ARENA_BIG_BLIND"));
}

#[test]
#[serial]
fn invalid_combination_fails_validation() {
    clear_env();
    set("ARENA_SMALL_BLIND", "40");
    set("ARENA_BIG_BLIND", "20");
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("Invalid configuration"));
}

#[test]
#[serial]
fn unknown_file_keys_are_rejected() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arena.toml");
    fs::write(&path, "ante = 5\n").unwrap();
    set("ARENA_CONFIG", path.to_str().unwrap());
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("cannot parse config file"));
}

#[test]
#[serial]
fn flags_beat_env_for_a_run() {
    clear_env();
    set("ARENA_MAX_HANDS", "500");
    set("ARENA_SEED", "3");
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = arena_cli::run(
        [
            "arena", "run", "--bot", "a=baseline", "--bot", "b=conservative", "--max-hands", "5",
            "--seed", "8",
        ],
        &mut out,
        &mut err,
    );
    clear_env();
    assert_eq!(code, 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Seed: 8"));
    assert!(text.contains("Hands played: "));
    let played: u64 = text
        .lines()
        .find_map(|l| l.strip_prefix("Hands played: "))
        .unwrap()
        .parse()
        .unwrap();
    assert!(played <= 5);
}
