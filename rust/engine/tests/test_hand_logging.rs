use std::collections::BTreeMap;
use std::fs;

use arena_engine::cards::parse_cards;
use arena_engine::game::{Blinds, Round};
use arena_engine::logger::{ActionRecord, HandLogger, HandRecord, HandSummary};
use arena_engine::player::Action;

fn summary() -> HandSummary {
    HandSummary {
        hand_number: 1,
        dealer: "a".to_string(),
        blinds: Blinds { small: 10, big: 20 },
        board: parse_cards("AC 7D 2H").unwrap(),
        pot_total: 30,
        pots: Vec::new(),
        winnings: BTreeMap::from([("b".to_string(), 30)]),
        showdown: Vec::new(),
        actions: vec![ActionRecord {
            seat: 0,
            player: "a".to_string(),
            round: Round::Preflop,
            action: Action::Fold,
            amount: 0,
        }],
        faults: Vec::new(),
        chips_after: BTreeMap::from([("a".to_string(), 990), ("b".to_string(), 1010)]),
        eliminated: Vec::new(),
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&summary()).expect("write");
    logger.write(&summary()).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 2);
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::in_memory("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
}

#[test]
fn record_is_flat_and_round_trips() {
    let mut logger = HandLogger::in_memory("20260101").with_seed(Some(9));
    let record = logger.write(&summary()).unwrap();
    assert_eq!(record.hand_id, "20260101-000001");
    assert!(record.ts.is_some());

    let json = serde_json::to_value(&record).unwrap();
    // summary fields sit next to hand_id, not under a nested key
    assert_eq!(json["pot_total"], 30);
    assert_eq!(json["actions"][0]["action"], "fold");
    assert_eq!(json["board"][0]["rank"], "Ace");

    let back: HandRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}
