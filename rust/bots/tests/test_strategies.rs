use arena_bots::create_bot;
use arena_bots::roster::{available_strategies, into_handles, load_roster};
use arena_engine::sandbox::DecisionOutcome;
use arena_engine::tournament::{Tournament, TournamentSettings};

fn roster(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

fn settings(seed: u64) -> TournamentSettings {
    TournamentSettings {
        starting_chips: 500,
        small_blind: 5,
        big_blind: 10,
        blind_increase_interval: 5,
        max_hands: Some(300),
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn every_strategy_is_constructible() {
    for (strategy, description) in available_strategies() {
        assert!(!description.is_empty());
        let bot = create_bot(strategy, "dealer-test", Some(1)).unwrap();
        assert_eq!(bot.name(), "dealer-test");
    }
}

#[test]
fn built_in_bots_never_fault() {
    let entries = roster(&[
        "r=random",
        "c=conservative",
        "a=aggressive",
        "b=baseline",
        "r2=random",
        "a2=aggressive",
    ]);
    let bots = into_handles(load_roster(&entries, Some(11))).unwrap();
    let mut tournament = Tournament::new(settings(11), bots).unwrap();
    let result = tournament.run().unwrap();

    assert!(result.hands_played > 0);
    for standing in &result.standings {
        assert_eq!(standing.reliability.errors, 0, "{} errored", standing.name);
        assert_eq!(standing.reliability.invalid_actions, 0, "{} acted illegally", standing.name);
        assert!(!standing.disqualified);
    }
    for hand in &result.history {
        assert!(hand
            .faults
            .iter()
            .all(|f| f.outcome == DecisionOutcome::Timeout));
    }
    let total: u32 = result.standings.iter().map(|s| s.chips).sum();
    assert_eq!(total, 500 * 6);
}

#[test]
fn seeded_roster_replays_identically() {
    let entries = roster(&["x=random", "y=aggressive", "z=baseline"]);
    let play = || {
        let bots = into_handles(load_roster(&entries, Some(5))).unwrap();
        let result = Tournament::new(settings(5), bots).unwrap().run().unwrap();
        result
            .standings
            .iter()
            .map(|s| (s.name.clone(), s.chips, s.place))
            .collect::<Vec<_>>()
    };
    assert_eq!(play(), play());
}

#[test]
fn heads_up_between_rule_based_bots_finishes() {
    let entries = roster(&["conservative", "baseline"]);
    let bots = into_handles(load_roster(&entries, Some(2))).unwrap();
    let result = Tournament::new(settings(2), bots).unwrap().run().unwrap();
    assert_eq!(result.standings.len(), 2);
    assert_eq!(result.standings[0].place, 1);
    assert_eq!(result.standings[1].place, 2);
}

#[test]
fn chips_conserved_and_fault_free_across_seeds() {
    let entries = roster(&[
        "r=random",
        "c=conservative",
        "a=aggressive",
        "b=baseline",
        "r2=random",
    ]);
    for seed in 0..40 {
        let bots = into_handles(load_roster(&entries, Some(seed))).unwrap();
        let mut table = TournamentSettings {
            max_hands: Some(150),
            ..settings(seed)
        };
        table.blind_increase_interval = 10;
        let result = Tournament::new(table, bots).unwrap().run().unwrap();

        let total: u32 = result.standings.iter().map(|s| s.chips).sum();
        assert_eq!(total, 500 * 5, "seed {seed}: chips not conserved");
        for standing in &result.standings {
            assert_eq!(standing.reliability.errors, 0, "seed {seed}: {} errored", standing.name);
            assert_eq!(
                standing.reliability.invalid_actions, 0,
                "seed {seed}: {} acted illegally",
                standing.name
            );
            assert!(!standing.disqualified, "seed {seed}: {} disqualified", standing.name);
        }
    }
}
