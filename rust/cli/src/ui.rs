//! Terminal output helpers shared by the commands.

use std::io::Write;

use arena_engine::tournament::Standing;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Final standings as an aligned table, one line per entrant.
pub fn write_standings(out: &mut dyn Write, standings: &[Standing]) -> std::io::Result<()> {
    let width = standings
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0)
        .max("Player".len());
    writeln!(
        out,
        "{:>5}  {:<width$}  {:>8}  {:>6}  {:>10}  {:>6}",
        "Place", "Player", "Chips", "Hands", "Busted at", "Faults"
    )?;
    for s in standings {
        let busted = s
            .eliminated_at
            .map(|h| format!("hand {}", h))
            .unwrap_or_else(|| "-".to_string());
        let faults = if s.disqualified {
            format!("{} DQ", s.reliability.faults())
        } else {
            s.reliability.faults().to_string()
        };
        writeln!(
            out,
            "{:>5}  {:<width$}  {:>8}  {:>6}  {:>10}  {:>6}",
            s.place, s.name, s.chips, s.hands_played, busted, faults
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::player::Reliability;

    #[test]
    fn standings_table_has_header_and_rows() {
        let standings = vec![
            Standing {
                place: 1,
                name: "alice".into(),
                chips: 2000,
                hands_played: 12,
                eliminated_at: None,
                reliability: Reliability::default(),
                disqualified: false,
            },
            Standing {
                place: 2,
                name: "bob".into(),
                chips: 0,
                hands_played: 12,
                eliminated_at: Some(12),
                reliability: Reliability {
                    timeouts: 4,
                    disqualified: true,
                    ..Reliability::default()
                },
                disqualified: true,
            },
        ];
        let mut out = Vec::new();
        write_standings(&mut out, &standings).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Place"));
        assert!(lines[1].contains("alice") && lines[1].contains("2000"));
        assert!(lines[2].contains("hand 12") && lines[2].contains("4 DQ"));
    }
}
