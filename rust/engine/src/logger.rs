use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{Blinds, PotSummary, Round, ShowdownHand};
use crate::player::Action;
use crate::sandbox::DecisionOutcome;

/// A single applied action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    pub player: String,
    pub round: Round,
    pub action: Action,
    /// Chips moved into the pot by this action
    pub amount: u32,
}

/// A decision the sandbox had to replace with a fold.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct FaultRecord {
    pub player: String,
    pub round: Round,
    pub outcome: DecisionOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Everything worth keeping about one finished hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandSummary {
    pub hand_number: u64,
    pub dealer: String,
    pub blinds: Blinds,
    pub board: Vec<Card>,
    pub pot_total: u32,
    pub pots: Vec<PotSummary>,
    pub winnings: BTreeMap<String, u32>,
    /// Hands revealed at showdown, empty on a fold-out
    #[serde(default)]
    pub showdown: Vec<ShowdownHand>,
    pub actions: Vec<ActionRecord>,
    #[serde(default)]
    pub faults: Vec<FaultRecord>,
    /// Stacks of everyone dealt in, after payout
    pub chips_after: BTreeMap<String, u32>,
    #[serde(default)]
    pub eliminated: Vec<String>,
}

/// One JSONL line of hand history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Format: YYYYMMDD-NNNNNN
    pub hand_id: String,
    /// Tournament seed, when the run is reproducible
    #[serde(default)]
    pub seed: Option<u64>,
    /// RFC3339 timestamp
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(flatten)]
    pub summary: HandSummary,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends hand records to a JSONL file.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
    seed: Option<u64>,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
            seed: None,
        })
    }

    /// Logger that numbers records but writes nothing.
    pub fn in_memory(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, summary: &HandSummary) -> std::io::Result<HandRecord> {
        let record = HandRecord {
            hand_id: self.next_id(),
            seed: self.seed,
            ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            summary: summary.clone(),
        };
        let line = serde_json::to_string(&record).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(record)
    }
}
