use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{CasinoTable, GameKind, Variant};

/// One resolved round, serialized as a single JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    pub game: GameKind,
    /// Seed of the table's deck RNG
    pub seed: Option<u64>,
    /// Credits committed for the round
    pub wager: u64,
    /// Player hand, or the final river for poker
    pub player: Vec<Card>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dealer: Vec<Card>,
    /// Outcome label as displayed (e.g. "DEALER BUST", "FLUSH")
    pub result: String,
    pub payout: u64,
    pub balance_after: u64,
    /// Timestamp when the round was resolved (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    /// Builds a record from the table's last resolution, if any.
    pub fn from_table(
        round_id: String,
        seed: Option<u64>,
        table: &CasinoTable,
        balance_after: u64,
    ) -> Option<Self> {
        let resolution = table.last_resolution()?;
        let (player, dealer) = match table.variant() {
            Variant::Blackjack(r) => (
                r.player().cards().iter().map(|dc| dc.card).collect(),
                r.dealer().cards().iter().map(|dc| dc.card).collect(),
            ),
            Variant::Poker(r) => (r.river().iter().flatten().map(|dc| dc.card).collect(), Vec::new()),
        };
        Some(Self {
            round_id,
            game: table.kind(),
            seed,
            wager: resolution.wager,
            player,
            dealer,
            result: resolution.label.to_string(),
            payout: resolution.payout,
            balance_after,
            ts: None,
        })
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`RoundRecord`]s to a JSONL file.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that only hands out ids, pinned to `date`.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
