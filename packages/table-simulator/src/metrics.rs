//! Per-game metrics written to the results file, and the run summary.

use serde::Serialize;

use crate::simulator::{Ending, GameResult};

/// One line of JSONL output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub layout: String,
    pub policies: Vec<String>,
    pub finished: bool,
    pub ranking: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loser: Option<u8>,
    pub tricks_played: u32,
    pub steps: usize,
    pub duration_ms: f64,
    pub seats: Vec<SeatMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatMetrics {
    pub seat: u8,
    pub policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_rank: Option<u8>,
    pub pickups: u32,
    pub tochoos: u32,
}

pub fn build_game_metrics(
    game_id: u32,
    layout: &str,
    policies: &[String],
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let seats = result
        .seats
        .iter()
        .enumerate()
        .map(|(seat, tally)| SeatMetrics {
            seat: seat as u8,
            policy: policies.get(seat).cloned().unwrap_or_default(),
            finish_rank: tally.finish_rank,
            pickups: tally.pickups,
            tochoos: tally.tochoos,
        })
        .collect();

    GameMetrics {
        game_id,
        seed: result.seed,
        timestamp,
        layout: layout.to_string(),
        policies: policies.to_vec(),
        finished: result.ending == Ending::Finished,
        ranking: result.ranking.clone(),
        loser: result.loser(),
        tricks_played: result.tricks_played,
        steps: result.steps,
        duration_ms,
        seats,
    }
}

/// Aggregates across all simulated games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: usize,
    pub capped: usize,
    /// Times each seat lost.
    pub losses: Vec<u32>,
    /// Sum of finish ranks per seat over finished games.
    pub rank_totals: Vec<u64>,
    pub pickups: Vec<u64>,
    pub tricks: u64,
}

impl Summary {
    pub fn new(seats: usize) -> Self {
        Self {
            losses: vec![0; seats],
            rank_totals: vec![0; seats],
            pickups: vec![0; seats],
            ..Self::default()
        }
    }

    pub fn record(&mut self, result: &GameResult) {
        self.games += 1;
        self.tricks += u64::from(result.tricks_played);
        for (seat, tally) in result.seats.iter().enumerate() {
            if let Some(p) = self.pickups.get_mut(seat) {
                *p += u64::from(tally.pickups);
            }
        }
        match result.ending {
            Ending::Capped => self.capped += 1,
            Ending::Finished => {
                if let Some(loser) = result.loser() {
                    if let Some(l) = self.losses.get_mut(loser as usize) {
                        *l += 1;
                    }
                }
                for (seat, tally) in result.seats.iter().enumerate() {
                    if let (Some(total), Some(rank)) = (self.rank_totals.get_mut(seat), tally.finish_rank) {
                        *total += u64::from(rank);
                    }
                }
            }
        }
    }

    pub fn finished(&self) -> usize {
        self.games - self.capped
    }

    pub fn mean_tricks(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.tricks as f64 / self.games as f64
        }
    }

    /// Share of finished games lost by `seat`.
    pub fn loss_rate(&self, seat: usize) -> f64 {
        match self.finished() {
            0 => 0.0,
            n => f64::from(self.losses.get(seat).copied().unwrap_or(0)) / n as f64,
        }
    }

    pub fn mean_rank(&self, seat: usize) -> f64 {
        match self.finished() {
            0 => 0.0,
            n => self.rank_totals.get(seat).copied().unwrap_or(0) as f64 / n as f64,
        }
    }

    pub fn mean_pickups(&self, seat: usize) -> f64 {
        match self.games {
            0 => 0.0,
            n => self.pickups.get(seat).copied().unwrap_or(0) as f64 / n as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::SeatTally;

    fn result(ending: Ending, ranking: Vec<u8>, tricks: u32) -> GameResult {
        let seats = (0..3u8)
            .map(|seat| SeatTally {
                finish_rank: ranking
                    .iter()
                    .position(|s| *s == seat)
                    .map(|i| i as u8 + 1),
                pickups: u32::from(seat),
                tochoos: 0,
            })
            .collect();
        GameResult {
            seed: 1,
            ending,
            ranking,
            seats,
            tricks_played: tricks,
            steps: 0,
        }
    }

    #[test]
    fn summary_counts_losers_and_caps() {
        let mut summary = Summary::new(3);
        summary.record(&result(Ending::Finished, vec![0, 1, 2], 10));
        summary.record(&result(Ending::Finished, vec![1, 0, 2], 20));
        summary.record(&result(Ending::Capped, vec![1], 30));

        assert_eq!(summary.games, 3);
        assert_eq!(summary.capped, 1);
        assert_eq!(summary.losses, vec![0, 0, 2]);
        assert_eq!(summary.loss_rate(2), 1.0);
        assert_eq!(summary.mean_rank(0), 1.5);
        assert_eq!(summary.mean_tricks(), 20.0);
        assert_eq!(summary.mean_pickups(2), 2.0);
    }

    #[test]
    fn metrics_carry_seat_policies() {
        let policies = vec!["Heuristic".to_string(), "RandomPlayer".into(), "Heuristic".into()];
        let metrics = build_game_metrics(4, "CRC", &policies, &result(Ending::Finished, vec![2, 0, 1], 12), 1.5);
        assert_eq!(metrics.loser, Some(1));
        assert_eq!(metrics.seats[1].policy, "RandomPlayer");
        assert_eq!(metrics.seats[2].finish_rank, Some(1));

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["layout"], "CRC");
        assert_eq!(json["finished"], true);
        let stamp = json["timestamp"].as_str().unwrap();
        assert!(stamp.contains('T') && stamp.ends_with('Z'), "RFC3339 UTC: {stamp}");
    }
}
