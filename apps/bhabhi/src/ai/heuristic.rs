//! Heuristic: the deterministic default CPU policy.
//!
//! Play strategy (every seat for itself, goal is to empty the hand):
//! - Opening trick: the engine forces the opening card; play it.
//! - On lead: lead low from the longest suit, staying off the suit this seat
//!   last picked up.
//! - Following: duck under the current winner with the highest card that
//!   still loses. Last to play on a clean trick, shed the highest card since
//!   the trick is discarded anyway. Forced to win, win as cheaply as possible.
//! - Void (tochoo): dump the highest card, shortest suit first on ties,
//!   avoiding the picked-up suit.
//!
//! No randomness; same view in, same card out.

use crate::ai::config::AiConfig;
use crate::ai::{AiError, CpuPolicy};
use crate::domain::cards_logic::suit_count;
use crate::domain::tricks::would_win;
use crate::domain::{Card, CpuView, Suit};

#[derive(Debug, Clone)]
pub struct Heuristic {
    /// Stay off `avoid_suit` when leading or dumping.
    honour_avoid_suit: bool,
}

impl Default for Heuristic {
    fn default() -> Self {
        Self {
            honour_avoid_suit: true,
        }
    }
}

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    /// Reads the optional `honour_avoid_suit` custom field (default true).
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            honour_avoid_suit: config
                .get_custom("honour_avoid_suit")
                .and_then(|v| v.as_bool())
                .unwrap_or(true),
        }
    }

    /// Legal cards outside `avoid_suit`, or all legal cards if that leaves nothing.
    fn preferred<'a>(&self, view: &'a CpuView) -> Vec<&'a Card> {
        let all: Vec<&Card> = view.legal.iter().collect();
        match view.avoid_suit {
            Some(avoid) if self.honour_avoid_suit => {
                let kept: Vec<&Card> = all.iter().copied().filter(|c| c.suit != avoid).collect();
                if kept.is_empty() {
                    all
                } else {
                    kept
                }
            }
            _ => all,
        }
    }

    fn lead(&self, view: &CpuView) -> Option<Card> {
        let candidates = self.preferred(view);
        // Longest suit; earlier suit wins ties.
        let suit = Suit::ALL
            .into_iter()
            .filter(|s| candidates.iter().any(|c| c.suit == *s))
            .max_by(|a, b| {
                suit_count(&view.hand, *a)
                    .cmp(&suit_count(&view.hand, *b))
                    .then(b.cmp(a))
            })?;
        candidates
            .into_iter()
            .filter(|c| c.suit == suit)
            .min_by_key(|c| c.rank)
            .copied()
    }

    fn dump(&self, view: &CpuView) -> Option<Card> {
        self.preferred(view)
            .into_iter()
            .max_by(|a, b| {
                a.rank
                    .cmp(&b.rank)
                    .then(suit_count(&view.hand, b.suit).cmp(&suit_count(&view.hand, a.suit)))
                    .then(b.suit.cmp(&a.suit))
            })
            .copied()
    }

    fn follow(&self, view: &CpuView) -> Option<Card> {
        let legal = &view.legal;
        let highest = legal.iter().max_by_key(|c| c.rank).copied();
        let lowest = legal.iter().min_by_key(|c| c.rank).copied();

        if view.trick.current_winner().is_none() {
            return lowest;
        }

        if view.is_last_to_play() && !view.trick.has_tochoo() {
            return highest;
        }

        legal
            .iter()
            .filter(|c| !would_win(&view.trick, **c))
            .max_by_key(|c| c.rank)
            .copied()
            .or(lowest)
    }
}

impl CpuPolicy for Heuristic {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose_card(&self, view: &CpuView) -> Result<Card, AiError> {
        if view.legal.is_empty() {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }
        if let [only] = view.legal.as_slice() {
            return Ok(*only);
        }

        let choice = if view.is_leading() {
            self.lead(view)
        } else if view.is_tochoo_turn() {
            self.dump(view)
        } else {
            self.follow(view)
        };

        choice.ok_or_else(|| AiError::Internal("heuristic found no candidate".into()))
    }
}
