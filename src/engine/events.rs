use crate::engine::card::Card;
use crate::engine::rules::Team;
use serde::{Deserialize, Serialize};

/// State-change notifications for the presentation layer, emitted in the
/// order the engine produced them. The core never blocks on a consumer;
/// events are returned from the command that caused them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum GameEvent {
    HandStarted {
        hand_no: u32,
        dealer: usize,
        vira: Card,
    },
    HandOfElevenPending {
        team: Team,
    },
    HandOfElevenResolved {
        team: Team,
        accepted: bool,
    },
    CardPlayed {
        seat: usize,
        card: Card,
    },
    RoundResolved {
        round: usize,
        winner: Option<Team>,
        winning_seat: Option<usize>,
        winning_card: Option<Card>,
    },
    WagerRaised {
        team: Team,
        value: u8,
    },
    WagerResolved {
        team: Team,
        accepted: bool,
        value: u8,
    },
    ScoreChanged {
        team: Team,
        score: u8,
    },
    HandEnded {
        winner: Option<Team>,
        points: u8,
    },
    MatchEnded {
        winner: Team,
    },
}
