use serde::{Deserialize, Serialize};

use crate::engine::card::Card;
use crate::engine::events::GameEvent;
use crate::engine::game::{GameState, PlayerState};
use crate::engine::rules::Team;
use crate::engine::wager::{ConsentState, WagerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    PlayCard { card: Card },
    RequestRaise,
    RespondRaise { accept: bool },
    RespondHandOfEleven { accept: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    Error {
        message: String,
    },
    MatchFound {
        table_id: String,
        players: Vec<String>,
    },
    Update {
        events: Vec<GameEvent>,
        state: TableSnapshot,
    },
}

/// What one player is allowed to see: their own cards, everyone's card
/// counts and the public table state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub my_hand: Vec<Card>,
    pub players: Vec<SeatSummary>,
    pub scores: [u8; 2],
    pub stake: u8,
    pub vira: Option<Card>,
    pub to_play: Option<usize>,
    pub table_plays: Vec<(usize, Card)>,
    pub pending_raise: Option<PendingRaise>,
    pub consent_pending: Option<Team>,
    pub winner: Option<Team>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatSummary {
    pub id: String,
    pub seat: usize,
    pub team: Team,
    pub hand_count: usize,
    pub is_bot: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingRaise {
    pub team: Team,
    pub value: u8,
}

impl SeatSummary {
    pub fn from_player_state(state: &PlayerState) -> Self {
        Self {
            id: state.id.clone(),
            seat: state.seat,
            team: state.team,
            hand_count: state.hand.len(),
            is_bot: state.is_bot,
        }
    }
}

impl TableSnapshot {
    /// Builds `player_id`'s view of the table. Other hands are reduced to
    /// card counts.
    pub fn for_player(game: &GameState, player_id: &str) -> Self {
        let my_hand = game
            .players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.hand.clone())
            .unwrap_or_default();

        let hand = game.hand.as_ref();
        let pending_raise = hand.and_then(|h| match h.wager.state {
            WagerState::Pending { value, raised_by } => Some(PendingRaise {
                team: raised_by,
                value,
            }),
            _ => None,
        });
        let consent_pending = hand.and_then(|h| match h.consent {
            ConsentState::Awaiting { eleven_team } => Some(eleven_team),
            _ => None,
        });

        Self {
            my_hand,
            players: game
                .players
                .iter()
                .map(SeatSummary::from_player_state)
                .collect(),
            scores: game.scores,
            stake: hand.map(|h| h.wager.stake).unwrap_or(0),
            vira: hand.map(|h| h.vira),
            to_play: hand.map(|h| h.to_play),
            table_plays: hand
                .and_then(|h| h.current_round())
                .map(|r| r.plays.clone())
                .unwrap_or_default(),
            pending_raise,
            consent_pending,
            winner: game.winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game::SEATS;
    use crate::engine::rules::TiedHandRule;

    fn started_game() -> GameState {
        let ids: [String; SEATS] =
            ["ana", "bot_1", "bot_2", "bot_3"].map(String::from);
        let mut game = GameState::new(ids, TiedHandRule::OverallDraw);
        game.start_hand();
        game
    }

    #[test]
    fn snapshot_shows_only_the_viewers_cards() {
        let game = started_game();
        let snapshot = TableSnapshot::for_player(&game, "ana");

        assert_eq!(snapshot.my_hand, game.players[0].hand);
        assert_eq!(snapshot.players.len(), SEATS);
        for summary in &snapshot.players {
            assert_eq!(summary.hand_count, 3);
        }
        assert_eq!(snapshot.stake, 1);
        assert_eq!(snapshot.to_play, Some(0));
        assert!(snapshot.winner.is_none());
    }

    #[test]
    fn an_unknown_viewer_sees_no_cards() {
        let game = started_game();
        let snapshot = TableSnapshot::for_player(&game, "observer");
        assert!(snapshot.my_hand.is_empty());
        assert!(snapshot.vira.is_some());
    }

    #[test]
    fn client_messages_serialize_with_tag_and_payload() {
        let json = serde_json::to_value(ClientMessage::RespondRaise { accept: true }).unwrap();
        assert_eq!(json["type"], "RespondRaise");
        assert_eq!(json["payload"]["accept"], true);

        let round_trip: ClientMessage =
            serde_json::from_str(r#"{"type":"RequestRaise"}"#).unwrap();
        assert_eq!(round_trip, ClientMessage::RequestRaise);
    }
}
