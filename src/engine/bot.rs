use crate::engine::card::Card;
use crate::engine::game::{GameState, HandState, PlayerState};
use crate::engine::rules::Team;
use crate::table::events::ClientMessage;
use rand::RngExt;
use rand::prelude::IndexedRandom;
use rand::rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

impl BotDifficulty {
    /// Difficulty is encoded in the bot id, e.g. `bot_hard_1`.
    pub fn from_id(id: &str) -> Self {
        if id.contains("hard") {
            BotDifficulty::Hard
        } else if id.contains("medium") {
            BotDifficulty::Medium
        } else {
            BotDifficulty::Easy
        }
    }
}

// ─── Turn Resolution ──────────────────────────────────────────────────────────

/// The seat the game is waiting on: the consent responder, then the wager
/// responder, then whoever is due to play a card. `None` once the match ends.
pub fn seat_to_act(game: &GameState) -> Option<usize> {
    if game.winner.is_some() {
        return None;
    }
    let hand = game.hand.as_ref()?;
    if let crate::engine::wager::ConsentState::Awaiting { eleven_team } = hand.consent {
        return Some(eleven_team.opponent().first_seat());
    }
    if let crate::engine::wager::WagerState::Pending { raised_by, .. } = hand.wager.state {
        return Some(raised_by.opponent().first_seat());
    }
    Some(hand.to_play)
}

// ─── Public Entry Point ───────────────────────────────────────────────────────

/// Decides the acting bot's next move. Returns `None` when `player_id` is not
/// the seat being waited on; otherwise the returned command is always legal
/// for the current state.
pub fn play_bot_turn(
    game: &GameState,
    player_id: &str,
    difficulty: BotDifficulty,
) -> Option<ClientMessage> {
    let seat = seat_to_act(game)?;
    let player = game.players.get(seat)?;
    if player.id != player_id {
        return None;
    }
    let hand = game.hand.as_ref()?;
    let team = player.team;

    if hand.consent.is_open() {
        return Some(ClientMessage::RespondHandOfEleven {
            accept: decide_consent(player, hand, difficulty),
        });
    }
    if hand.wager.is_pending() {
        return Some(ClientMessage::RespondRaise {
            accept: decide_wager(player, hand, difficulty),
        });
    }

    if difficulty == BotDifficulty::Hard
        && can_raise(hand, team)
        && top_two_strength(player, hand) >= 16
        && rng().random_bool(0.35)
    {
        return Some(ClientMessage::RequestRaise);
    }

    choose_card(player, hand, difficulty).map(|card| ClientMessage::PlayCard { card })
}

// ─── Wager Decisions ──────────────────────────────────────────────────────────

/// Mirrors the engine's raise preconditions so the bot never proposes a raise
/// the engine would reject.
fn can_raise(hand: &HandState, team: Team) -> bool {
    hand.wager.raises_allowed
        && !hand.wager.is_pending()
        && hand.wager.last_raised_by != Some(team)
        && hand.wager.next_value().is_some()
}

fn decide_wager(player: &PlayerState, hand: &HandState, difficulty: BotDifficulty) -> bool {
    match difficulty {
        BotDifficulty::Easy => rng().random_bool(0.5),
        BotDifficulty::Medium | BotDifficulty::Hard => {
            holds_trump(player, hand) || top_two_strength(player, hand) >= 14
        }
    }
}

fn decide_consent(player: &PlayerState, hand: &HandState, difficulty: BotDifficulty) -> bool {
    match difficulty {
        BotDifficulty::Easy => rng().random_bool(0.5),
        BotDifficulty::Medium | BotDifficulty::Hard => {
            holds_trump(player, hand) || top_two_strength(player, hand) >= 15
        }
    }
}

// ─── Card Choice ──────────────────────────────────────────────────────────────

fn choose_card(player: &PlayerState, hand: &HandState, difficulty: BotDifficulty) -> Option<Card> {
    if player.hand.is_empty() {
        return None;
    }
    if difficulty == BotDifficulty::Easy {
        return player.hand.choose(&mut rng()).copied();
    }

    let trump = &hand.trump;
    let mut sorted: Vec<Card> = player.hand.clone();
    sorted.sort_by(|a, b| trump.compare(*a, *b));

    let plays = hand.current_round().map(|r| r.plays.as_slice()).unwrap_or(&[]);
    let top = plays
        .iter()
        .max_by_key(|&&(_, card)| trump.strength(card))
        .copied();

    // Partner already holds the round: shed the weakest card.
    if difficulty == BotDifficulty::Hard
        && let Some((seat, _)) = top
        && Team::of_seat(seat) == player.team
    {
        return sorted.first().copied();
    }

    match top {
        // Leading: open with the strongest card.
        None => sorted.last().copied(),
        // Following: the cheapest card that takes the round, else the weakest.
        Some((_, best)) => sorted
            .iter()
            .copied()
            .find(|&card| trump.strength(card) > trump.strength(best))
            .or_else(|| sorted.first().copied()),
    }
}

// ─── Heuristics ───────────────────────────────────────────────────────────────

fn holds_trump(player: &PlayerState, hand: &HandState) -> bool {
    player.hand.iter().any(|&card| hand.trump.is_trump(card))
}

/// Combined strength of the player's two strongest cards. Plain cards score
/// up to 9, manilhas 10 to 13, so 16+ means real muscle.
fn top_two_strength(player: &PlayerState, hand: &HandState) -> u8 {
    let mut strengths: Vec<u8> = player
        .hand
        .iter()
        .map(|&card| hand.trump.strength(card))
        .collect();
    strengths.sort_unstable_by(|a, b| b.cmp(a));
    strengths.iter().take(2).sum()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
