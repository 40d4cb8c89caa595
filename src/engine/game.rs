use crate::engine::card::Card;
use crate::engine::deck::Deck;
use crate::engine::error::GameError;
use crate::engine::events::GameEvent;
use crate::engine::rules::{
    resolve_hand, resolve_round, HandOutcome, RoundOutcome, Team, TiedHandRule, TrumpContext,
};
use crate::engine::wager::{ConsentState, Wager};
use serde::{Deserialize, Serialize};

pub const SEATS: usize = 4;
pub const CARDS_PER_HAND: usize = 3;
pub const MATCH_POINTS: u8 = 12;
/// An accepted hand of eleven is always played for 3 points.
pub const HAND_OF_ELEVEN_STAKE: u8 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: String,
    pub seat: usize,
    pub team: Team,
    pub hand: Vec<Card>,
    pub is_bot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub leader: usize,
    pub plays: Vec<(usize, Card)>,
    pub outcome: Option<RoundOutcome>,
}

impl RoundState {
    fn new(leader: usize) -> Self {
        Self {
            leader,
            plays: Vec::new(),
            outcome: None,
        }
    }
}

/// One deal in progress: the vira, the rounds played so far and the two
/// decision gates (wager, hand-of-eleven consent) that can suspend play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandState {
    pub vira: Card,
    pub trump: TrumpContext,
    pub rounds: Vec<RoundState>,
    pub to_play: usize,
    pub wager: Wager,
    pub consent: ConsentState,
}

impl HandState {
    pub fn current_round(&self) -> Option<&RoundState> {
        self.rounds.last()
    }
}

/// Archived result of a finished hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandSummary {
    pub vira: Card,
    pub rounds: Vec<RoundOutcome>,
    pub winner: Option<Team>,
    pub points: u8,
}

/// The authoritative match state. Commands mutate it one at a time and
/// return the events they produced; the core itself does no I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<PlayerState>,
    pub scores: [u8; 2],
    pub dealer: usize,
    pub hand: Option<HandState>,
    pub history: Vec<HandSummary>,
    pub tie_rule: TiedHandRule,
    pub winner: Option<Team>,
}

impl GameState {
    /// Sets up a match for the four seated players. Ids starting with `bot_`
    /// mark bot seats, mirroring the lobby convention. No hand is dealt yet;
    /// call `start_hand` (or `start_hand_with_deck` in tests) to begin.
    pub fn new(player_ids: [String; SEATS], tie_rule: TiedHandRule) -> Self {
        let players = player_ids
            .into_iter()
            .enumerate()
            .map(|(seat, id)| PlayerState {
                is_bot: id.starts_with("bot_"),
                team: Team::of_seat(seat),
                id,
                seat,
                hand: Vec::new(),
            })
            .collect();

        Self {
            players,
            scores: [0, 0],
            // Advances before each deal; seat 3 deals first so seat 0 leads.
            dealer: SEATS - 2,
            hand: None,
            history: Vec::new(),
            tie_rule,
            winner: None,
        }
    }

    /// Shuffles a fresh deck and deals the next hand.
    pub fn start_hand(&mut self) -> Vec<GameEvent> {
        let mut deck = Deck::new();
        deck.shuffle();
        self.start_hand_with_deck(deck)
    }

    /// Deals from `deck` as given: one card per seat per pass, starting at
    /// the seat left of the dealer, then the vira.
    pub fn start_hand_with_deck(&mut self, mut deck: Deck) -> Vec<GameEvent> {
        self.dealer = (self.dealer + 1) % SEATS;
        let leader = (self.dealer + 1) % SEATS;

        for player in &mut self.players {
            player.hand.clear();
        }
        for _ in 0..CARDS_PER_HAND {
            for offset in 0..SEATS {
                let seat = (leader + offset) % SEATS;
                if let Some(card) = deck.draw() {
                    self.players[seat].hand.push(card);
                }
            }
        }
        let vira = deck
            .draw()
            .expect("a full deck covers the deal and the vira");

        let eleven = MATCH_POINTS - 1;
        let raises_allowed = self.scores[0] != eleven && self.scores[1] != eleven;
        let consent = match (self.scores[0] == eleven, self.scores[1] == eleven) {
            (true, false) => ConsentState::Awaiting {
                eleven_team: Team::One,
            },
            (false, true) => ConsentState::Awaiting {
                eleven_team: Team::Two,
            },
            // Iron hand: both teams at eleven play it out for a single point.
            _ => ConsentState::NotRequired,
        };

        self.hand = Some(HandState {
            vira,
            trump: TrumpContext::new(vira),
            rounds: vec![RoundState::new(leader)],
            to_play: leader,
            wager: Wager::new(raises_allowed),
            consent,
        });

        let mut events = vec![GameEvent::HandStarted {
            hand_no: self.history.len() as u32 + 1,
            dealer: self.dealer,
            vira,
        }];
        if let ConsentState::Awaiting { eleven_team } = consent {
            events.push(GameEvent::HandOfElevenPending { team: eleven_team });
        }
        events
    }

    pub fn seat_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Plays `card` from `seat` into the current round. The fourth card
    /// seals the round; a decided hand is scored and the next one dealt.
    pub fn play_card(&mut self, seat: usize, card: Card) -> Result<Vec<GameEvent>, GameError> {
        if self.winner.is_some() {
            return Err(GameError::MatchOver);
        }
        let Some(hand) = self.hand.as_mut() else {
            return Err(GameError::MatchOver);
        };
        if hand.consent.is_open() {
            return Err(GameError::ConsentRequired);
        }
        if hand.wager.is_pending() {
            return Err(GameError::WagerPending);
        }
        if hand.to_play != seat {
            return Err(GameError::OutOfTurn);
        }
        let player = &mut self.players[seat];
        let Some(pos) = player.hand.iter().position(|&c| c == card) else {
            return Err(GameError::CardNotInHand);
        };
        player.hand.remove(pos);

        let trump = hand.trump;
        let round_index = hand.rounds.len() - 1;
        let round = hand
            .rounds
            .last_mut()
            .expect("a live hand always has an open round");
        round.plays.push((seat, card));

        let mut events = vec![GameEvent::CardPlayed { seat, card }];
        if round.plays.len() < SEATS {
            hand.to_play = (seat + 1) % SEATS;
            return Ok(events);
        }

        // Fourth card seals the round.
        let outcome = resolve_round(&round.plays, &trump);
        round.outcome = Some(outcome);
        let next_leader = match outcome {
            RoundOutcome::Won { seat, .. } => seat,
            // After a tie the same leader opens again.
            RoundOutcome::Tied => round.leader,
        };
        let (winner, winning_seat, winning_card) = match outcome {
            RoundOutcome::Won { team, seat, card } => (Some(team), Some(seat), Some(card)),
            RoundOutcome::Tied => (None, None, None),
        };
        events.push(GameEvent::RoundResolved {
            round: round_index,
            winner,
            winning_seat,
            winning_card,
        });

        let stake = hand.wager.stake;
        let outcomes: Vec<RoundOutcome> = hand.rounds.iter().filter_map(|r| r.outcome).collect();
        match resolve_hand(&outcomes, self.tie_rule) {
            Some(HandOutcome::Winner(team)) => {
                events.extend(self.finish_hand(Some(team), stake));
            }
            Some(HandOutcome::Drawn) => {
                events.extend(self.finish_hand(None, 0));
            }
            None => {
                hand.rounds.push(RoundState::new(next_leader));
                hand.to_play = next_leader;
            }
        }
        Ok(events)
    }

    /// Proposes the next wager tier. Only the team about to play holds the
    /// raise right.
    pub fn request_raise(&mut self, team: Team) -> Result<Vec<GameEvent>, GameError> {
        if self.winner.is_some() {
            return Err(GameError::MatchOver);
        }
        let Some(hand) = self.hand.as_mut() else {
            return Err(GameError::MatchOver);
        };
        if hand.consent.is_open() {
            return Err(GameError::ConsentRequired);
        }
        if Team::of_seat(hand.to_play) != team {
            return Err(GameError::InvalidWagerAction);
        }
        let value = hand.wager.raise(team)?;
        Ok(vec![GameEvent::WagerRaised { team, value }])
    }

    /// Answers a pending raise. Declining ends the hand at once, with the
    /// raising team pocketing the pre-raise stake.
    pub fn respond_raise(&mut self, team: Team, accept: bool) -> Result<Vec<GameEvent>, GameError> {
        if self.winner.is_some() {
            return Err(GameError::MatchOver);
        }
        let Some(hand) = self.hand.as_mut() else {
            return Err(GameError::MatchOver);
        };
        if hand.consent.is_open() {
            return Err(GameError::ConsentRequired);
        }
        let response = hand.wager.respond(team, accept)?;
        let mut events = vec![GameEvent::WagerResolved {
            team,
            accepted: response.accepted,
            value: response.value,
        }];
        if !response.accepted {
            events.extend(self.finish_hand(Some(response.raised_by), response.value));
        }
        Ok(events)
    }

    /// Answers the hand-of-eleven gate. Only the team opposing the one at
    /// eleven may answer. Accepting plays the hand for 3 points with raises
    /// disabled; declining hands the eleven team a single point.
    pub fn respond_hand_of_eleven(
        &mut self,
        team: Team,
        accept: bool,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.winner.is_some() {
            return Err(GameError::MatchOver);
        }
        let Some(hand) = self.hand.as_mut() else {
            return Err(GameError::MatchOver);
        };
        let ConsentState::Awaiting { eleven_team } = hand.consent else {
            return Err(GameError::NoActiveWager);
        };
        if team != eleven_team.opponent() {
            return Err(GameError::InvalidWagerAction);
        }
        hand.consent = ConsentState::Resolved { accepted: accept };
        let mut events = vec![GameEvent::HandOfElevenResolved {
            team: eleven_team,
            accepted: accept,
        }];
        if accept {
            hand.wager.stake = HAND_OF_ELEVEN_STAKE;
        } else {
            events.extend(self.finish_hand(Some(eleven_team), 1));
        }
        Ok(events)
    }

    /// Scores and archives the hand, then ends the match or deals the next
    /// one. Scores move only here, never mid-round.
    fn finish_hand(&mut self, winner: Option<Team>, points: u8) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(hand) = self.hand.take() else {
            return events;
        };
        self.history.push(HandSummary {
            vira: hand.vira,
            rounds: hand.rounds.iter().filter_map(|r| r.outcome).collect(),
            winner,
            points,
        });
        if let Some(team) = winner {
            let score = (self.scores[team.index()] + points).min(MATCH_POINTS);
            self.scores[team.index()] = score;
            events.push(GameEvent::ScoreChanged { team, score });
        }
        events.push(GameEvent::HandEnded { winner, points });
        if let Some(team) = winner
            && self.scores[team.index()] >= MATCH_POINTS
        {
            self.winner = Some(team);
            events.push(GameEvent::MatchEnded { winner: team });
            return events;
        }
        events.extend(self.start_hand());
        events
    }
}
