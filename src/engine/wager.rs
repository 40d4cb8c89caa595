use crate::engine::error::GameError;
use crate::engine::rules::Team;
use serde::{Deserialize, Serialize};

/// Escalation tiers. The base stake of 1 point is implicit before any raise.
pub const STAKES: [u8; 4] = [3, 6, 9, 12];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum WagerState {
    None,
    Pending { value: u8, raised_by: Team },
    Accepted { value: u8 },
    Declined,
}

/// Outcome of answering a pending raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WagerResponse {
    pub accepted: bool,
    /// The new stake when accepted; the forfeited pre-raise stake when declined.
    pub value: u8,
    pub raised_by: Team,
}

/// The truco escalation machine for one hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wager {
    pub state: WagerState,
    /// Points the hand is currently worth: the last accepted value, or 1.
    pub stake: u8,
    pub last_raised_by: Option<Team>,
    /// False for the whole hand while either team sits on 11 points (the
    /// original hides the truco button in that situation).
    pub raises_allowed: bool,
}

impl Wager {
    pub fn new(raises_allowed: bool) -> Self {
        Self {
            state: WagerState::None,
            stake: 1,
            last_raised_by: None,
            raises_allowed,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, WagerState::Pending { .. })
    }

    /// Next tier above the current stake, or `None` at 12.
    pub fn next_value(&self) -> Option<u8> {
        STAKES.iter().copied().find(|&v| v > self.stake)
    }

    /// Proposes the next tier on behalf of `team`. A team may not raise over
    /// its own pending request, nor twice in succession without the other
    /// team raising in between.
    pub fn raise(&mut self, team: Team) -> Result<u8, GameError> {
        if !self.raises_allowed || self.is_pending() {
            return Err(GameError::InvalidWagerAction);
        }
        if self.last_raised_by == Some(team) {
            return Err(GameError::InvalidWagerAction);
        }
        let value = self.next_value().ok_or(GameError::WagerLimitExceeded)?;
        self.state = WagerState::Pending {
            value,
            raised_by: team,
        };
        Ok(value)
    }

    /// Accepts or declines the pending raise. Only the opposing team may
    /// answer. On a decline, `value` carries the stake the hand was worth
    /// before the raise, which the raising team pockets.
    pub fn respond(&mut self, team: Team, accept: bool) -> Result<WagerResponse, GameError> {
        let WagerState::Pending { value, raised_by } = self.state else {
            return Err(GameError::NoActiveWager);
        };
        if team == raised_by {
            return Err(GameError::InvalidWagerAction);
        }
        if accept {
            self.state = WagerState::Accepted { value };
            self.stake = value;
            self.last_raised_by = Some(raised_by);
            Ok(WagerResponse {
                accepted: true,
                value,
                raised_by,
            })
        } else {
            self.state = WagerState::Declined;
            Ok(WagerResponse {
                accepted: false,
                value: self.stake,
                raised_by,
            })
        }
    }
}

/// Gate that precedes all play when one team is a point away from the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum ConsentState {
    NotRequired,
    /// Waiting on the team opposing `eleven_team` to accept or decline.
    Awaiting { eleven_team: Team },
    Resolved { accepted: bool },
}

impl ConsentState {
    pub fn is_open(&self) -> bool {
        matches!(self, ConsentState::Awaiting { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_raise_goes_to_three() {
        let mut wager = Wager::new(true);
        assert_eq!(wager.raise(Team::One), Ok(3));
        assert_eq!(
            wager.state,
            WagerState::Pending {
                value: 3,
                raised_by: Team::One
            }
        );
        // Stake is unchanged until the raise is accepted.
        assert_eq!(wager.stake, 1);
    }

    #[test]
    fn accepting_moves_the_stake_up() {
        let mut wager = Wager::new(true);
        wager.raise(Team::One).unwrap();
        let response = wager.respond(Team::Two, true).unwrap();
        assert!(response.accepted);
        assert_eq!(response.value, 3);
        assert_eq!(wager.stake, 3);
        assert_eq!(wager.next_value(), Some(6));
    }

    #[test]
    fn declining_forfeits_the_pre_raise_stake() {
        let mut wager = Wager::new(true);
        wager.raise(Team::One).unwrap();
        let response = wager.respond(Team::Two, false).unwrap();
        assert!(!response.accepted);
        assert_eq!(response.value, 1);
        assert_eq!(response.raised_by, Team::One);
        assert_eq!(wager.state, WagerState::Declined);
    }

    #[test]
    fn responding_twice_finds_no_active_wager() {
        let mut wager = Wager::new(true);
        wager.raise(Team::One).unwrap();
        wager.respond(Team::Two, true).unwrap();

        let before = wager.clone();
        assert_eq!(wager.respond(Team::Two, true), Err(GameError::NoActiveWager));
        assert_eq!(wager.respond(Team::Two, false), Err(GameError::NoActiveWager));
        assert_eq!(wager, before);
    }

    #[test]
    fn raiser_may_not_answer_its_own_raise() {
        let mut wager = Wager::new(true);
        wager.raise(Team::One).unwrap();
        assert_eq!(wager.respond(Team::One, true), Err(GameError::InvalidWagerAction));
        assert!(wager.is_pending());
    }

    #[test]
    fn no_raise_over_a_pending_raise() {
        let mut wager = Wager::new(true);
        wager.raise(Team::One).unwrap();
        assert_eq!(wager.raise(Team::Two), Err(GameError::InvalidWagerAction));
        assert_eq!(wager.raise(Team::One), Err(GameError::InvalidWagerAction));
    }

    #[test]
    fn no_two_raises_in_succession_by_the_same_team() {
        let mut wager = Wager::new(true);
        wager.raise(Team::One).unwrap();
        wager.respond(Team::Two, true).unwrap();
        assert_eq!(wager.raise(Team::One), Err(GameError::InvalidWagerAction));
        // The other team is free to re-raise.
        assert_eq!(wager.raise(Team::Two), Ok(6));
    }

    #[test]
    fn escalation_runs_three_six_nine_twelve_and_stops() {
        let mut wager = Wager::new(true);
        let mut raiser = Team::One;
        for expected in STAKES {
            assert_eq!(wager.raise(raiser), Ok(expected));
            wager.respond(raiser.opponent(), true).unwrap();
            raiser = raiser.opponent();
        }
        assert_eq!(wager.stake, 12);

        let before = wager.clone();
        assert_eq!(wager.raise(raiser), Err(GameError::WagerLimitExceeded));
        assert_eq!(wager, before);
    }

    #[test]
    fn raises_can_be_disabled_for_the_hand() {
        let mut wager = Wager::new(false);
        assert_eq!(wager.raise(Team::One), Err(GameError::InvalidWagerAction));
        assert_eq!(wager.state, WagerState::None);
    }
}
