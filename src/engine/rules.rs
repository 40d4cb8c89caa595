use crate::engine::card::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Team One sits at seats 0 and 2, Team Two at seats 1 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub fn of_seat(seat: usize) -> Team {
        if seat % 2 == 0 { Team::One } else { Team::Two }
    }

    pub fn opponent(&self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Team::One => 0,
            Team::Two => 1,
        }
    }

    /// Lower of the team's two seats.
    pub fn first_seat(&self) -> usize {
        self.index()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::One => write!(f, "team 1"),
            Team::Two => write!(f, "team 2"),
        }
    }
}

/// Card ordering for one hand, fixed the moment the vira is turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrumpContext {
    pub vira: Card,
    pub trump_rank: Rank,
}

impl TrumpContext {
    pub fn new(vira: Card) -> Self {
        Self {
            vira,
            trump_rank: vira.rank.next_wrapping(),
        }
    }

    pub fn is_trump(&self, card: Card) -> bool {
        card.rank == self.trump_rank
    }

    /// Total strength for this hand: manilhas sit above every plain card and
    /// are suit-ordered; plain cards use rank strength and can tie.
    pub fn strength(&self, card: Card) -> u8 {
        if self.is_trump(card) {
            10 + card.suit.trump_strength()
        } else {
            card.rank.strength()
        }
    }

    pub fn compare(&self, a: Card, b: Card) -> Ordering {
        self.strength(a).cmp(&self.strength(b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum RoundOutcome {
    Won { team: Team, seat: usize, card: Card },
    Tied,
}

/// Winner of one round of plays. The round ties only when the top strength is
/// held by both teams; two partners sharing it keep the round for their team,
/// credited to whichever of them played first.
pub fn resolve_round(plays: &[(usize, Card)], trump: &TrumpContext) -> RoundOutcome {
    let mut best: Option<(usize, Card, u8)> = None;
    let mut contested = false;
    for &(seat, card) in plays {
        let strength = trump.strength(card);
        match best {
            None => best = Some((seat, card, strength)),
            Some((best_seat, _, best_strength)) => {
                if strength > best_strength {
                    best = Some((seat, card, strength));
                    contested = false;
                } else if strength == best_strength
                    && Team::of_seat(seat) != Team::of_seat(best_seat)
                {
                    contested = true;
                }
            }
        }
    }
    match best {
        Some((seat, card, _)) if !contested => RoundOutcome::Won {
            team: Team::of_seat(seat),
            seat,
            card,
        },
        _ => RoundOutcome::Tied,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Winner(Team),
    Drawn,
}

/// What happens when the first and the third round of a hand both tie. The
/// original leaves this open, so both readings are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TiedHandRule {
    /// Nobody scores.
    OverallDraw,
    /// The second round's winner takes the hand; a fully tied hand still
    /// scores nothing.
    SecondRoundDecides,
}

/// Hand winner from the round outcomes so far. `None` means play continues.
///
/// Two round wins always settle the hand. A tied round otherwise defers to
/// the rounds around it: a tie after a won first round confirms that winner,
/// a win after a tied first round takes the hand, and a tied third round
/// falls back to the first round's winner or to `rule`.
pub fn resolve_hand(rounds: &[RoundOutcome], rule: TiedHandRule) -> Option<HandOutcome> {
    let mut wins = [0u8; 2];
    for outcome in rounds {
        if let RoundOutcome::Won { team, .. } = outcome {
            wins[team.index()] += 1;
            if wins[team.index()] == 2 {
                return Some(HandOutcome::Winner(*team));
            }
        }
    }

    let team_of = |outcome: &RoundOutcome| match outcome {
        RoundOutcome::Won { team, .. } => Some(*team),
        RoundOutcome::Tied => None,
    };

    match rounds {
        [RoundOutcome::Won { team, .. }, RoundOutcome::Tied] => Some(HandOutcome::Winner(*team)),
        [RoundOutcome::Tied, RoundOutcome::Won { team, .. }] => Some(HandOutcome::Winner(*team)),
        [first, second, RoundOutcome::Tied] => Some(match team_of(first) {
            Some(team) => HandOutcome::Winner(team),
            None => match rule {
                TiedHandRule::OverallDraw => HandOutcome::Drawn,
                TiedHandRule::SecondRoundDecides => team_of(second)
                    .map(HandOutcome::Winner)
                    .unwrap_or(HandOutcome::Drawn),
            },
        }),
        [_, _, RoundOutcome::Won { team, .. }] => Some(HandOutcome::Winner(*team)),
        _ => None,
    }
}
