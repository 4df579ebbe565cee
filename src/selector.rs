// Risk-scored move selection
//
// Every legal neighbor of our head gets a score made of volume, head-on,
// eating and hunger terms. The best score wins; ties are broken at random.

use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::Config;
use crate::grid::Grid;
use crate::threat::HeadThreat;
use crate::types::{Battlesnake, Coord, Direction};

/// Returned whenever no real decision can be made
pub const FALLBACK_MOVE: Direction = Direction::Up;

/// Score breakdown for one candidate cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateScore {
    pub cell: Coord,
    pub direction: Direction,
    /// Optimistic volume
    pub volume: i32,
    /// Head-avoiding volume, only measured when the optimistic one suffices
    pub worst_case_volume: Option<i32>,
    /// Only measured when hungry
    pub food_distance: Option<i32>,
    pub score: i32,
}

/// Uniform pick among tied moves, or the fallback when there are none
pub fn choose_move<R: Rng + ?Sized>(best: &[Direction], rng: &mut R) -> Direction {
    best.choose(rng).copied().unwrap_or(FALLBACK_MOVE)
}

/// Chooses moves on one turn's grid
pub struct MoveSelector<'a> {
    grid: &'a Grid,
    config: &'a Config,
}

impl<'a> MoveSelector<'a> {
    pub fn new(grid: &'a Grid, config: &'a Config) -> Self {
        MoveSelector { grid, config }
    }

    /// Picks a move for `subject_id`, falling back to `up` when the snake is
    /// unknown or has nowhere legal to go.
    pub fn decide_move<R: Rng + ?Sized>(&self, subject_id: &str, rng: &mut R) -> Direction {
        choose_move(&self.best_moves(subject_id), rng)
    }

    /// All moves tied for the best score; empty when falling back
    pub fn best_moves(&self, subject_id: &str) -> Vec<Direction> {
        crate::profile!("decide", { self.top_scoring(subject_id) })
    }

    fn top_scoring(&self, subject_id: &str) -> Vec<Direction> {
        let subject = match self.grid.snake(subject_id) {
            Some(subject) => subject,
            None => {
                warn!("Snake '{}' is not on the board, falling back", subject_id);
                return Vec::new();
            }
        };

        let scores = self.score_candidates(subject);
        let top = match scores.iter().map(|c| c.score).max() {
            Some(top) => top,
            None => {
                warn!(
                    "No legal move for '{}' at ({}, {}), falling back",
                    subject.id, subject.head.x, subject.head.y
                );
                return Vec::new();
            }
        };

        scores
            .iter()
            .filter(|c| c.score == top)
            .map(|c| c.direction)
            .collect()
    }

    /// Neighbors of the head that are not certainly occupied next turn.
    ///
    /// Our own tail moves out of the way. Bodies of snakes on their last point
    /// of health stay available since they may starve this turn.
    pub fn candidates(&self, subject: &Battlesnake) -> Vec<Coord> {
        let own_body = &subject.body[..subject.body.len().saturating_sub(1)];

        self.grid
            .neighbors(&subject.head)
            .into_iter()
            .filter(|c| !own_body.contains(c))
            .filter(|c| {
                !self
                    .grid
                    .snakes()
                    .iter()
                    .any(|s| s.id != subject.id && s.health > 1 && s.occupies(*c))
            })
            .collect()
    }

    /// Scores every candidate move for `subject`
    pub fn score_candidates(&self, subject: &Battlesnake) -> Vec<CandidateScore> {
        let scores = &self.config.scores;
        let length = subject.length;
        let mut threat: Option<HeadThreat> = None;

        let mut results: Vec<CandidateScore> = self
            .candidates(subject)
            .into_iter()
            .map(|cell| {
                let mut score = 0;
                let mut worst_case_volume = None;

                let volume = self.grid.measure_volume(cell, length, None);
                if volume < length {
                    score += scores.volume_shortfall_penalty - (length - volume);
                } else {
                    let threat = threat.get_or_insert_with(|| {
                        self.grid.head_threat(subject, self.config.search.threat_turn_cap)
                    });
                    let worst = self.grid.measure_volume(cell, length, Some(&*threat));
                    if worst < length {
                        score += scores.worst_case_shortfall_penalty - (length - worst);
                    }
                    worst_case_volume = Some(worst);
                }

                score += self.head_on_risk(cell, subject);
                score += self.eating_risk(cell, subject);

                CandidateScore {
                    cell,
                    direction: Direction::between(&subject.head, &cell),
                    volume,
                    worst_case_volume,
                    food_distance: None,
                    score,
                }
            })
            .collect();

        if !results.is_empty() && self.is_hungry(subject) {
            for candidate in results.iter_mut() {
                candidate.food_distance = self.grid.food_distance(&candidate.cell);
            }
            if let Some(nearest) = results.iter().filter_map(|c| c.food_distance).min() {
                for candidate in results.iter_mut() {
                    if candidate.food_distance == Some(nearest) {
                        candidate.score += scores.hunger_bonus;
                    }
                }
            }
        }

        for candidate in &results {
            debug!(
                "{} -> ({}, {}): score {} (volume {}, worst case {:?}, food {:?})",
                candidate.direction.as_str(),
                candidate.cell.x,
                candidate.cell.y,
                candidate.score,
                candidate.volume,
                candidate.worst_case_volume,
                candidate.food_distance
            );
        }

        results
    }

    /// Whether chasing food should influence this move.
    ///
    /// Unreachable food never makes us hungry. Food further away in moves
    /// than our remaining health is ignored as well, so a starving snake does
    /// not bend its path towards food it cannot live to eat. Otherwise we are
    /// hungry when health is running short, or when any other snake is at
    /// most `length_parity_margin` shorter than us. Longer snakes always
    /// count.
    pub fn is_hungry(&self, subject: &Battlesnake) -> bool {
        let hunger = &self.config.hunger;

        let distance = match self.grid.food_distance(&subject.head) {
            Some(distance) if distance <= subject.health => distance,
            _ => return false,
        };

        if subject.health < distance + hunger.health_margin {
            return true;
        }

        self.grid
            .snakes()
            .iter()
            .any(|s| s.id != subject.id && s.length + hunger.length_parity_margin >= subject.length)
    }

    /// Penalty for ending next to a head that wins or ties a collision,
    /// bonus for ending next to one we would beat
    fn head_on_risk(&self, cell: Coord, subject: &Battlesnake) -> i32 {
        let scores = &self.config.scores;
        let opposing: Vec<i32> = self
            .grid
            .neighbors(&cell)
            .iter()
            .filter(|n| **n != subject.head)
            .map(|n| self.grid.head_length(n))
            .filter(|&len| len > 0)
            .collect();

        let mut risk = 0;
        if opposing.iter().any(|&len| len >= subject.length) {
            risk += scores.head_on_penalty;
        }
        if opposing.iter().any(|&len| len < subject.length) {
            risk += scores.head_on_bonus;
        }
        risk
    }

    /// Penalty for moving onto a starving snake's body when that snake has
    /// food within reach and may survive the turn
    fn eating_risk(&self, cell: Coord, subject: &Battlesnake) -> i32 {
        if self.grid.obstacle_clear_time(&cell) == 0 {
            return 0;
        }

        let may_eat = self
            .grid
            .snakes()
            .iter()
            .filter(|s| s.id != subject.id && s.occupies(cell))
            .any(|s| self.grid.neighbors(&s.head).iter().any(|n| self.grid.has_food(n)));

        if may_eat {
            self.config.scores.eating_risk_penalty
        } else {
            0
        }
    }
}
