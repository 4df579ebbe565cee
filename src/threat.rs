// Opponent head-arrival propagation
//
// For every cell, the earliest turn at which another snake's head could get
// there. All opponents are advanced level by level together so each cell
// keeps the minimum over all of them.

use crate::grid::Grid;
use crate::simple_profiler::ProfileGuard;
use crate::types::{Battlesnake, Coord};

/// Default horizon for head-threat propagation, in turns
pub const DEFAULT_TURN_CAP: i32 = 30;

/// Value of cells no opposing head reaches within the horizon
pub const UNREACHED: i32 = i32::MAX;

/// Earliest contest turn per cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadThreat {
    width: i32,
    turns: Vec<i32>,
}

impl HeadThreat {
    /// A map where nothing is threatened
    pub fn unreached(grid: &Grid) -> Self {
        HeadThreat {
            width: grid.width(),
            turns: vec![UNREACHED; grid.cell_count()],
        }
    }

    pub fn turn(&self, pos: &Coord) -> i32 {
        self.turns[(pos.y * self.width + pos.x) as usize]
    }

    pub(crate) fn set(&mut self, pos: &Coord, turn: i32) {
        self.turns[(pos.y * self.width + pos.x) as usize] = turn;
    }

    /// Records `turn` if it beats what is already there
    fn improve(&mut self, pos: &Coord, turn: i32) -> bool {
        if turn < self.turn(pos) {
            self.set(pos, turn);
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ThreatNode {
    head: Coord,
    path_len: i32,
    food_eaten: i32,
}

#[derive(Debug)]
struct Frontier {
    is_threat: bool,
    relative_size: i32,
    nodes: Vec<ThreatNode>,
}

impl Grid {
    /// Earliest turn any snake other than `subject` could contest each cell,
    /// searching at most `turn_cap` turns ahead.
    ///
    /// A snake at least as long as the subject threatens a cell from the turn
    /// its head can arrive. A shorter one is only an obstacle, one turn later,
    /// until the food it picks up on the way makes up the difference.
    pub fn head_threat(&self, subject: &Battlesnake, turn_cap: i32) -> HeadThreat {
        let _guard = ProfileGuard::new("head_threat");

        let mut threat = HeadThreat::unreached(self);
        let mut frontiers = Vec::new();

        for other in self.snakes() {
            if other.id == subject.id {
                continue;
            }
            let head = match other.body.first() {
                Some(head) => *head,
                None => continue,
            };

            let is_threat = other.length >= subject.length;
            let seed_turn = if is_threat { 1 } else { 2 };

            let mut nodes = Vec::new();
            for next in self.reachable_neighbors(&head, 1) {
                threat.improve(&next, seed_turn);
                nodes.push(ThreatNode {
                    head: next,
                    path_len: 2,
                    food_eaten: self.has_food(&next) as i32,
                });
            }

            frontiers.push(Frontier {
                is_threat,
                relative_size: other.length - subject.length,
                nodes,
            });
        }

        let mut turn = 1;
        while turn < turn_cap && frontiers.iter().any(|f| !f.nodes.is_empty()) {
            for frontier in frontiers.iter_mut() {
                let current = std::mem::take(&mut frontier.nodes);

                for node in current {
                    for next in self.reachable_neighbors(&node.head, node.path_len) {
                        let food_eaten = node.food_eaten + self.has_food(&next) as i32;
                        let delay = if frontier.is_threat || food_eaten + frontier.relative_size >= 0 {
                            0
                        } else {
                            1
                        };

                        if threat.improve(&next, turn + delay + 1) {
                            frontier.nodes.push(ThreatNode {
                                head: next,
                                path_len: node.path_len + 1,
                                food_eaten,
                            });
                        }
                    }
                }
            }
            turn += 1;
        }

        threat
    }
}
