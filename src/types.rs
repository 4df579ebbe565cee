// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    pub ruleset: HashMap<String, Value>,
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
///
/// Hazards are carried through for logging but play no part in scoring.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: Value,
    #[serde(default)]
    pub shout: Option<String>,
}

impl Battlesnake {
    /// True if any segment, tail included, sits on `coord`
    pub fn occupies(&self, coord: Coord) -> bool {
        self.body.contains(&coord)
    }
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance, the admissible heuristic on a 4-connected grid
    pub fn manhattan(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses an API direction token, case-insensitively
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }

    /// The direction that takes `from` to `to`.
    ///
    /// # Panics
    /// If `to` is not exactly one orthogonal step away from `from`. Candidate
    /// generation only ever produces adjacent cells, so this is an invariant
    /// violation rather than a recoverable condition.
    pub fn between(from: &Coord, to: &Coord) -> Direction {
        assert_eq!(
            from.manhattan(to),
            1,
            "destination {:?} is not adjacent to {:?}",
            to,
            from
        );

        if from.x == to.x {
            if from.y < to.y {
                Direction::Up
            } else {
                Direction::Down
            }
        } else if from.x < to.x {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between_adjacent_cells() {
        let head = Coord::new(3, 3);
        for dir in Direction::all().iter() {
            assert_eq!(Direction::between(&head, &dir.apply(&head)), *dir);
        }
    }

    #[test]
    #[should_panic]
    fn test_direction_between_rejects_diagonal() {
        Direction::between(&Coord::new(3, 3), &Coord::new(4, 4));
    }

    #[test]
    #[should_panic]
    fn test_direction_between_rejects_same_cell() {
        Direction::between(&Coord::new(3, 3), &Coord::new(3, 3));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(Direction::parse("up").unwrap(), Direction::Up);
        assert_eq!(Direction::parse("Down").unwrap(), Direction::Down);
        assert_eq!(Direction::parse("LEFT").unwrap(), Direction::Left);
        assert_eq!(Direction::parse("right").unwrap(), Direction::Right);
        assert!(Direction::parse("sideways").is_err());
    }

    #[test]
    fn test_game_state_deserializes_api_payload() {
        let payload = r##"{
            "game": {"id": "g1", "ruleset": {"name": "standard"}, "timeout": 500},
            "turn": 4,
            "board": {
                "height": 11, "width": 11,
                "food": [{"x": 5, "y": 5}],
                "hazards": [],
                "snakes": [{
                    "id": "me", "name": "me", "health": 90,
                    "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}],
                    "head": {"x": 1, "y": 1}, "length": 2,
                    "latency": 12, "shout": "",
                    "customizations": {"color": "#ffffff"}
                }]
            },
            "you": {
                "id": "me", "name": "me", "health": 90,
                "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}],
                "head": {"x": 1, "y": 1}, "length": 2,
                "latency": "12", "shout": null
            }
        }"##;

        let state: GameState = serde_json::from_str(payload).unwrap();
        assert_eq!(state.turn, 4);
        assert_eq!(state.board.food, vec![Coord::new(5, 5)]);
        assert_eq!(state.you.body.len(), 2);
        assert_eq!(state.board.snakes[0].length, 2);
    }
}
