// Board builders shared by the integration tests

#![allow(dead_code)]

use serde_json::Value;
use std::collections::HashMap;
use volume_snake::types::{Battlesnake, Board, Coord, Game};

pub fn coords(cells: &[(i32, i32)]) -> Vec<Coord> {
    cells.iter().map(|&(x, y)| Coord::new(x, y)).collect()
}

/// Snake whose length matches its body
pub fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
    let body = coords(body);
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: Value::Null,
        shout: None,
    }
}

pub fn board(width: i32, height: i32, food: &[(i32, i32)], snakes: Vec<Battlesnake>) -> Board {
    Board {
        width,
        height,
        food: coords(food),
        snakes,
        hazards: vec![],
    }
}

pub fn game(id: &str) -> Game {
    Game {
        id: id.to_string(),
        ruleset: HashMap::new(),
        timeout: 500,
        source: String::new(),
    }
}
