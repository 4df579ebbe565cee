// Per-turn grid model
//
// Built once from the board snapshot and never mutated afterwards. All lookup
// arrays are flat, row-major, and owned by the Grid, so concurrent requests
// never share state.

use std::collections::HashMap;

use crate::types::{Battlesnake, Board, Coord};

/// Immutable snapshot of one turn: geometry, food, bodies and heads
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Turns until the segment on a cell vacates; 0 for free cells
    obstacles: Vec<i32>,
    /// Length of the snake whose head is on a cell; 0 when no head
    heads: Vec<i32>,
    food: Vec<bool>,
    food_list: Vec<Coord>,
    snakes: Vec<Battlesnake>,
    snake_index: HashMap<String, usize>,
}

impl Grid {
    /// Builds the lookup arrays from a board snapshot.
    ///
    /// Body coordinates and food must lie on the board; the HTTP layer is
    /// trusted to deliver well-formed states.
    pub fn new(board: &Board) -> Self {
        debug_assert!(board.width > 0 && board.height > 0);

        let cells = (board.width * board.height) as usize;
        let mut grid = Grid {
            width: board.width,
            height: board.height,
            obstacles: vec![0; cells],
            heads: vec![0; cells],
            food: vec![false; cells],
            food_list: board.food.clone(),
            snakes: board.snakes.clone(),
            snake_index: HashMap::with_capacity(board.snakes.len()),
        };

        for f in &board.food {
            let i = grid.index(f);
            grid.food[i] = true;
        }

        for (n, snake) in board.snakes.iter().enumerate() {
            grid.snake_index.insert(snake.id.clone(), n);

            if let Some(head) = snake.body.first() {
                let i = grid.index(head);
                grid.heads[i] = snake.length;
            }

            for (i, segment) in snake.body.iter().enumerate() {
                // A repeated coordinate is a stacked tail that has not started
                // moving yet; the first copy already carries the right countdown.
                if i > 0 && snake.body[i - 1] == *segment {
                    break;
                }
                let cell = grid.index(segment);
                let clear_time = snake.length - (i as i32 + 1);
                grid.obstacles[cell] = grid.obstacles[cell].max(clear_time);
            }
        }

        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn in_bounds(&self, pos: &Coord) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Row-major offset of an in-bounds coordinate
    pub fn index(&self, pos: &Coord) -> usize {
        debug_assert!(self.in_bounds(pos), "{:?} is off the board", pos);
        (pos.y * self.width + pos.x) as usize
    }

    pub fn obstacle_clear_time(&self, pos: &Coord) -> i32 {
        self.obstacles[self.index(pos)]
    }

    pub fn head_length(&self, pos: &Coord) -> i32 {
        self.heads[self.index(pos)]
    }

    pub fn has_food(&self, pos: &Coord) -> bool {
        self.food[self.index(pos)]
    }

    pub fn food(&self) -> &[Coord] {
        &self.food_list
    }

    pub fn snakes(&self) -> &[Battlesnake] {
        &self.snakes
    }

    pub fn snake(&self, id: &str) -> Option<&Battlesnake> {
        self.snake_index.get(id).map(|&i| &self.snakes[i])
    }

    /// In-bounds cells one step away, always in left, right, down, up order
    pub fn neighbors(&self, pos: &Coord) -> Vec<Coord> {
        let mut neighbors = Vec::with_capacity(4);
        if pos.x > 0 {
            neighbors.push(Coord::new(pos.x - 1, pos.y));
        }
        if pos.x < self.width - 1 {
            neighbors.push(Coord::new(pos.x + 1, pos.y));
        }
        if pos.y > 0 {
            neighbors.push(Coord::new(pos.x, pos.y - 1));
        }
        if pos.y < self.height - 1 {
            neighbors.push(Coord::new(pos.x, pos.y + 1));
        }
        neighbors
    }

    /// Neighbors whose occupant will have moved on by `arrival_turn`.
    ///
    /// This is the only place body segments are treated as impassable; every
    /// search expands through it.
    pub fn reachable_neighbors(&self, pos: &Coord, arrival_turn: i32) -> Vec<Coord> {
        let mut neighbors = self.neighbors(pos);
        neighbors.retain(|n| self.obstacle_clear_time(n) < arrival_turn);
        neighbors
    }
}
