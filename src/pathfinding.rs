// Time-aware shortest paths
//
// A* over the grid where a body segment only becomes passable once the path
// reaching it is long enough for the segment to have moved on.

use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::grid::Grid;
use crate::simple_profiler::ProfileGuard;
use crate::types::Coord;

/// A shortest path together with the food it passes over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Start and goal inclusive
    pub path: Vec<Coord>,
    pub food_collected: i32,
}

impl Route {
    /// Number of moves from start to goal
    pub fn moves(&self) -> i32 {
        self.path.len() as i32 - 1
    }
}

#[derive(Debug)]
struct FrontierNode {
    path: Vec<Coord>,
    head: Coord,
    food_collected: i32,
    priority: i32,
}

// BinaryHeap is a max-heap, so lower priorities compare greater
impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for FrontierNode {}

impl Grid {
    /// Shortest route from `start` to `goal`, or `None` if the goal cannot
    /// be reached.
    pub fn shortest_route(&self, start: Coord, goal: Coord) -> Option<Route> {
        let _guard = ProfileGuard::new("a_star");

        let mut frontier = BinaryHeap::new();
        // Shortest path length each cell has been expanded with
        let mut explored = vec![i32::MAX; self.cell_count()];

        frontier.push(FrontierNode {
            path: vec![start],
            head: start,
            food_collected: self.has_food(&start) as i32,
            priority: start.manhattan(&goal) + 1,
        });

        while let Some(node) = frontier.pop() {
            if node.head == goal {
                return Some(Route {
                    path: node.path,
                    food_collected: node.food_collected,
                });
            }

            let path_len = node.path.len() as i32;
            let cell = self.index(&node.head);
            if path_len >= explored[cell] {
                continue;
            }
            explored[cell] = path_len;

            for next in self.reachable_neighbors(&node.head, path_len) {
                if explored[self.index(&next)] <= path_len + 1 {
                    continue;
                }
                let mut path = node.path.clone();
                path.push(next);
                frontier.push(FrontierNode {
                    path,
                    head: next,
                    food_collected: node.food_collected + self.has_food(&next) as i32,
                    priority: next.manhattan(&goal) + path_len + 1,
                });
            }
        }

        None
    }

    /// Cells from `start` to `goal` inclusive; empty when unreachable
    pub fn shortest_path(&self, start: Coord, goal: Coord) -> Vec<Coord> {
        self.shortest_route(start, goal)
            .map(|route| route.path)
            .unwrap_or_default()
    }

    /// Moves to the nearest reachable food, `None` if no food is reachable
    pub fn food_distance(&self, pos: &Coord) -> Option<i32> {
        let mut best: Option<i32> = None;

        for food in self.food() {
            // Manhattan distance is a lower bound on any path
            if let Some(b) = best {
                if pos.manhattan(food) >= b {
                    continue;
                }
            }

            if let Some(route) = self.shortest_route(*pos, *food) {
                trace!(
                    "Food at ({}, {}) is {} moves from ({}, {}), {} food on the way",
                    food.x,
                    food.y,
                    route.moves(),
                    pos.x,
                    pos.y,
                    route.food_collected
                );
                let moves = route.moves();
                best = Some(best.map_or(moves, |b| b.min(moves)));
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::tests::{board, snake};
    use crate::grid::Grid;
    use crate::types::Coord;

    #[test]
    fn test_straight_line_on_open_board() {
        let grid = Grid::new(&board(5, 5, &[], vec![]));
        let path = grid.shortest_path(Coord::new(0, 0), Coord::new(4, 0));
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Coord::new(0, 0)));
        assert_eq!(path.last(), Some(&Coord::new(4, 0)));
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::new(&board(3, 3, &[], vec![]));
        assert_eq!(
            grid.shortest_path(Coord::new(1, 1), Coord::new(1, 1)),
            vec![Coord::new(1, 1)]
        );
    }

    #[test]
    fn test_crosses_wall_once_it_has_cleared() {
        // Wall along x=2 and x=3; the top of x=2 clears before we get there
        let grid = Grid::new(&board(
            5,
            5,
            &[],
            vec![snake("wall", 100, &[(2, 0), (2, 1), (2, 2), (2, 3), (3, 3), (3, 2), (3, 1), (3, 0)])],
        ));
        let path = grid.shortest_path(Coord::new(0, 0), Coord::new(4, 0));

        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(&pair[1]), 1);
        }
        // Going around the top would take 12 moves
        assert!(path.contains(&Coord::new(2, 3)));
        assert_eq!(path.len(), 11);
    }

    #[test]
    fn test_unreachable_goal_is_empty() {
        // Goal boxed in by a long head section in the corner of a 3x3
        let grid = Grid::new(&board(
            3,
            3,
            &[],
            vec![snake(
                "o",
                100,
                &[(1, 0), (1, 1), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)],
            )],
        ));
        assert!(grid.shortest_path(Coord::new(2, 0), Coord::new(0, 0)).is_empty());
        assert!(grid.shortest_route(Coord::new(2, 0), Coord::new(0, 0)).is_none());
    }

    #[test]
    fn test_food_collected_along_route() {
        let grid = Grid::new(&board(5, 1, &[(1, 0), (2, 0), (4, 0)], vec![]));
        let route = grid.shortest_route(Coord::new(0, 0), Coord::new(3, 0)).unwrap();
        assert_eq!(route.moves(), 3);
        assert_eq!(route.food_collected, 2);
    }

    #[test]
    fn test_food_distance_picks_nearest() {
        let grid = Grid::new(&board(7, 7, &[(6, 6), (0, 3), (3, 4)], vec![]));
        assert_eq!(grid.food_distance(&Coord::new(3, 3)), Some(1));
        assert_eq!(grid.food_distance(&Coord::new(0, 0)), Some(3));
    }

    #[test]
    fn test_food_distance_without_food() {
        let grid = Grid::new(&board(7, 7, &[], vec![]));
        assert_eq!(grid.food_distance(&Coord::new(3, 3)), None);
    }

    #[test]
    fn test_food_distance_on_food() {
        let grid = Grid::new(&board(4, 4, &[(2, 2)], vec![]));
        assert_eq!(grid.food_distance(&Coord::new(2, 2)), Some(0));
    }
}
