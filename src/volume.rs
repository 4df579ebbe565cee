// Reachable-space estimation
//
// Depth-first search for the longest self-avoiding path from a cell, used as
// a survivability proxy. The search stops as soon as it has found more room
// than the snake's body needs.

use crate::grid::Grid;
use crate::simple_profiler::ProfileGuard;
use crate::threat::HeadThreat;
use crate::types::Coord;

impl Grid {
    /// Length of the longest path found from `start`, or 0 if `start` has no
    /// way out at all.
    ///
    /// Returns early with `subject_length + 1` once that much room is found.
    /// With `head_threat` set, cells an opposing head can reach no later than
    /// we would are treated as walls (the pessimistic variant).
    pub fn measure_volume(
        &self,
        start: Coord,
        subject_length: i32,
        head_threat: Option<&HeadThreat>,
    ) -> i32 {
        let _guard = ProfileGuard::new(if head_threat.is_some() {
            "pessimistic_volume"
        } else {
            "volume"
        });

        // Longest path length seen reaching each cell
        let mut visited = vec![0i32; self.cell_count()];
        visited[self.index(&start)] = 1;

        let mut stack: Vec<Vec<Coord>> = vec![vec![start]];
        let mut volume = 0;

        while let Some(path) = stack.pop() {
            let path_len = path.len() as i32;
            let head = path[path.len() - 1];

            for next in self.reachable_neighbors(&head, path_len) {
                let next_len = path_len + 1;
                let cell = self.index(&next);
                if next_len <= visited[cell] {
                    continue;
                }

                // Our own trailing body still covers this part of the path
                let self_blocked = path
                    .iter()
                    .enumerate()
                    .any(|(i, c)| *c == next && path_len - i as i32 <= subject_length);
                if self_blocked {
                    continue;
                }

                if let Some(threat) = head_threat {
                    if threat.turn(&next) <= next_len {
                        continue;
                    }
                }

                visited[cell] = next_len;
                volume = volume.max(next_len);
                if volume > subject_length {
                    return volume;
                }

                let mut extended = path.clone();
                extended.push(next);
                stack.push(extended);
            }
        }

        volume
    }
}
