// Library exports for the Battlesnake bot
// The server binary, the replay tool and the integration tests all drive the
// move engine through these modules.

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod grid;
pub mod handler;
pub mod pathfinding;
pub mod replay;
pub mod selector;
pub mod simple_profiler;
pub mod threat;
pub mod types;
pub mod volume;
