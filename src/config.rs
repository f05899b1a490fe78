use std::time::Duration;

use crate::grid::{Direction, Pos, Size};

/// Everything tunable about a game, with defaults for a standard run. The
/// controller takes this at construction; nothing reads configuration
/// ambiently.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Playable interior, excluding the border cells.
    pub arena: Size,
    pub start: Pos,
    pub initial_length: usize,
    pub initial_direction: Direction,
    pub initial_tick: Duration,
    /// Fastest the game ever gets; difficulty never pushes below this.
    pub min_tick: Duration,
    pub speed_step: Duration,
    /// Morsels eaten before each speed increase.
    pub difficulty_threshold: u32,
    /// Preferred minimum Manhattan distance between a fresh morsel and the head.
    pub min_morsel_distance: u16,
    pub spawn_attempts: u32,
    pub morsel_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            arena: Size {
                width: 38,
                height: 18,
            },
            start: Pos::new(5, 5),
            initial_length: 3,
            initial_direction: Direction::Right,
            initial_tick: Duration::from_millis(150),
            min_tick: Duration::from_millis(50),
            speed_step: Duration::from_millis(5),
            difficulty_threshold: 5,
            min_morsel_distance: 3,
            spawn_attempts: 1000,
            morsel_score: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();

        assert_eq!(config.arena.width, 38);
        assert_eq!(config.arena.height, 18);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.initial_tick, Duration::from_millis(150));
        assert_eq!(config.min_tick, Duration::from_millis(50));
        assert!(config.initial_tick >= config.min_tick);
        assert_eq!(config.difficulty_threshold, 5);
    }
}
