use serde::{Deserialize, Serialize};

/// Fixed simulation constants.
///
/// None of these are exposed on the CLI; the game has no difficulty settings
/// beyond its built-in speed ramp. They live in one struct so the engine and
/// tests share a single source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of grid cells per axis (the board is square)
    pub tile_count: usize,
    /// Size of one grid cell in pixels; particles move in pixel space
    pub grid_size: u32,
    /// Tick interval at game start, in milliseconds
    pub initial_speed_ms: u64,
    /// Tick interval never drops below this
    pub speed_floor_ms: u64,
    /// Tick interval shrinks by this much per food capture
    pub speed_step_ms: u64,
    /// Points awarded per food capture
    pub score_increment: u32,
    /// Particles spawned per capture
    pub particle_burst: usize,
    /// Particle opacity lost per tick
    pub particle_alpha_decay: f64,
    /// Per-tick chance that the food redraws its drift velocity
    pub food_perturb_probability: f64,
    /// Food velocity components are drawn from [-range, range)
    pub food_velocity_range: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: 20,
            grid_size: 20,
            initial_speed_ms: 100,
            speed_floor_ms: 50,
            speed_step_ms: 2,
            score_increment: 10,
            particle_burst: 20,
            particle_alpha_decay: 0.02,
            food_perturb_probability: 0.02,
            food_velocity_range: 0.05,
        }
    }
}

impl GameConfig {
    /// A small board, handy in tests that need quick wall collisions
    pub fn small() -> Self {
        Self {
            tile_count: 10,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.tile_count, 20);
        assert_eq!(config.initial_speed_ms, 100);
        assert_eq!(config.speed_floor_ms, 50);
        assert_eq!(config.score_increment, 10);
        assert_eq!(config.particle_burst, 20);
    }

    #[test]
    fn test_small_config() {
        let config = GameConfig::small();
        assert_eq!(config.tile_count, 10);
        assert_eq!(config.initial_speed_ms, 100);
    }
}
