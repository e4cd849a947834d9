use rand::Rng;

use super::{
    action::Action,
    config::GameConfig,
    state::{CollisionType, Food, GameState, GameStatus, Position, Snake, BACKDROP_PALETTE_SIZE},
};

/// Information about a tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake captured the food this tick
    pub ate_food: bool,
    /// Type of collision if one ended the game this tick
    pub collision_type: Option<CollisionType>,
}

/// Result of advancing the simulation one tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game is over
    pub terminated: bool,
    pub info: StepInfo,
}

/// The simulation engine: owns the RNG and the fixed constants, and
/// advances a `GameState` one tick at a time. Pure state transform apart
/// from the randomness; all I/O lives with the caller.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: single-segment snake at the board center,
    /// idle heading, food at the quarter point with a random drift,
    /// score zero, initial speed, no particles, default backdrop.
    pub fn reset(&mut self) -> GameState {
        let center = (self.config.tile_count / 2) as i32;
        let quarter = (self.config.tile_count / 4) as i32;

        let snake = Snake::new(Position::new(center, center));
        let food = Food::spawn_at(
            Position::new(quarter, quarter),
            self.config.food_velocity_range,
            &mut self.rng,
        );

        GameState::new(snake, food, &self.config)
    }

    /// Execute one tick: steer, move snake and food, age particles, then
    /// check for a terminal collision and finally for a capture. A
    /// collision aborts the tick with no further mutation.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_running() {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                },
            };
        }

        if let Action::Move(dir) = action {
            state.snake.request_heading(dir);
        }

        state.snake.advance();
        state.food.drift(&self.config, &mut self.rng);
        state.particles.update(self.config.particle_alpha_decay);

        if let Some(collision_type) = self.check_collision(state) {
            state.status = GameStatus::GameOver;
            state.steps += 1;

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let ate_food = state.food.cell() == state.snake.head();
        if ate_food {
            self.apply_capture(state);
        }

        state.steps += 1;

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Wall check first, then self check, against the post-motion head
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        if !state.is_in_bounds(state.snake.head()) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(state.snake.head()) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Everything a capture triggers: the particle burst at the food's
    /// pixel center, scoring, food relocation, growth, the speed ramp
    /// and a fresh cosmetic backdrop.
    fn apply_capture(&mut self, state: &mut GameState) {
        let (px, py) = state.food.pixel_center(self.config.grid_size);
        state
            .particles
            .burst(px, py, self.config.particle_burst, &mut self.rng);

        state.score += self.config.score_increment;
        state.food.respawn(&self.config, &mut self.rng);
        state.snake.grow();
        state.apply_speedup(&self.config);
        state.backdrop = Some(self.rng.gen_range(0..BACKDROP_PALETTE_SIZE));
    }
}
