use rand::Rng;

use super::action::Direction;
use super::config::GameConfig;
use super::particles::ParticleSystem;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The snake: body segments with the head at index 0, plus its heading.
///
/// The heading starts as `None` (no input yet), which leaves the snake
/// stationary. Length is at least 1 at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<Position>,
    pub heading: Option<Direction>,
}

impl Snake {
    /// Create a single-segment snake at the given cell, idle
    pub fn new(head: Position) -> Self {
        Self {
            body: vec![head],
            heading: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        // Invariant: body is never empty
        *self.body.last().unwrap()
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Steer toward a direction. A request that directly reverses the
    /// current heading is silently ignored; anything else wins.
    pub fn request_heading(&mut self, dir: Direction) {
        if let Some(current) = self.heading {
            if current.is_opposite(dir) {
                return;
            }
        }
        self.heading = Some(dir);
    }

    /// Advance one grid step along the heading: prepend the new head, pop
    /// the tail. An idle snake (no heading yet) stays where it is.
    pub fn advance(&mut self) {
        let Some(dir) = self.heading else {
            return;
        };
        let (dx, dy) = dir.delta();
        let head = self.head().moved_by(dx, dy);
        self.body.insert(0, head);
        self.body.pop();
    }

    /// Grow by one segment: duplicate the current tail. The duplicate
    /// unstacks naturally on the next advance.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// The food entity. Unlike the snake it moves in sub-cell increments,
/// drifting smoothly across the cell-quantized board.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Food {
    /// Place food at a cell with a fresh random drift velocity
    pub fn spawn_at<R: Rng>(cell: Position, range: f64, rng: &mut R) -> Self {
        Self {
            x: cell.x as f64,
            y: cell.y as f64,
            dx: rng.gen_range(-range..range),
            dy: rng.gen_range(-range..range),
        }
    }

    /// The grid cell the food currently reads as, for capture checks
    pub fn cell(&self) -> Position {
        Position::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Pixel-space center of the food, where capture bursts spawn
    pub fn pixel_center(&self, grid_size: u32) -> (f64, f64) {
        let g = grid_size as f64;
        (self.x * g + g / 2.0, self.y * g + g / 2.0)
    }

    /// One tick of drift: integrate velocity, reflect off the band edges
    /// by negating the offending component, and occasionally redraw the
    /// velocity so the motion never settles into a predictable bounce.
    ///
    /// Reflection does not clamp: the position may sit up to one
    /// velocity-step outside [0, tile_count-1) for a single tick before
    /// the negated velocity pulls it back. Cosmetic slack, kept from the
    /// original motion model.
    pub fn drift<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        self.x += self.dx;
        self.y += self.dy;

        let edge = (config.tile_count - 1) as f64;
        if self.x < 0.0 || self.x >= edge {
            self.dx = -self.dx;
        }
        if self.y < 0.0 || self.y >= edge {
            self.dy = -self.dy;
        }

        if rng.gen::<f64>() < config.food_perturb_probability {
            let range = config.food_velocity_range;
            self.dx = rng.gen_range(-range..range);
            self.dy = rng.gen_range(-range..range);
        }
    }

    /// Relocate to a uniform random cell away from the border, with a
    /// fresh random velocity. Called when captured.
    pub fn respawn<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        let max = (config.tile_count - 1) as i32;
        self.x = rng.gen_range(1..max) as f64;
        self.y = rng.gen_range(1..max) as f64;
        let range = config.food_velocity_range;
        self.dx = rng.gen_range(-range..range);
        self.dy = rng.gen_range(-range..range);
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake head left the board
    Wall,
    /// Snake head ran into its own body
    SelfCollision,
}

/// Whether the simulation is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Number of cosmetic backdrop tints cycled on captures
pub const BACKDROP_PALETTE_SIZE: u8 = 9;

/// Complete simulation state. Everything a tick reads or writes lives
/// here; the engine, input path and renderer all share this one struct,
/// always from the same task.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub particles: ParticleSystem,
    pub tile_count: usize,
    pub score: u32,
    /// Current tick interval in milliseconds; shrinks as the score grows
    pub speed_ms: u64,
    pub steps: u32,
    pub status: GameStatus,
    /// Cosmetic backdrop tint index; `None` is the default background
    pub backdrop: Option<u8>,
}

impl GameState {
    pub fn new(snake: Snake, food: Food, config: &GameConfig) -> Self {
        Self {
            snake,
            food,
            particles: ParticleSystem::new(),
            tile_count: config.tile_count,
            score: 0,
            speed_ms: config.initial_speed_ms,
            steps: 0,
            status: GameStatus::Running,
            backdrop: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Check if a position is within the board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.tile_count as i32
            && pos.y >= 0
            && pos.y < self.tile_count as i32
    }

    /// Shrink the tick interval by one capture's worth, never past the floor
    pub fn apply_speedup(&mut self, config: &GameConfig) {
        self.speed_ms = self
            .speed_ms
            .saturating_sub(config.speed_step_ms)
            .max(config.speed_floor_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_new_snake_is_idle() {
        let snake = Snake::new(Position::new(10, 10));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.heading, None);
    }

    #[test]
    fn test_idle_snake_does_not_move() {
        let mut snake = Snake::new(Position::new(10, 10));
        snake.advance();
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.request_heading(Direction::Right);

        snake.advance();
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.request_heading(Direction::Right);
        snake.advance();
        snake.grow();

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.body[0], snake.body[1]);

        // The duplicate unstacks on the next advance
        snake.advance();
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.body[1], Position::new(6, 5));
    }

    #[test]
    fn test_reversal_rejected() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.request_heading(Direction::Right);
        snake.request_heading(Direction::Left);
        assert_eq!(snake.heading, Some(Direction::Right));

        // Perpendicular turns go through
        snake.request_heading(Direction::Down);
        assert_eq!(snake.heading, Some(Direction::Down));
    }

    #[test]
    fn test_first_heading_always_accepted() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.request_heading(Direction::Left);
        assert_eq!(snake.heading, Some(Direction::Left));
    }

    #[test]
    fn test_body_collision_detection() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.request_heading(Direction::Right);
        snake.grow();
        snake.grow();
        snake.advance();
        // Body now: (6,5), (5,5), (5,5)
        assert!(!snake.collides_with_body(Position::new(6, 5))); // head
        assert!(snake.collides_with_body(Position::new(5, 5))); // body
        assert!(!snake.collides_with_body(Position::new(0, 0)));
    }

    #[test]
    fn test_food_cell_rounds() {
        let config = GameConfig::default();
        let mut rng = rand::thread_rng();
        let mut food = Food::spawn_at(Position::new(5, 5), config.food_velocity_range, &mut rng);
        assert_eq!(food.cell(), Position::new(5, 5));

        food.x = 5.49;
        food.y = 4.51;
        assert_eq!(food.cell(), Position::new(5, 5));

        food.x = 5.5;
        assert_eq!(food.cell(), Position::new(6, 5));
    }

    #[test]
    fn test_food_drift_stays_near_board() {
        let config = GameConfig::default();
        let mut rng = rand::thread_rng();
        let mut food = Food::spawn_at(Position::new(5, 5), config.food_velocity_range, &mut rng);

        let edge = (config.tile_count - 1) as f64;
        for _ in 0..2000 {
            food.drift(&config, &mut rng);
            // Reflection allows a transient overshoot past the band, but
            // never enough to round to an off-board cell
            assert!(food.x > -0.5 && food.x < edge + 0.5, "x = {}", food.x);
            assert!(food.y > -0.5 && food.y < edge + 0.5, "y = {}", food.y);
            assert!(food.dx.abs() <= config.food_velocity_range);
            assert!(food.dy.abs() <= config.food_velocity_range);
        }
    }

    #[test]
    fn test_food_respawn_avoids_border() {
        let config = GameConfig::default();
        let mut rng = rand::thread_rng();
        let mut food = Food::spawn_at(Position::new(5, 5), config.food_velocity_range, &mut rng);

        let max = (config.tile_count - 2) as i32;
        for _ in 0..100 {
            food.respawn(&config, &mut rng);
            let cell = food.cell();
            assert!(cell.x >= 1 && cell.x <= max);
            assert!(cell.y >= 1 && cell.y <= max);
        }
    }

    #[test]
    fn test_food_pixel_center() {
        let mut rng = rand::thread_rng();
        let food = Food::spawn_at(Position::new(5, 5), 0.05, &mut rng);
        assert_eq!(food.pixel_center(20), (110.0, 110.0));
    }

    #[test]
    fn test_bounds_checking() {
        let config = GameConfig::default();
        let mut rng = rand::thread_rng();
        let state = GameState::new(
            Snake::new(Position::new(10, 10)),
            Food::spawn_at(Position::new(5, 5), config.food_velocity_range, &mut rng),
            &config,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_speedup_respects_floor() {
        let config = GameConfig::default();
        let mut rng = rand::thread_rng();
        let mut state = GameState::new(
            Snake::new(Position::new(10, 10)),
            Food::spawn_at(Position::new(5, 5), config.food_velocity_range, &mut rng),
            &config,
        );

        // After 100 captures the interval sits exactly on the floor
        for _ in 0..100 {
            state.apply_speedup(&config);
        }
        assert_eq!(state.speed_ms, config.speed_floor_ms);

        state.apply_speedup(&config);
        assert_eq!(state.speed_ms, config.speed_floor_ms);
    }
}
