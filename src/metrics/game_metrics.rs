use std::time::{Duration, Instant};

/// In-session play statistics shown in the header. Nothing here is
/// persisted; a new process starts from zero.
pub struct GameMetrics {
    game_start: Instant,
    elapsed: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            game_start: Instant::now(),
            elapsed: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the elapsed-time reading; called from the render path
    pub fn update(&mut self) {
        self.elapsed = self.game_start.elapsed();
    }

    /// A game ended; fold its score into the session stats
    pub fn record_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// A new game started; the per-game timer restarts
    pub fn record_restart(&mut self) {
        self.game_start = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    /// Elapsed time of the current game as mm:ss
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
