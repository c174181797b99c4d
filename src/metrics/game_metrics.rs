use std::time::{Duration, Instant};

/// Per-session counters shown in the status line. Nothing here outlives the process.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// 1-based number of the current episode
    pub episode: u32,
    pub tick_interval: Duration,
}

impl GameMetrics {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            episode: 1,
            tick_interval,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// A collision ended the current episode
    pub fn on_episode_reset(&mut self) {
        self.episode += 1;
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    pub fn format_interval(&self) -> String {
        format!("{}ms", self.tick_interval.as_millis())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}
