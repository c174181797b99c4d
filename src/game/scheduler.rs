use std::time::{Duration, Instant};

use tracing::debug;

use super::{action::SpeedChange, config::GameConfig};

/// Turns a sampled clock into rate-limited ticks.
///
/// The scheduler is polled once per frame. A tick fires when the game is
/// running and strictly more than `interval` has passed since the last tick
/// fired, so ticks never come faster than the interval.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    min_interval: Duration,
    max_interval: Duration,
    step: Duration,
    last_update: Option<Instant>,
}

impl Scheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            interval: config.tick_interval(),
            min_interval: config.min_tick_interval(),
            max_interval: config.max_tick_interval(),
            step: config.tick_step(),
            last_update: None,
        }
    }

    /// Current interval between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true if a tick should run at `now`, and records it as fired
    pub fn should_tick(&mut self, now: Instant, running: bool) -> bool {
        if !running {
            return false;
        }

        let due = match self.last_update {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        };

        if due {
            self.last_update = Some(now);
        }
        due
    }

    /// Shorten or lengthen the interval by one step, within the configured bounds
    pub fn adjust_speed(&mut self, change: SpeedChange) {
        self.interval = match change {
            SpeedChange::Faster => self.interval.saturating_sub(self.step),
            SpeedChange::Slower => self.interval + self.step,
        }
        .clamp(self.min_interval, self.max_interval);

        debug!(interval_ms = self.interval.as_millis() as u64, "tick interval changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> Scheduler {
        Scheduler::new(&GameConfig::default())
    }

    #[test]
    fn test_idle_never_ticks() {
        let mut scheduler = scheduler();
        let now = Instant::now();
        assert!(!scheduler.should_tick(now, false));
        assert!(!scheduler.should_tick(now + Duration::from_secs(5), false));
    }

    #[test]
    fn test_first_running_sample_ticks() {
        let mut scheduler = scheduler();
        assert!(scheduler.should_tick(Instant::now(), true));
    }

    #[test]
    fn test_gate_is_strictly_greater() {
        let mut scheduler = scheduler();
        let start = Instant::now();
        assert!(scheduler.should_tick(start, true));

        assert!(!scheduler.should_tick(start + Duration::from_millis(199), true));
        assert!(!scheduler.should_tick(start + Duration::from_millis(200), true));
        assert!(scheduler.should_tick(start + Duration::from_millis(201), true));
    }

    #[test]
    fn test_last_update_moves_only_on_fire() {
        let mut scheduler = scheduler();
        let start = Instant::now();
        assert!(scheduler.should_tick(start, true));

        // Missed samples do not push the next tick back
        for ms in [50, 100, 150] {
            assert!(!scheduler.should_tick(start + Duration::from_millis(ms), true));
        }
        let fired_at = start + Duration::from_millis(250);
        assert!(scheduler.should_tick(fired_at, true));
        assert!(!scheduler.should_tick(fired_at + Duration::from_millis(150), true));
    }

    #[test]
    fn test_speed_steps() {
        let mut scheduler = scheduler();
        scheduler.adjust_speed(SpeedChange::Faster);
        assert_eq!(scheduler.interval(), Duration::from_millis(175));
        scheduler.adjust_speed(SpeedChange::Slower);
        scheduler.adjust_speed(SpeedChange::Slower);
        assert_eq!(scheduler.interval(), Duration::from_millis(225));
    }

    #[test]
    fn test_speed_clamped() {
        let mut scheduler = scheduler();
        for _ in 0..100 {
            scheduler.adjust_speed(SpeedChange::Faster);
        }
        assert_eq!(scheduler.interval(), Duration::from_millis(50));

        for _ in 0..100 {
            scheduler.adjust_speed(SpeedChange::Slower);
        }
        assert_eq!(scheduler.interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_new_interval_applies_to_next_gate() {
        let mut scheduler = scheduler();
        let start = Instant::now();
        assert!(scheduler.should_tick(start, true));

        scheduler.adjust_speed(SpeedChange::Faster);
        assert!(scheduler.should_tick(start + Duration::from_millis(180), true));
    }
}
