// Helpers to handle frame pacing and time stamps
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

// Helper to get the current time in milliseconds
pub fn get_current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Counts frames and reports an average frame time once per period.
///
/// The render loop calls `tick` once per presented frame. Every
/// `period` the accumulated count is returned and the counter restarts.
pub struct FrameCounter {
    fc_period: Duration,
    fc_start: Instant,
    fc_frames: u32,
}

impl FrameCounter {
    pub fn new(period: Duration) -> Self {
        Self {
            fc_period: period,
            fc_start: Instant::now(),
            fc_frames: 0,
        }
    }

    /// Record one frame.
    ///
    /// Returns `Some((frames, average_frame_time))` when a full period has
    /// elapsed.
    pub fn tick(&mut self) -> Option<(u32, Duration)> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<(u32, Duration)> {
        self.fc_frames += 1;

        let elapsed = now.saturating_duration_since(self.fc_start);
        if elapsed < self.fc_period {
            return None;
        }

        let frames = self.fc_frames;
        self.fc_frames = 0;
        self.fc_start = now;

        Some((frames, elapsed / frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_counter_reports_once_per_period() {
        let mut counter = FrameCounter::new(Duration::from_millis(100));
        let start = counter.fc_start;

        assert!(counter.tick_at(start + Duration::from_millis(10)).is_none());
        assert!(counter.tick_at(start + Duration::from_millis(50)).is_none());

        let (frames, avg) = counter
            .tick_at(start + Duration::from_millis(120))
            .unwrap();
        assert_eq!(frames, 3);
        assert_eq!(avg, Duration::from_millis(40));

        // the counter restarted
        assert!(counter
            .tick_at(start + Duration::from_millis(130))
            .is_none());
    }
}
