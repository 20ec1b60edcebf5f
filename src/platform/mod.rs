//! Platform abstraction layer
//!
//! Browsers deliver animation frames at whatever rate the display runs. The
//! charge meter must still advance on a fixed 16 ms cadence, so frame deltas
//! are fed through an accumulator that emits whole ticks.

/// Fixed-interval tick source driven by variable frame deltas
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval_ms: f32,
    max_substeps: u32,
    accumulator: f32,
    running: bool,
}

impl IntervalTimer {
    pub fn new(interval_ms: f32, max_substeps: u32) -> Self {
        Self {
            interval_ms,
            max_substeps,
            accumulator: 0.0,
            running: false,
        }
    }

    /// Start counting from a clean accumulator
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.running = true;
    }

    /// Stop and discard any partial interval. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed elapsed wall time, returns how many ticks are due
    pub fn advance(&mut self, elapsed_ms: f32) -> u32 {
        if !self.running || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }

        self.accumulator += elapsed_ms;
        let mut ticks = 0;
        while self.accumulator >= self.interval_ms && ticks < self.max_substeps {
            self.accumulator -= self.interval_ms;
            ticks += 1;
        }

        // Drop backlog beyond the substep cap (tab was hidden, debugger, ...)
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.interval_ms);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_whole_ticks() {
        let mut timer = IntervalTimer::new(16.0, 8);
        timer.start();
        assert_eq!(timer.advance(10.0), 0);
        assert_eq!(timer.advance(10.0), 1);
        assert_eq!(timer.advance(12.0), 1);
        assert_eq!(timer.advance(32.0), 2);
    }

    #[test]
    fn test_caps_substeps() {
        let mut timer = IntervalTimer::new(16.0, 8);
        timer.start();
        assert_eq!(timer.advance(1000.0), 8);
        // Backlog dropped, at most one interval carried over
        assert!(timer.advance(0.5) <= 1);
        assert_eq!(timer.advance(0.0), 0);
    }

    #[test]
    fn test_stopped_timer_is_silent() {
        let mut timer = IntervalTimer::new(16.0, 8);
        assert_eq!(timer.advance(100.0), 0);

        timer.start();
        timer.advance(10.0);
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.advance(100.0), 0);

        timer.start();
        assert_eq!(timer.advance(10.0), 0);
    }

    #[test]
    fn test_ignores_bad_deltas() {
        let mut timer = IntervalTimer::new(16.0, 8);
        timer.start();
        assert_eq!(timer.advance(-50.0), 0);
        assert_eq!(timer.advance(f32::NAN), 0);
        assert_eq!(timer.advance(f32::INFINITY), 0);
        assert_eq!(timer.advance(16.0), 1);
    }
}
