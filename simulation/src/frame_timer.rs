use std::collections::VecDeque;
use std::time::Duration;

const DEFAULT_WINDOW: usize = 50;

/// Rolling average over the most recent frame times.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    frame_times: VecDeque<Duration>,
    window: usize,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW)
    }

    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            frame_times: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    pub fn record(&mut self, frame_time: Duration) {
        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > self.window {
            self.frame_times.pop_front();
        }
    }

    /// `None` until a full window has been recorded.
    pub fn average(&self) -> Option<Duration> {
        if self.frame_times.len() < self.window {
            return None;
        }
        let total: Duration = self.frame_times.iter().sum();
        Some(total / self.window as u32)
    }

    /// Frames per second, rounded down to one decimal.
    pub fn fps(&self) -> Option<f32> {
        let average = self.average()?.as_secs_f64();
        if average <= 0.0 {
            return None;
        }
        Some(((10.0 / average).floor() / 10.0) as f32)
    }

    pub fn reset(&mut self) {
        self.frame_times.clear();
    }
}
