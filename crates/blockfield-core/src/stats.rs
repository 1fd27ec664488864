use crate::constants::FRAME_STATS_INTERVAL_SEC;
use instant::Instant;

/// Counts frames and logs a rate at `debug` once per interval.
pub struct FrameStats {
    window_start: Instant,
    frames_in_window: u32,
    total_frames: u64,
    last_fps: f32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            window_start: Instant::now(),
            frames_in_window: 0,
            total_frames: 0,
            last_fps: 0.0,
        }
    }
}

impl FrameStats {
    pub fn record(&mut self) {
        self.total_frames += 1;
        self.frames_in_window += 1;
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= FRAME_STATS_INTERVAL_SEC {
            self.last_fps = self.frames_in_window as f32 / elapsed;
            log::debug!(
                "[frame] {:.1} fps over {:.1}s (total {})",
                self.last_fps,
                elapsed,
                self.total_frames
            );
            self.window_start = Instant::now();
            self.frames_in_window = 0;
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Rate over the last completed interval, 0 until one completes.
    pub fn last_fps(&self) -> f32 {
        self.last_fps
    }
}
