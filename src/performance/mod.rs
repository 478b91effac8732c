//! # Frame Timing and Performance Metrics
//!
//! [`FrameClock`] produces the per-frame `dt` that scales camera movement and
//! the elapsed time that drives scene animation. [`PerformanceMonitor`] keeps
//! a rolling window of frame times for the overlay and emits a
//! [`FrameReport`] once per report interval for the log.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use ruya::performance::{FrameClock, PerformanceMonitor};
//!
//! let start = Instant::now();
//! let mut clock = FrameClock::starting_at(start);
//! let mut monitor = PerformanceMonitor::new(Duration::from_secs(1));
//!
//! let now = start + Duration::from_millis(16);
//! let dt = clock.tick_at(now);
//! monitor.record_frame(Duration::from_secs_f32(dt), now);
//! assert!(monitor.get_metrics().fps > 0.0);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Measures time between frames and since startup
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { start, last: start }
    }

    /// Seconds since the previous tick
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    /// Seconds from startup to the latest tick
    pub fn elapsed_secs(&self) -> f32 {
        self.last.saturating_duration_since(self.start).as_secs_f32()
    }
}

/// Rolling frame statistics shown by the overlay
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// Current frames per second
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    /// Minimum frame time in the current window
    pub min_frame_time_ms: f32,
    /// Maximum frame time in the current window
    pub max_frame_time_ms: f32,
    /// Number of draw calls in the last frame
    pub draw_calls: usize,
    /// Number of triangles drawn in the last frame
    pub triangles: usize,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
            draw_calls: 0,
            triangles: 0,
        }
    }
}

/// Frame rate over one report interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frames: u32,
    pub fps: f32,
}

pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times for averaging
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    current_metrics: PerformanceMetrics,
    report_interval: Duration,
    report_start: Option<Instant>,
    frames_since_report: u32,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl PerformanceMonitor {
    pub fn new(report_interval: Duration) -> Self {
        Self::with_config(120, report_interval)
    }

    pub fn with_config(max_samples: usize, report_interval: Duration) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            current_metrics: PerformanceMetrics::default(),
            report_interval,
            report_start: None,
            frames_since_report: 0,
        }
    }

    /// Adds one frame sample; returns a report when the interval has elapsed
    pub fn record_frame(&mut self, frame_time: Duration, now: Instant) -> Option<FrameReport> {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
        self.update_metrics();

        let start = *self.report_start.get_or_insert(now);
        self.frames_since_report += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.report_interval || elapsed.is_zero() {
            return None;
        }

        let report = FrameReport {
            frames: self.frames_since_report,
            fps: self.frames_since_report as f32 / elapsed.as_secs_f32(),
        };
        self.report_start = Some(now);
        self.frames_since_report = 0;
        Some(report)
    }

    fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time_ms = total_time.as_secs_f32() * 1000.0 / self.frame_times.len() as f32;

        self.current_metrics.frame_time_ms = avg_frame_time_ms;
        self.current_metrics.fps = if avg_frame_time_ms > 0.0 {
            1000.0 / avg_frame_time_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) =
            (self.frame_times.iter().min(), self.frame_times.iter().max())
        {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    pub fn update_render_stats(&mut self, draw_calls: usize, triangles: usize) {
        self.current_metrics.draw_calls = draw_calls;
        self.current_metrics.triangles = triangles;
    }

    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Frame times in milliseconds, oldest first, for graphing
    pub fn get_frame_time_history(&self) -> Vec<f32> {
        self.frame_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    /// Frame statistics section of the overlay
    pub fn render_ui(&self, ui: &imgui::Ui) {
        let metrics = &self.current_metrics;

        ui.text(format!("FPS: {:.1}", metrics.fps));
        ui.same_line();
        ui.text(format!("Frame Time: {:.2}ms", metrics.frame_time_ms));
        ui.text(format!(
            "  Min {:.2}ms / Max {:.2}ms",
            metrics.min_frame_time_ms, metrics.max_frame_time_ms
        ));
        ui.text(format!(
            "Draw Calls: {}  Triangles: {}",
            metrics.draw_calls, metrics.triangles
        ));

        if !self.frame_times.is_empty() {
            let frame_time_history = self.get_frame_time_history();
            ui.plot_lines("##frame_times", &frame_time_history)
                .graph_size([260.0, 50.0])
                .scale_min(0.0)
                .scale_max(50.0) // 50ms max for good visibility
                .build();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::assert_abs_diff_eq;

    #[test]
    fn clock_reports_time_between_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(20));
        assert_abs_diff_eq!(dt, 0.020, epsilon = 1e-6);
        let dt = clock.tick_at(start + Duration::from_millis(50));
        assert_abs_diff_eq!(dt, 0.030, epsilon = 1e-6);
        assert_abs_diff_eq!(clock.elapsed_secs(), 0.050, epsilon = 1e-6);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(5)), 0.0);
    }

    #[test]
    fn metrics_average_the_window() {
        let start = Instant::now();
        let mut monitor = PerformanceMonitor::with_config(2, Duration::from_secs(10));
        monitor.record_frame(Duration::from_millis(40), start);
        monitor.record_frame(Duration::from_millis(10), start);
        monitor.record_frame(Duration::from_millis(30), start);

        let metrics = monitor.get_metrics();
        assert_abs_diff_eq!(metrics.frame_time_ms, 20.0, epsilon = 1e-3);
        assert_abs_diff_eq!(metrics.fps, 50.0, epsilon = 1e-2);
        assert_abs_diff_eq!(metrics.min_frame_time_ms, 10.0, epsilon = 1e-3);
        assert_eq!(monitor.get_frame_time_history().len(), 2);
    }

    #[test]
    fn reports_once_per_interval() {
        let start = Instant::now();
        let mut monitor = PerformanceMonitor::new(Duration::from_secs(1));
        let frame = Duration::from_millis(100);

        let reports: Vec<FrameReport> = (0..=25)
            .filter_map(|i| monitor.record_frame(frame, start + frame * i))
            .collect();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].frames, 11);
        assert_abs_diff_eq!(reports[0].fps, 11.0, epsilon = 1e-3);
    }
}
