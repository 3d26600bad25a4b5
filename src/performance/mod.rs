//! # Performance Metrics System
//!
//! Frame-time statistics and scene counts for the on-screen overlay.
//!
//! ## Usage
//!
//! ```no_run
//! use courtside::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//!
//! // In your main loop
//! monitor.begin_frame();
//! // ... render frame ...
//! monitor.end_frame();
//!
//! println!("{:.1} fps", monitor.get_metrics().fps);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Performance metrics shown in the overlay
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
    /// Mesh nodes submitted in the last frame
    pub draw_calls: u32,
    /// Vertices across all submitted meshes
    pub vertex_count: u32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: f32::MAX,
            max_frame_time_ms: 0.0,
            draw_calls: 0,
            vertex_count: 0,
        }
    }
}

/// How often the displayed numbers are recomputed
const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Rolling frame-time window plus the latest scene counts
pub struct PerformanceMonitor {
    samples: VecDeque<Duration>,
    max_samples: usize,
    frame_start: Option<Instant>,
    metrics: PerformanceMetrics,
    last_refresh: Instant,
}

impl PerformanceMonitor {
    /// Averages over the last 120 frames, two seconds at 60 fps
    pub fn new() -> Self {
        Self::with_config(120)
    }

    pub fn with_config(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
            frame_start: None,
            metrics: PerformanceMetrics::default(),
            last_refresh: Instant::now(),
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Records the time since `begin_frame`; without one this is a no-op
    pub fn end_frame(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.record_frame(start.elapsed());
        }
    }

    /// Adds a frame time sample and refreshes the metrics at most 10 times per second
    pub fn record_frame(&mut self, frame_time: Duration) {
        if self.samples.len() == self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time);

        if self.last_refresh.elapsed() >= REFRESH_INTERVAL {
            self.refresh();
            self.last_refresh = Instant::now();
        }
    }

    fn refresh(&mut self) {
        let Some(summary) = FrameSummary::of(&self.samples) else {
            return;
        };
        self.metrics.frame_time_ms = summary.mean_ms;
        self.metrics.fps = if summary.mean_ms > 0.0 {
            1000.0 / summary.mean_ms
        } else {
            0.0
        };
        self.metrics.min_frame_time_ms = summary.min_ms;
        self.metrics.max_frame_time_ms = summary.max_ms;
    }

    /// Update render statistics
    pub fn update_render_stats(&mut self, draw_calls: u32, vertex_count: u32) {
        self.metrics.draw_calls = draw_calls;
        self.metrics.vertex_count = vertex_count;
    }

    /// Get current performance metrics
    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    /// Get frame time history for graphing
    pub fn get_frame_time_history(&self) -> Vec<f32> {
        self.samples
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        self.samples.clear();
        self.metrics = PerformanceMetrics::default();
        self.frame_start = None;
        self.last_refresh = Instant::now();
    }

    /// Frame statistics and history graph, drawn inside the current window
    pub fn render_section(&self, ui: &imgui::Ui) {
        let metrics = &self.metrics;

        ui.text(format!("FPS: {:.1}", metrics.fps));
        ui.same_line();
        ui.text(format!("Frame Time: {:.2}ms", metrics.frame_time_ms));
        if metrics.min_frame_time_ms <= metrics.max_frame_time_ms {
            ui.text(format!(
                "  Min: {:.2}ms  Max: {:.2}ms",
                metrics.min_frame_time_ms, metrics.max_frame_time_ms
            ));
        }
        ui.text(format!("Draw Calls: {}", metrics.draw_calls));
        ui.text(format!("Vertices: {}", metrics.vertex_count));

        if !self.samples.is_empty() {
            let frame_time_history = self.get_frame_time_history();
            ui.plot_lines("##frame_times", &frame_time_history)
                .graph_size([260.0, 60.0])
                .scale_min(0.0)
                .scale_max(50.0)
                .build();
        }
    }
}

/// Mean, fastest and slowest frame of a sample window, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
struct FrameSummary {
    mean_ms: f32,
    min_ms: f32,
    max_ms: f32,
}

impl FrameSummary {
    fn of(samples: &VecDeque<Duration>) -> Option<Self> {
        let min = samples.iter().min()?;
        let max = samples.iter().max()?;
        let total: Duration = samples.iter().sum();
        let mean = total / samples.len() as u32;

        Some(Self {
            mean_ms: mean.as_secs_f32() * 1000.0,
            min_ms: min.as_secs_f32() * 1000.0,
            max_ms: max.as_secs_f32() * 1000.0,
        })
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}
