//! Native host: a frame clock driving the scene into a software canvas.

use std::time::Duration;

use log::info;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::camera::Viewport;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::scene::{FrameStats, SceneState};
use crate::surface::PixelSurface;

/// Synthetic frame spacing when not running against the wall clock.
const FIXED_FRAME_MS: f64 = 16.;
const STATS_INTERVAL: u64 = 60;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: SceneConfig,
    pub viewport: Viewport,
    pub frames: u64,
    pub seed: Option<u64>,
    /// Pace frames on a wall-clock interval instead of as fast as possible.
    pub realtime: bool,
    pub fps: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: SceneConfig::default(),
            viewport: Viewport::new(800, 600),
            frames: 600,
            seed: None,
            realtime: false,
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub last_stats: FrameStats,
    pub lit_pixels: usize,
    pub rotation_angle: f32,
}

pub struct TreeApp {
    scene: SceneState,
    surface: PixelSurface,
    frames: u64,
    last_stats: FrameStats,
}

impl TreeApp {
    pub fn new(options: &RunOptions) -> Result<Self, SceneError> {
        let scene = match options.seed {
            Some(seed) => SceneState::with_seed(options.config.clone(), options.viewport, seed)?,
            None => SceneState::new(options.config.clone(), options.viewport)?,
        };
        Ok(Self {
            scene,
            surface: PixelSurface::new(options.viewport),
            frames: 0,
            last_stats: FrameStats::default(),
        })
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Host resize notification. The scene picks the new size up on the
    /// next frame.
    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
    }

    pub fn frame(&mut self, timestamp_ms: f64) {
        self.last_stats = self.scene.frame(timestamp_ms, &mut self.surface);
        self.frames += 1;

        if self.frames % STATS_INTERVAL == 0 {
            info!(
                "Frame {}: {} points drawn, {} offscreen, angle {:.3}",
                self.frames,
                self.last_stats.drawn,
                self.last_stats.culled_offscreen,
                self.scene.rotation_angle()
            );
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            last_stats: self.last_stats,
            lit_pixels: self.surface.lit_pixels(),
            rotation_angle: self.scene.rotation_angle(),
        }
    }
}

/// Runs `options.frames` ticks, then stops requesting frames.
pub async fn run(options: RunOptions) -> Result<RunSummary, SceneError> {
    let mut app = TreeApp::new(&options)?;

    if options.realtime {
        let period = Duration::from_secs_f64(1. / options.fps.max(1) as f64);
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let start = Instant::now();
        for _ in 0..options.frames {
            let now = interval.tick().await;
            app.frame(now.duration_since(start).as_secs_f64() * 1000.);
        }
    } else {
        for i in 0..options.frames {
            app.frame(i as f64 * FIXED_FRAME_MS);
            if i % STATS_INTERVAL == 0 {
                tokio::task::yield_now().await;
            }
        }
    }

    let summary = app.summary();
    info!(
        "Stopped after {} frames, {} lit pixels",
        summary.frames, summary.lit_pixels
    );
    Ok(summary)
}
