//! Per-frame scene state and the simulate / render split.

use std::f32::consts::TAU;

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::camera::{Camera, Viewport};
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::points::{Rgb, StaticPoints};
use crate::snow::SnowSystem;
use crate::surface::{DrawCommand, Surface};

/// A static point after projection, valid for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub depth: f32,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub color: Rgb,
}

/// Near points are drawn larger.
pub fn point_radius(depth: f32) -> i32 {
    ((3.6 - depth * 0.13).floor() as i32).max(1)
}

/// Painter's order: farthest first.
pub fn sort_back_to_front(points: &mut [ProjectedPoint]) {
    points.sort_unstable_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Turns host timestamps into frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick, unclamped. The first tick is 0.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.) as f32,
            None => 0.,
        };
        self.last_timestamp = Some(timestamp_ms);
        dt
    }
}

/// Keeps a suspended/resumed host from making the snow jump.
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0. {
        warn!("Discarding invalid frame dt {dt}");
        return 0.;
    }
    if dt > max_dt {
        warn!("Clamping frame dt {dt} to {max_dt}");
        return max_dt;
    }
    dt
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub projected: usize,
    pub drawn: usize,
    pub culled_offscreen: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RenderedFrame {
    pub commands: Vec<DrawCommand>,
    pub stats: FrameStats,
}

pub struct SceneState {
    config: SceneConfig,
    camera: Camera,
    viewport: Viewport,
    points: StaticPoints,
    snow: SnowSystem,
    rotation_angle: f32,
    clock: FrameClock,
    rng: StdRng,
}

impl SceneState {
    pub fn new(config: SceneConfig, viewport: Viewport) -> Result<Self, SceneError> {
        Self::with_rng(config, viewport, StdRng::from_entropy())
    }

    pub fn with_seed(config: SceneConfig, viewport: Viewport, seed: u64) -> Result<Self, SceneError> {
        Self::with_rng(config, viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: SceneConfig,
        viewport: Viewport,
        mut rng: StdRng,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let points = StaticPoints::generate(&config, &mut rng)?;
        let scene = Self::assemble(config, viewport, points, rng);
        info!(
            "Scene ready: {} static points, {} snowflakes, {}x{}",
            scene.points.len(),
            scene.snow.flakes().len(),
            viewport.width,
            viewport.height
        );
        Ok(scene)
    }

    /// A scene over caller-supplied points instead of the generated shapes.
    pub fn with_points(
        config: SceneConfig,
        viewport: Viewport,
        points: StaticPoints,
        seed: u64,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        Ok(Self::assemble(
            config,
            viewport,
            points,
            StdRng::seed_from_u64(seed),
        ))
    }

    fn assemble(
        config: SceneConfig,
        viewport: Viewport,
        points: StaticPoints,
        mut rng: StdRng,
    ) -> Self {
        let snow = SnowSystem::new(config.snow_count, viewport, &mut rng);
        Self {
            camera: Camera::from_config(&config),
            config,
            viewport,
            points,
            snow,
            rotation_angle: 0.,
            clock: FrameClock::new(),
            rng,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn points(&self) -> &StaticPoints {
        &self.points
    }

    pub fn snow(&self) -> &SnowSystem {
        &self.snow
    }

    pub fn snow_mut(&mut self) -> &mut SnowSystem {
        &mut self.snow
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            info!(
                "Viewport resized to {}x{}",
                viewport.width, viewport.height
            );
            self.viewport = viewport;
        }
    }

    pub fn advance_snow(&mut self, dt: f32) {
        self.snow.update(dt, self.viewport, &mut self.rng);
    }

    pub fn advance_rotation(&mut self, dt: f32) {
        let delta = self
            .config
            .rotation_mode
            .advance(self.config.rotation_speed, dt);
        self.rotation_angle = (self.rotation_angle + delta).rem_euclid(TAU);
    }

    /// Simulation only: snow then rotation.
    pub fn step(&mut self, dt: f32) {
        let dt = clamp_dt(dt, self.config.max_frame_dt);
        self.advance_snow(dt);
        self.advance_rotation(dt);
    }

    /// Every visible static point at the current angle, unsorted.
    pub fn project_points(&self) -> Vec<ProjectedPoint> {
        self.points
            .iter()
            .filter_map(|point| {
                let screen =
                    self.camera
                        .to_screen(point.position, self.rotation_angle, self.viewport)?;
                Some(ProjectedPoint {
                    depth: screen.depth,
                    x: screen.x,
                    y: screen.y,
                    radius: point_radius(screen.depth),
                    color: point.color,
                })
            })
            .collect()
    }

    /// Draw commands for the current state. Does not advance anything.
    pub fn render(&self) -> RenderedFrame {
        let mut draw_list = self.project_points();
        sort_back_to_front(&mut draw_list);

        let mut stats = FrameStats {
            projected: draw_list.len(),
            ..FrameStats::default()
        };

        let mut commands = Vec::with_capacity(draw_list.len() + self.config.overlay.len() + 1);
        commands.push(DrawCommand::Clear(Rgb::BLACK));

        for p in &draw_list {
            if !self.viewport.contains(p.x, p.y) {
                stats.culled_offscreen += 1;
                continue;
            }
            commands.push(DrawCommand::FillCircle {
                x: p.x,
                y: p.y,
                radius: p.radius,
                color: p.color,
                alpha: 255,
            });
            stats.drawn += 1;
        }

        let height = self.viewport.height as f32;
        commands.extend(self.config.overlay.iter().map(|line| DrawCommand::FillText {
            text: line.text.clone(),
            x: line.x,
            y: line.y(height),
            font: line.font.clone(),
            color: line.color,
        }));

        commands.extend(self.snow.draw());

        RenderedFrame { commands, stats }
    }

    /// One full tick: snow, render at the current angle, then rotate.
    pub fn tick(&mut self, dt: f32) -> RenderedFrame {
        let dt = clamp_dt(dt, self.config.max_frame_dt);
        self.advance_snow(dt);
        let frame = self.render();
        self.advance_rotation(dt);
        frame
    }

    /// Host entry point: derives dt from the timestamp and paints the frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, timestamp_ms: f64, surface: &mut S) -> FrameStats {
        let surface_viewport = surface.viewport();
        self.resize(surface_viewport);

        let dt = self.clock.tick(timestamp_ms);
        let frame = self.tick(dt);
        surface.execute(&frame.commands);
        debug!(
            "Frame at {timestamp_ms}ms: {} drawn, {} offscreen",
            frame.stats.drawn, frame.stats.culled_offscreen
        );
        frame.stats
    }
}
