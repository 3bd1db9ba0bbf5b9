//! Foreground 2D snow. Screen-space flakes that fall, fade out and
//! respawn above the viewport. The flake count never changes.

use rand::Rng;

use crate::camera::Viewport;
use crate::points::Rgb;
use crate::random::uniform;
use crate::surface::DrawCommand;

const SPAWN_MIN_Y: f32 = -80.;
const SPAWN_MAX_Y: f32 = -10.;
/// Flakes further than this below the bottom edge respawn.
const BOTTOM_MARGIN: f32 = 50.;
/// Extra distance past the bottom edge used to size a flake's life.
const TRAVEL_MARGIN: f32 = 80.;
/// Remaining-life fraction below which a flake fades out.
const FADE_PHASE: f32 = 0.3;

/// Outer halo to bright core: (radius factor, alpha divisor).
const GLOW_LAYERS: [(f32, u16); 5] = [(1.3, 20), (1.0, 12), (0.75, 6), (0.55, 3), (0.45, 1)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub fall_speed: f32,
    pub remaining_life: f32,
    pub max_life: f32,
}

impl Snowflake {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        let x = uniform(rng, 0., viewport.width as f32);
        let y = uniform(rng, SPAWN_MIN_Y, SPAWN_MAX_Y);
        let radius = uniform(rng, 10., 16.);
        let fall_speed = uniform(rng, 30., 45.);

        let travel = viewport.height as f32 + TRAVEL_MARGIN - y;
        let life = travel / fall_speed;
        Self {
            x,
            y,
            radius,
            fall_speed,
            remaining_life: life,
            max_life: life,
        }
    }

    pub fn expired(&self, viewport: Viewport) -> bool {
        self.remaining_life <= 0. || self.y > viewport.height as f32 + BOTTOM_MARGIN
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, viewport: Viewport, rng: &mut R) {
        self.y += self.fall_speed * dt;
        self.remaining_life -= dt;
        if self.expired(viewport) {
            *self = Self::spawn(rng, viewport);
        }
    }

    /// Opacity in `[0, 255]`: opaque until the last 30% of life.
    pub fn alpha(&self) -> u8 {
        if self.max_life <= 0. {
            return 0;
        }
        let phase = self.remaining_life / self.max_life;
        if phase > FADE_PHASE {
            255
        } else {
            (255. * (phase / FADE_PHASE)).floor().clamp(0., 255.) as u8
        }
    }

    pub fn draw(&self) -> Vec<DrawCommand> {
        if self.max_life <= 0. {
            return vec![];
        }
        let alpha = self.alpha() as u16;
        let cx = self.x.floor() as i32;
        let cy = self.y.floor() as i32;

        let last = GLOW_LAYERS.len() - 1;
        GLOW_LAYERS
            .iter()
            .enumerate()
            .filter_map(|(i, &(factor, divisor))| {
                let layer_alpha = (alpha / divisor) as u8;
                // halo layers vanish when faded out, the core is always drawn
                if layer_alpha == 0 && i != last {
                    return None;
                }
                Some(DrawCommand::FillCircle {
                    x: cx,
                    y: cy,
                    radius: ((self.radius * factor).floor() as i32).max(1),
                    color: Rgb::WHITE,
                    alpha: layer_alpha,
                })
            })
            .collect()
    }
}

pub struct SnowSystem {
    flakes: Vec<Snowflake>,
}

impl SnowSystem {
    pub fn new<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Self {
        Self {
            flakes: (0..count).map(|_| Snowflake::spawn(rng, viewport)).collect(),
        }
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn flakes_mut(&mut self) -> &mut [Snowflake] {
        &mut self.flakes
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, viewport: Viewport, rng: &mut R) {
        for flake in &mut self.flakes {
            flake.update(dt, viewport, rng);
        }
    }

    pub fn draw(&self) -> Vec<DrawCommand> {
        self.flakes.iter().flat_map(Snowflake::draw).collect()
    }
}
