//! Scene configuration. Defaults reproduce the stock animation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::points::Rgb;

pub const DEFAULT_TREE_POINTS: usize = 50_000;
pub const DEFAULT_GROUND_POINTS: usize = 4_000;
pub const DEFAULT_STAR_POINTS: usize = 1_200;
pub const DEFAULT_HEART_POINTS: usize = 1_000;
pub const DEFAULT_SNOW_COUNT: usize = 10;

pub const DEFAULT_CAM_DIST: f32 = 13.0;
pub const DEFAULT_CAM_HEIGHT: f32 = 6.0;
pub const DEFAULT_PITCH: f32 = -0.25;
pub const DEFAULT_TREE_HEIGHT: f32 = 12.0;

/// Radians per frame.
pub const DEFAULT_ROTATION_SPEED: f32 = 0.0045;
/// Seconds.
pub const DEFAULT_MAX_FRAME_DT: f32 = 0.1;
pub const DEFAULT_HEART_ATTEMPTS_PER_POINT: usize = 200;

const OVERLAY_FONT: &str = r#"45px "PingFang SC", "Microsoft YaHei", sans-serif"#;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RotationMode {
    /// Fixed increment every frame, whatever the frame took.
    #[default]
    PerFrame,
    /// Increment scaled by `dt * 60`: same speed as `PerFrame` at 60 fps.
    TimeScaled,
}

impl RotationMode {
    pub fn advance(self, speed: f32, dt: f32) -> f32 {
        match self {
            RotationMode::PerFrame => speed,
            RotationMode::TimeScaled => speed * dt * 60.,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayText {
    pub text: String,
    pub x: f32,
    /// Vertical anchor as a fraction of the viewport height.
    pub y_fraction: f32,
    pub y_offset: f32,
    pub font: String,
    pub color: Rgb,
}

impl OverlayText {
    pub fn new(text: &str, y_offset: f32) -> Self {
        Self {
            text: text.into(),
            x: 40.,
            y_fraction: 1. / 3.,
            y_offset,
            font: OVERLAY_FONT.into(),
            color: Rgb::WHITE,
        }
    }

    pub fn y(&self, viewport_height: f32) -> f32 {
        viewport_height * self.y_fraction + self.y_offset
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub tree_points: usize,
    pub ground_points: usize,
    pub star_points: usize,
    pub heart_points: usize,
    pub snow_count: usize,
    pub cam_dist: f32,
    pub cam_height: f32,
    pub pitch: f32,
    pub tree_height: f32,
    pub rotation_speed: f32,
    pub rotation_mode: RotationMode,
    pub max_frame_dt: f32,
    pub heart_attempts_per_point: usize,
    pub overlay: Vec<OverlayText>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree_points: DEFAULT_TREE_POINTS,
            ground_points: DEFAULT_GROUND_POINTS,
            star_points: DEFAULT_STAR_POINTS,
            heart_points: DEFAULT_HEART_POINTS,
            snow_count: DEFAULT_SNOW_COUNT,
            cam_dist: DEFAULT_CAM_DIST,
            cam_height: DEFAULT_CAM_HEIGHT,
            pitch: DEFAULT_PITCH,
            tree_height: DEFAULT_TREE_HEIGHT,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            rotation_mode: RotationMode::default(),
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
            heart_attempts_per_point: DEFAULT_HEART_ATTEMPTS_PER_POINT,
            overlay: vec![
                OverlayText::new("Merry Christmas", 0.),
                OverlayText::new("Happy Holidays", 60.),
            ],
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tree_height.is_finite() || self.tree_height <= 0. {
            return Err(ConfigError::InvalidTreeHeight(self.tree_height));
        }
        for (name, value) in [
            ("cam_dist", self.cam_dist),
            ("cam_height", self.cam_height),
            ("pitch", self.pitch),
            ("rotation_speed", self.rotation_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteCamera(name));
            }
        }
        if !(self.max_frame_dt > 0.) {
            return Err(ConfigError::InvalidMaxFrameDt(self.max_frame_dt));
        }
        if self.heart_points > 0 && self.heart_attempts_per_point == 0 {
            return Err(ConfigError::ZeroHeartAttempts);
        }
        Ok(())
    }

    pub fn total_static_points(&self) -> usize {
        self.tree_points + self.ground_points + self.star_points + self.heart_points
    }
}
