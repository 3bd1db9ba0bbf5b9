use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;

/// Points at or nearer than this depth are dropped.
pub const NEAR_PLANE: f32 = 0.1;
/// Fraction of the viewport height used as the focal length.
pub const FOCAL_SCALE: f32 = 0.63;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
}

/// Fixed-path camera: the scene spins under it around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub dist: f32,
    pub height: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn new(dist: f32, height: f32, pitch: f32) -> Self {
        Camera {
            dist,
            height,
            pitch,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.cam_dist, config.cam_height, config.pitch)
    }

    /// Camera-space position of a world point after yaw, pitch and the
    /// camera offset. `z` is the depth.
    pub fn to_view(&self, pos: Vec3, angle: f32) -> Vec3 {
        let (sin_a, cos_a) = angle.sin_cos();
        let x = pos.x * cos_a - pos.z * sin_a;
        let z = pos.x * sin_a + pos.z * cos_a;

        let (sin_p, cos_p) = self.pitch.sin_cos();
        let y = pos.y * cos_p - z * sin_p;
        let z = pos.y * sin_p + z * cos_p;

        Vec3::new(x, y - self.height, z + self.dist)
    }

    pub fn to_screen(&self, pos: Vec3, angle: f32, viewport: Viewport) -> Option<ScreenPoint> {
        let view = self.to_view(pos, angle);
        if view.z <= NEAR_PLANE {
            return None;
        }

        let width = viewport.width as f32;
        let height = viewport.height as f32;
        let scale = height * FOCAL_SCALE / view.z;
        Some(ScreenPoint {
            x: (width / 2. + view.x * scale).floor() as i32,
            y: (height / 2. - view.y * scale).floor() as i32,
            depth: view.z,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;
    use std::f32::consts::FRAC_PI_2;

    const VIEW: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    #[test]
    fn tree_apex_lands_on_the_centre_column() {
        let camera = Camera::default();
        let p = camera.to_screen(vec3(0., 12., 0.), 0., VIEW).unwrap();

        let (sin_p, cos_p) = (-0.25f32).sin_cos();
        let depth = 12. * sin_p + 13.;
        let y = 12. * cos_p - 6.;
        let expected_y = (300. - y * 600. * 0.63 / depth).floor() as i32;

        assert_eq!(p.x, 400);
        assert_eq!(p.y, expected_y);
        assert!((p.y - 87).abs() <= 1, "apex at {}", p.y);
        assert!((p.depth - depth).abs() < 1e-4);
    }

    #[test]
    fn points_behind_the_camera_are_dropped() {
        let camera = Camera::default();
        assert!(camera.to_screen(vec3(0., 0., -14.), 0., VIEW).is_none());
        assert!(camera.to_screen(vec3(0., 0., -30.), 0., VIEW).is_none());

        let flat = Camera::new(13., 6., 0.);
        // just inside the near plane
        assert!(flat.to_screen(vec3(0., 0., -12.95), 0., VIEW).is_none());
        assert!(flat.to_screen(vec3(0., 0., -12.8), 0., VIEW).is_some());
    }

    #[test]
    fn yaw_spins_around_the_vertical_axis() {
        let camera = Camera::new(13., 0., 0.);
        let view = camera.to_view(vec3(1., 0., 0.), FRAC_PI_2);
        assert!(view.x.abs() < 1e-6);
        assert!((view.z - 14.).abs() < 1e-5);
    }

    #[test]
    fn nearer_points_spread_further_from_centre() {
        let camera = Camera::default();
        let near = camera.to_screen(vec3(2., 0., -5.), 0., VIEW).unwrap();
        let far = camera.to_screen(vec3(2., 0., 5.), 0., VIEW).unwrap();
        assert!(near.depth < far.depth);
        assert!(near.x > far.x);
    }

    #[test]
    fn viewport_bounds_are_half_open() {
        assert!(VIEW.contains(0, 0));
        assert!(VIEW.contains(799, 599));
        assert!(!VIEW.contains(800, 10));
        assert!(!VIEW.contains(-1, 10));
    }
}
