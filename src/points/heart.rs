use glam::{vec2, Vec2};
use log::debug;

use super::*;

/// Sampling box in curve space.
pub const HEART_SAMPLE_X: f32 = 1.3;
pub const HEART_SAMPLE_Y: f32 = 1.4;

const SCALE: f32 = 0.9;
const DEPTH_JITTER: f32 = 0.18;

/// `(x² + y² - 1)³ - x²y³`, non-positive inside the heart.
pub fn heart_curve(x: f32, y: f32) -> f32 {
    (x * x + y * y - 1.).powi(3) - x * x * y.powi(3)
}

/// Rejection-samples `count` curve-space points inside the heart.
pub fn sample_curve<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    max_attempts: usize,
) -> Result<Vec<Vec2>, SceneError> {
    let mut accepted = Vec::with_capacity(count);
    let mut attempts = 0;
    while accepted.len() < count {
        if attempts >= max_attempts {
            return Err(SceneError::HeartSamplingExhausted {
                accepted: accepted.len(),
                attempts,
            });
        }
        attempts += 1;

        let x = uniform(rng, -HEART_SAMPLE_X, HEART_SAMPLE_X);
        let y = uniform(rng, -HEART_SAMPLE_Y, HEART_SAMPLE_Y);
        if heart_curve(x, y) <= 0. {
            accepted.push(vec2(x, y));
        }
    }
    debug!("Heart sampling accepted {count} points in {attempts} attempts");
    Ok(accepted)
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    tree_height: f32,
    max_attempts: usize,
) -> Result<Vec<Point3D>, SceneError> {
    let top_y = tree_height + 0.05;

    let points = sample_curve(rng, count, max_attempts)?
        .into_iter()
        .map(|p| {
            let wx = p.x * SCALE * 0.8;
            let wy = top_y + (p.y + 1.) * SCALE * 0.5;
            let wz = uniform(rng, -DEPTH_JITTER, DEPTH_JITTER);
            Point3D::new(wx, wy, wz, heart_color(p.length()))
        })
        .collect();
    Ok(points)
}

/// Brighter towards the centre of the curve.
fn heart_color(dist: f32) -> Rgb {
    let factor = (1.15 - 0.5 * dist).max(0.35);
    let g = ((130. * factor + 80.).floor() as i32).clamp(120, 255);
    let b = ((190. * factor + 70.).floor() as i32).clamp(120, 255);
    Rgb::clamped(255, g, b)
}
