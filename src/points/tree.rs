use std::f32::consts::TAU;

use super::*;

const SPIRAL_SHARE: f32 = 0.7;
const SPIRAL_LOOPS: f32 = 9.;
const BASE_OFFSET: f32 = 0.2;

/// Radius multiplier producing the tiered branch bulges.
pub fn branch_factor(h: f32) -> f32 {
    let wave = ((h * 5.8 + 0.15) * TAU).sin().max(0.);
    1. + 0.65 * wave
}

fn base_radius(h: f32, k: f32) -> f32 {
    (1. - h).powf(1.1) * k * branch_factor(h)
}

/// Mid-tree brightness boost, floor at 0.15.
fn mid_boost(h: f32) -> f32 {
    (1. - (h - 0.55).abs() * 1.5).max(0.15)
}

pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, height: f32) -> Vec<Point3D> {
    let spiral_n = (count as f32 * SPIRAL_SHARE).floor() as usize;
    let fill_n = count - spiral_n;

    let mut points = Vec::with_capacity(count);
    points.extend((0..spiral_n).map(|_| spiral_point(rng, height)));
    points.extend((0..fill_n).map(|_| fill_point(rng, height)));
    points
}

fn spiral_point<R: Rng + ?Sized>(rng: &mut R, height: f32) -> Point3D {
    let u: f32 = rng.gen();
    let h = u.powf(1.6);
    let y = height * h + BASE_OFFSET;

    let angle = u * SPIRAL_LOOPS * TAU + uniform(rng, -0.22, 0.22);
    let r = base_radius(h, 3.2) * uniform(rng, 0.85, 1.08);

    let boost = mid_boost(h);
    let base_g = 155 + (90. * boost).floor() as i32;
    let base_b = 185 + (70. * boost).floor() as i32;
    let mut g = (base_g + uniform_int(rng, -15, 20)).min(255);
    let mut b = (base_b + uniform_int(rng, -15, 35)).min(255);

    // sparkle
    if rng.gen_bool(0.08) {
        g = (g + 20).min(255);
        b = (b + 30).min(255);
    }

    Point3D::new(angle.cos() * r, y, angle.sin() * r, Rgb::clamped(255, g, b))
}

fn fill_point<R: Rng + ?Sized>(rng: &mut R, height: f32) -> Point3D {
    let h = rng.gen::<f32>().powf(1.9);
    let y = height * h + BASE_OFFSET + uniform(rng, -0.08, 0.08);

    // sqrt keeps the disk area-uniform
    let r = base_radius(h, 4.3) * rng.gen::<f32>().sqrt();
    let theta = angle(rng);

    let x = theta.cos() * r + uniform(rng, -0.08, 0.08);
    let z = theta.sin() * r + uniform(rng, -0.08, 0.08);

    let g = uniform_int(rng, 165, 225);
    let b = uniform_int(rng, 190, 250);
    Point3D::new(x, y, z, Rgb::clamped(255, g, b))
}
