use super::*;

const SPREAD: f32 = 18.;
const MIN_Y: f32 = 3.;
const MAX_Y: f32 = 18.;

pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Point3D> {
    (0..count)
        .map(|_| {
            let x = uniform(rng, -SPREAD, SPREAD);
            let z = uniform(rng, -SPREAD, SPREAD);
            let y = uniform(rng, MIN_Y, MAX_Y);

            let base = uniform_int(rng, 215, 255);
            Point3D::new(x, y, z, Rgb::clamped(base, base, 255))
        })
        .collect()
}
