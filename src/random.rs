//! Sampling helpers shared by every point generator.

use std::f32::consts::TAU;

use rand::Rng;

/// Uniform sample in `[min, max)`. Collapses to `min` for an empty range.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if !(min < max) {
        return min;
    }
    rng.gen_range(min..max)
}

/// Uniform sample in `[0, max)`.
pub fn uniform_to<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    uniform(rng, 0., max)
}

/// Integer sample in `[min, max]`, both ends inclusive.
pub fn uniform_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Angle in `[0, 2π)`.
pub fn angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    uniform_to(rng, TAU)
}

/// Normal sample through Box-Muller.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f32, stddev: f32) -> f32 {
    let u = nonzero_unit(rng);
    let v = nonzero_unit(rng);
    let z = (-2.0 * u.ln()).sqrt() * (TAU * v).cos();
    z * stddev + mean
}

// ln(0) is -inf, so zero draws are thrown away
fn nonzero_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    loop {
        let u = rng.gen::<f32>();
        if u != 0. {
            return u;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::{mock::StepRng, StdRng};
    use rand::SeedableRng;

    #[test]
    fn uniform_stays_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = uniform(&mut rng, -0.22, 0.22);
            assert!((-0.22..0.22).contains(&v));
            let w = uniform_to(&mut rng, 5.);
            assert!((0. ..5.).contains(&w));
        }
    }

    #[test]
    fn uniform_excludes_max_at_the_top_draw() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let v = uniform(&mut rng, 10., 16.);
        assert!((10. ..16.).contains(&v), "{v}");
        assert!(uniform(&mut rng, 0., 800.) < 800.);
        assert_eq!(uniform(&mut rng, 3., 3.), 3.);
        assert_eq!(uniform(&mut rng, 5., 1.), 5.);
    }

    #[test]
    fn uniform_int_hits_both_ends() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 6];
        for _ in 0..5_000 {
            let v = uniform_int(&mut rng, 10, 15);
            assert!((10..=15).contains(&v));
            seen[(v - 10) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert_eq!(uniform_int(&mut rng, 3, 3), 3);
    }

    #[test]
    fn gaussian_is_centred_on_mean() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = 20_000;
        let samples: Vec<f32> = (0..n).map(|_| gaussian(&mut rng, 6.0, 0.3)).collect();
        let mean = samples.iter().sum::<f32>() / n as f32;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n as f32;
        assert!(samples.iter().all(|s| s.is_finite()));
        assert!((mean - 6.0).abs() < 0.02, "mean {mean}");
        assert!((var.sqrt() - 0.3).abs() < 0.02, "stddev {}", var.sqrt());
    }
}
