use super::*;

pub const RING_RADII: [f32; 6] = [4.6, 6.0, 7.4, 8.8, 10.2, 11.4];
const RING_SPREAD: f32 = 0.3;
const GROUND_Y: f32 = -0.25;

pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Point3D> {
    (0..count)
        .map(|_| {
            let ring = RING_RADII[rng.gen_range(0..RING_RADII.len())];
            let r = gaussian(rng, ring, RING_SPREAD);
            let theta = angle(rng);

            let c = if rng.gen_bool(0.15) {
                uniform_int(rng, 235, 255)
            } else {
                uniform_int(rng, 190, 235)
            };

            Point3D::new(
                theta.cos() * r,
                GROUND_Y,
                theta.sin() * r,
                Rgb::clamped(c, c, 255),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn points_lie_flat_near_a_ring() {
        let mut rng = StdRng::seed_from_u64(21);
        let points = generate(&mut rng, 4_000);
        assert_eq!(points.len(), 4_000);
        for p in &points {
            assert_eq!(p.position.y, GROUND_Y);
            let radial = (p.position.x.powi(2) + p.position.z.powi(2)).sqrt();
            let nearest = RING_RADII
                .iter()
                .map(|ring| (ring - radial).abs())
                .fold(f32::INFINITY, f32::min);
            // 3 sigma is 0.9, leave room for tails
            assert!(nearest < 2.0, "radial {radial}");
        }
    }

    #[test]
    fn colours_are_bluish_white() {
        let mut rng = StdRng::seed_from_u64(22);
        for p in generate(&mut rng, 2_000) {
            assert_eq!(p.color.r, p.color.g);
            assert_eq!(p.color.b, 255);
            assert!(p.color.r >= 190);
        }
    }

    #[test]
    fn about_one_in_seven_is_bright() {
        let mut rng = StdRng::seed_from_u64(23);
        let n = 20_000;
        let points = generate(&mut rng, n);
        for p in &points {
            for c in [p.color.r, p.color.g, p.color.b] {
                assert!(c >= 190);
            }
        }
        // only the bright branch reaches past 235; it lands on 235 itself 1 time in 21
        let bright = points.iter().filter(|p| p.color.r > 235).count();
        let share = bright as f32 / n as f32;
        let expected = 0.15 * 20. / 21.;
        assert!((share - expected).abs() < 0.015, "bright share {share}");
    }
}
