//! Static point clouds. Generated once at startup, read every frame.

use glam::{vec3, Vec3};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::random::*;

mod ground;
mod heart;
mod star;
mod tree;

pub use heart::{heart_curve, HEART_SAMPLE_X, HEART_SAMPLE_Y};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from unbounded channel math, clamping to `[0, 255]`.
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self::new(c(r), c(g), c(b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub position: Vec3,
    pub color: Rgb,
}

impl Point3D {
    pub fn new(x: f32, y: f32, z: f32, color: Rgb) -> Self {
        Self {
            position: vec3(x, y, z),
            color,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum PointSetKind {
    Tree,
    Ground,
    Star,
    Heart,
}

impl PointSetKind {
    pub fn configured_count(self, config: &SceneConfig) -> usize {
        match self {
            PointSetKind::Tree => config.tree_points,
            PointSetKind::Ground => config.ground_points,
            PointSetKind::Star => config.star_points,
            PointSetKind::Heart => config.heart_points,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PointSet {
    kind: PointSetKind,
    points: Vec<Point3D>,
}

impl PointSet {
    pub fn generate<R: Rng + ?Sized>(
        kind: PointSetKind,
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        let count = kind.configured_count(config);
        let points = match kind {
            PointSetKind::Tree => tree::generate(rng, count, config.tree_height),
            PointSetKind::Ground => ground::generate(rng, count),
            PointSetKind::Star => star::generate(rng, count),
            PointSetKind::Heart => heart::generate(
                rng,
                count,
                config.tree_height,
                count.saturating_mul(config.heart_attempts_per_point),
            )?,
        };
        Ok(Self { kind, points })
    }

    pub fn kind(&self) -> PointSetKind {
        self.kind
    }

    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Every static set in draw-list order: tree, ground, star, heart.
#[derive(Debug, Clone, Default)]
pub struct StaticPoints {
    sets: Vec<PointSet>,
}

impl StaticPoints {
    pub fn generate<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Self, SceneError> {
        use strum::IntoEnumIterator;

        let sets = PointSetKind::iter()
            .map(|kind| PointSet::generate(kind, config, rng))
            .collect::<Result<Vec<_>, _>>()?;

        for set in &sets {
            info!("Generated {} {} points", set.len(), set.kind());
        }
        Ok(Self { sets })
    }

    /// A scene holding exactly the given points, filed under a single set.
    pub fn from_points(kind: PointSetKind, points: Vec<Point3D>) -> Self {
        Self {
            sets: vec![PointSet { kind, points }],
        }
    }

    pub fn sets(&self) -> &[PointSet] {
        &self.sets
    }

    pub fn set(&self, kind: PointSetKind) -> Option<&PointSet> {
        self.sets.iter().find(|set| set.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3D> + '_ {
        self.sets.iter().flat_map(|set| set.points.iter())
    }

    pub fn len(&self) -> usize {
        self.sets.iter().map(PointSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
