pub mod camera;
pub mod config;
pub mod error;
pub mod points;
pub mod random;
pub mod scene;
pub mod snow;
pub mod surface;

pub use camera::{Camera, ScreenPoint, Viewport};
pub use config::{OverlayText, RotationMode, SceneConfig};
pub use error::{ConfigError, SceneError};
pub use points::{Point3D, PointSet, PointSetKind, Rgb, StaticPoints};
pub use scene::{FrameClock, FrameStats, ProjectedPoint, RenderedFrame, SceneState};
pub use snow::{SnowSystem, Snowflake};
pub use surface::{CommandRecorder, DrawCommand, PixelSurface, Surface};

cfg_if::cfg_if! {
    if #[cfg(not(target_arch = "wasm32"))] {
        mod app;
        pub use app::{run, RunOptions, RunSummary, TreeApp};
    }
}
