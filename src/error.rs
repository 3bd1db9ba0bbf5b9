use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidTreeHeight(f32),
    NonFiniteCamera(&'static str),
    InvalidMaxFrameDt(f32),
    ZeroHeartAttempts,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTreeHeight(h) => {
                write!(f, "tree height must be positive and finite, got {h}")
            }
            ConfigError::NonFiniteCamera(field) => {
                write!(f, "camera parameter `{field}` is not finite")
            }
            ConfigError::InvalidMaxFrameDt(dt) => {
                write!(f, "max frame dt must be positive, got {dt}")
            }
            ConfigError::ZeroHeartAttempts => {
                write!(f, "heart sampling needs at least one attempt per point")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    Config(ConfigError),
    /// The rejection sampler ran out of attempts. The sampling box is too
    /// tight or the attempt budget too small.
    HeartSamplingExhausted { accepted: usize, attempts: usize },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Config(e) => write!(f, "invalid scene config: {e}"),
            SceneError::HeartSamplingExhausted { accepted, attempts } => write!(
                f,
                "heart sampling gave up after {attempts} attempts with {accepted} points accepted"
            ),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SceneError {
    fn from(e: ConfigError) -> Self {
        SceneError::Config(e)
    }
}
