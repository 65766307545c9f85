//! Game configuration and startup validation.
//!
//! Configuration is read once from environment variables and validated
//! eagerly. Anything the simulation cannot run with is a [`ConfigError`].

use thiserror::Error;

use crate::types::{Color, PieceKind, DEFAULT_DROP_INTERVAL_FRAMES};

/// Fatal startup misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("drop interval must be at least one frame")]
    ZeroDropInterval,

    #[error("invalid value {value:?} for {var}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("piece {kind:?} has no rotation states")]
    EmptyRotationTable { kind: PieceKind },

    #[error("piece {kind:?} rotation {rotation} has no filled cells")]
    EmptyShape { kind: PieceKind, rotation: usize },

    #[error("piece {kind:?} rotation {rotation} is not rectangular")]
    RaggedShape { kind: PieceKind, rotation: usize },

    #[error("piece {kind:?} rotation {rotation} is {width} cells wide, wider than the board")]
    ShapeTooWide {
        kind: PieceKind,
        rotation: usize,
        width: u8,
    },

    #[error("piece {kind:?} rotation {rotation} contains {color:?}, expected {:?}", .kind.color())]
    WrongColor {
        kind: PieceKind,
        rotation: usize,
        color: Color,
    },
}

/// What the engine does when a freshly promoted piece is blocked at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockedPolicy {
    /// Clear the board in place and keep playing with the same piece.
    #[default]
    Reset,
    /// Leave the board as is and stop advancing until restarted.
    Halt,
}

impl BlockedPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reset" => Some(BlockedPolicy::Reset),
            "halt" | "stop" => Some(BlockedPolicy::Halt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockedPolicy::Reset => "reset",
            BlockedPolicy::Halt => "halt",
        }
    }
}

/// Simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Frames between automatic one-row descents.
    pub drop_interval: u32,
    /// Seed for the piece generator; `None` lets the caller pick one.
    pub seed: Option<u32>,
    pub on_blocked: BlockedPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            drop_interval: DEFAULT_DROP_INTERVAL_FRAMES,
            seed: None,
            on_blocked: BlockedPolicy::Reset,
        }
    }
}

pub const DROP_INTERVAL_VAR: &str = "BLOCKFALL_DROP_INTERVAL";
pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const ON_BLOCKED_VAR: &str = "BLOCKFALL_ON_BLOCKED";

impl GameConfig {
    /// Create from environment variables.
    ///
    /// - `BLOCKFALL_DROP_INTERVAL`: frames per gravity step (default 60)
    /// - `BLOCKFALL_SEED`: piece generator seed (default: unset)
    /// - `BLOCKFALL_ON_BLOCKED`: `reset` or `halt` (default `reset`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = get(DROP_INTERVAL_VAR) {
            config.drop_interval = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: DROP_INTERVAL_VAR,
                value,
                expected: "a positive frame count",
            })?;
        }

        if let Some(value) = get(SEED_VAR) {
            config.seed = Some(value.parse().map_err(|_| ConfigError::InvalidValue {
                var: SEED_VAR,
                value,
                expected: "an unsigned 32-bit integer",
            })?);
        }

        if let Some(value) = get(ON_BLOCKED_VAR) {
            config.on_blocked =
                BlockedPolicy::from_str(&value).ok_or(ConfigError::InvalidValue {
                    var: ON_BLOCKED_VAR,
                    value,
                    expected: "`reset` or `halt`",
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drop_interval == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        Ok(())
    }

    pub fn with_drop_interval(mut self, frames: u32) -> Self {
        self.drop_interval = frames;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_on_blocked(mut self, policy: BlockedPolicy) -> Self {
        self.on_blocked = policy;
        self
    }
}
