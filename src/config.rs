use std::env;

pub const DEFAULT_CELL_PX: u32 = 20;
pub const MAX_CELL_PX: u32 = 100;
pub const MIN_SIDE: u32 = 1;
pub const MAX_SIDE: u32 = 100;

/// Runtime knobs read from the environment. CLI flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Side length in pixels of one grid position in exported images.
    pub cell_px: u32,
    pub seed: Option<u64>,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_px: DEFAULT_CELL_PX,
            seed: None,
            color: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let cell_px = lookup("MAZE_CELL_PX")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| (1..=MAX_CELL_PX).contains(v))
            .unwrap_or(DEFAULT_CELL_PX);
        let seed = lookup("MAZE_SEED").and_then(|v| v.parse::<u64>().ok());
        let color = lookup("MAZE_COLOR").map_or(true, |v| v != "0");
        Self {
            cell_px,
            seed,
            color,
        }
    }
}

pub fn side_in_range(side: u32) -> bool {
    (MIN_SIDE..=MAX_SIDE).contains(&side)
}
