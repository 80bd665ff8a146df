//! Runner configuration
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional JSON file (`--config`), then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::rng::{RandomSource, SimpleRng, ThreadRandom};
use crate::core::{ControlScheme, Rules, SessionConfig, SpawnCollisionPolicy};
use crate::types::{
    GameAction, DEFAULT_COLS, DEFAULT_DROP_INTERVAL_MS, DEFAULT_ROWS, MAX_WELL_DIM,
    TOUCH_THRESHOLD_PX,
};

/// Which set of actions is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ControlsPreset {
    /// All actions except clockwise rotation, gated on pause/game over.
    #[default]
    Full,
    /// Movement, drops and counter-clockwise rotation only.
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BlockedSpawn {
    /// Clear the well and keep playing.
    #[default]
    ClearWell,
    /// End the game.
    GameOver,
}

impl From<BlockedSpawn> for SpawnCollisionPolicy {
    fn from(value: BlockedSpawn) -> Self {
        match value {
            BlockedSpawn::ClearWell => SpawnCollisionPolicy::ClearWell,
            BlockedSpawn::GameOver => SpawnCollisionPolicy::GameOver,
        }
    }
}

/// Full runner configuration, as stored in a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub cols: u16,
    pub rows: u16,
    pub drop_interval_ms: u64,
    /// Fixed seed for a reproducible piece sequence; OS entropy when unset.
    pub seed: Option<u32>,
    pub controls: ControlsPreset,
    pub enable_rotate_cw: bool,
    pub sweep_top_row: bool,
    /// Stop gravity while paused.
    pub freeze_on_pause: bool,
    pub on_blocked_spawn: BlockedSpawn,
    pub touch_threshold_px: f32,
    pub log_file: Option<PathBuf>,
    /// Action names as accepted by [`GameAction::from_str`].
    pub disabled_actions: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            seed: None,
            controls: ControlsPreset::Full,
            enable_rotate_cw: false,
            sweep_top_row: false,
            freeze_on_pause: false,
            on_blocked_spawn: BlockedSpawn::ClearWell,
            touch_threshold_px: TOUCH_THRESHOLD_PX,
            log_file: None,
            disabled_actions: Vec::new(),
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid configuration JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }

    /// Engine configuration; fails on unknown action names and on well
    /// dimensions outside `1..=MAX_WELL_DIM`.
    pub fn session_config(&self) -> Result<SessionConfig> {
        for (name, value) in [("cols", self.cols), ("rows", self.rows)] {
            if value == 0 || value > MAX_WELL_DIM {
                bail!("{} must be between 1 and {}, got {}", name, MAX_WELL_DIM, value);
            }
        }
        let mut controls = match self.controls {
            ControlsPreset::Full => ControlScheme::full(),
            ControlsPreset::Minimal => ControlScheme::minimal(),
        };
        if self.enable_rotate_cw {
            controls = controls.with_action(GameAction::RotateCw);
        }
        for name in &self.disabled_actions {
            let Some(action) = GameAction::from_str(name) else {
                bail!("unknown action name {:?} in disabled_actions", name);
            };
            controls = controls.without_action(action);
        }

        Ok(SessionConfig {
            cols: self.cols,
            rows: self.rows,
            drop_interval_ms: self.drop_interval_ms,
            rules: Rules {
                sweep_top_row: self.sweep_top_row,
                freeze_on_pause: self.freeze_on_pause,
                on_blocked_spawn: self.on_blocked_spawn.into(),
            },
            controls,
        })
    }

    /// Seeded LCG when a seed is configured, thread RNG otherwise.
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(SimpleRng::new(seed)),
            None => Box::new(ThreadRandom::new()),
        }
    }
}

/// Command-line flags.
#[derive(Debug, Default, Parser)]
#[command(name = "tui-blockfall", version, about = "Falling-block puzzle game for the terminal")]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Well width in cells
    #[arg(long)]
    pub cols: Option<u16>,

    /// Well height in cells
    #[arg(long)]
    pub rows: Option<u16>,

    /// Gravity interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub drop_interval_ms: Option<u64>,

    /// Seed for a reproducible piece sequence
    #[arg(long)]
    pub seed: Option<u32>,

    #[arg(long, value_enum)]
    pub controls: Option<ControlsPreset>,

    /// Also bind clockwise rotation (x)
    #[arg(long)]
    pub rotate_cw: bool,

    /// Allow the top row to be cleared
    #[arg(long)]
    pub sweep_top_row: bool,

    /// Stop gravity while the game is paused
    #[arg(long)]
    pub freeze_on_pause: bool,

    /// What happens when a new piece cannot spawn
    #[arg(long, value_enum)]
    pub on_blocked_spawn: Option<BlockedSpawn>,

    /// Swipe distance in pixels for mouse gestures
    #[arg(long, value_name = "PX")]
    pub touch_threshold: Option<f32>,

    /// Log file (defaults to tui-blockfall.log in the temp directory)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the config file, if any, and apply the flags on top.
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    pub fn apply(&self, config: &mut GameConfig) {
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(ms) = self.drop_interval_ms {
            config.drop_interval_ms = ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(controls) = self.controls {
            config.controls = controls;
        }
        if self.rotate_cw {
            config.enable_rotate_cw = true;
        }
        if self.sweep_top_row {
            config.sweep_top_row = true;
        }
        if self.freeze_on_pause {
            config.freeze_on_pause = true;
        }
        if let Some(policy) = self.on_blocked_spawn {
            config.on_blocked_spawn = policy;
        }
        if let Some(px) = self.touch_threshold {
            config.touch_threshold_px = px;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file.clone();
        }
    }
}
