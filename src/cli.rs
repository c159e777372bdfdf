//! Command line options for the terminal binary.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::Level;

use crate::core::SessionConfig;
use crate::types::{
    BASE_SPEED, FIELD_HEIGHT, FIELD_WIDTH, LINE_CLEAR_PAUSE_MS, PIECES_PER_SPEEDUP, SPEED_FLOOR,
    TICK_MS,
};

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Field width in cells, both side walls included.
    #[arg(long, default_value_t = FIELD_WIDTH)]
    pub width: usize,
    /// Field height in cells, bottom wall included.
    #[arg(long, default_value_t = FIELD_HEIGHT)]
    pub height: usize,
    /// Seed for the piece sequence. The same seed replays the same pieces.
    /// Defaults to the current time.
    #[arg(short, long)]
    pub seed: Option<u32>,
    /// Milliseconds per tick.
    #[arg(long, default_value_t = TICK_MS)]
    pub tick_ms: u64,
    /// Milliseconds completed rows stay on screen before they collapse.
    #[arg(long, default_value_t = LINE_CLEAR_PAUSE_MS)]
    pub clear_pause_ms: u64,
    /// Ticks per forced descent at the start.
    #[arg(long, default_value_t = BASE_SPEED)]
    pub base_speed: u32,
    /// Fewest ticks per forced descent.
    #[arg(long, default_value_t = SPEED_FLOOR)]
    pub speed_floor: u32,
    /// Write logs to this file. Without it nothing is logged.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log verbosity: error, warn, info, debug or trace.
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// How the driver paces the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tick: Duration,
    pub clear_pause: Duration,
}

impl Args {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            width: self.width,
            height: self.height,
            base_speed: self.base_speed,
            speed_floor: self.speed_floor,
            pieces_per_speedup: PIECES_PER_SPEEDUP,
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            tick: Duration::from_millis(self.tick_ms.max(1)),
            clear_pause: Duration::from_millis(self.clear_pause_ms),
        }
    }

    /// The given seed, or one taken from the clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
