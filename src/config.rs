//! Application-level configuration constants.

use birthday_countdown::TargetInstant;
use log::LevelFilter;

// Countdown
/// 2025-03-02T00:00:00+08:00
pub const TARGET: TargetInstant = TargetInstant::from_epoch_ms(1_740_844_800_000.0);
pub const TICK_MS: u32 = 1_000;

// Celebration
pub const BODY_CELEBRATION_CLASS: &str = "birthday-active";
pub const CONFETTI_Z_INDEX: u32 = 999;

// Background music
pub const BACKGROUND_SRC: &str = "music/background.mp3";
pub const BACKGROUND_VOLUME: f64 = 0.5;

// Gallery tracks
pub const TRACK_VOLUME: f64 = 0.8;
pub const TRACK_PRELOAD: &str = "metadata";

// Diagnostics
#[cfg(debug_assertions)]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;
