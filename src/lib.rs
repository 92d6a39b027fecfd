//! Core of the birthday countdown page.
//!
//! Everything in this crate is independent of the DOM so it can be unit
//! tested natively; the Yew front end in `main.rs` wires it to timers,
//! `<canvas>` and `<audio>` elements. All state is owned by the single UI
//! thread and mutated only from run-to-completion event handlers.

pub mod audio;
pub mod confetti;
pub mod countdown;
pub mod fault;
pub mod logging;
pub mod overlay;
pub mod tracks;
pub mod trigger;

pub use audio::{AudioController, MediaEvent, MediaHost, TrackHandle, TrackState};
pub use confetti::{Particle, ParticleField};
pub use countdown::{Clock, Countdown, CountdownFields, CountdownPhase, SystemClock, TargetInstant};
pub use fault::{ImageContext, Notice};
pub use tracks::{parse_tracks, Track, TrackListError};
pub use trigger::CelebrationLatch;
