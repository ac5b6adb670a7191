//! Portal Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, die Zustandsmaschine und die LED-Effekte.

#![no_std]

pub mod audio;
pub mod config;
pub mod controller;
pub mod dfplayer;
pub mod effects;
pub mod input;
pub mod screen;
pub mod state;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use audio::Audio;
pub use config::ControllerConfig;
pub use controller::{Outcomes, PortalController, Tick};
pub use effects::{FadeTransition, Ramp, ShotPulse, idle_frame};
pub use input::InputPoller;
pub use state::{Phase, PortalState};
pub use traits::{
    AudioError, AudioPlayer, DisplayError, LedError, PortalError, PortalLeds, StatusDisplay,
    TextSize,
};
pub use types::{AudioTrack, Button, Frame, Outcome, PortalColor, StatusSnapshot};
