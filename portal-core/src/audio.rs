//! Audio-Wrapper mit Verfügbarkeits-Flag
//!
//! Scheitert die Initialisierung des Moduls, läuft das System ohne Ton
//! weiter: alle `play()` Aufrufe sind dann No-ops.

use crate::traits::{AudioError, AudioPlayer};
use crate::types::AudioTrack;

pub struct Audio<P> {
    player: Option<P>,
}

impl<P: AudioPlayer> Audio<P> {
    pub const fn new(player: P) -> Self {
        Self {
            player: Some(player),
        }
    }

    /// Audio dauerhaft deaktiviert
    pub const fn disabled() -> Self {
        Self { player: None }
    }

    /// Übernimmt das Ergebnis der Modul-Initialisierung
    pub fn from_init(result: Result<P, AudioError>) -> Self {
        match result {
            Ok(player) => Self::new(player),
            Err(_) => Self::disabled(),
        }
    }

    pub const fn is_available(&self) -> bool {
        self.player.is_some()
    }

    pub fn play(&mut self, track: AudioTrack) -> Result<(), AudioError> {
        match self.player.as_mut() {
            Some(player) => player.play(track),
            None => Ok(()),
        }
    }

    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut P> {
        self.player.as_mut()
    }
}
