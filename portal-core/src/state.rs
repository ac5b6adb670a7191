//! Modus-Zustandsmaschine
//!
//! Zustände: BlueIdle, RedIdle und vorübergehend Shooting.
//! Reine Logik, die Effekte (LED, Audio, Display) löst der Controller aus.

use crate::types::{PortalColor, StatusSnapshot};

/// Abgeleiteter Zustand der Maschine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BlueIdle,
    RedIdle,
    Shooting,
}

/// Veränderlicher Zustand: Farbe, Schuss-Flag und Zähler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortalState {
    mode: PortalColor,
    shooting: bool,
    fired: u32,
}

impl PortalState {
    /// Startzustand: Blau, nicht schießend, Zähler 0
    pub const fn new() -> Self {
        Self {
            mode: PortalColor::Blue,
            shooting: false,
            fired: 0,
        }
    }

    pub const fn mode(&self) -> PortalColor {
        self.mode
    }

    pub const fn is_shooting(&self) -> bool {
        self.shooting
    }

    pub const fn fired(&self) -> u32 {
        self.fired
    }

    pub const fn phase(&self) -> Phase {
        match (self.shooting, self.mode) {
            (true, _) => Phase::Shooting,
            (false, PortalColor::Blue) => Phase::BlueIdle,
            (false, PortalColor::Red) => Phase::RedIdle,
        }
    }

    /// Farbwechsel per Taster
    ///
    /// Gibt die neue Farbe zurück, `None` während eines Schusses.
    pub fn toggle(&mut self) -> Option<PortalColor> {
        if self.shooting {
            return None;
        }
        self.mode = self.mode.toggled();
        Some(self.mode)
    }

    /// Startet einen Schuss mit der aktuellen Farbe
    ///
    /// `None` wenn bereits geschossen wird (Doppelklick ist ein No-op).
    pub fn begin_shot(&mut self) -> Option<PortalColor> {
        if self.shooting {
            return None;
        }
        self.shooting = true;
        Some(self.mode)
    }

    /// Beendet den Schuss: Auto-Switch auf die andere Farbe, Zähler +1
    ///
    /// Gibt die neue Farbe zurück, `None` wenn kein Schuss lief.
    pub fn finish_shot(&mut self) -> Option<PortalColor> {
        if !self.shooting {
            return None;
        }
        self.mode = self.mode.toggled();
        self.fired = self.fired.wrapping_add(1);
        self.shooting = false;
        Some(self.mode)
    }

    pub const fn snapshot(&self, audio_available: bool) -> StatusSnapshot {
        StatusSnapshot {
            mode: self.mode,
            fired: self.fired,
            shooting: self.shooting,
            audio_available,
        }
    }
}
