//! Taster-Abfrage mit Flankenerkennung und gemeinsamem Entprell-Fenster
//!
//! Beide Taster sind active-low (interner Pull-Up, gedrückt = LOW).
//! Ein akzeptierter Druck sperrt für `debounce_ms` auch den anderen Taster.

use crate::types::Button;

/// Letzter Pegel eines Tasters
#[derive(Debug, Clone, Copy)]
struct EdgeState {
    was_high: bool,
}

impl EdgeState {
    const fn new() -> Self {
        // Pull-Up: Ruhepegel ist HIGH
        Self { was_high: true }
    }

    /// Merkt sich den neuen Pegel, `true` bei HIGH → LOW
    fn update(&mut self, is_low: bool) -> bool {
        let falling = is_low && self.was_high;
        self.was_high = !is_low;
        falling
    }
}

/// Pollt zwei Taster pro Loop-Durchlauf
#[derive(Debug, Clone)]
pub struct InputPoller {
    debounce_ms: u32,
    last_action_ms: Option<u64>,
    toggle: EdgeState,
    shoot: EdgeState,
}

impl InputPoller {
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            last_action_ms: None,
            toggle: EdgeState::new(),
            shoot: EdgeState::new(),
        }
    }

    /// Wertet eine Abtastung beider Leitungen aus
    ///
    /// Flanken werden immer gemerkt, aber nur außerhalb des Entprell-Fensters
    /// als Druck gemeldet. Bei gleichzeitiger Flanke gewinnt `Toggle`.
    pub fn sample(&mut self, now_ms: u64, toggle_low: bool, shoot_low: bool) -> Option<Button> {
        let toggle_edge = self.toggle.update(toggle_low);
        let shoot_edge = self.shoot.update(shoot_low);

        if !self.window_elapsed(now_ms) {
            return None;
        }

        let pressed = if toggle_edge {
            Button::Toggle
        } else if shoot_edge {
            Button::Shoot
        } else {
            return None;
        };

        self.last_action_ms = Some(now_ms);
        Some(pressed)
    }

    fn window_elapsed(&self, now_ms: u64) -> bool {
        match self.last_action_ms {
            Some(last) => now_ms.saturating_sub(last) > u64::from(self.debounce_ms),
            None => true,
        }
    }
}
