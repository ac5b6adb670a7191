// Taster-Eingänge
//
// Zwei Taster gegen GND, interner Pull-Up: gedrückt = LOW.
// Entprellung und Flankenerkennung macht portal_core::InputPoller.

use esp_hal::gpio::{Input, InputConfig, InputPin, Pull};

/// Beide Taster der Steuerung
pub struct PortalButtons {
    toggle: Input<'static>,
    shoot: Input<'static>,
}

impl PortalButtons {
    pub fn new(toggle: impl InputPin + 'static, shoot: impl InputPin + 'static) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            toggle: Input::new(toggle, pull_up),
            shoot: Input::new(shoot, pull_up),
        }
    }

    /// Aktuelle Pegel als (toggle_gedrückt, shoot_gedrückt)
    pub fn levels(&self) -> (bool, bool) {
        (self.toggle.is_low(), self.shoot.is_low())
    }
}
