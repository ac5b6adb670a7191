//! Timing- und Helligkeits-Parameter des Controllers
//!
//! Die Firmware baut daraus ihre Konfiguration (siehe `portal-firmware/src/config.rs`),
//! Tests nutzen `ControllerConfig::default()`.

/// Helligkeit im Leerlauf (gedimmt)
pub const IDLE_BRIGHTNESS: u8 = 40;

/// Maximale Helligkeit beim Schuss
pub const MAX_BRIGHTNESS: u8 = 255;

/// Entprell-Fenster für beide Taster gemeinsam
pub const DEBOUNCE_MS: u32 = 50;

/// Display-Refresh-Intervall im Leerlauf
pub const DISPLAY_REFRESH_MS: u32 = 200;

/// Anzahl Schritte einer Überblendung zwischen den Kanälen
pub const FADE_STEPS: u16 = 20;

/// Wartezeit pro Überblend-Schritt
pub const FADE_STEP_MS: u32 = 15;

/// Anzahl Dreiecks-Pulse beim Schuss
pub const PULSE_REPEATS: u8 = 3;

/// Helligkeits-Schrittweite eines Pulses
pub const PULSE_STEP: u8 = 15;

/// Wartezeit pro Puls-Schritt
pub const PULSE_STEP_MS: u32 = 4;

/// Voller Blitz am Ende der Schuss-Sequenz
pub const FLASH_HOLD_MS: u32 = 80;

/// Wie lange eine Meldung (Farbwechsel) stehen bleibt
pub const MESSAGE_HOLD_MS: u32 = 600;

/// Blink-Periode der roten Leerlauf-Anzeige (0 = dauerhaft an)
pub const IDLE_BLINK_PERIOD_MS: u32 = 1000;

/// Alle Parameter die der Controller zur Laufzeit braucht
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub idle_brightness: u8,
    pub max_brightness: u8,
    pub debounce_ms: u32,
    pub display_refresh_ms: u32,
    pub fade_steps: u16,
    pub fade_step_ms: u32,
    pub pulse_repeats: u8,
    pub pulse_step: u8,
    pub pulse_step_ms: u32,
    pub flash_hold_ms: u32,
    pub message_hold_ms: u32,
    pub idle_blink_period_ms: u32,
}

impl ControllerConfig {
    /// Default-Werte mit eigener Leerlauf-Helligkeit
    pub const fn with_idle_brightness(mut self, idle_brightness: u8) -> Self {
        self.idle_brightness = idle_brightness;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            idle_brightness: IDLE_BRIGHTNESS,
            max_brightness: MAX_BRIGHTNESS,
            debounce_ms: DEBOUNCE_MS,
            display_refresh_ms: DISPLAY_REFRESH_MS,
            fade_steps: FADE_STEPS,
            fade_step_ms: FADE_STEP_MS,
            pulse_repeats: PULSE_REPEATS,
            pulse_step: PULSE_STEP,
            pulse_step_ms: PULSE_STEP_MS,
            flash_hold_ms: FLASH_HOLD_MS,
            message_hold_ms: MESSAGE_HOLD_MS,
            idle_blink_period_ms: IDLE_BLINK_PERIOD_MS,
        }
    }
}
