// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use portal_core::ControllerConfig;

// ============================================================================
// Pin-Zuordnung (Dokumentation, die Peripherals werden in main.rs verteilt)
// ============================================================================

/// Taster "Farbwechsel" (active-low, interner Pull-Up)
pub const TOGGLE_BUTTON_GPIO_PIN: u8 = 2;

/// Taster "Schuss" (active-low, interner Pull-Up)
pub const SHOOT_BUTTON_GPIO_PIN: u8 = 3;

/// PWM-Ausgang blaue Portal-LED
pub const BLUE_LED_GPIO_PIN: u8 = 4;

/// PWM-Ausgang rote Portal-LED
pub const RED_LED_GPIO_PIN: u8 = 5;

/// I2C SDA/SCL für das SSD1306 OLED
pub const DISPLAY_SDA_GPIO_PIN: u8 = 6;
pub const DISPLAY_SCL_GPIO_PIN: u8 = 7;

/// UART TX/RX zum DFPlayer Mini
pub const AUDIO_TX_GPIO_PIN: u8 = 18;
pub const AUDIO_RX_GPIO_PIN: u8 = 19;

// ============================================================================
// LED / PWM Konfiguration
// ============================================================================

/// PWM-Trägerfrequenz in kHz
/// 5 kHz ist weit über der Flimmer-Grenze und passt zu 8-Bit Auflösung
pub const PWM_FREQUENCY_KHZ: u32 = 5;

/// Leerlauf-Helligkeit (0-255)
/// Kann zur Build-Zeit per PORTAL_IDLE_BRIGHTNESS überschrieben werden
pub const IDLE_BRIGHTNESS: u8 = parse_u8(
    option_env!("PORTAL_IDLE_BRIGHTNESS"),
    portal_core::config::IDLE_BRIGHTNESS,
);

// ============================================================================
// Loop / Scheduler
// ============================================================================

/// Scheduler-Tick in Millisekunden
/// Ein Tick = Taster abtasten + höchstens ein LED-Frame + evtl. Display-Refresh
pub const TICK_MS: u64 = 5;

// ============================================================================
// Display Konfiguration
// ============================================================================

/// I2C-Takt für das OLED in kHz
pub const DISPLAY_I2C_FREQUENCY_KHZ: u32 = 400;

// ============================================================================
// Audio Konfiguration (DFPlayer Mini)
// ============================================================================

/// Baudrate des DFPlayer (fest 9600)
pub const AUDIO_BAUDRATE: u32 = 9600;

/// Lautstärke 0-30
/// Kann zur Build-Zeit per PORTAL_AUDIO_VOLUME überschrieben werden
pub const AUDIO_VOLUME: u8 = parse_u8(option_env!("PORTAL_AUDIO_VOLUME"), 20);

/// Wartezeit nach Reset bis das Modul die SD-Karte gelesen hat
pub const AUDIO_BOOT_MS: u32 = 1500;

/// Maximale Wartezeit auf die Status-Antwort
pub const AUDIO_REPLY_TIMEOUT_MS: u32 = 500;

/// Poll-Intervall beim Warten auf die Antwort
pub const AUDIO_REPLY_POLL_MS: u32 = 10;

/// Controller-Parameter für die Firmware
pub fn controller_config() -> ControllerConfig {
    ControllerConfig::default().with_idle_brightness(IDLE_BRIGHTNESS)
}

// ============================================================================
// Compile-Zeit Parser für Build-Overrides
// ============================================================================

/// Parst eine Dezimalzahl 0-255 zur Compile-Zeit
/// Ungültige Werte brechen den Build ab
const fn parse_u8(value: Option<&str>, default: u8) -> u8 {
    let Some(s) = value else { return default };
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        panic!("Override darf nicht leer sein");
    }
    let mut result: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        if digit < b'0' || digit > b'9' {
            panic!("Override muss eine Dezimalzahl sein");
        }
        result = result * 10 + (digit - b'0') as u32;
        if result > 255 {
            panic!("Override muss zwischen 0 und 255 liegen");
        }
        i += 1;
    }
    result as u8
}
