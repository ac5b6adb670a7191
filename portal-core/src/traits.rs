//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::types::{AudioTrack, PortalColor};

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    /// PWM-Timer oder Kanal ließ sich nicht konfigurieren
    ConfigFailed,
    WriteFailed,
}

/// Fehler-Typ für das Audio-Modul
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioError {
    /// Modul antwortet nicht (keine SD-Karte, nicht verkabelt)
    NotResponding,
    WriteFailed,
}

/// Fehler-Typ für das Display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    InitFailed,
    DrawFailed,
    FlushFailed,
}

/// Sammel-Fehler für den Controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalError {
    Led(LedError),
    Display(DisplayError),
}

impl From<LedError> for PortalError {
    fn from(e: LedError) -> Self {
        Self::Led(e)
    }
}

impl From<DisplayError> for PortalError {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

/// Trait für die zwei PWM LED-Kanäle
///
/// # Implementierungen
/// - **Production:** LedcPortalLeds (ESP32 LEDC Peripheral)
/// - **Testing:** MockLeds (in-memory Mock)
pub trait PortalLeds {
    /// Setzt den Duty-Cycle (0-255) eines Kanals
    fn set_duty(&mut self, channel: PortalColor, duty: u8) -> Result<(), LedError>;
}

/// Trait für das Audio-Wiedergabe-Modul
///
/// Fire-and-forget: `play()` startet die Wiedergabe und kehrt sofort zurück.
pub trait AudioPlayer {
    fn play(&mut self, track: AudioTrack) -> Result<(), AudioError>;
}

/// Schriftgröße (Multiplikator der Basis-Schrift)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Large,
}

/// Trait für das monochrome Status-Display
///
/// Zeichnet in einen Puffer, erst `flush()` überträgt aufs Panel.
pub trait StatusDisplay {
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Schreibt `text` mit linker oberer Ecke bei (`x`, `y`) in Pixeln
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: TextSize)
    -> Result<(), DisplayError>;

    fn flush(&mut self) -> Result<(), DisplayError>;
}

#[cfg(feature = "defmt")]
impl defmt::Format for PortalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PortalError::Led(e) => defmt::write!(fmt, "LED: {}", e),
            PortalError::Display(e) => defmt::write!(fmt, "Display: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedError::ConfigFailed => defmt::write!(fmt, "PWM config failed"),
            LedError::WriteFailed => defmt::write!(fmt, "write failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DisplayError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DisplayError::InitFailed => defmt::write!(fmt, "init failed"),
            DisplayError::DrawFailed => defmt::write!(fmt, "draw failed"),
            DisplayError::FlushFailed => defmt::write!(fmt, "flush failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AudioError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            AudioError::NotResponding => defmt::write!(fmt, "module not responding"),
            AudioError::WriteFailed => defmt::write!(fmt, "UART write failed"),
        }
    }
}
