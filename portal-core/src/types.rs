//! Core Types für die Portal-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Aktive Portal-Farbe (= Modus)
///
/// Jede Farbe hat genau einen eigenen PWM-Kanal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortalColor {
    #[default]
    Blue,
    Red,
}

impl PortalColor {
    /// Liefert die jeweils andere Farbe
    pub const fn toggled(self) -> Self {
        match self {
            Self::Blue => Self::Red,
            Self::Red => Self::Blue,
        }
    }

    /// Anzeige-Label für das Display
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blue => "BLUE",
            Self::Red => "RED",
        }
    }

    /// Schuss-Sound dieser Farbe
    pub const fn fire_track(self) -> AudioTrack {
        match self {
            Self::Blue => AudioTrack::BlueFire,
            Self::Red => AudioTrack::RedFire,
        }
    }
}

/// Die zwei Taster der Steuerung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    /// Farbwechsel Blau ↔ Rot
    Toggle,
    /// Portal abfeuern
    Shoot,
}

/// Audio-Clips auf dem Wiedergabe-Modul
///
/// Der Discriminant ist die Track-Nummer auf der SD-Karte (1-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AudioTrack {
    PowerUp = 1,
    BlueFire = 2,
    RedFire = 3,
    ModeSwitch = 4,
    PowerDown = 5,
}

impl AudioTrack {
    pub const fn number(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for AudioTrack {
    type Error = ();

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Self::PowerUp),
            2 => Ok(Self::BlueFire),
            3 => Ok(Self::RedFire),
            4 => Ok(Self::ModeSwitch),
            5 => Ok(Self::PowerDown),
            _ => Err(()),
        }
    }
}

/// Ein einzelner LED-Schritt eines Effekts
///
/// Beide Kanäle werden gesetzt, danach wird `hold_ms` gewartet
/// bevor der nächste Schritt kommt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub blue: u8,
    pub red: u8,
    pub hold_ms: u32,
}

impl Frame {
    /// Frame in dem nur `color` leuchtet, der andere Kanal ist aus
    pub const fn single(color: PortalColor, duty: u8, hold_ms: u32) -> Self {
        match color {
            PortalColor::Blue => Self {
                blue: duty,
                red: 0,
                hold_ms,
            },
            PortalColor::Red => Self {
                blue: 0,
                red: duty,
                hold_ms,
            },
        }
    }

    pub const fn duty(&self, color: PortalColor) -> u8 {
        match color {
            PortalColor::Blue => self.blue,
            PortalColor::Red => self.red,
        }
    }
}

/// Momentaufnahme für die Status-Anzeige
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSnapshot {
    pub mode: PortalColor,
    pub fired: u32,
    pub shooting: bool,
    pub audio_available: bool,
}

/// Was ein Aufruf von `PortalController::poll()` bewirkt hat
///
/// Die Firmware loggt diese Ereignisse, der Core selbst loggt nicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Farbwechsel per Taster gestartet
    Toggled { to: PortalColor },
    /// Schuss-Sequenz gestartet
    ShotStarted { color: PortalColor },
    /// Schuss-Sequenz beendet, Farbe automatisch gewechselt
    ShotCompleted { mode: PortalColor, fired: u32 },
    /// Tastendruck verworfen weil gerade ein Effekt läuft
    Ignored { button: Button },
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for PortalColor {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.label())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Button {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Button::Toggle => defmt::write!(fmt, "Toggle"),
            Button::Shoot => defmt::write!(fmt, "Shoot"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AudioTrack {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Track #{}", self.number())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusSnapshot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusSnapshot {{ mode: {}, fired: {}, shooting: {}, audio: {} }}",
            self.mode,
            self.fired,
            self.shooting,
            self.audio_available
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Outcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Outcome::Toggled { to } => defmt::write!(fmt, "Toggled {{ to: {} }}", to),
            Outcome::ShotStarted { color } => {
                defmt::write!(fmt, "ShotStarted {{ color: {} }}", color)
            }
            Outcome::ShotCompleted { mode, fired } => {
                defmt::write!(fmt, "ShotCompleted {{ mode: {}, fired: {} }}", mode, fired)
            }
            Outcome::Ignored { button } => defmt::write!(fmt, "Ignored {{ button: {} }}", button),
        }
    }
}
