//! Status-Bildschirm (128x64, monochrom)
//!
//! Setzt die Textzeilen zusammen und schickt sie an ein `StatusDisplay`.
//! Pixel-Positionen sind auf eine 6x10 Schrift ausgelegt.

use core::fmt::Write;

use heapless::String;

use crate::traits::{DisplayError, StatusDisplay, TextSize};
use crate::types::{PortalColor, StatusSnapshot};

pub const TITLE: &str = "PORTAL DEVICE";
pub const STATUS_TEXT: &str = "STATUS: READY";
pub const POWER_BAR: &str = "PWR [##########]";

const LINE_HEIGHT: i32 = 10;

/// Zeile `label` + Wert, passt in die 21 Zeichen einer Display-Zeile
fn line(label: &str, value: impl core::fmt::Display) -> String<24> {
    let mut text = String::new();
    // 24 Bytes reichen für alle Labels + u32
    let _ = write!(text, "{label}: {value}");
    text
}

/// Zeichnet den Leerlauf-Bildschirm
pub fn render_status<D: StatusDisplay>(
    display: &mut D,
    snapshot: &StatusSnapshot,
) -> Result<(), DisplayError> {
    let audio = if snapshot.audio_available { "ON" } else { "OFF" };

    display.clear()?;
    display.draw_text(TITLE, 0, 0, TextSize::Normal)?;
    display.draw_text(&line("MODE", snapshot.mode.label()), 0, LINE_HEIGHT + 2, TextSize::Normal)?;
    display.draw_text(STATUS_TEXT, 0, 2 * LINE_HEIGHT + 2, TextSize::Normal)?;
    display.draw_text(&line("AUDIO", audio), 0, 3 * LINE_HEIGHT + 2, TextSize::Normal)?;
    display.draw_text(&line("FIRED", snapshot.fired), 0, 4 * LINE_HEIGHT + 2, TextSize::Normal)?;
    display.draw_text(POWER_BAR, 0, 5 * LINE_HEIGHT + 4, TextSize::Normal)?;
    display.flush()
}

/// Meldung nach Farbwechsel per Taster
pub fn render_mode_switch<D: StatusDisplay>(
    display: &mut D,
    to: PortalColor,
) -> Result<(), DisplayError> {
    render_banner(display, "MODE SWITCH", to)
}

/// Meldung nach Schuss (automatischer Farbwechsel)
pub fn render_auto_switch<D: StatusDisplay>(
    display: &mut D,
    to: PortalColor,
) -> Result<(), DisplayError> {
    render_banner(display, "PORTAL OPEN!", to)
}

fn render_banner<D: StatusDisplay>(
    display: &mut D,
    headline: &str,
    color: PortalColor,
) -> Result<(), DisplayError> {
    let mut big: String<16> = String::new();
    let _ = write!(big, "{} NEXT", color.label());

    display.clear()?;
    display.draw_text(headline, 0, 0, TextSize::Normal)?;
    display.draw_text(&big, 4, 24, TextSize::Large)?;
    display.flush()
}
