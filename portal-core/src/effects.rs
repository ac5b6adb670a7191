//! LED-Effekte als Schritt-Generatoren
//!
//! Jeder Effekt ist ein `Iterator<Item = Frame>`: der Controller holt pro
//! Scheduler-Tick höchstens einen Frame und wartet dessen `hold_ms` ab.
//! Kein Effekt blockiert den Loop.

use crate::config::ControllerConfig;
use crate::types::{Frame, PortalColor};

/// `value * num / den` ohne Überlauf
fn scale(value: u8, num: u16, den: u16) -> u8 {
    (u32::from(value) * u32::from(num) / u32::from(den)) as u8
}

/// Lineare Rampe auf einem Kanal (der andere bleibt aus)
///
/// Wird beim Einschalten genutzt: Blau von 0 auf Leerlauf-Helligkeit.
#[derive(Debug, Clone)]
pub struct Ramp {
    color: PortalColor,
    start: u8,
    end: u8,
    steps: u16,
    step: u16,
    hold_ms: u32,
}

impl Ramp {
    pub fn new(color: PortalColor, start: u8, end: u8, steps: u16, hold_ms: u32) -> Self {
        Self {
            color,
            start,
            end,
            steps: steps.max(1),
            step: 0,
            hold_ms,
        }
    }

    /// Einschalt-Rampe: aktive Farbe von aus auf Leerlauf
    pub fn power_up(color: PortalColor, config: &ControllerConfig) -> Self {
        Self::new(
            color,
            0,
            config.idle_brightness,
            config.fade_steps,
            config.fade_step_ms,
        )
    }
}

impl Iterator for Ramp {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.step >= self.steps {
            return None;
        }
        self.step += 1;

        let duty = if self.end >= self.start {
            self.start + scale(self.end - self.start, self.step, self.steps)
        } else {
            self.start - scale(self.start - self.end, self.step, self.steps)
        };
        Some(Frame::single(self.color, duty, self.hold_ms))
    }
}

/// Überblendung `from` → `to`
///
/// `from` fällt linear von Leerlauf-Helligkeit auf 0, `to` steigt
/// gleichzeitig von 0 auf Leerlauf-Helligkeit.
#[derive(Debug, Clone)]
pub struct FadeTransition {
    from: PortalColor,
    idle: u8,
    steps: u16,
    step: u16,
    hold_ms: u32,
}

impl FadeTransition {
    pub fn new(from: PortalColor, config: &ControllerConfig) -> Self {
        Self {
            from,
            idle: config.idle_brightness,
            steps: config.fade_steps.max(1),
            step: 0,
            hold_ms: config.fade_step_ms,
        }
    }

    pub const fn target(&self) -> PortalColor {
        self.from.toggled()
    }
}

impl Iterator for FadeTransition {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.step >= self.steps {
            return None;
        }
        self.step += 1;

        let rising = scale(self.idle, self.step, self.steps);
        let falling = self.idle - rising;

        let mut frame = Frame::single(self.target(), rising, self.hold_ms);
        match self.from {
            PortalColor::Blue => frame.blue = falling,
            PortalColor::Red => frame.red = falling,
        }
        Some(frame)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PulsePhase {
    Rising,
    Falling,
    Flash,
    Done,
}

/// Schuss-Puls: Dreieckswelle Leerlauf → Max → Leerlauf, mehrfach,
/// danach ein voller Blitz
#[derive(Debug, Clone)]
pub struct ShotPulse {
    color: PortalColor,
    idle: u8,
    max: u8,
    step_size: u8,
    hold_ms: u32,
    flash_ms: u32,
    repeats: u8,
    done_repeats: u8,
    duty: u8,
    phase: PulsePhase,
}

impl ShotPulse {
    pub fn new(color: PortalColor, config: &ControllerConfig) -> Self {
        let phase = if config.pulse_repeats == 0 {
            PulsePhase::Flash
        } else {
            PulsePhase::Rising
        };
        Self {
            color,
            idle: config.idle_brightness,
            max: config.max_brightness.max(config.idle_brightness),
            step_size: config.pulse_step.max(1),
            hold_ms: config.pulse_step_ms,
            flash_ms: config.flash_hold_ms,
            repeats: config.pulse_repeats,
            done_repeats: 0,
            duty: config.idle_brightness,
            phase,
        }
    }

    pub const fn color(&self) -> PortalColor {
        self.color
    }
}

impl Iterator for ShotPulse {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        match self.phase {
            PulsePhase::Rising => {
                self.duty = self.duty.saturating_add(self.step_size).min(self.max);
                if self.duty >= self.max {
                    self.phase = PulsePhase::Falling;
                }
                Some(Frame::single(self.color, self.duty, self.hold_ms))
            }
            PulsePhase::Falling => {
                self.duty = self.duty.saturating_sub(self.step_size).max(self.idle);
                if self.duty <= self.idle {
                    self.done_repeats += 1;
                    self.phase = if self.done_repeats >= self.repeats {
                        PulsePhase::Flash
                    } else {
                        PulsePhase::Rising
                    };
                }
                Some(Frame::single(self.color, self.duty, self.hold_ms))
            }
            PulsePhase::Flash => {
                self.phase = PulsePhase::Done;
                Some(Frame::single(self.color, self.max, self.flash_ms))
            }
            PulsePhase::Done => None,
        }
    }
}

/// Leerlauf-Anzeige zum Zeitpunkt `now_ms`
///
/// Blau leuchtet konstant gedimmt, Rot blinkt gedimmt (50% Tastverhältnis).
pub fn idle_frame(color: PortalColor, now_ms: u64, config: &ControllerConfig) -> Frame {
    let period = u64::from(config.idle_blink_period_ms);
    let lit = match color {
        PortalColor::Blue => true,
        PortalColor::Red => period == 0 || now_ms % period < period / 2,
    };
    let duty = if lit { config.idle_brightness } else { 0 };
    Frame::single(color, duty, 0)
}
