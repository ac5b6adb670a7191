//! Integration Tests für den Portal Controller
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen Mock-Hardware

use portal_core::{
    Audio, AudioError, AudioPlayer, AudioTrack, ControllerConfig, DisplayError, LedError, Outcome,
    Phase, PortalColor, PortalController, PortalError, PortalLeds, StatusDisplay, TextSize,
};

// ============================================================================
// Mock Hardware
// ============================================================================

#[derive(Default)]
pub struct MockLeds {
    pub blue: u8,
    pub red: u8,
    pub write_count: usize,
    pub fail_next_write: bool,
    /// Alle Zustände (blue, red) nach jedem Schreiben
    pub history: Vec<(u8, u8)>,
}

impl PortalLeds for MockLeds {
    fn set_duty(&mut self, channel: PortalColor, duty: u8) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }
        match channel {
            PortalColor::Blue => self.blue = duty,
            PortalColor::Red => self.red = duty,
        }
        self.write_count += 1;
        self.history.push((self.blue, self.red));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockAudio {
    pub played: Vec<AudioTrack>,
    pub fail_next_play: bool,
}

impl AudioPlayer for MockAudio {
    fn play(&mut self, track: AudioTrack) -> Result<(), AudioError> {
        if self.fail_next_play {
            self.fail_next_play = false;
            return Err(AudioError::WriteFailed);
        }
        self.played.push(track);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockDisplay {
    /// Text-Zeilen seit dem letzten clear()
    pub buffer: Vec<(String, TextSize)>,
    /// Inhalt beim letzten flush()
    pub shown: Vec<String>,
    pub flush_count: usize,
    pub fail_next_flush: bool,
}

impl MockDisplay {
    fn shows(&self, needle: &str) -> bool {
        self.shown.iter().any(|line| line.contains(needle))
    }
}

impl StatusDisplay for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer.clear();
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        _x: i32,
        _y: i32,
        size: TextSize,
    ) -> Result<(), DisplayError> {
        self.buffer.push((text.to_string(), size));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.fail_next_flush {
            self.fail_next_flush = false;
            return Err(DisplayError::FlushFailed);
        }
        self.shown = self.buffer.iter().map(|(text, _)| text.clone()).collect();
        self.flush_count += 1;
        Ok(())
    }
}

// ============================================================================
// Test-Harness mit simulierter Zeit
// ============================================================================

const TICK_MS: u64 = 5;

type Controller = PortalController<MockLeds, MockAudio, MockDisplay>;

struct Rig {
    controller: Controller,
    now: u64,
    outcomes: Vec<Outcome>,
}

impl Rig {
    fn new() -> Self {
        Self::with_audio(Audio::new(MockAudio::default()))
    }

    fn with_audio(audio: Audio<MockAudio>) -> Self {
        let mut controller = PortalController::new(
            MockLeds::default(),
            audio,
            MockDisplay::default(),
            ControllerConfig::default(),
        );
        controller.power_up(0).unwrap();
        let mut rig = Self {
            controller,
            now: 0,
            outcomes: Vec::new(),
        };
        rig.settle();
        rig
    }

    fn tick(&mut self, toggle_low: bool, shoot_low: bool) {
        self.now += TICK_MS;
        let tick = self.controller.poll(self.now, toggle_low, shoot_low);
        assert!(tick.is_ok(), "unexpected fault: {:?}", tick.fault);
        self.outcomes.extend(tick.outcomes.iter().copied());
    }

    /// Laufen lassen bis kein Effekt mehr aktiv ist
    fn settle(&mut self) {
        for _ in 0..2_000 {
            self.tick(false, false);
            if !self.controller.is_busy() {
                break;
            }
        }
        assert!(!self.controller.is_busy(), "effect never finished");
        // Entprell-Fenster und Meldungs-Haltezeit sicher verlassen
        for _ in 0..130 {
            self.tick(false, false);
        }
    }

    /// Ein vollständiger Tastendruck (drücken, halten, loslassen)
    fn press_toggle(&mut self) {
        self.tick(true, false);
        self.tick(true, false);
        self.tick(false, false);
    }

    fn press_shoot(&mut self) {
        self.tick(false, true);
        self.tick(false, true);
        self.tick(false, false);
    }

    fn leds(&self) -> &MockLeds {
        self.controller.leds()
    }

    fn played(&self) -> &[AudioTrack] {
        &self.controller.audio().player().unwrap().played
    }
}

// ============================================================================
// Tests: Einschalten
// ============================================================================

#[test]
fn test_power_up_plays_sound_and_settles_blue_idle() {
    let rig = Rig::new();
    assert_eq!(rig.played(), &[AudioTrack::PowerUp]);
    assert_eq!(rig.controller.state().phase(), Phase::BlueIdle);
    assert_eq!(rig.leds().blue, ControllerConfig::default().idle_brightness);
    assert_eq!(rig.leds().red, 0);
    assert!(rig.controller.display().shows("MODE: BLUE"));
    assert!(rig.controller.display().shows("FIRED: 0"));
}

// ============================================================================
// Tests: Farbwechsel
// ============================================================================

#[test]
fn test_toggles_alternate_strictly() {
    let mut rig = Rig::new();
    let mut expected = PortalColor::Blue;
    for _ in 0..6 {
        rig.press_toggle();
        rig.settle();
        expected = expected.toggled();
        assert_eq!(rig.controller.state().mode(), expected);
    }
}

#[test]
fn test_toggle_fades_and_plays_mode_switch() {
    let mut rig = Rig::new();
    let idle = ControllerConfig::default().idle_brightness;
    rig.press_toggle();
    rig.settle();

    assert_eq!(rig.leds().blue, 0);
    // Rot blinkt im Leerlauf, irgendwann war es aber auf Leerlauf-Helligkeit
    assert!(rig.leds().history.iter().any(|&(b, r)| b == 0 && r == idle));
    assert_eq!(
        rig.played(),
        &[AudioTrack::PowerUp, AudioTrack::ModeSwitch]
    );
    assert!(rig.outcomes.contains(&Outcome::Toggled {
        to: PortalColor::Red
    }));
}

#[test]
fn test_toggle_shows_message_then_status() {
    let mut rig = Rig::new();
    rig.tick(true, false);
    assert!(rig.controller.display().shows("MODE SWITCH"));
    assert!(rig.controller.display().shows("RED NEXT"));

    rig.tick(false, false);
    rig.settle();
    assert!(rig.controller.display().shows("MODE: RED"));
}

#[test]
fn test_red_idle_keeps_blue_off() {
    let mut rig = Rig::new();
    let idle = ControllerConfig::default().idle_brightness;
    rig.press_toggle();
    rig.settle();

    let start = rig.leds().history.len();
    for _ in 0..400 {
        rig.tick(false, false);
    }
    let blink = &rig.leds().history[start..];
    assert!(!blink.is_empty());
    for &(blue, red) in blink {
        assert_eq!(blue, 0);
        assert!(red == 0 || red == idle);
    }
}

// ============================================================================
// Tests: Schuss-Sequenz
// ============================================================================

#[test]
fn test_shot_increments_counter_and_flips_mode() {
    let mut rig = Rig::new();
    rig.press_shoot();
    rig.settle();

    assert_eq!(rig.controller.state().fired(), 1);
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    assert_eq!(rig.controller.state().phase(), Phase::RedIdle);
    assert!(rig.outcomes.contains(&Outcome::ShotCompleted {
        mode: PortalColor::Red,
        fired: 1
    }));
}

#[test]
fn test_shot_pulses_to_max_brightness() {
    let mut rig = Rig::new();
    let config = ControllerConfig::default();
    rig.press_shoot();
    rig.settle();
    assert!(
        rig.leds()
            .history
            .iter()
            .any(|&(b, r)| b == config.max_brightness && r == 0)
    );
}

#[test]
fn test_double_shoot_is_noop() {
    let mut rig = Rig::new();
    rig.press_shoot();
    // Zweiter Druck mitten in der Sequenz (außerhalb des Entprell-Fensters)
    for _ in 0..20 {
        rig.tick(false, false);
    }
    assert!(rig.controller.state().is_shooting());
    rig.press_shoot();
    rig.settle();

    assert_eq!(rig.controller.state().fired(), 1);
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    assert_eq!(
        rig.played(),
        &[AudioTrack::PowerUp, AudioTrack::BlueFire]
    );
    assert!(rig.outcomes.iter().any(|o| matches!(o, Outcome::Ignored { .. })));
}

#[test]
fn test_toggle_during_shot_is_ignored() {
    let mut rig = Rig::new();
    rig.press_shoot();
    for _ in 0..20 {
        rig.tick(false, false);
    }
    rig.press_toggle();
    rig.settle();

    // Nur der Auto-Switch hat gewechselt
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    assert_eq!(rig.controller.state().fired(), 1);
}

#[test]
fn test_display_not_refreshed_while_shooting() {
    let mut rig = Rig::new();
    rig.press_shoot();
    let flushes = rig.controller.display().flush_count;
    for _ in 0..40 {
        rig.tick(false, false);
        assert!(rig.controller.state().is_shooting());
    }
    assert_eq!(rig.controller.display().flush_count, flushes);
}

#[test]
fn test_auto_switch_shows_message() {
    let mut rig = Rig::new();
    rig.press_shoot();
    while rig.controller.state().is_shooting() && !rig.controller.display().shows("PORTAL OPEN!") {
        rig.tick(false, false);
    }
    assert!(rig.controller.display().shows("RED NEXT"));
}

// ============================================================================
// Tests: Szenarien
// ============================================================================

#[test]
fn test_scenario_toggle_shoot_toggle() {
    let mut rig = Rig::new();

    rig.press_toggle();
    rig.settle();
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    assert_eq!(rig.controller.state().fired(), 0);

    rig.press_shoot();
    rig.settle();
    assert_eq!(rig.played().last(), Some(&AudioTrack::RedFire));
    assert_eq!(rig.controller.state().mode(), PortalColor::Blue);
    assert_eq!(rig.controller.state().fired(), 1);

    rig.press_toggle();
    rig.settle();
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    assert_eq!(rig.controller.state().fired(), 1);
    assert!(rig.controller.display().shows("FIRED: 1"));
}

#[test]
fn test_scenario_audio_unavailable() {
    let mut rig = Rig::with_audio(Audio::from_init(Err(AudioError::NotResponding)));
    assert!(!rig.controller.audio().is_available());

    rig.press_shoot();
    rig.settle();

    assert_eq!(rig.controller.state().fired(), 1);
    assert!(rig.controller.display().shows("AUDIO: OFF"));
    assert!(rig.controller.display().shows("FIRED: 1"));
    assert_eq!(rig.controller.audio_failures(), 0);
}

// ============================================================================
// Tests: Entprellung
// ============================================================================

#[test]
fn test_bounce_yields_single_toggle() {
    let mut rig = Rig::new();
    // Prellen: low/high/low innerhalb von 20 ms
    rig.tick(true, false);
    rig.tick(false, false);
    rig.tick(true, false);
    rig.tick(false, false);
    rig.tick(true, false);
    rig.tick(false, false);
    rig.settle();

    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    let toggles = rig
        .outcomes
        .iter()
        .filter(|o| matches!(o, Outcome::Toggled { .. }))
        .count();
    assert_eq!(toggles, 1);
}

#[test]
fn test_cross_button_bounce_yields_single_action() {
    let mut rig = Rig::new();
    rig.tick(true, false);
    rig.tick(false, true);
    rig.tick(false, false);
    rig.settle();

    assert_eq!(rig.controller.state().fired(), 0);
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
}

// ============================================================================
// Tests: Fehlerbehandlung
// ============================================================================

#[test]
fn test_led_write_failure_is_reported_and_recovers() {
    let mut rig = Rig::new();
    rig.controller.leds_mut().fail_next_write = true;
    rig.now += TICK_MS;
    let tick = rig.controller.poll(rig.now, true, false);
    assert_eq!(tick.fault, Some(PortalError::Led(LedError::WriteFailed)));
    assert_eq!(
        tick.outcomes.as_slice(),
        &[Outcome::Toggled {
            to: PortalColor::Red
        }]
    );

    // Zustand ist trotzdem konsistent, der nächste Tick schreibt weiter
    rig.tick(false, false);
    rig.settle();
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    assert_eq!(rig.leds().blue, 0);
}

#[test]
fn test_audio_failure_at_runtime_is_counted() {
    let mut rig = Rig::new();
    rig.controller.audio_mut().player_mut().unwrap().fail_next_play = true;
    rig.press_shoot();
    rig.settle();
    assert_eq!(rig.controller.audio_failures(), 1);
    assert_eq!(rig.controller.state().fired(), 1);
}

#[test]
fn test_display_failure_is_reported_and_next_refresh_recovers() {
    let mut rig = Rig::new();
    let flushes = rig.controller.display().flush_count;
    rig.controller.display_mut().fail_next_flush = true;

    let mut failed = false;
    for _ in 0..100 {
        rig.now += TICK_MS;
        if !rig.controller.poll(rig.now, false, false).is_ok() {
            failed = true;
        }
    }
    assert!(failed);
    assert!(rig.controller.display().flush_count > flushes);
    assert_eq!(rig.controller.state().phase(), Phase::BlueIdle);
}


#[test]
fn test_toggle_completes_when_banner_flush_fails() {
    let mut rig = Rig::new();
    let idle = ControllerConfig::default().idle_brightness;
    rig.controller.display_mut().fail_next_flush = true;

    rig.now += TICK_MS;
    let tick = rig.controller.poll(rig.now, true, false);
    assert_eq!(
        tick.fault,
        Some(PortalError::Display(DisplayError::FlushFailed))
    );
    assert_eq!(
        tick.outcomes.as_slice(),
        &[Outcome::Toggled {
            to: PortalColor::Red
        }]
    );
    // Der erste Fade-Frame wurde im selben Tick geschrieben
    assert!(rig.leds().red > 0);

    rig.tick(false, false);
    rig.settle();
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    assert_eq!(
        rig.played(),
        &[AudioTrack::PowerUp, AudioTrack::ModeSwitch]
    );
    assert_eq!(rig.leds().blue, 0);
    assert!(rig.leds().history.iter().any(|&(b, r)| b == 0 && r == idle));
    assert!(rig.controller.display().shows("MODE: RED"));
}

#[test]
fn test_shot_completes_when_auto_switch_banner_fails() {
    let mut rig = Rig::new();
    rig.press_shoot();
    // Schuss-Puls laufen lassen, dann schlägt der Auto-Switch Banner fehl
    rig.controller.display_mut().fail_next_flush = true;

    let mut faults = 0;
    for _ in 0..2_000 {
        rig.now += TICK_MS;
        let tick = rig.controller.poll(rig.now, false, false);
        if !tick.is_ok() {
            faults += 1;
        }
        rig.outcomes.extend(tick.outcomes.iter().copied());
        if !rig.controller.is_busy() {
            break;
        }
    }
    rig.settle();

    assert_eq!(faults, 1);
    assert_eq!(rig.controller.state().fired(), 1);
    assert_eq!(rig.controller.state().mode(), PortalColor::Red);
    assert!(rig.outcomes.contains(&Outcome::ShotCompleted {
        mode: PortalColor::Red,
        fired: 1
    }));
}
