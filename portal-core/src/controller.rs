//! Portal Controller - besitzt den kompletten veränderlichen Zustand
//!
//! Ein Aufruf von `poll()` pro Scheduler-Tick:
//! 1. Taster abtasten und Druck an die Zustandsmaschine geben
//! 2. Laufenden LED-Effekt um höchstens einen Frame weiterschalten
//! 3. Status-Display periodisch auffrischen (nicht während eines Schusses)
//!
//! Solange ein Effekt läuft, werden Tastendrücke verworfen. Damit verhält
//! sich der Loop wie die blockierende Variante, bleibt aber nicht stehen.
//!
//! Hardware-Fehler brechen einen Tick nicht ab: alle drei Schritte laufen,
//! der erste Fehler wird zusammen mit den Ereignissen im `Tick` gemeldet.

use heapless::Vec;

use crate::audio::Audio;
use crate::config::ControllerConfig;
use crate::effects::{FadeTransition, Ramp, ShotPulse, idle_frame};
use crate::input::InputPoller;
use crate::screen;
use crate::state::PortalState;
use crate::traits::{AudioPlayer, DisplayError, PortalError, PortalLeds, StatusDisplay};
use crate::types::{AudioTrack, Button, Frame, Outcome, PortalColor, StatusSnapshot};

/// Ergebnisse eines `poll()` (Tastendruck + Effekt-Ende im selben Tick möglich)
pub type Outcomes = Vec<Outcome, 2>;

/// Ergebnis eines `poll()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub outcomes: Outcomes,
    /// Erster LED- oder Display-Fehler in diesem Tick
    pub fault: Option<PortalError>,
}

impl Tick {
    pub fn is_ok(&self) -> bool {
        self.fault.is_none()
    }
}

/// Aktuell laufender LED-Effekt
#[derive(Debug, Clone)]
enum Effect {
    PowerUp(Ramp),
    ModeFade(FadeTransition),
    ShotPulse(ShotPulse),
    ShotSwitch(FadeTransition),
}

impl Effect {
    fn next_frame(&mut self) -> Option<Frame> {
        match self {
            Effect::PowerUp(ramp) => ramp.next(),
            Effect::ModeFade(fade) | Effect::ShotSwitch(fade) => fade.next(),
            Effect::ShotPulse(pulse) => pulse.next(),
        }
    }
}

pub struct PortalController<L, A, D> {
    leds: L,
    audio: Audio<A>,
    display: D,
    config: ControllerConfig,
    state: PortalState,
    poller: InputPoller,
    effect: Option<Effect>,
    next_frame_at: u64,
    next_refresh_at: u64,
    message_until: u64,
    last_frame: Option<Frame>,
    fault: Option<PortalError>,
    audio_failures: u32,
}

impl<L, A, D> PortalController<L, A, D>
where
    L: PortalLeds,
    A: AudioPlayer,
    D: StatusDisplay,
{
    pub fn new(leds: L, audio: Audio<A>, display: D, config: ControllerConfig) -> Self {
        Self {
            leds,
            audio,
            display,
            config,
            state: PortalState::new(),
            poller: InputPoller::new(config.debounce_ms),
            effect: None,
            next_frame_at: 0,
            next_refresh_at: 0,
            message_until: 0,
            last_frame: None,
            fault: None,
            audio_failures: 0,
        }
    }

    /// Einschalt-Sequenz: Sound, Blau hochdimmen, Status zeichnen
    ///
    /// Läuft auch bei Hardware-Fehlern vollständig durch, der erste Fehler
    /// wird danach zurückgegeben.
    pub fn power_up(&mut self, now_ms: u64) -> Result<(), PortalError> {
        let result = self.write_frame(Frame::single(self.state.mode(), 0, 0));
        self.record(result);
        self.start(
            Effect::PowerUp(Ramp::power_up(self.state.mode(), &self.config)),
            now_ms,
        );
        self.play(AudioTrack::PowerUp);
        let result = self.refresh_display(now_ms);
        self.record(result);

        match self.fault.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Ein Loop-Durchlauf
    ///
    /// `toggle_low`/`shoot_low`: aktueller Pegel der Taster (true = gedrückt).
    pub fn poll(&mut self, now_ms: u64, toggle_low: bool, shoot_low: bool) -> Tick {
        let mut outcomes = Outcomes::new();

        if let Some(button) = self.poller.sample(now_ms, toggle_low, shoot_low) {
            let _ = outcomes.push(self.handle(button, now_ms));
        }

        if let Some(outcome) = self.advance(now_ms) {
            let _ = outcomes.push(outcome);
        }

        if now_ms >= self.next_refresh_at {
            let result = self.refresh_display(now_ms);
            self.record(result);
        }

        Tick {
            outcomes,
            fault: self.fault.take(),
        }
    }

    fn handle(&mut self, button: Button, now_ms: u64) -> Outcome {
        if self.effect.is_some() {
            return Outcome::Ignored { button };
        }

        match button {
            Button::Toggle => {
                let Some(to) = self.state.toggle() else {
                    return Outcome::Ignored { button };
                };
                self.start(
                    Effect::ModeFade(FadeTransition::new(to.toggled(), &self.config)),
                    now_ms,
                );
                self.play(AudioTrack::ModeSwitch);
                self.show_message(now_ms, |display| screen::render_mode_switch(display, to));
                Outcome::Toggled { to }
            }
            Button::Shoot => {
                let Some(color) = self.state.begin_shot() else {
                    return Outcome::Ignored { button };
                };
                self.start(Effect::ShotPulse(ShotPulse::new(color, &self.config)), now_ms);
                self.play(color.fire_track());
                Outcome::ShotStarted { color }
            }
        }
    }

    /// Schaltet den laufenden Effekt weiter oder zeigt die Leerlauf-Anzeige
    ///
    /// Ein fehlgeschlagener Frame wird nicht wiederholt, der Effekt läuft weiter.
    fn advance(&mut self, now_ms: u64) -> Option<Outcome> {
        let mut outcome = None;

        while let Some(effect) = self.effect.as_mut() {
            if now_ms < self.next_frame_at {
                return outcome;
            }
            if let Some(frame) = effect.next_frame() {
                self.next_frame_at = now_ms + u64::from(frame.hold_ms);
                let result = self.write_frame(frame);
                self.record(result);
                return outcome;
            }
            outcome = self.finish_effect(now_ms);
        }

        let result = self.write_frame(idle_frame(self.state.mode(), now_ms, &self.config));
        self.record(result);
        outcome
    }

    /// Effekt ist durchgelaufen: Folge-Effekt starten oder Schuss abschließen
    fn finish_effect(&mut self, now_ms: u64) -> Option<Outcome> {
        match self.effect.take() {
            Some(Effect::ShotPulse(pulse)) => {
                let to = pulse.color().toggled();
                self.start(
                    Effect::ShotSwitch(FadeTransition::new(pulse.color(), &self.config)),
                    now_ms,
                );
                self.show_message(now_ms, |display| screen::render_auto_switch(display, to));
                None
            }
            Some(Effect::ShotSwitch(_)) => {
                let mode = self.state.finish_shot()?;
                Some(Outcome::ShotCompleted {
                    mode,
                    fired: self.state.fired(),
                })
            }
            Some(Effect::PowerUp(_)) | Some(Effect::ModeFade(_)) | None => None,
        }
    }

    fn start(&mut self, effect: Effect, now_ms: u64) {
        self.effect = Some(effect);
        self.next_frame_at = now_ms;
    }

    /// Schreibt nur geänderte Kanäle
    fn write_frame(&mut self, frame: Frame) -> Result<(), PortalError> {
        let previous = self.last_frame;
        for color in [PortalColor::Blue, PortalColor::Red] {
            if previous.map(|p| p.duty(color)) != Some(frame.duty(color)) {
                self.leds.set_duty(color, frame.duty(color))?;
            }
        }
        self.last_frame = Some(frame);
        Ok(())
    }

    /// Meldung zeichnen und für `message_hold_ms` stehen lassen
    fn show_message<F>(&mut self, now_ms: u64, render: F)
    where
        F: FnOnce(&mut D) -> Result<(), DisplayError>,
    {
        self.message_until = now_ms + u64::from(self.config.message_hold_ms);
        self.next_refresh_at = self.message_until;
        let result = render(&mut self.display);
        self.record(result);
    }

    /// Merkt sich den ersten Fehler des laufenden Ticks
    fn record<E: Into<PortalError>>(&mut self, result: Result<(), E>) {
        if let (Err(e), None) = (result, self.fault) {
            self.fault = Some(e.into());
        }
    }

    fn refresh_display(&mut self, now_ms: u64) -> Result<(), PortalError> {
        self.next_refresh_at = now_ms + u64::from(self.config.display_refresh_ms);
        if self.state.is_shooting() || now_ms < self.message_until {
            return Ok(());
        }
        let snapshot = self.snapshot();
        screen::render_status(&mut self.display, &snapshot)?;
        Ok(())
    }

    /// Audio-Fehler zur Laufzeit brechen nichts ab, sie werden nur gezählt
    fn play(&mut self, track: AudioTrack) {
        if self.audio.play(track).is_err() {
            self.audio_failures = self.audio_failures.wrapping_add(1);
        }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.state.snapshot(self.audio.is_available())
    }

    pub fn state(&self) -> &PortalState {
        &self.state
    }

    /// Läuft gerade ein LED-Effekt (Eingaben werden verworfen)?
    pub fn is_busy(&self) -> bool {
        self.effect.is_some()
    }

    pub fn audio_failures(&self) -> u32 {
        self.audio_failures
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn leds_mut(&mut self) -> &mut L {
        &mut self.leds
    }

    pub fn audio(&self) -> &Audio<A> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut Audio<A> {
        &mut self.audio
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
