// Portal Task - treibt den Controller im festen Scheduler-Takt
use defmt::{error, info, warn};
use embassy_time::{Duration, Instant, Ticker};

use portal_core::{AudioPlayer, Outcome, PortalController, PortalLeds, StatusDisplay};

use crate::FirmwareController;
use crate::config::TICK_MS;
use crate::hal::PortalButtons;

/// Portal Loop - generisch über Treiber und Taster-Quelle
///
/// Pro Tick:
/// - Taster-Pegel lesen
/// - `PortalController::poll()` aufrufen (Entprellung, Zustandsmaschine,
///   LED-Frame, Display-Refresh)
/// - Ergebnisse und Fehler loggen
///
/// Fehler brechen den Loop nicht ab, der nächste Tick versucht es erneut.
///
/// # Parameter
/// - `controller`: Controller mit LED-, Audio- und Display-Treiber
/// - `read_buttons`: Liefert (toggle_gedrückt, shoot_gedrückt)
pub async fn portal_loop<L, A, D, B>(
    mut controller: PortalController<L, A, D>,
    mut read_buttons: B,
) -> !
where
    L: PortalLeds,
    A: AudioPlayer,
    D: StatusDisplay,
    B: FnMut() -> (bool, bool),
{
    if let Err(e) = controller.power_up(now_ms()) {
        error!("Portal: power-up failed: {}", e);
    }
    info!("Portal: ready {}", controller.snapshot());

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut audio_failures = 0;

    loop {
        let (toggle_low, shoot_low) = read_buttons();

        let tick = controller.poll(now_ms(), toggle_low, shoot_low);
        for outcome in tick.outcomes.iter() {
            log_outcome(outcome);
        }
        if let Some(e) = tick.fault {
            error!("Portal: {}", e);
        }

        if controller.audio_failures() != audio_failures {
            audio_failures = controller.audio_failures();
            warn!("Portal: audio playback failed ({} total)", audio_failures);
        }

        ticker.next().await;
    }
}

fn log_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Ignored { button } => info!("Portal: {} ignored, effect running", button),
        other => info!("Portal: {}", other),
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Portal Task - Embassy Task mit den konkreten Hardware-Treibern
///
/// Reicht die Taster als Pegel-Quelle an `portal_loop()` weiter.
#[embassy_executor::task]
pub async fn portal_task(controller: FirmwareController, buttons: PortalButtons) {
    portal_loop(controller, || buttons.levels()).await
}
