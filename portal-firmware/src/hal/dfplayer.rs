// DFPlayer Mini über UART
//
// Frame-Aufbau und Checksumme liegen in portal_core::dfplayer (host-testbar),
// hier passiert nur der Transport.

use esp_hal::Blocking;
use esp_hal::delay::Delay;
use esp_hal::uart::Uart;

use portal_core::dfplayer::{self, Command, FRAME_LEN};
use portal_core::{AudioError, AudioPlayer, AudioTrack};

use crate::config::{AUDIO_BOOT_MS, AUDIO_REPLY_POLL_MS, AUDIO_REPLY_TIMEOUT_MS};

pub struct DfPlayer {
    uart: Uart<'static, Blocking>,
}

impl DfPlayer {
    /// Reset, auf Antwort warten, Lautstärke setzen
    ///
    /// Antwortet das Modul nicht innerhalb des Timeouts, gibt es
    /// `AudioError::NotResponding` zurück.
    pub fn init(uart: Uart<'static, Blocking>, volume: u8) -> Result<Self, AudioError> {
        let mut player = Self { uart };
        let delay = Delay::new();

        player.send(&dfplayer::encode(Command::Reset, 0, false))?;
        delay.delay_millis(AUDIO_BOOT_MS);

        player.send(&dfplayer::encode(Command::QueryStatus, 0, false))?;
        player.wait_for_reply(&delay)?;

        player.send(&dfplayer::set_volume(volume))?;
        Ok(player)
    }

    fn send(&mut self, frame: &[u8; FRAME_LEN]) -> Result<(), AudioError> {
        let mut sent = 0;
        while sent < frame.len() {
            sent += self
                .uart
                .write(&frame[sent..])
                .map_err(|_| AudioError::WriteFailed)?;
        }
        Ok(())
    }

    /// Sammelt Bytes bis ein gültiger Frame erkannt wird
    fn wait_for_reply(&mut self, delay: &Delay) -> Result<(), AudioError> {
        let mut buffer = [0u8; 4 * FRAME_LEN];
        let mut len = 0;
        let mut waited = 0;

        while waited < AUDIO_REPLY_TIMEOUT_MS {
            if self.uart.read_ready() {
                if len == buffer.len() {
                    // Nur Rauschen empfangen, von vorne sammeln
                    len = 0;
                }
                len += self
                    .uart
                    .read(&mut buffer[len..])
                    .map_err(|_| AudioError::NotResponding)?;
                if dfplayer::find_reply(&buffer[..len]).is_some() {
                    return Ok(());
                }
            } else {
                delay.delay_millis(AUDIO_REPLY_POLL_MS);
                waited += AUDIO_REPLY_POLL_MS;
            }
        }
        Err(AudioError::NotResponding)
    }
}

impl AudioPlayer for DfPlayer {
    fn play(&mut self, track: AudioTrack) -> Result<(), AudioError> {
        self.send(&dfplayer::play_track(track.number()))
    }
}
