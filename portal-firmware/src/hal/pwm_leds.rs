// PWM LED-Kanäle über das LEDC Peripheral
//
// Zwei Low-Speed Kanäle teilen sich einen 8-Bit Timer,
// Duty 0-255 wird direkt in das Duty-Register geschrieben.

use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::ledc::channel::{self, ChannelHW, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::LEDC;
use esp_hal::time::Rate;
use static_cell::StaticCell;

use portal_core::{LedError, PortalColor, PortalLeds};

/// Treiber und Timer müssen 'static sein, weil die Kanäle darauf verweisen
static LEDC_DRIVER: StaticCell<Ledc<'static>> = StaticCell::new();
static PWM_TIMER: StaticCell<timer::Timer<'static, LowSpeed>> = StaticCell::new();

/// Real Hardware LED Writer
///
/// Nutzt das ESP32 LEDC Peripheral für flimmerfreies Dimmen.
///
/// Hinweis: Darf nur einmal erzeugt werden (StaticCell für Treiber und Timer).
pub struct LedcPortalLeds {
    blue: channel::Channel<'static, LowSpeed>,
    red: channel::Channel<'static, LowSpeed>,
}

impl LedcPortalLeds {
    /// Erstellt beide PWM-Kanäle, beide starten dunkel
    ///
    /// Fehler beim Konfigurieren von Timer oder Kanal: `LedError::ConfigFailed`
    ///
    /// # Parameter
    /// - `ledc_peripheral`: LEDC Peripheral
    /// - `blue_pin`/`red_pin`: Ausgänge der zwei LED-Kanäle
    /// - `frequency_khz`: PWM-Trägerfrequenz
    pub fn new(
        ledc_peripheral: LEDC<'static>,
        blue_pin: impl PeripheralOutput<'static>,
        red_pin: impl PeripheralOutput<'static>,
        frequency_khz: u32,
    ) -> Result<Self, LedError> {
        let ledc = LEDC_DRIVER.init(Ledc::new(ledc_peripheral));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        let pwm_timer = PWM_TIMER.init(ledc.timer::<LowSpeed>(timer::Number::Timer0));
        pwm_timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_khz(frequency_khz),
            })
            .map_err(|_| LedError::ConfigFailed)?;
        let pwm_timer: &'static timer::Timer<'static, LowSpeed> = pwm_timer;

        let mut blue = ledc.channel(channel::Number::Channel0, blue_pin);
        let mut red = ledc.channel(channel::Number::Channel1, red_pin);
        for ch in [&mut blue, &mut red] {
            ch.configure(channel::config::Config {
                timer: pwm_timer,
                duty_pct: 0,
                pin_config: channel::config::PinConfig::PushPull,
            })
            .map_err(|_| LedError::ConfigFailed)?;
        }

        Ok(Self { blue, red })
    }
}

impl PortalLeds for LedcPortalLeds {
    fn set_duty(&mut self, channel: PortalColor, duty: u8) -> Result<(), LedError> {
        let ch = match channel {
            PortalColor::Blue => &self.blue,
            PortalColor::Red => &self.red,
        };
        ch.set_duty_hw(u32::from(duty));
        Ok(())
    }
}
