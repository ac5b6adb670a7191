// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use defmt::{error, info, warn};
use esp_hal::clock::CpuClock;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, Uart};

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use portal_gun::config::{
    AUDIO_BAUDRATE, AUDIO_VOLUME, DISPLAY_I2C_FREQUENCY_KHZ, PWM_FREQUENCY_KHZ, controller_config,
};
use portal_gun::hal::{DfPlayer, LedcPortalLeds, OledStatusDisplay, PortalButtons};
use portal_gun::tasks::portal_task;
use portal_gun::{AudioTrack, DisplayError, FirmwareAudio, PortalController};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert LEDs, Taster, Audio und Display, startet Embassy Runtime
/// und spawnt den Portal-Task. Danach schläft main().
///
/// Reihenfolge:
/// 1. LEDs aus (beide Kanäle Duty 0)
/// 2. Audio (optional, ohne DFPlayer läuft alles stumm weiter)
/// 3. Display (Pflicht, ohne Display wird angehalten)
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // PWM LEDs: blau GPIO4, rot GPIO5
    let leds = LedcPortalLeds::new(
        peripherals.LEDC,
        peripherals.GPIO4,
        peripherals.GPIO5,
        PWM_FREQUENCY_KHZ,
    )
    .expect("Failed to configure LEDC timer/channels");

    // Taster: Farbwechsel GPIO2, Schuss GPIO3
    let buttons = PortalButtons::new(peripherals.GPIO2, peripherals.GPIO3);

    // DFPlayer über UART1 (TX GPIO18, RX GPIO19)
    let audio: FirmwareAudio = match Uart::new(
        peripherals.UART1,
        UartConfig::default().with_baudrate(AUDIO_BAUDRATE),
    ) {
        Ok(uart) => {
            let uart = uart.with_tx(peripherals.GPIO18).with_rx(peripherals.GPIO19);
            FirmwareAudio::from_init(DfPlayer::init(uart, AUDIO_VOLUME))
        }
        Err(_) => FirmwareAudio::disabled(),
    };
    if audio.is_available() {
        info!("Audio: DFPlayer ready, volume {}", AUDIO_VOLUME);
    } else {
        warn!("Audio: DFPlayer not responding, running silent");
    }

    // OLED über I2C0 (SDA GPIO6, SCL GPIO7)
    let display = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(DISPLAY_I2C_FREQUENCY_KHZ)),
    )
    .map_err(|_| DisplayError::InitFailed)
    .and_then(|i2c| {
        OledStatusDisplay::new(i2c.with_sda(peripherals.GPIO6).with_scl(peripherals.GPIO7))
    });

    let display = match display {
        Ok(display) => display,
        Err(e) => {
            error!("Display: init failed: {}", e);
            halt(audio).await
        }
    };

    let controller = PortalController::new(leds, audio, display, controller_config());

    // Spawn Portal Task (besitzt alle Treiber)
    spawner.spawn(portal_task(controller, buttons)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}

/// Hält das Gerät an, wenn ohne Display kein Betrieb möglich ist
///
/// Spielt vorher noch den Power-Down Sound, falls Audio verfügbar ist.
async fn halt(mut audio: FirmwareAudio) -> ! {
    if audio.play(AudioTrack::PowerDown).is_err() {
        warn!("Audio: power-down sound failed");
    }
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
