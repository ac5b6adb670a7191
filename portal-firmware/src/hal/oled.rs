// SSD1306 OLED (128x64) über I2C
//
// Zeichnet in den Framebuffer des Treibers, flush() überträgt ihn.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use esp_hal::Blocking;
use esp_hal::i2c::master::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use portal_core::{DisplayError, StatusDisplay, TextSize};

type Oled = Ssd1306<
    I2CInterface<I2c<'static, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// Status-Display auf Basis des ssd1306 Treibers
pub struct OledStatusDisplay {
    display: Oled,
}

impl OledStatusDisplay {
    /// Initialisiert das Panel
    ///
    /// Schlägt fehl wenn das Display nicht am Bus antwortet.
    pub fn new(i2c: I2c<'static, Blocking>) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| DisplayError::InitFailed)?;
        display.clear_buffer();
        display.flush().map_err(|_| DisplayError::InitFailed)?;
        Ok(Self { display })
    }
}

impl StatusDisplay for OledStatusDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear_buffer();
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        size: TextSize,
    ) -> Result<(), DisplayError> {
        let font = match size {
            TextSize::Normal => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        };
        let style = MonoTextStyle::new(font, BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.display)
            .map_err(|_| DisplayError::DrawFailed)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.display.flush().map_err(|_| DisplayError::FlushFailed)
    }
}
