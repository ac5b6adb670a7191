// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter den Traits aus portal-core,
// damit die Steuerungs-Logik ohne Hardware testbar bleibt.

pub mod buttons;
pub mod dfplayer;
pub mod oled;
pub mod pwm_leds;

pub use buttons::PortalButtons;
pub use dfplayer::DfPlayer;
pub use oled::OledStatusDisplay;
pub use pwm_leds::LedcPortalLeds;
