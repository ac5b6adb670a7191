// Library-Root: Hardware-Adapter und Task für die Portal-Steuerung
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von portal-core
pub use portal_core::{
    Audio, AudioTrack, ControllerConfig, DisplayError, Outcome, PortalColor, PortalController,
    PortalError,
};

use crate::hal::{DfPlayer, LedcPortalLeds, OledStatusDisplay};

// ============================================================================
// Type-Aliase
// ============================================================================
//
// Statt:  PortalController<LedcPortalLeds, DfPlayer, OledStatusDisplay>
// Nutze:  FirmwareController

/// Controller mit den echten Treibern (LEDC, DFPlayer, SSD1306)
pub type FirmwareController = PortalController<LedcPortalLeds, DfPlayer, OledStatusDisplay>;

/// Audio-Wrapper für den DFPlayer (evtl. deaktiviert)
pub type FirmwareAudio = Audio<DfPlayer>;
