//! Panel UART setup
//!
//! The touch panel talks 8N1 at its factory baud rate; the firmware
//! switches it to buffered mode for interrupt-driven RX.

use embassy_rp::uart::Config;

/// Panel factory baud rate
pub const PANEL_BAUDRATE: u32 = 9600;

/// UART configuration for the touch panel
pub fn panel_uart_config() -> Config {
    let mut config = Config::default();
    config.baudrate = PANEL_BAUDRATE;
    config
}
