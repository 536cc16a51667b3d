//! Touch panel link
//!
//! Parses return frames from the panel UART into commands and writes the
//! renderer's instructions back out.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, ReadReady, Write};
use heapless::Vec;

use cyclerig_core::rig::RigView;
use cyclerig_core::state::Command;
use cyclerig_display::{interpret, Outbox, PanelAction, PanelRenderer};
use cyclerig_protocol::FrameParser;

/// Buffer size for one UART read
const RX_BUF_SIZE: usize = 32;

/// Instructions queued per render
const OUTBOX_LEN: usize = 16;

/// Commands collected per poll
pub const MAX_COMMANDS: usize = 8;

/// Panel state owned by the control loop
pub struct Panel {
    rx: BufferedUartRx,
    tx: BufferedUartTx,
    parser: FrameParser,
    renderer: PanelRenderer,
    outbox: Outbox<OUTBOX_LEN>,
}

impl Panel {
    pub fn new(rx: BufferedUartRx, tx: BufferedUartTx) -> Self {
        Self {
            rx,
            tx,
            parser: FrameParser::new(),
            renderer: PanelRenderer::new(),
            outbox: Outbox::new(),
        }
    }

    /// Drain received bytes without waiting
    ///
    /// Returns the operator commands found; events beyond
    /// [`MAX_COMMANDS`] are dropped with a warning.
    pub async fn poll_commands(&mut self, cooling_step_s: u8) -> Vec<Command, MAX_COMMANDS> {
        let mut commands = Vec::new();
        let mut buf = [0u8; RX_BUF_SIZE];

        while self.rx.read_ready().unwrap_or(false) {
            let n = match self.rx.read(&mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    warn!("Panel UART read error: {:?}", e);
                    break;
                }
            };

            for &byte in &buf[..n] {
                let event = match self.parser.feed(byte) {
                    Ok(Some(event)) => event,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!("Panel frame error: {:?}", e);
                        continue;
                    }
                };

                if event.is_error() {
                    warn!("Panel rejected instruction: {:?}", event);
                    // Whatever was sent may not have landed
                    self.renderer.invalidate();
                    continue;
                }

                match interpret(event, cooling_step_s) {
                    PanelAction::Command(command) => {
                        debug!("Panel command: {:?}", command);
                        if commands.push(command).is_err() {
                            warn!("Command queue full, dropping {:?}", command);
                        }
                    }
                    PanelAction::Redraw => {
                        debug!("Panel requested redraw");
                        self.renderer.invalidate();
                    }
                    PanelAction::Ignore => {}
                }
            }
        }

        commands
    }

    /// Send whatever changed since the last refresh
    pub async fn refresh(&mut self, view: &RigView) {
        self.outbox.clear();
        if let Err(e) = self.renderer.render(view, &mut self.outbox) {
            warn!("Panel render failed: {:?}", e);
            return;
        }

        for instruction in self.outbox.iter() {
            if let Err(e) = self.tx.write_all(instruction).await {
                warn!("Panel UART write error: {:?}", e);
                self.renderer.invalidate();
                break;
            }
        }
    }
}
