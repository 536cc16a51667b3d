//! Main page renderer
//!
//! Keeps the last view the panel was brought up to date with and only
//! sends the fields that differ. The first render (and any render after
//! [`PanelRenderer::invalidate`]) switches to the main page and sends
//! every field.

use core::fmt::Write;

use heapless::String;

use cyclerig_core::counter::CounterKind;
use cyclerig_core::rig::RigView;
use cyclerig_core::status::Color;
use cyclerig_protocol::Instruction;

use crate::backend::{DisplayError, InstructionSink};
use crate::layout;

/// Play button color while running
pub const RUNNING_COLOR: Color = Color::GREEN;
/// Play button color while stopped
pub const STOPPED_COLOR: Color = Color::RED;

/// Diffing renderer for the main page
#[derive(Debug, Default)]
pub struct PanelRenderer {
    shown: Option<RigView>,
}

impl PanelRenderer {
    /// Create a renderer that will draw everything on first use
    pub const fn new() -> Self {
        Self { shown: None }
    }

    /// Forget what the panel shows; the next render redraws everything
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Check if the next render is a full redraw
    pub fn needs_full_redraw(&self) -> bool {
        self.shown.is_none()
    }

    /// Bring the panel up to date with `view`
    ///
    /// Returns the number of instructions sent. On error the renderer
    /// invalidates itself so the next render starts over.
    pub fn render<K: InstructionSink + ?Sized>(
        &mut self,
        view: &RigView,
        sink: &mut K,
    ) -> Result<usize, DisplayError> {
        let shown = self.shown.take();
        let sent = Self::send_changes(shown.as_ref(), view, sink)?;
        self.shown = Some(view.clone());
        Ok(sent)
    }

    fn send_changes<K: InstructionSink + ?Sized>(
        shown: Option<&RigView>,
        view: &RigView,
        sink: &mut K,
    ) -> Result<usize, DisplayError> {
        let mut sent = 0;
        let mut send = |instruction: Instruction<'_>| -> Result<(), DisplayError> {
            sink.send(instruction)?;
            sent += 1;
            Ok(())
        };

        if shown.is_none() {
            send(Instruction::Page(layout::PAGE_MAIN))?;
        }
        if shown.map_or(true, |s| {
            s.step_index != view.step_index || s.step_count != view.step_count
        }) {
            let number = step_number_text(view);
            send(Instruction::Text {
                object: layout::STEP_NUMBER,
                text: &number,
            })?;
        }
        if shown.map_or(true, |s| s.label != view.label) {
            send(Instruction::Text {
                object: layout::STEP_LABEL,
                text: &view.label,
            })?;
        }
        if shown.map_or(true, |s| s.mode != view.mode) {
            send(Instruction::Text {
                object: layout::MODE_BUTTON,
                text: view.mode.text(),
            })?;
        }
        if shown.map_or(true, |s| s.running != view.running) {
            let color = if view.running {
                RUNNING_COLOR
            } else {
                STOPPED_COLOR
            };
            send(Instruction::ForeColor {
                object: layout::PLAY_BUTTON,
                color: color.rgb565(),
            })?;
        }
        if shown.map_or(true, |s| s.signal != view.signal) {
            send(Instruction::Text {
                object: layout::INFO,
                text: view.signal.text(),
            })?;
            send(Instruction::BackColor {
                object: layout::INFO,
                color: view.signal.color().rgb565(),
            })?;
        }

        for (kind, object) in [
            (CounterKind::ShortTime, layout::SHORT_COUNTER),
            (CounterKind::LongTime, layout::LONG_COUNTER),
            (CounterKind::CoolingTime, layout::COOLING_TIME),
        ] {
            let value = view.counters.get(kind);
            if shown.map_or(true, |s| s.counters.get(kind) != value) {
                send(Instruction::Value {
                    object,
                    value: i32::try_from(value).unwrap_or(i32::MAX),
                })?;
            }
        }

        Ok(sent)
    }
}

fn step_number_text(view: &RigView) -> String<12> {
    let mut text = String::new();
    // Two usize values always fit
    let _ = write!(text, "{}/{}", view.step_number(), view.step_count);
    text
}
