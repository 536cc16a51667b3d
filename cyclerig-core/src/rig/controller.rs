//! Rig controller implementation

use crate::config::RigConfig;
use crate::counter::{persist_if_changed, CounterBank, CounterKind, CounterStore};
use crate::logbook::{ClockTime, LogCode, LogEntry, Logbook};
use crate::safety::{RigMonitor, TimeoutAction};
use crate::sequence::{
    make_label, SequenceError, Sequencer, Step, StepRegistry, TickReport, MAX_STEPS,
};
use crate::state::Command;
use crate::status::StatusLight;
use crate::traits::RigIo;

use super::view::RigView;

/// What happened during one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RigReport {
    /// Sequencer outcome
    pub tick: TickReport,
    /// A pending reset was carried out before the tick
    pub reset: bool,
    /// The strap magazine ran empty and the rig stopped
    pub magazine_empty: bool,
    /// An inactivity timeout fired
    pub timeout: Option<TimeoutAction>,
    /// The last step completed and both cycle counters were bumped
    pub cycle_completed: bool,
}

/// Rig controller
///
/// Owns the sequencer and all bookkeeping state. Peripherals are not owned:
/// they are passed into [`poll`](Self::poll) on every iteration.
pub struct Rig<S, const N: usize = MAX_STEPS> {
    sequencer: Sequencer<S, N>,
    config: RigConfig,
    counters: CounterBank,
    logbook: Logbook,
    status: StatusLight,
    monitor: RigMonitor,
}

impl<S: Step, const N: usize> Rig<S, N> {
    /// Create a stopped rig at the first step and log the power up
    ///
    /// # Arguments
    /// - `registry`: The cycle's steps; sealed by the sequencer
    /// - `config`: Timing settings
    /// - `counters`: Counter values restored from storage
    /// - `now`: Time of day for the power-up log entry
    pub fn new(
        registry: StepRegistry<S, N>,
        config: RigConfig,
        counters: CounterBank,
        now: ClockTime,
    ) -> Self {
        Self::with_logbook(registry, config, counters, Logbook::new(), now)
    }

    /// Create a rig that continues a logbook restored from storage
    pub fn with_logbook(
        registry: StepRegistry<S, N>,
        config: RigConfig,
        counters: CounterBank,
        logbook: Logbook,
        now: ClockTime,
    ) -> Self {
        let mut sequencer = Sequencer::new(registry);
        sequencer.set_mode(config.boot_mode());

        let mut rig = Self {
            sequencer,
            config,
            counters,
            logbook,
            status: StatusLight::new(),
            monitor: RigMonitor::new(config.max_timeouts),
        };
        rig.log(LogCode::ToolReset, now);
        rig
    }

    /// Get the sequencer
    pub fn sequencer(&self) -> &Sequencer<S, N> {
        &self.sequencer
    }

    /// Get the configuration
    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Get the counter bank
    pub fn counters(&self) -> &CounterBank {
        &self.counters
    }

    /// Get the event logbook
    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }

    /// Get the event logbook mutably (to drain its change flag)
    pub fn logbook_mut(&mut self) -> &mut Logbook {
        &mut self.logbook
    }

    /// Get the status light
    pub fn status(&self) -> &StatusLight {
        &self.status
    }

    /// Get the status light mutably (to drain its change flag)
    pub fn status_mut(&mut self) -> &mut StatusLight {
        &mut self.status
    }

    /// Get the monitor
    pub fn monitor(&self) -> &RigMonitor {
        &self.monitor
    }

    /// Hand the counters to `store` if they changed since the last save
    pub fn persist_counters<C: CounterStore + ?Sized>(&mut self, store: &mut C) -> bool {
        persist_if_changed(&mut self.counters, store)
    }

    /// Apply an operator command
    ///
    /// Only an out-of-range [`Command::JumpTo`] fails; the state is then
    /// unchanged.
    pub fn handle_command(
        &mut self,
        command: Command,
        now: ClockTime,
    ) -> Result<(), SequenceError> {
        self.monitor.wake();

        match command {
            Command::Start => self.set_running(true, now),
            Command::Stop => self.set_running(false, now),
            Command::ToggleRunning => {
                let running = !self.sequencer.is_running();
                self.set_running(running, now);
            }
            Command::SetAutoMode => self.sequencer.set_auto_mode(),
            Command::SetStepMode => self.sequencer.set_step_mode(),
            Command::ToggleMode => {
                let mode = self.sequencer.mode().toggled();
                self.sequencer.set_mode(mode);
            }
            Command::NextStep => self.sequencer.step_forward(),
            Command::PreviousStep => self.sequencer.step_back(),
            Command::JumpTo(index) => self.sequencer.jump_to(index as usize)?,
            Command::RequestReset => {
                self.sequencer.set_run_after_reset(false);
                self.sequencer.request_reset();
            }
            Command::ResetCounter(kind) => self.counters.reset(kind),
            Command::AdjustCoolingTime(delta_s) => self.counters.adjust_cooling_time(delta_s),
        }

        self.update_status();
        Ok(())
    }

    /// Snapshot for the display
    pub fn view(&self) -> RigView {
        RigView {
            step_index: self.sequencer.current_index(),
            step_count: self.sequencer.step_count(),
            label: make_label(self.sequencer.current_label().unwrap_or("")),
            mode: self.sequencer.mode(),
            running: self.sequencer.is_running(),
            signal: self.status.signal(),
            counters: self.counters,
        }
    }

    fn set_running(&mut self, running: bool, now: ClockTime) {
        if running == self.sequencer.is_running() {
            return;
        }
        if running {
            self.sequencer.start();
            self.monitor.step_transition();
            self.log(LogCode::ManualOn, now);
        } else {
            self.sequencer.stop();
            self.log(LogCode::ManualOff, now);
        }
    }

    fn log(&mut self, code: LogCode, now: ClockTime) {
        let cycle = self.counters.get(CounterKind::ShortTime);
        self.logbook.write(LogEntry::new(cycle, now, code));
    }

    fn apply_timeout(&mut self, action: TimeoutAction, now: ClockTime) {
        match action {
            TimeoutAction::AutoReset => {
                self.sequencer.set_run_after_reset(true);
                self.sequencer.request_reset();
                self.log(LogCode::ShortTimeout, now);
            }
            TimeoutAction::AutoPause => {
                self.sequencer.stop();
                self.log(LogCode::LongTimeout, now);
            }
            TimeoutAction::ShutDown => {
                self.sequencer.stop();
                self.sequencer.set_step_mode();
                self.log(LogCode::ShutDown, now);
            }
        }
    }

    fn update_status(&mut self) {
        if self.sequencer.is_running() {
            self.status.set_operate();
        } else if self.monitor.is_idle(self.config.idle_sleep_ms()) {
            self.status.set_sleep();
        } else if self.sequencer.current_index() == 0 {
            self.status.set_start();
        } else {
            self.status.set_wait();
        }
    }
}

impl<S, const N: usize> Rig<S, N>
where
    S: Step,
    S::Io: RigIo,
{
    /// Run one control loop iteration
    ///
    /// # Arguments
    /// - `io`: Rig peripherals
    /// - `delta_ms`: Time elapsed since the previous poll
    /// - `now`: Time of day for log entries
    pub fn poll(&mut self, io: &mut S::Io, delta_ms: u32, now: ClockTime) -> RigReport {
        let mut report = RigReport::default();

        io.update(delta_ms);

        if self.sequencer.reset_requested() {
            self.carry_out_reset(io);
            report.reset = true;
        }

        let strap_present = io.strap_present();
        if self.monitor.update_strap(strap_present, self.sequencer.is_running()) {
            self.sequencer.stop();
            self.log(LogCode::MagazineEmpty, now);
            report.magazine_empty = true;
        }

        report.tick = self.sequencer.tick(io);
        if report.tick.advanced {
            self.monitor.progress();
        }
        if report.tick.changed {
            self.monitor.step_transition();
        }
        if report.tick.wrapped {
            self.counters.count_cycle();
            report.cycle_completed = true;
        }

        self.monitor.update_time(delta_ms, self.sequencer.is_running());
        let limit_ms = self.config.timeout_limit_ms(self.counters.cooling_time_s());
        if let Some(action) = self.monitor.check_timeout(limit_ms) {
            self.apply_timeout(action, now);
            report.timeout = Some(action);
        }

        self.update_status();
        report
    }

    fn carry_out_reset(&mut self, io: &mut S::Io) {
        self.sequencer.stop();
        io.release_all();
        self.sequencer.rearm_all(io);
        // Only fails on an empty sequence, where there is nothing to rewind
        let _ = self.sequencer.jump_to(0);
        self.sequencer.clear_reset();
        if self.sequencer.run_after_reset() {
            self.sequencer.start();
        }
    }
}
