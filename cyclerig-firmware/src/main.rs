//! Cyclerig - Strapping Tool Endurance Rig Firmware
//!
//! Main firmware binary for the RP2040-based rig controller. Runs the
//! strapping cycle in a single fixed-period loop: read the panel, poll the
//! rig, persist what changed, refresh the panel.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart};
use embassy_time::{Duration, Instant, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cyclerig_core::counter::CounterKind;
use cyclerig_core::logbook::ClockTime;
use cyclerig_core::rig::Rig;
use cyclerig_hal_rp2040::flash::Rp2040FlashStorage;
use cyclerig_hal_rp2040::uart::panel_uart_config;

use crate::io::RigPins;
use crate::panel::Panel;
use crate::persistence::RigStorage;
use crate::steps::{RigStep, CYCLE_LEN};

mod io;
mod panel;
mod persistence;
mod steps;

/// Control loop period
const LOOP_PERIOD_MS: u32 = 5;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// UART buffers must live forever
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Time of day derived from uptime; the board has no battery-backed clock
fn clock_time(now: Instant) -> ClockTime {
    ClockTime::from_seconds(now.as_secs() as u32)
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Cyclerig firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Persistent state
    let mut storage = RigStorage::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0));
    let config = storage.load_config().await;
    let counters = storage.load_counters().await;
    let logbook = storage.load_logbook().await;

    // Valves and sensors
    let (mut rig_io, cylinders) = unwrap!(io::build(RigPins {
        sled: p.PIN_2,
        strap_clamp: p.PIN_3,
        tension: p.PIN_4,
        weld: p.PIN_5,
        rocker_lever: p.PIN_6,
        knife: p.PIN_7,
        strap_sensor: p.PIN_10,
    }));
    info!("{} cylinders wired", rig_io.cylinder_count());

    let registry = unwrap!(steps::strapping_cycle(&cylinders));
    for (index, label) in registry.labels().enumerate() {
        debug!("Step {}: {}", index, label);
    }
    let mut rig: Rig<RigStep, CYCLE_LEN> =
        Rig::with_logbook(registry, config, counters, logbook, clock_time(Instant::now()));
    info!(
        "{} steps registered, starting in {:?} mode",
        rig.sequencer().step_count(),
        rig.sequencer().mode()
    );

    // Panel on UART0
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        tx_buf,
        rx_buf,
        panel_uart_config(),
    );
    let (tx, rx) = uart.split();
    let mut panel = Panel::new(rx, tx);

    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS as u64));
    let mut last = Instant::now();

    info!("Control loop running");

    loop {
        ticker.next().await;

        let now = Instant::now();
        let delta_ms = (now - last).as_millis() as u32;
        last = now;
        let time = clock_time(now);

        // Operator input
        for command in panel.poll_commands(config.cooling_step_s).await {
            if let Err(e) = rig.handle_command(command, time) {
                warn!("Command {:?} rejected: {:?}", command, e);
            }
        }

        let report = rig.poll(&mut rig_io, delta_ms, time);
        if report.tick.changed {
            debug!(
                "Step {}: {}",
                rig.sequencer().current_index(),
                rig.sequencer().current_label().unwrap_or("")
            );
        }
        if report.cycle_completed {
            info!(
                "Cycle {} completed",
                rig.counters().get(CounterKind::LongTime)
            );
        }
        if let Some(action) = report.timeout {
            warn!("Inactivity timeout: {:?}", action);
        }
        if report.magazine_empty {
            warn!("Strap magazine empty, rig stopped");
        }

        // Persistence
        if rig.persist_counters(&mut storage) {
            storage.flush().await;
        }
        if rig.logbook_mut().take_changed() {
            storage.save_logbook(rig.logbook()).await;
        }

        panel.refresh(&rig.view()).await;
    }
}
