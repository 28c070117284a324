//! Millisecond system tick on Timer0
//!
//! Timer0 runs in CTC mode at 1kHz and its compare interrupt bumps a shared
//! counter. The main loop polls [`millis`] and catches up one game tick per
//! elapsed millisecond.

use avr_device::atmega128a::TC0;
use avr_device::interrupt::Mutex;
use core::cell::Cell;

use crate::config::{CPU_FREQ_HZ, TICK_MS};

static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div32 = 3,
    Div64 = 4,
    Div128 = 5,
    Div256 = 6,
    Div1024 = 7,
}

impl Prescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Stop => 0,
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div32 => 32,
            Prescaler::Div64 => 64,
            Prescaler::Div128 => 128,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

const TICK_PRESCALER: Prescaler = Prescaler::Div64;
// 16MHz / 64 / 250 = 1kHz
const TICK_COMPARE: u8 =
    (CPU_FREQ_HZ / TICK_PRESCALER.divisor() / (1000 / TICK_MS)) as u8 - 1;

/// Holds Timer0 for as long as the tick runs.
pub struct SysTick {
    _tc0: TC0,
}

impl SysTick {
    /// Start the 1ms tick. Interrupts must be enabled by the caller.
    pub fn start(tc0: TC0) -> Self {
        // WGM01: clear timer on compare match
        tc0.tccr0.write(|w| unsafe { w.bits((1 << 3) | TICK_PRESCALER as u8) });
        tc0.ocr0.write(|w| unsafe { w.bits(TICK_COMPARE) });
        tc0.tcnt0.write(|w| unsafe { w.bits(0) });
        // OCIE0
        tc0.timsk.modify(|r, w| unsafe { w.bits(r.bits() | (1 << 1)) });
        Self { _tc0: tc0 }
    }
}

/// Milliseconds since [`SysTick::start`], wrapping after ~49 days.
pub fn millis() -> u32 {
    avr_device::interrupt::free(|cs| MILLIS.borrow(cs).get())
}

#[avr_device::interrupt(atmega128a)]
fn TIMER0_COMP() {
    avr_device::interrupt::free(|cs| {
        let counter = MILLIS.borrow(cs);
        counter.set(counter.get().wrapping_add(TICK_MS));
    });
}
