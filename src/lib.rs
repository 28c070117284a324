//! Simon memory game for the ATmega128 board
//!
//! The game core ([`game::Simon`]) is `no_std`, allocation-free and knows
//! nothing about registers: it is ticked once per millisecond, fed discrete
//! [`input::Input`] events, and drives the outside world through the
//! [`board`] capability traits. The AVR firmware and the host console are
//! thin adapters around it.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod board;
pub mod config;
pub mod console;
pub mod drivers;
pub mod game;
pub mod highscore;
pub mod input;
pub mod lfsr;
pub mod logger;
pub mod report;
pub mod testing;
pub mod timing;
pub mod tone;

#[cfg(target_arch = "avr")]
pub mod hal;

pub use board::{Board, Button, Buzzer, Console, Display, Frame, Tone};
pub use config::GameConfig;
pub use game::{Phase, Simon};
pub use input::Input;
pub use report::Report;
