//! ATmega128 register-level adapters, compiled for the AVR target only

pub mod adc;
pub mod gpio;
pub mod pwm;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use adc::{Adc, AdcChannel};
pub use gpio::{board, Input, Output, Pin};
pub use pwm::ToneTimer;
pub use timer::{millis, SysTick};
pub use uart::Uart;
