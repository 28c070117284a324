#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use avr_device::atmega128a::Peripherals;
use panic_halt as _;

use simon_firmware::config::{GameConfig, BUILD_FREQ_HZ, CPU_FREQ_HZ, POT_SAMPLE_MS};
use simon_firmware::drivers::{BoardIo, ButtonPad, LedBank, PiezoBuzzer, SerialConsole};
use simon_firmware::hal::{self, Adc, AdcChannel, SysTick, ToneTimer, Uart};
use simon_firmware::input::{ButtonDebouncer, ButtonEvent, Input, PotSampler};
use simon_firmware::{Display, Frame, Simon};

#[avr_device::entry]
fn main() -> ! {
    // Only fails when called twice
    let Some(dp) = Peripherals::take() else {
        loop {}
    };

    let leds = LedBank::new(hal::board::leds());
    let buttons = ButtonPad::new(hal::board::buttons());
    let buzzer = PiezoBuzzer::new(ToneTimer::new(dp.TC1, &dp.PORTB), CPU_FREQ_HZ);
    let console = SerialConsole::new(Uart::new(dp.USART0));
    let mut adc = Adc::new(dp.ADC);
    let _tick = SysTick::start(dp.TC0);

    let mut io = BoardIo::new(leds, buzzer, console);
    let mut debouncer = ButtonDebouncer::new();
    let mut pot = PotSampler::new();
    let mut game = Simon::new(GameConfig::DEFAULT);

    // Enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    // Lamp test while the banner goes out
    io.show(Frame::Pattern(0b1111));

    // Print startup message
    let _ = io.console.write_line("Simon v0.1.0");
    let _ = io.console.write_str("F_CPU ");
    let _ = io.console.write_line(BUILD_FREQ_HZ);
    #[cfg(simon_debug)]
    let _ = io.console.debug("buttons", buttons.read_mask().unwrap_or(0));
    game.reset(&mut io);

    let mut last_tick = hal::millis();
    let mut last_pot = last_tick;

    loop {
        // One game tick per elapsed millisecond, catching up after slow work
        let now = hal::millis();
        while last_tick != now {
            last_tick = last_tick.wrapping_add(1);
            game.tick(&mut io);

            let mask = buttons.read_mask().unwrap_or(0);
            if let Some(ButtonEvent::Pressed(button)) = debouncer.update(mask) {
                game.handle(Input::Press(button), &mut io);
            }
        }

        while let Some(byte) = io.console.read_byte() {
            game.handle(Input::Char(byte), &mut io);
        }

        if now.wrapping_sub(last_pot) >= POT_SAMPLE_MS {
            last_pot = now;
            if let Some(sample) = pot.update(adc.read_channel(AdcChannel::Adc0)) {
                game.handle(Input::Analog(sample), &mut io);
            }
        }
    }
}
