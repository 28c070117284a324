use std::env;

fn main() {
    // Timing calculations in `config` read this at compile time.
    println!("cargo:rustc-env=MCU_FREQ_HZ=16000000");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(simon_debug)");

    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("avr") {
        println!("cargo:rustc-link-arg=-mmcu=atmega128");
        println!("cargo:warning=Building Simon firmware for ATmega128 at 16MHz");
    }

    if env::var("CARGO_FEATURE_DEBUG").is_ok() {
        println!("cargo:rustc-cfg=simon_debug");
    }
}
