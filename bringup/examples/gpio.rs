#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use bringup::{clock, gpio, Device};
use cortex_m_semihosting::hprintln;

// LED on PC13.
const LED_PIN: gpio::Gpio = gpio::PC13;

// Buttons on PB12 to PB15.
const BUTTONS: u16 = 0xF000;

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello! This is the GPIO example.").unwrap();
    }

    let dev = unsafe { Device::steal() };
    unsafe { clock::init(&dev) };

    // Configure GPIO modes.
    gpio::configure(&dev, LED_PIN, gpio::Mode::OutputPushPull(gpio::Speed::Max2MHz));
    gpio::configure_pins(&dev, gpio::Port::B, BUTTONS, gpio::Mode::InputPullUp);

    loop {
        cortex_m::asm::wfi();
    }
}
