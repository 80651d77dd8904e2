#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use bringup::{clock, uart, Device};
use cortex_m_semihosting::hprintln;

#[entry]
fn main() -> ! {
    let dev = unsafe { Device::steal() };
    unsafe { clock::init(&dev) };

    // 9 data bits with even parity, two stop bits on PB10/PB11.
    let config = uart::Config {
        word_length: uart::WordLength::Bits9,
        stop_bits: uart::StopBits::Two,
        parity: uart::Parity::Even,
        ..uart::Config::new(uart::Direction::TxRx, 19_200)
    };
    if let Err(error) = uart::configure(&dev, uart::Usart::Usart3, config) {
        hprintln!("USART3: {:?}", error).ok();
    }

    // 8N1 on PA9/PA10.
    if let Err(error) = uart::configure_default(&dev, uart::Usart::Usart1, uart::Direction::Tx, 115_200) {
        hprintln!("USART1: {:?}", error).ok();
    }

    loop {
        cortex_m::asm::wfi();
    }
}
