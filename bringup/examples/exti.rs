#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use bringup::{clock, exti, gpio, nvic, Device};
use stm32f1xx_hal::pac::Interrupt;

// Button to ground on PA0.
const BUTTON: gpio::Gpio = gpio::PA0;

#[entry]
fn main() -> ! {
    let dev = unsafe { Device::steal() };
    unsafe { clock::init(&dev) };
    nvic::set_priority_grouping(&dev, nvic::PriorityGrouping::Group4);

    gpio::configure(&dev, BUTTON, gpio::Mode::InputPullUp);
    exti::configure(&dev, BUTTON, exti::Config {
        mode: exti::Mode::Interrupt,
        trigger: exti::Trigger::Falling,
        enabled: true,
    });
    let result = nvic::configure(&dev, nvic::PriorityGrouping::Group4, Interrupt::EXTI0, nvic::Config {
        preemption_priority: 3,
        sub_priority: 0,
        enabled: true,
    });
    assert!(result.is_ok());

    loop {
        cortex_m::asm::wfi();
    }
}
