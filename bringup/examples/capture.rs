#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use bringup::{clock, gpio, nvic, timer, Device};
use stm32f1xx_hal::pac::Interrupt;

#[entry]
fn main() -> ! {
    let dev = unsafe { Device::steal() };
    unsafe { clock::init(&dev) };
    nvic::set_priority_grouping(&dev, nvic::PriorityGrouping::Group2);

    // TIM3 channel 1 is on PA6.
    gpio::configure(&dev, gpio::PA6, gpio::Mode::FloatingInput);

    // 1MHz counter clock.
    timer::configure_time_base(&dev, timer::TIM3, timer::TimeBase {
        prescaler: 71,
        ..Default::default()
    });

    // Capture every second rising edge, filtered.
    let capture = timer::InputCapture {
        prescaler: timer::CapturePrescaler::Div2,
        filter: 3,
        ..Default::default()
    };
    let result = timer::configure_input_channel(&dev, timer::TIM3, timer::Channel::C1, capture)
        .and_then(|_| {
            nvic::configure(&dev, nvic::PriorityGrouping::Group2, Interrupt::TIM3, nvic::Config {
                preemption_priority: 1,
                sub_priority: 0,
                enabled: true,
            })
        });
    assert!(result.is_ok());

    loop {
        cortex_m::asm::wfi();
    }
}
