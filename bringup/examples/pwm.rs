#![no_main]
#![no_std]

extern crate panic_halt;

use cortex_m_rt::entry;

use bringup::{clock, gpio, timer, Device};

#[entry]
fn main() -> ! {
    let dev = unsafe { Device::steal() };
    unsafe { clock::init(&dev) };

    // TIM2 channel 1 is on PA0.
    gpio::configure(
        &dev,
        gpio::PA0,
        gpio::AlternateFunctionOutputMode::PushPull(gpio::Speed::Max50MHz).into(),
    );

    // 72MHz / 72 / 1000: 1kHz pwm frequency.
    timer::configure_time_base(&dev, timer::TIM2, timer::TimeBase {
        prescaler: 71,
        period: 999,
        ..Default::default()
    });

    // 25% duty cycle, active low.
    let result = timer::configure_output_channel(&dev, timer::TIM2, timer::Channel::C1, timer::OutputCompare {
        output: true,
        mode: timer::OutputCompareMode::Pwm1,
        pulse: 250,
        polarity: timer::Polarity::ActiveLow,
    });
    assert!(result.is_ok());

    loop {
        cortex_m::asm::wfi();
    }
}
