#![no_main]
#![no_std]

extern crate panic_halt;

use bringup::{clock, exti, gpio, nvic, timer, uart, Device, Error, Registers};
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use stm32f1xx_hal::pac::interrupt;
use stm32f1xx_hal::pac::Interrupt;

/// LED - debug:
const LED: gpio::Gpio = gpio::PC13;

/// Start button, pulled up, to ground:
const START: gpio::Gpio = gpio::PB12;

/// Motor PWM on TIM1 channel 1 (PA8):
const MOTOR_PWM: gpio::Gpio = gpio::PA8;
const MOTOR_TIMER: timer::Timer = timer::TIM1;
const MOTOR_CHANNEL: timer::Channel = timer::Channel::C1;

/// Wheel encoder pulses on TIM3 channel 1 (PA6):
const WHEEL_PULSE: gpio::Gpio = gpio::PA6;
const WHEEL_TIMER: timer::Timer = timer::TIM3;

/// Telemetry to the main board:
const TELEMETRY: uart::Usart = uart::Usart::Usart2;
const TELEMETRY_BAUDRATE: u32 = 115_200;

const GROUPING: nvic::PriorityGrouping = nvic::PriorityGrouping::Group2;

/// 72MHz / 4 / (2 * 900): 10kHz center aligned motor PWM.
const MOTOR_PERIOD: u16 = 899;

// TIMx_DIER
const CC1IE: u32 = 1 << 1;

/// Set by the start button.
static STARTED: AtomicBool = AtomicBool::new(false);

/// Last captured wheel pulse period, in microseconds.
static WHEEL_PERIOD: AtomicU16 = AtomicU16::new(0);

#[entry]
fn main() -> ! {
    if cfg!(debug_assertions) {
        hprintln!("Hello motion board!").unwrap();
    }

    let dev = unsafe { Device::steal() };
    unsafe { clock::init(&dev) };
    nvic::set_priority_grouping(&dev, GROUPING);

    // LED on until the start button is pressed.
    gpio::configure(&dev, LED, gpio::Mode::OutputOpenDrain(gpio::Speed::Max2MHz));

    if let Err(error) = bring_up(&dev) {
        if cfg!(debug_assertions) {
            hprintln!("Bring up failed: {:?}", error).unwrap();
        }
        loop {
            cortex_m::asm::wfi();
        }
    }

    if cfg!(debug_assertions) {
        hprintln!("Waiting for start.").unwrap();
    }
    while !STARTED.load(Ordering::Relaxed) {
        cortex_m::asm::wfi();
    }
    gpio::configure(&dev, LED, gpio::Mode::FloatingInput);

    loop {
        // Slow down while the wheel pulses are long.
        let period = WHEEL_PERIOD.load(Ordering::Relaxed);
        let pulse = if period == 0 || period > 10_000 {
            MOTOR_PERIOD / 4
        } else {
            MOTOR_PERIOD / 2
        };
        let tim = dev.tim(MOTOR_TIMER);
        tim.ccr1.write(|w| unsafe { w.bits(pulse as u32) });
        cortex_m::asm::wfi();
    }
}

/// Configure every peripheral of the board.
fn bring_up(dev: &Device) -> Result<(), Error> {
    // Motor PWM, output held low until started.
    gpio::configure(
        dev,
        MOTOR_PWM,
        gpio::AlternateFunctionOutputMode::PushPull(gpio::Speed::Max50MHz).into(),
    );
    timer::configure_time_base(dev, MOTOR_TIMER, timer::TimeBase {
        prescaler: 3,
        period: MOTOR_PERIOD,
        counter_mode: timer::CounterMode::CenterAligned1,
        ..Default::default()
    });
    timer::configure_output_channel(dev, MOTOR_TIMER, MOTOR_CHANNEL, timer::OutputCompare {
        output: true,
        mode: timer::OutputCompareMode::Pwm1,
        pulse: 0,
        polarity: timer::Polarity::ActiveHigh,
    })?;

    // Wheel pulse period, 1MHz counter.
    gpio::configure(dev, WHEEL_PULSE, gpio::Mode::FloatingInput);
    timer::configure_time_base(dev, WHEEL_TIMER, timer::TimeBase {
        prescaler: 71,
        ..Default::default()
    });
    timer::configure_input_channel(dev, WHEEL_TIMER, timer::Channel::C1, timer::InputCapture {
        filter: 4,
        ..Default::default()
    })?;
    let tim = dev.tim(WHEEL_TIMER);
    tim.dier.modify(|r, w| unsafe { w.bits(r.bits() | CC1IE) });
    nvic::configure(dev, GROUPING, Interrupt::TIM3, nvic::Config {
        preemption_priority: 1,
        sub_priority: 0,
        enabled: true,
    })?;

    // Start button.
    gpio::configure(dev, START, gpio::Mode::InputPullUp);
    exti::configure(dev, START, exti::Config {
        mode: exti::Mode::Interrupt,
        trigger: exti::Trigger::Falling,
        enabled: true,
    });
    nvic::configure(dev, GROUPING, Interrupt::EXTI15_10, nvic::Config {
        preemption_priority: 2,
        sub_priority: 0,
        enabled: true,
    })?;

    // Telemetry, transmit only.
    uart::configure_default(dev, TELEMETRY, uart::Direction::Tx, TELEMETRY_BAUDRATE)?;
    nvic::configure(dev, GROUPING, Interrupt::USART2, nvic::Config {
        preemption_priority: 3,
        sub_priority: 3,
        enabled: false,
    })
}

/// EXTI15_10 interrupt: start button.
#[interrupt]
fn EXTI15_10() {
    let dev = unsafe { Device::steal() };
    // Writing one clears the pending bit.
    dev.exti().pr.write(|w| unsafe { w.bits(START.1.mask() as u32) });
    STARTED.store(true, Ordering::Relaxed);
}

/// TIMER3 interrupt: wheel pulse captured.
#[interrupt]
fn TIM3() {
    static mut LAST: u16 = 0;

    let dev = unsafe { Device::steal() };
    let tim = dev.tim(WHEEL_TIMER);
    // Reading the capture clears the flag.
    let capture = tim.ccr1.read().bits() as u16;
    WHEEL_PERIOD.store(capture.wrapping_sub(*LAST), Ordering::Relaxed);
    *LAST = capture;
}
