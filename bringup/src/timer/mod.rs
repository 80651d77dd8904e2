//! Timer peripherals.
//!
//! Configure the time base first, then any channels:
//!
//! ```no_run
//! use bringup::{timer, Device};
//!
//! let dev = unsafe { Device::steal() };
//!
//! // 1kHz PWM from a 72MHz timer clock.
//! timer::configure_time_base(&dev, timer::TIM2, timer::TimeBase {
//!     prescaler: 71,
//!     period: 999,
//!     ..Default::default()
//! });
//! timer::configure_output_channel(&dev, timer::TIM2, timer::Channel::C1, timer::OutputCompare {
//!     output: true,
//!     mode: timer::OutputCompareMode::Pwm1,
//!     pulse: 250,
//!     polarity: timer::Polarity::ActiveHigh,
//! }).unwrap();
//! ```
//!
//! The channel pins are not touched; configure them with [gpio][crate::gpio].

mod input;
mod output;
mod pac;

pub use input::{configure_input_channel, CapturePolarity, CapturePrescaler, InputCapture, InputSelection};
pub use output::{configure_output_channel, OutputCompare, OutputCompareMode, Polarity};
pub use pac::{Channel, Timer};

use crate::device::Registers;
use crate::rcc;

pub const TIM1: Timer = Timer::Tim1;
pub const TIM2: Timer = Timer::Tim2;
pub const TIM3: Timer = Timer::Tim3;
pub const TIM4: Timer = Timer::Tim4;
pub const TIM5: Timer = Timer::Tim5;
pub const TIM8: Timer = Timer::Tim8;
pub const TIM9: Timer = Timer::Tim9;
pub const TIM10: Timer = Timer::Tim10;
pub const TIM11: Timer = Timer::Tim11;

/// Counting direction.
///
/// Timers 9 to 11 only count up; the field is ignored for them.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterMode {
    Up = 0x00,
    Down = 0x10,
    /// Up and down, compare flags set while counting down.
    CenterAligned1 = 0x20,
    /// Up and down, compare flags set while counting up.
    CenterAligned2 = 0x40,
    /// Up and down, compare flags set in both directions.
    CenterAligned3 = 0x60,
}

/// Ratio between the timer clock and the sampling clock of the input filters.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDivision {
    Div1 = 0x000,
    Div2 = 0x100,
    Div4 = 0x200,
}

/// Time base configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeBase {
    /// Counter clock is the timer clock divided by `prescaler + 1`.
    pub prescaler: u16,
    /// Auto-reload value; the counter wraps after `period + 1` ticks.
    pub period: u16,
    pub counter_mode: CounterMode,
    pub clock_division: ClockDivision,
    /// Number of counter overflows between update events, minus one.
    ///
    /// Only TIM1 and TIM8 have a repetition counter.
    pub repetition_counter: u8,
}

impl Default for TimeBase {
    fn default() -> Self {
        Self {
            prescaler: 0,
            period: u16::MAX,
            counter_mode: CounterMode::Up,
            clock_division: ClockDivision::Div1,
            repetition_counter: 0,
        }
    }
}

/// Configure the time base of a timer and start it.
///
/// Enables the clock of the timer, writes the prescaler, period, counting mode, clock division and
/// repetition counter as given, without adjusting them, and generates an update event so the
/// prescaler is loaded right away.
///
/// **The counter is started unconditionally.** The timer free-runs from here on, even before any
/// channel or interrupt has been configured.
pub fn configure_time_base<R: Registers>(regs: &R, timer: Timer, base: TimeBase) {
    rcc::enable(regs, timer.gate());
    let tim = regs.tim(timer);

    let mut clear = pac::CKD_MASK;
    let mut set = base.clock_division as u32;
    if timer.has_counter_mode() {
        clear |= pac::DIR_CMS_MASK;
        set |= base.counter_mode as u32;
    } else if base.counter_mode != CounterMode::Up {
        warn!("{} only counts up", timer);
    }
    update!(tim.cr1, clear, set);

    store!(tim.arr, base.period as u32);
    store!(tim.psc, base.prescaler as u32);
    if timer.is_advanced() {
        store!(tim.rcr, base.repetition_counter as u32);
    } else if base.repetition_counter != 0 {
        warn!("{} has no repetition counter", timer);
    }

    store!(tim.egr, pac::UG);
    pac::enable(tim);
    debug!("{} psc={=u16} arr={=u16}", timer, base.prescaler, base.period);
}
