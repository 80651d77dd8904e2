//! Peripheral bring-up layer for the STM32F103 microcontroller.
//!
//! Every function takes friendly parameters, turns them into register values and writes them
//! straight away. There is no driver state: configure a pin, timer, interrupt or serial port once
//! during start-up and then use the peripheral directly.
//!
//! All functions write through a [Registers] implementation. On the target that is [Device]:
//!
//! ```no_run
//! use bringup::{gpio, nvic, timer, Device};
//!
//! let dev = unsafe { Device::steal() };
//! nvic::set_priority_grouping(&dev, nvic::PriorityGrouping::Group2);
//! gpio::configure(&dev, gpio::PC13, gpio::Mode::OutputPushPull(gpio::Speed::Max2MHz));
//! timer::configure_time_base(&dev, timer::TIM2, timer::TimeBase {
//!     prescaler: 71,
//!     period: 999,
//!     ..Default::default()
//! });
//! ```
//!
//! It is minimal in the sense that nothing stops two callers from configuring the same peripheral
//! twice; the last write wins.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod device;
pub mod exti;
pub mod gpio;
pub mod nvic;
pub mod rcc;
pub mod timer;
pub mod uart;

mod error;
#[cfg(test)]
mod mock;

pub use device::{Device, Registers};
pub use error::Error;
