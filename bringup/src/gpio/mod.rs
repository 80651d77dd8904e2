//! GPIO peripheral.
//!
//! Example usage:
//!
//! ```no_run
//! use bringup::{gpio, Device};
//!
//! let dev = unsafe { Device::steal() };
//! gpio::configure(&dev, gpio::PC13, gpio::Mode::OutputOpenDrain(gpio::Speed::Max2MHz));
//! gpio::configure_pins(&dev, gpio::Port::B, 0x00F0, gpio::Mode::FloatingInput);
//! ```

mod pac;
mod pinout;
mod mode;

pub use pac::{Pin, Port};
pub use pinout::*;
pub use mode::*;

use crate::device::Registers;
use crate::rcc;

/// GPIO pin tuple struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gpio(pub Port, pub Pin);

/// Configure the given GPIO pin mode.
///
/// Enables the clock of the port, and of the alternate function IO peripheral if the mode is an
/// alternate function mode.
#[inline]
pub fn configure<R: Registers>(regs: &R, pin: Gpio, mode: Mode) {
    configure_pins(regs, pin.0, pin.1.mask(), mode);
}

/// Configure every pin of `port` whose bit is set in `pins` with the same mode.
///
/// Pins whose bit is clear keep their configuration.
pub fn configure_pins<R: Registers>(regs: &R, port: Port, pins: u16, mode: Mode) {
    rcc::enable(regs, port.gate());
    if mode.is_alternate_function() {
        rcc::enable(regs, rcc::AFIO);
    }

    let block = regs.gpio(port);
    for pin_nr in 0..16u8 {
        if pins & (1 << pin_nr) != 0 {
            pac::configure(block, pin_nr, mode);
        }
    }
    trace!("gpio {} pins {=u16:#x} -> {}", port, pins, mode);
}
