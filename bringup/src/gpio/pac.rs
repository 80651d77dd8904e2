use crate::device::GpioBlock;
use crate::rcc::Gate;
use crate::Error;

use super::Mode;

/// Available GPIO ports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

/// Available GPIO pins.
#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    P0  = 0,
    P1  = 1,
    P2  = 2,
    P3  = 3,
    P4  = 4,
    P5  = 5,
    P6  = 6,
    P7  = 7,
    P8  = 8,
    P9  = 9,
    P10 = 10,
    P11 = 11,
    P12 = 12,
    P13 = 13,
    P14 = 14,
    P15 = 15,
}

impl Port {
    /// Port code as used by the AFIO external interrupt routing.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Clock gate of this port.
    #[inline]
    pub const fn gate(self) -> Gate {
        match self {
            Port::A => Gate::apb2(2),
            Port::B => Gate::apb2(3),
            Port::C => Gate::apb2(4),
            Port::D => Gate::apb2(5),
            Port::E => Gate::apb2(6),
        }
    }
}

impl Pin {
    #[inline]
    pub const fn mask(self) -> u16 {
        1 << self as u8
    }
}

impl core::convert::TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(nr: u8) -> Result<Self, Error> {
        #[rustfmt::skip]
        const PINS: [Pin; 16] = [
            Pin::P0, Pin::P1, Pin::P2, Pin::P3, Pin::P4, Pin::P5, Pin::P6, Pin::P7,
            Pin::P8, Pin::P9, Pin::P10, Pin::P11, Pin::P12, Pin::P13, Pin::P14, Pin::P15,
        ];
        PINS.get(nr as usize).copied().ok_or(Error::InvalidPin(nr))
    }
}

/// Configure the given pin number of a port with the given mode.
#[inline]
pub(crate) fn configure(port: &GpioBlock, pin_nr: u8, mode: Mode) {
    let nibble = mode.cnf_mode();
    if pin_nr < 8 {
        let shift = pin_nr * 4;
        update!(port.crl, 15 << shift, nibble << shift);
    } else {
        let shift = (pin_nr - 8) * 4;
        update!(port.crh, 15 << shift, nibble << shift);
    }
    // Pull direction is selected through the output data register.
    match mode {
        Mode::InputPullUp => store!(port.bsrr, 1 << pin_nr),
        Mode::InputPullDown => store!(port.brr, 1 << pin_nr),
        _ => (),
    }
}
