//! USART peripheral.
//!
//! Example use:
//!
//! ```no_run
//! use bringup::{clock, uart, Device};
//!
//! let dev = unsafe { Device::steal() };
//! unsafe { clock::init(&dev) };
//!
//! // 115200 baud, 8 data bits, no parity, one stop bit on PA2/PA3.
//! uart::configure_default(&dev, uart::Usart::Usart2, uart::Direction::TxRx, 115_200).unwrap();
//! ```
//!
//! Every USART uses its default pin pair, see [Usart::tx_pin] and [Usart::rx_pin].

mod pac;

pub use pac::Usart;

use crate::device::Registers;
use crate::gpio::{self, Mode, Speed};
use crate::{rcc, Error};

use pac::*;

/// Enabled directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Tx,
    Rx,
    TxRx,
}

/// Data bits per frame, including the parity bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WordLength {
    Bits8,
    Bits9,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Usart peripheral configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub direction: Direction,
    /// Baudrate.
    pub baudrate: u32,
    pub word_length: WordLength,
    pub stop_bits: StopBits,
    pub parity: Parity,
}

impl Config {
    /// 8 data bits, no parity and one stop bit.
    #[inline]
    pub const fn new(direction: Direction, baudrate: u32) -> Self {
        Self {
            direction,
            baudrate,
            word_length: WordLength::Bits8,
            stop_bits: StopBits::One,
            parity: Parity::None,
        }
    }

    fn cr1(&self) -> u32 {
        let mut cr1 = match self.direction {
            Direction::Tx => TE,
            Direction::Rx => RE,
            Direction::TxRx => TE | RE,
        };
        if self.word_length == WordLength::Bits9 {
            cr1 |= M;
        }
        match self.parity {
            Parity::None => (),
            Parity::Even => cr1 |= PCE,
            Parity::Odd => cr1 |= PCE | PS,
        }
        cr1
    }

    fn cr2(&self) -> u32 {
        match self.stop_bits {
            StopBits::One => 0,
            StopBits::Two => 0b10 << 12,
        }
    }
}

/// Configure and enable a USART.
///
/// Enables the clock of the USART, configures its TX pin as alternate function push-pull and its
/// RX pin as floating input, writes the frame format and baud rate and enables the peripheral.
/// Flow control is disabled.
///
/// The baud rate divider is computed from the bus clock currently selected in the clock
/// controller. Changing the system clock afterwards changes the baud rate. Returns
/// [Error::InvalidBaudRate] before touching anything if the baud rate is zero or out of reach of
/// that clock.
pub fn configure<R: Registers>(regs: &R, usart: Usart, config: Config) -> Result<(), Error> {
    let brr = brr(usart.clock_speed(regs), config.baudrate)?;

    rcc::enable(regs, usart.gate());
    gpio::configure(
        regs,
        usart.tx_pin(),
        Mode::AlternateFunctionOutputPushPull(Speed::Max50MHz),
    );
    gpio::configure(regs, usart.rx_pin(), Mode::FloatingInput);

    let block = regs.usart(usart);
    update!(block.cr2, STOP_MASK, config.cr2());
    update!(block.cr1, M | PCE | PS | TE | RE, config.cr1());
    update!(block.cr3, RTSE | CTSE, 0);
    store!(block.brr, brr);

    update!(block.cr1, 0, UE);
    debug!("{} {}", usart, config);
    Ok(())
}

/// Configure and enable a USART with 8 data bits, no parity and one stop bit.
#[inline]
pub fn configure_default<R: Registers>(
    regs: &R,
    usart: Usart,
    direction: Direction,
    baudrate: u32,
) -> Result<(), Error> {
    configure(regs, usart, Config::new(direction, baudrate))
}
