//! External interrupt lines.
//!
//! Line `n` can be routed to pin `n` of any one port. The line is given as that pin:
//!
//! ```no_run
//! use bringup::{exti, gpio, Device};
//!
//! let dev = unsafe { Device::steal() };
//! gpio::configure(&dev, gpio::PB4, gpio::Mode::InputPullUp);
//! // Line 4 from port B, interrupt on the falling edge.
//! exti::configure(&dev, gpio::PB4, exti::Config {
//!     mode: exti::Mode::Interrupt,
//!     trigger: exti::Trigger::Falling,
//!     enabled: true,
//! });
//! ```
//!
//! The matching NVIC channel (`EXTI0` to `EXTI4`, `EXTI9_5` or `EXTI15_10`) is configured
//! separately with [nvic][crate::nvic].

use crate::device::Registers;
use crate::gpio::Gpio;
use crate::rcc;

/// What the line requests when triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Interrupt request to the NVIC.
    Interrupt,
    /// Event, e.g. to wake the core from `wfe`.
    Event,
}

/// Edges that trigger the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    Rising,
    Falling,
    RisingFalling,
}

/// External interrupt line configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub mode: Mode,
    pub trigger: Trigger,
    /// When false the line is masked for the given mode and the rest is left alone.
    pub enabled: bool,
}

/// Route an external interrupt line to `pin` and configure its trigger.
///
/// Enables the alternate function IO clock, which the routing registers need.
pub fn configure<R: Registers>(regs: &R, pin: Gpio, config: Config) {
    let Gpio(port, pin) = pin;
    let line = pin as u32;
    let bit = 1 << line;

    rcc::enable(regs, rcc::AFIO);
    let afio = regs.afio();
    let shift = 4 * (line % 4);
    let (clear, set) = (0xF << shift, (port.index() as u32) << shift);
    match line / 4 {
        0 => update!(afio.exticr1, clear, set),
        1 => update!(afio.exticr2, clear, set),
        2 => update!(afio.exticr3, clear, set),
        _ => update!(afio.exticr4, clear, set),
    }

    let exti = regs.exti();
    if config.enabled {
        update!(exti.imr, bit, 0);
        update!(exti.emr, bit, 0);
        match config.mode {
            Mode::Interrupt => update!(exti.imr, 0, bit),
            Mode::Event => update!(exti.emr, 0, bit),
        }

        update!(exti.rtsr, bit, 0);
        update!(exti.ftsr, bit, 0);
        match config.trigger {
            Trigger::Rising => update!(exti.rtsr, 0, bit),
            Trigger::Falling => update!(exti.ftsr, 0, bit),
            Trigger::RisingFalling => {
                update!(exti.rtsr, 0, bit);
                update!(exti.ftsr, 0, bit);
            }
        }
    } else {
        match config.mode {
            Mode::Interrupt => update!(exti.imr, bit, 0),
            Mode::Event => update!(exti.emr, bit, 0),
        }
    }
    trace!("exti line {=u32} from {} {}", line, port, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::{self, Pin, Port};

    use crate::mock::Sandbox;

    const FALLING_IRQ: Config = Config {
        mode: Mode::Interrupt,
        trigger: Trigger::Falling,
        enabled: true,
    };

    #[test]
    fn line_is_routed_to_the_pin_port() {
        let regs = Sandbox::new();
        configure(&*regs, gpio::PC13, FALLING_IRQ);
        configure(&*regs, gpio::PE0, FALLING_IRQ);
        configure(&*regs, gpio::PB6, FALLING_IRQ);
        let afio = regs.afio();
        assert_eq!(afio.exticr1.read().bits(), 4);
        assert_eq!(afio.exticr2.read().bits(), 1 << 8);
        assert_eq!(afio.exticr3.read().bits(), 0);
        assert_eq!(afio.exticr4.read().bits(), 2 << 4);
        assert!(rcc::is_enabled(&*regs, rcc::AFIO));
    }

    #[test]
    fn rerouting_a_line_replaces_its_port() {
        let regs = Sandbox::new();
        configure(&*regs, Gpio(Port::E, Pin::P11), FALLING_IRQ);
        configure(&*regs, Gpio(Port::B, Pin::P11), FALLING_IRQ);
        assert_eq!(regs.afio().exticr3.read().bits(), 1 << 12);
    }

    #[test]
    fn interrupt_mode_and_edges() {
        let regs = Sandbox::new();
        configure(&*regs, gpio::PA0, FALLING_IRQ);
        configure(&*regs, gpio::PA3, Config {
            mode: Mode::Event,
            trigger: Trigger::RisingFalling,
            enabled: true,
        });
        let exti = regs.exti();
        assert_eq!(exti.imr.read().bits(), 1 << 0);
        assert_eq!(exti.emr.read().bits(), 1 << 3);
        assert_eq!(exti.rtsr.read().bits(), 1 << 3);
        assert_eq!(exti.ftsr.read().bits(), (1 << 0) | (1 << 3));
    }

    #[test]
    fn reconfiguring_a_line_drops_the_old_edges_and_mode() {
        let regs = Sandbox::new();
        configure(&*regs, gpio::PA7, Config {
            mode: Mode::Event,
            trigger: Trigger::RisingFalling,
            enabled: true,
        });
        configure(&*regs, gpio::PA7, Config {
            trigger: Trigger::Rising,
            ..FALLING_IRQ
        });
        let exti = regs.exti();
        assert_eq!(exti.imr.read().bits(), 1 << 7);
        assert_eq!(exti.emr.read().bits(), 0);
        assert_eq!(exti.rtsr.read().bits(), 1 << 7);
        assert_eq!(exti.ftsr.read().bits(), 0);
    }

    #[test]
    fn disabling_masks_only_the_given_mode() {
        let regs = Sandbox::new();
        configure(&*regs, gpio::PD9, FALLING_IRQ);
        configure(&*regs, gpio::PD9, Config {
            enabled: false,
            ..FALLING_IRQ
        });
        let exti = regs.exti();
        assert_eq!(exti.imr.read().bits(), 0);
        assert_eq!(exti.ftsr.read().bits(), 1 << 9);
    }

    #[test]
    fn disabling_an_event_line_leaves_the_rest_alone() {
        let regs = Sandbox::new();
        configure(&*regs, gpio::PA1, FALLING_IRQ);
        let event = Config {
            mode: Mode::Event,
            trigger: Trigger::Rising,
            enabled: true,
        };
        configure(&*regs, gpio::PC5, event);
        configure(&*regs, gpio::PC5, Config {
            enabled: false,
            ..event
        });
        let exti = regs.exti();
        assert_eq!(exti.emr.read().bits(), 0);
        assert_eq!(exti.imr.read().bits(), 1 << 1);
        assert_eq!(exti.rtsr.read().bits(), 1 << 5);
        assert_eq!(exti.ftsr.read().bits(), 1 << 1);
        assert_eq!(regs.afio().exticr1.read().bits(), 0);
        assert_eq!(regs.afio().exticr2.read().bits(), 2 << 4);
    }
}
