use crate::device::Registers;
use crate::Error;

use super::pac::{self, Channel, Timer};

// TIMx_CCMRx, per channel
const CCS_MASK: u32 = 0b11;
const OCM_SHIFT: u32 = 4;
const OCM_MASK: u32 = 0b111 << OCM_SHIFT;
// TIMx_CCER, per channel
const CCE: u32 = 1 << 0;
const CCP: u32 = 1 << 1;
const CCNE: u32 = 1 << 2;
const CCNP: u32 = 1 << 3;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputCompareMode {
    /// Comparing has no effect on the output.
    Frozen = 0,
    /// Output goes active on a match.
    ActiveMatch = 1,
    /// Output goes inactive on a match.
    InactiveMatch = 2,
    /// Output toggles on a match.
    Toggle = 3,
    ForceInactive = 4,
    ForceActive = 5,
    /// Active while the counter is below the compare value when counting up.
    Pwm1 = 6,
    /// Inactive while the counter is below the compare value when counting up.
    Pwm2 = 7,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveHigh = 0,
    ActiveLow = 1,
}

/// Output compare channel configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputCompare {
    /// Drive the channel pin.
    pub output: bool,
    pub mode: OutputCompareMode,
    /// Compare value.
    pub pulse: u16,
    pub polarity: Polarity,
}

impl Default for OutputCompare {
    fn default() -> Self {
        Self {
            output: false,
            mode: OutputCompareMode::Frozen,
            pulse: 0,
            polarity: Polarity::ActiveHigh,
        }
    }
}

/// Configure a timer channel in output compare mode.
///
/// Expects the time base to be configured. The timer is (re)started.
///
/// On TIM1 and TIM8 an enabled output also sets the main output enable; the complementary output
/// is left disabled.
///
/// Returns [Error::InvalidChannel] for a channel the timer does not have, without writing any
/// register. Use `Channel::try_from` to get a channel from its number.
pub fn configure_output_channel<R: Registers>(
    regs: &R,
    timer: Timer,
    channel: Channel,
    config: OutputCompare,
) -> Result<(), Error> {
    timer.check(channel)?;
    let tim = regs.tim(timer);

    // Disable the channel while it is being changed.
    pac::update_ccer(tim, channel, CCE, 0);

    if timer.is_advanced() {
        // Idle states of the output and its complement.
        let shift = 8 + 2 * channel as u32;
        update!(tim.cr2, 0b11 << shift, 0);
    }

    pac::update_ccmr(
        tim,
        channel,
        OCM_MASK | CCS_MASK,
        (config.mode as u32) << OCM_SHIFT,
    );
    pac::write_ccr(tim, channel, config.pulse);

    let mut ccer = 0;
    if config.polarity == Polarity::ActiveLow {
        ccer |= CCP;
    }
    if config.output {
        ccer |= CCE;
    }
    let clear = if timer.is_advanced() {
        CCP | CCE | CCNE | CCNP
    } else {
        CCP | CCE
    };
    pac::update_ccer(tim, channel, clear, ccer);

    if timer.is_advanced() && config.output {
        update!(tim.bdtr, 0, pac::MOE);
    }

    pac::enable(tim);
    trace!("{} {} output {}", timer, channel, config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Sandbox;
    use crate::timer::{configure_time_base, TimeBase, TIM1, TIM10, TIM2, TIM3};
    use core::convert::TryFrom;

    fn pwm(pulse: u16) -> OutputCompare {
        OutputCompare {
            output: true,
            mode: OutputCompareMode::Pwm1,
            pulse,
            polarity: Polarity::ActiveHigh,
        }
    }

    #[test]
    fn each_channel_writes_its_own_registers() {
        let regs = Sandbox::new();
        configure_time_base(&*regs, TIM2, TimeBase::default());
        for &(channel, pulse) in [
            (Channel::C1, 100),
            (Channel::C2, 200),
            (Channel::C3, 300),
            (Channel::C4, 400),
        ]
        .iter()
        {
            configure_output_channel(&*regs, TIM2, channel, pwm(pulse)).unwrap();
        }
        let tim = regs.tim(TIM2);
        assert_eq!(tim.ccmr1_output().read().bits(), 0x6060);
        assert_eq!(tim.ccmr2_output().read().bits(), 0x6060);
        assert_eq!(tim.ccer.read().bits(), 0x1111);
        assert_eq!(tim.ccr1.read().bits(), 100);
        assert_eq!(tim.ccr2.read().bits(), 200);
        assert_eq!(tim.ccr3.read().bits(), 300);
        assert_eq!(tim.ccr4.read().bits(), 400);
    }

    #[test]
    fn polarity_and_disabled_output() {
        let regs = Sandbox::new();
        configure_output_channel(&*regs, TIM3, Channel::C2, pwm(1)).unwrap();
        configure_output_channel(&*regs, TIM3, Channel::C2, OutputCompare {
            output: false,
            mode: OutputCompareMode::Toggle,
            pulse: 5,
            polarity: Polarity::ActiveLow,
        })
        .unwrap();
        let tim = regs.tim(TIM3);
        assert_eq!(tim.ccer.read().bits(), 0x20);
        assert_eq!(tim.ccmr1_output().read().bits(), 0x3000);
        assert_eq!(tim.ccr2.read().bits(), 5);
    }

    #[test]
    fn output_channel_restarts_the_timer() {
        let regs = Sandbox::new();
        configure_output_channel(&*regs, TIM3, Channel::C1, OutputCompare::default()).unwrap();
        assert_eq!(regs.tim(TIM3).cr1.read().bits(), 1);
    }

    #[test]
    fn advanced_timer_sets_main_output_enable() {
        let regs = Sandbox::new();
        configure_output_channel(&*regs, TIM1, Channel::C3, pwm(10)).unwrap();
        let tim = regs.tim(TIM1);
        assert_eq!(tim.bdtr.read().bits(), 1 << 15);
        assert_eq!(tim.ccer.read().bits(), 0x100);

        let regs = Sandbox::new();
        configure_output_channel(&*regs, TIM2, Channel::C3, pwm(10)).unwrap();
        assert_eq!(regs.tim(TIM2).bdtr.read().bits(), 0);
    }

    #[test]
    fn out_of_range_channel_numbers_configure_nothing() {
        for &number in [0u8, 5].iter() {
            let regs = Sandbox::new();
            let untouched = regs.bytes().to_vec();
            let result = Channel::try_from(number)
                .and_then(|channel| configure_output_channel(&*regs, TIM2, channel, pwm(1)));
            assert_eq!(result, Err(Error::InvalidChannel(number)));
            assert_eq!(regs.bytes(), &untouched[..]);
        }
    }

    #[test]
    fn channels_missing_on_a_timer_are_rejected() {
        let regs = Sandbox::new();
        let untouched = regs.bytes().to_vec();
        assert_eq!(
            configure_output_channel(&*regs, TIM10, Channel::C2, pwm(1)),
            Err(Error::InvalidChannel(2))
        );
        assert_eq!(regs.bytes(), &untouched[..]);
        assert!(configure_output_channel(&*regs, TIM10, Channel::C1, pwm(1)).is_ok());
    }
}
