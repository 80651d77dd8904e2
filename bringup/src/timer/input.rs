use crate::device::Registers;
use crate::Error;

use super::pac::{self, Channel, Timer};

// TIMx_CCMRx, per channel: CCxS, ICxPSC and ICxF.
const CCMR_INPUT_MASK: u32 = 0xFF;
const ICF_SHIFT: u32 = 4;
// TIMx_CCER, per channel
const CCE: u32 = 1 << 0;
const POLARITY_MASK: u32 = 0b1010;

/// Signal the capture channel listens to.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSelection {
    /// Channels 1, 2, 3 and 4 capture TI1, TI2, TI3 and TI4.
    DirectTI = 0b01,
    /// Channels 1, 2, 3 and 4 capture TI2, TI1, TI4 and TI3.
    IndirectTI = 0b10,
    /// Capture the internal trigger input.
    Trc = 0b11,
}

/// Number of events per capture.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapturePrescaler {
    Div1 = 0b0000,
    Div2 = 0b0100,
    Div4 = 0b1000,
    Div8 = 0b1100,
}

/// Input edge that triggers a capture.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapturePolarity {
    Rising = 0b0000,
    Falling = 0b0010,
    BothEdges = 0b1010,
}

/// Input capture channel configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputCapture {
    pub selection: InputSelection,
    pub prescaler: CapturePrescaler,
    /// Input filter, `0..=15`. Higher values sample slower and longer before accepting an edge.
    pub filter: u8,
    pub polarity: CapturePolarity,
}

impl Default for InputCapture {
    fn default() -> Self {
        Self {
            selection: InputSelection::DirectTI,
            prescaler: CapturePrescaler::Div1,
            filter: 0,
            polarity: CapturePolarity::Rising,
        }
    }
}

/// Configure a timer channel in input capture mode and enable capturing.
///
/// Expects the time base to be configured. The timer is (re)started.
///
/// Returns [Error::FilterOutOfRange] or [Error::InvalidChannel] without writing any register.
pub fn configure_input_channel<R: Registers>(
    regs: &R,
    timer: Timer,
    channel: Channel,
    config: InputCapture,
) -> Result<(), Error> {
    timer.check(channel)?;
    if config.filter > 0xF {
        return Err(Error::FilterOutOfRange(config.filter));
    }
    let tim = regs.tim(timer);

    // Selection can only change while capturing is disabled.
    pac::update_ccer(tim, channel, CCE, 0);
    pac::update_ccmr(
        tim,
        channel,
        CCMR_INPUT_MASK,
        config.selection as u32 | config.prescaler as u32 | (config.filter as u32) << ICF_SHIFT,
    );
    pac::update_ccer(
        tim,
        channel,
        POLARITY_MASK | CCE,
        config.polarity as u32 | CCE,
    );

    pac::enable(tim);
    trace!("{} {} capture {}", timer, channel, config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Sandbox;
    use crate::timer::{TIM11, TIM4, TIM5, TIM9};

    #[test]
    fn capture_fields_share_one_register_half() {
        let regs = Sandbox::new();
        configure_input_channel(&*regs, TIM4, Channel::C1, InputCapture {
            selection: InputSelection::IndirectTI,
            prescaler: CapturePrescaler::Div4,
            filter: 0xA,
            polarity: CapturePolarity::Falling,
        })
        .unwrap();
        let tim = regs.tim(TIM4);
        assert_eq!(tim.ccmr1_output().read().bits(), 0xA8 | 0b10);
        assert_eq!(tim.ccer.read().bits(), 0b0011);
        assert_eq!(tim.cr1.read().bits(), 1);
    }

    #[test]
    fn upper_channels_use_the_second_mode_register() {
        let regs = Sandbox::new();
        configure_input_channel(&*regs, TIM5, Channel::C4, InputCapture {
            polarity: CapturePolarity::BothEdges,
            ..Default::default()
        })
        .unwrap();
        let tim = regs.tim(TIM5);
        assert_eq!(tim.ccmr1_output().read().bits(), 0);
        assert_eq!(tim.ccmr2_output().read().bits(), 0x01 << 8);
        assert_eq!(tim.ccer.read().bits(), 0b1011 << 12);
    }

    #[test]
    fn reconfiguring_replaces_the_previous_capture_settings() {
        let regs = Sandbox::new();
        configure_input_channel(&*regs, TIM9, Channel::C2, InputCapture {
            selection: InputSelection::Trc,
            prescaler: CapturePrescaler::Div8,
            filter: 15,
            polarity: CapturePolarity::BothEdges,
        })
        .unwrap();
        configure_input_channel(&*regs, TIM9, Channel::C2, InputCapture::default()).unwrap();
        let tim = regs.tim(TIM9);
        assert_eq!(tim.ccmr1_output().read().bits(), 0x01 << 8);
        assert_eq!(tim.ccer.read().bits(), 0b0001 << 4);
    }

    #[test]
    fn filter_above_fifteen_is_rejected_before_writing() {
        let regs = Sandbox::new();
        let untouched = regs.bytes().to_vec();
        let config = InputCapture {
            filter: 16,
            ..Default::default()
        };
        assert_eq!(
            configure_input_channel(&*regs, TIM4, Channel::C1, config),
            Err(Error::FilterOutOfRange(16))
        );
        assert_eq!(
            configure_input_channel(&*regs, TIM11, Channel::C2, InputCapture::default()),
            Err(Error::InvalidChannel(2))
        );
        assert_eq!(regs.bytes(), &untouched[..]);
    }
}
