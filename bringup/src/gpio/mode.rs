/// GPIO pin mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    OutputPushPull(Speed),
    OutputOpenDrain(Speed),
    AlternateFunctionOutputPushPull(Speed),
    AlternateFunctionOutputOpenDrain(Speed),
    AnalogInput,
    FloatingInput,
    InputPullDown,
    /// Pulled up through the output data register, like [InputPullDown][Mode::InputPullDown].
    InputPullUp,
}

impl Mode {
    /// Whether a peripheral, instead of the output data register, drives the pin.
    #[inline]
    pub fn is_alternate_function(self) -> bool {
        matches!(
            self,
            Mode::AlternateFunctionOutputPushPull(_) | Mode::AlternateFunctionOutputOpenDrain(_)
        )
    }

    /// The CNF and MODE bits of a pin, as stored in its nibble of CRL or CRH.
    pub(crate) fn cnf_mode(self) -> u32 {
        let (cnf, speed) = match self {
            Mode::OutputPushPull(speed) => (0b00, speed as u32),
            Mode::OutputOpenDrain(speed) => (0b01, speed as u32),
            Mode::AlternateFunctionOutputPushPull(speed) => (0b10, speed as u32),
            Mode::AlternateFunctionOutputOpenDrain(speed) => (0b11, speed as u32),
            Mode::AnalogInput => (0b00, 0),
            Mode::FloatingInput => (0b01, 0),
            Mode::InputPullDown | Mode::InputPullUp => (0b10, 0),
        };
        cnf << 2 | speed
    }
}

/// Output slew rate. The MODE bits of an output pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Max10MHz = 1,
    Max2MHz = 2,
    Max50MHz = 3,
}

/// Alternate function output, for pins driven by a timer or serial port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlternateFunctionOutputMode {
    PushPull(Speed),
    OpenDrain(Speed),
}

impl From<AlternateFunctionOutputMode> for Mode {
    #[inline]
    fn from(mode: AlternateFunctionOutputMode) -> Self {
        match mode {
            AlternateFunctionOutputMode::PushPull(speed) => Mode::AlternateFunctionOutputPushPull(speed),
            AlternateFunctionOutputMode::OpenDrain(speed) => Mode::AlternateFunctionOutputOpenDrain(speed),
        }
    }
}
