//! `embedded-hal` 1.0 pin adapters
//!
//! Lets any infallible `embedded-hal` digital pin (embassy-rp `Output` and
//! `Input` among them) be used where the drivers expect the rig's HAL pin
//! traits.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin as EhInputPin, OutputPin as EhOutputPin};

use cyclerig_hal::{InputPin, OutputPin};

/// Output adapter; remembers the last written level
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutput<P>
where
    P: EhOutputPin + ErrorType<Error = Infallible>,
{
    /// Wrap a pin and drive it low
    pub fn new(pin: P) -> Self {
        let mut output = Self { pin, high: true };
        output.set_low();
        output
    }

    /// Unwrap the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: EhOutputPin + ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(never) => match never {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input adapter
pub struct EhInput<P> {
    pin: P,
}

impl<P> EhInput<P>
where
    P: EhInputPin + ErrorType<Error = Infallible>,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Unwrap the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> InputPin for EhInput<P>
where
    P: EhInputPin + ErrorType<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockPin {
        level: bool,
        writes: u32,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl EhOutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level = true;
            self.writes += 1;
            Ok(())
        }
    }

    impl EhInputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.level)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.level)
        }
    }

    #[test]
    fn test_output_starts_low() {
        let output = EhOutput::new(MockPin {
            level: true,
            writes: 0,
        });
        assert!(output.is_set_low());
        let pin = output.into_inner();
        assert!(!pin.level);
        assert_eq!(pin.writes, 1);
    }

    #[test]
    fn test_output_tracks_level() {
        let mut output = EhOutput::new(MockPin::default());
        output.toggle();
        assert!(output.is_set_high());
        output.set_state(false);
        assert!(!output.into_inner().level);
    }

    #[test]
    fn test_input() {
        let mut input = EhInput::new(MockPin {
            level: true,
            writes: 0,
        });
        assert!(input.is_high());
        assert!(!input.is_low());
    }
}
