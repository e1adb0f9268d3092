//! Two-channel reflectometer front end
//!
//! The directional coupler delivers the forward and reflected levels on
//! two ADC inputs. This driver only produces raw counts; conversion and
//! interpretation belong to the core estimator.

use faultline_hal::{AdcError, AnalogInput};

/// One pair of raw conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Forward channel counts
    pub forward: u16,
    /// Reflected channel counts
    pub reflected: u16,
}

/// Reflectometer on a multi-channel ADC
pub struct Reflectometer<A> {
    adc: A,
    forward_channel: u8,
    reflected_channel: u8,
    /// Conversions averaged per reading (at least 1)
    oversample: u8,
}

impl<A: AnalogInput> Reflectometer<A> {
    /// Create a reflectometer reading one conversion per channel
    pub fn new(adc: A, forward_channel: u8, reflected_channel: u8) -> Self {
        Self {
            adc,
            forward_channel,
            reflected_channel,
            oversample: 1,
        }
    }

    /// Average `count` conversions per channel to suppress ADC noise
    pub fn with_oversample(mut self, count: u8) -> Self {
        self.oversample = count.max(1);
        self
    }

    /// Resolution of the underlying converter
    pub fn resolution(&self) -> u16 {
        self.adc.resolution()
    }

    /// Read both channels
    ///
    /// Channels are interleaved so slow drift affects both equally.
    pub fn sample(&mut self) -> Result<RawSample, AdcError> {
        let mut forward: u32 = 0;
        let mut reflected: u32 = 0;

        for _ in 0..self.oversample {
            forward += self.adc.read(self.forward_channel)? as u32;
            reflected += self.adc.read(self.reflected_channel)? as u32;
        }

        let n = self.oversample as u32;
        Ok(RawSample {
            forward: (forward / n) as u16,
            reflected: (reflected / n) as u16,
        })
    }

    /// Release the ADC
    pub fn free(self) -> A {
        self.adc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ADC returning a fixed sequence per channel
    struct ScriptedAdc {
        forward: &'static [u16],
        reflected: &'static [u16],
        reads: [usize; 2],
    }

    impl AnalogInput for ScriptedAdc {
        fn read(&mut self, channel: u8) -> Result<u16, AdcError> {
            let (seq, idx) = match channel {
                0 => (self.forward, &mut self.reads[0]),
                1 => (self.reflected, &mut self.reads[1]),
                other => return Err(AdcError::InvalidChannel(other)),
            };
            let value = seq[*idx % seq.len()];
            *idx += 1;
            Ok(value)
        }

        fn resolution(&self) -> u16 {
            1024
        }
    }

    fn adc(forward: &'static [u16], reflected: &'static [u16]) -> ScriptedAdc {
        ScriptedAdc {
            forward,
            reflected,
            reads: [0, 0],
        }
    }

    #[test]
    fn test_single_sample() {
        let mut r = Reflectometer::new(adc(&[410], &[205]), 0, 1);
        assert_eq!(
            r.sample().unwrap(),
            RawSample {
                forward: 410,
                reflected: 205
            }
        );
        assert_eq!(r.resolution(), 1024);
    }

    #[test]
    fn test_oversample_averages() {
        let mut r = Reflectometer::new(adc(&[400, 420], &[200, 210]), 0, 1).with_oversample(4);
        assert_eq!(
            r.sample().unwrap(),
            RawSample {
                forward: 410,
                reflected: 205
            }
        );
    }

    #[test]
    fn test_zero_oversample_reads_once() {
        let mut r = Reflectometer::new(adc(&[7], &[3]), 0, 1).with_oversample(0);
        assert_eq!(r.sample().unwrap().forward, 7);
        assert_eq!(r.free().reads, [1, 1]);
    }

    #[test]
    fn test_channel_error_propagates() {
        let mut r = Reflectometer::new(adc(&[1], &[1]), 0, 3);
        assert_eq!(r.sample(), Err(AdcError::InvalidChannel(3)));
    }
}
