//! Pure wave-field math. The same (x, z, t) always produces the same height;
//! there is no state and no per-frame randomness.

use crate::config::{ConfigError, WaveAxis, WaveShape, WaveTerm, WaveTerms};

impl WaveTerm {
    #[inline]
    fn eval(&self, x: f32, z: f32, t: f32) -> f32 {
        let s = match self.axis {
            WaveAxis::X => x,
            WaveAxis::Z => z,
            WaveAxis::Diagonal => x + z,
            WaveAxis::Radial => (x * x + z * z).sqrt(),
        };
        let phase = s * self.frequency + t * self.phase_speed;
        let w = match self.shape {
            WaveShape::Sine => phase.sin(),
            WaveShape::Cosine => phase.cos(),
        };
        self.amplitude * w
    }
}

/// Sum of 1-3 sinusoidal terms parameterized by ground-plane position and
/// elapsed time.
#[derive(Clone, Debug)]
pub struct WaveField {
    terms: WaveTerms,
}

impl WaveField {
    pub fn new(terms: WaveTerms) -> Result<Self, ConfigError> {
        if terms.is_empty() {
            return Err(ConfigError::NoWaveTerms);
        }
        for (i, term) in terms.iter().enumerate() {
            let finite = term.frequency.is_finite()
                && term.amplitude.is_finite()
                && term.phase_speed.is_finite();
            if !finite {
                return Err(ConfigError::BadWaveTerm(i));
            }
        }
        Ok(Self { terms })
    }

    #[inline]
    pub fn height(&self, x: f32, z: f32, t: f32) -> f32 {
        self.terms.iter().map(|term| term.eval(x, z, t)).sum()
    }

    /// Worst-case |height|, used to normalize height-mapped color/size ramps.
    pub fn max_amplitude(&self) -> f32 {
        self.terms.iter().map(|term| term.amplitude.abs()).sum()
    }
}
