use crate::Generator;
use rand::distr::Alphanumeric;
use rand::Rng;
use shortwave_core::{ShortCode, CODE_LENGTH};

/// A random short code generator.
///
/// Draws a fixed-length string uniformly from `[A-Za-z0-9]` (62
/// symbols), independently per call. The RNG is a general-purpose
/// source, not a CSPRNG contract: codes are collision-avoidance keys,
/// not security tokens. With 62^7 possible codes the collision
/// probability against N existing records is roughly N / 62^7, but the
/// registrar verifies rather than relying on "negligible".
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator emitting codes of the standard length.
    pub fn new() -> Self {
        Self {
            length: CODE_LENGTH,
        }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let code: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_fixed_length() {
        let generator = RandomGenerator::new();
        for _ in 0..100 {
            assert_eq!(generator.generate().as_str().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn codes_are_ascii_alphanumeric() {
        let generator = RandomGenerator::new();
        for _ in 0..100 {
            let code = generator.generate();
            assert!(code.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn consecutive_draws_differ() {
        // 62^7 codes make a repeat across a handful of draws
        // vanishingly unlikely.
        let generator = RandomGenerator::new();
        let first = generator.generate();
        let second = generator.generate();
        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
