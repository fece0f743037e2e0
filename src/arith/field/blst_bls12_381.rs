//! blst-backed scalar field of BLS12-381.
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::Scalar;
use ff::Field;
use rand_core::RngCore;

use crate::{BackendError, ByteEncoding, FieldElement};

pub type Fr = Scalar;

/// Rejection-sampling rounds before the randomness source is declared broken.
///
/// A healthy source succeeds within a round with probability ~0.9, so hitting
/// this bound means the stream is constant or adversarial.
const MAX_SAMPLING_ATTEMPTS: usize = 64;

impl ByteEncoding for Scalar {
    const ENCODED_LEN: usize = 32;

    fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_be().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| BackendError::Serialization("invalid scalar length"))?;
        Option::<Scalar>::from(Scalar::from_bytes_be(&bytes))
            .ok_or(BackendError::Serialization("invalid scalar bytes"))
    }
}

impl FieldElement for Scalar {
    fn zero() -> Self {
        Scalar::ZERO
    }

    fn one() -> Self {
        Scalar::ONE
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, rand_core::Error> {
        let mut bytes = [0u8; 32];
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            rng.try_fill_bytes(&mut bytes)?;
            // little-endian: keep candidates below 2^255 so most land under the modulus
            bytes[31] &= 0x7f;
            if let Some(scalar) = Option::<Scalar>::from(Scalar::from_bytes_le(&bytes)) {
                return Ok(scalar);
            }
        }
        Err(rand_core::Error::new(
            "randomness source never produced a canonical scalar",
        ))
    }

    fn is_zero(&self) -> bool {
        bool::from(Field::is_zero(self))
    }

    fn invert(&self) -> Option<Self> {
        Field::invert(self).into()
    }

    fn batch_inversion(elements: &mut [Self]) -> Result<(), BackendError> {
        use ff::BatchInvert;

        if elements.is_empty() {
            return Ok(());
        }

        // Check for zero elements before batch inversion
        for elem in elements.iter() {
            if bool::from(Field::is_zero(elem)) {
                return Err(BackendError::Math("cannot invert zero element"));
            }
        }

        // Montgomery's trick
        elements.iter_mut().batch_invert();

        Ok(())
    }

    fn from_u64(n: u64) -> Self {
        Scalar::from(n)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn encoding_rejects_wrong_length() {
        assert!(matches!(
            <Scalar as ByteEncoding>::from_bytes(&[0u8; 31]),
            Err(BackendError::Serialization(_))
        ));
    }

    #[test]
    fn encoding_rejects_non_canonical() {
        assert!(<Scalar as ByteEncoding>::from_bytes(&[0xff; 32]).is_err());
    }

    #[test]
    fn random_is_deterministic_for_seeded_rng() {
        let a = <Scalar as FieldElement>::random(&mut StdRng::seed_from_u64(9)).unwrap();
        let b = <Scalar as FieldElement>::random(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn batch_inversion_matches_single_inversion() {
        let mut rng = StdRng::seed_from_u64(3);
        let values: Vec<Scalar> = (0..5)
            .map(|_| <Scalar as FieldElement>::random(&mut rng).unwrap())
            .collect();
        let mut inverted = values.clone();
        Scalar::batch_inversion(&mut inverted).unwrap();
        for (v, inv) in values.iter().zip(inverted.iter()) {
            assert_eq!(FieldElement::invert(v), Some(*inv));
        }
    }

    #[test]
    fn batch_inversion_rejects_zero() {
        let mut values = vec![Scalar::ONE, Scalar::ZERO];
        assert!(Scalar::batch_inversion(&mut values).is_err());
    }
}
