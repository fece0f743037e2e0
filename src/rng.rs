//! Deterministic randomness for reproducible runs and failure testing.

use rand_core::{impls, CryptoRng, Error, RngCore};

/// Replays a fixed byte buffer, then fails.
///
/// Every byte is handed out exactly once. Once a request cannot be served in
/// full, [`RngCore::try_fill_bytes`] returns an error and consumes nothing, so
/// sampling on top of it surfaces as [`crate::Error::RandomnessUnavailable`].
/// The infallible [`RngCore`] methods panic at that point, as the trait
/// requires; use the crate's sampling paths, which only call the fallible one.
///
/// This is not a secure generator. The `CryptoRng` marker only lets it stand
/// in where the API asks for one, and the bytes are only as unpredictable as
/// whatever produced them.
#[derive(Clone, Debug)]
pub struct ReplayRng {
    buffer: Vec<u8>,
    position: usize,
}

impl ReplayRng {
    pub fn new(buffer: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: buffer.into(),
            position: 0,
        }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }
}

impl RngCore for ReplayRng {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill_bytes(dest) {
            panic!("ReplayRng: {}", err);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        if dest.len() > self.remaining() {
            return Err(Error::new(format!(
                "replay buffer exhausted: {} bytes requested, {} left",
                dest.len(),
                self.remaining()
            )));
        }
        let end = self.position + dest.len();
        dest.copy_from_slice(&self.buffer[self.position..end]);
        self.position = end;
        Ok(())
    }
}

impl CryptoRng for ReplayRng {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldElement, Fr};

    #[test]
    fn replays_bytes_in_order() {
        let mut rng = ReplayRng::new(vec![1, 2, 3, 4, 5]);
        let mut out = [0u8; 2];
        rng.try_fill_bytes(&mut out).unwrap();
        assert_eq!(out, [1, 2]);
        rng.try_fill_bytes(&mut out).unwrap();
        assert_eq!(out, [3, 4]);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn short_read_fails_without_consuming() {
        let mut rng = ReplayRng::new(vec![9; 3]);
        let mut out = [0u8; 4];
        assert!(rng.try_fill_bytes(&mut out).is_err());
        assert_eq!(rng.remaining(), 3);
    }

    #[test]
    fn same_buffer_same_scalar() {
        let bytes = vec![7u8; 32];
        let a = Fr::random(&mut ReplayRng::new(bytes.clone())).unwrap();
        let b = Fr::random(&mut ReplayRng::new(bytes)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exhaustion_surfaces_as_randomness_error() {
        let mut rng = ReplayRng::new(Vec::new());
        let err = Fr::random(&mut rng).unwrap_err();
        let err: crate::Error = err.into();
        assert!(matches!(err, crate::Error::RandomnessUnavailable(_)));
    }
}
