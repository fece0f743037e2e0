//! Group abstraction consumed by the sharing and signing layers.
//!
//! Nothing in this crate implements field or curve arithmetic itself. The
//! traits below describe what the rest of the crate needs from a pairing
//! friendly, prime-order group, and each backend module wires them to a
//! concrete library.
//!
//! - **[`field`]**: scalar field operations (sampling, inversion, encoding)
//! - **[`group`]**: curve point operations (addition, scalar multiplication,
//!   multi-scalar multiplication, hash-to-curve, compressed encoding)
//! - **[`pairing`]**: the bilinear map `e(G1, G2) -> GT`
//!
//! # Backend Support
//!
//! | Feature | Backend | Curve | Status |
//! |---------|---------|-------|--------|
//! | `blst` (default) | blstrs | BLS12-381 | Stable |
//!
//! # Example
//!
//! ```rust
//! use rand::thread_rng;
//! use tbls::{CurvePoint, FieldElement, PairingBackend, PairingEngine};
//!
//! let mut rng = thread_rng();
//! let scalar = <PairingEngine as PairingBackend>::Scalar::random(&mut rng).unwrap();
//! let inv = scalar.invert().expect("non-zero scalar");
//!
//! let g1 = <PairingEngine as PairingBackend>::G1::generator();
//! let point = g1.mul_scalar(&scalar);
//! assert_eq!(point.mul_scalar(&inv), g1);
//! ```

use crate::BackendError;

mod field;
pub use field::*;

mod group;
pub use group::*;

mod pairing;
pub use pairing::*;

/// Fixed-size binary encoding shared by scalars and points.
///
/// Scalars use their canonical 32-byte big-endian form and points use the
/// compressed form of their affine representation.
pub trait ByteEncoding: Sized {
    /// Length in bytes of every encoding produced by [`to_bytes`](Self::to_bytes).
    const ENCODED_LEN: usize;

    /// Serializes the element.
    fn to_bytes(&self) -> Vec<u8>;

    /// Deserializes the element, rejecting wrong lengths and non-canonical bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError>;
}
