use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;

use crate::{BackendError, ByteEncoding};

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::Fr;

/// Field element abstraction for scalar field operations.
///
/// This trait abstracts over the scalar field Fr of the elliptic curve. The
/// arithmetic operators come from the standard operator traits so generic
/// code reads like ordinary arithmetic.
///
/// # Example
///
/// ```rust
/// use rand::thread_rng;
/// use tbls::{ByteEncoding, FieldElement, Fr};
///
/// let mut rng = thread_rng();
/// let a = Fr::random(&mut rng).unwrap();
/// let b = Fr::from_u64(7);
///
/// let inv = a.invert().expect("non-zero element");
/// assert_eq!(a * inv, Fr::one());
///
/// let bytes = b.to_bytes();
/// assert_eq!(Fr::from_bytes(&bytes).unwrap(), b);
/// ```
pub trait FieldElement:
    Clone
    + Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Eq
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + ByteEncoding
{
    /// Returns the additive identity (zero) element.
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) element.
    fn one() -> Self;

    /// Samples a uniformly random field element.
    ///
    /// Bytes are pulled with [`RngCore::try_fill_bytes`] so a failing entropy
    /// backend surfaces as an error instead of a panic.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, rand_core::Error>;

    /// Returns `true` for the zero element.
    fn is_zero(&self) -> bool;

    /// Computes the multiplicative inverse, returning `None` for zero.
    fn invert(&self) -> Option<Self>;

    /// Performs batch inversion of a slice of field elements.
    fn batch_inversion(elements: &mut [Self]) -> Result<(), BackendError>;

    /// Convert u64 to self.
    fn from_u64(n: u64) -> Self;
}
