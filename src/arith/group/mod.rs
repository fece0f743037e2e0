use std::fmt::Debug;

use crate::{BackendError, ByteEncoding, FieldElement};

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::{G1, G2, Gt};

/// Elliptic curve point abstraction for the G1 and G2 groups.
///
/// Points are kept in projective coordinates; encoding goes through the
/// compressed affine form.
///
/// # Example
///
/// ```rust
/// use rand::thread_rng;
/// use tbls::{CurvePoint, FieldElement, Fr, G1};
///
/// let mut rng = thread_rng();
/// let scalar = Fr::random(&mut rng).unwrap();
///
/// let g = G1::generator();
/// let point = g.mul_scalar(&scalar);
/// let doubled = point.add(&point);
/// assert_eq!(doubled.sub(&point), point);
/// assert!(point.add(&point.negate()).is_identity());
/// ```
pub trait CurvePoint: Clone + Copy + Send + Sync + Debug + PartialEq + Eq + 'static + ByteEncoding {
    /// Scalar field acting on this group.
    type Scalar: FieldElement;

    /// Returns the point at infinity (identity element).
    fn identity() -> Self;

    /// Returns the standard generator for this group.
    fn generator() -> Self;

    /// Checks if this point is the identity element.
    fn is_identity(&self) -> bool;

    /// Performs elliptic curve point addition.
    fn add(&self, other: &Self) -> Self;

    /// Performs elliptic curve point subtraction.
    fn sub(&self, other: &Self) -> Self;

    /// Returns the additive inverse of this point.
    fn negate(&self) -> Self;

    /// Performs scalar multiplication: returns `scalar * self`.
    fn mul_scalar(&self, scalar: &Self::Scalar) -> Self;

    /// Computes `Σ scalars[i] * points[i]`.
    ///
    /// Returns an error if the slices have different lengths.
    fn multi_scalar_multiplication(
        points: &[Self],
        scalars: &[Self::Scalar],
    ) -> Result<Self, BackendError>;

    /// Hashes an arbitrary message onto the curve under a domain separation tag.
    fn hash_to_curve(message: &[u8], dst: &[u8]) -> Self;
}

/// Pairing target group (GT) abstraction.
///
/// Only equality is needed by the signature checks; they compare a product of
/// pairings against the identity.
pub trait TargetGroup: Clone + Send + Sync + Debug + PartialEq + 'static {
    /// Returns the identity element of the target group.
    fn identity() -> Self;

    /// Checks if this element is the identity.
    fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}
