use std::fmt::Debug;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::PairingEngine;

use crate::{BackendError, CurvePoint, FieldElement, TargetGroup};

/// Main backend trait that ties together the scalar field, both source groups
/// and the bilinear map.
///
/// # Example
///
/// ```rust
/// use tbls::{CurvePoint, FieldElement, PairingBackend, PairingEngine};
///
/// type Scalar = <PairingEngine as PairingBackend>::Scalar;
/// type G1 = <PairingEngine as PairingBackend>::G1;
/// type G2 = <PairingEngine as PairingBackend>::G2;
///
/// let a = Scalar::from_u64(3);
/// let lhs = PairingEngine::pairing(&G1::generator().mul_scalar(&a), &G2::generator());
/// let rhs = PairingEngine::pairing(&G1::generator(), &G2::generator().mul_scalar(&a));
/// assert_eq!(lhs, rhs);
/// ```
pub trait PairingBackend: Send + Sync + Debug + Sized + 'static {
    /// Scalar field type (Fr).
    type Scalar: FieldElement;
    /// First curve group (G1).
    type G1: CurvePoint<Scalar = Self::Scalar>;
    /// Second curve group (G2).
    type G2: CurvePoint<Scalar = Self::Scalar>;
    /// Pairing target group (GT).
    type Target: TargetGroup;

    /// Computes the bilinear pairing: `e(g1, g2) -> GT`.
    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target;

    /// Computes a product of pairings: `∏ e(g1[i], g2[i])`.
    ///
    /// Shares the final exponentiation across all terms. Returns an error if
    /// the input slices have different lengths.
    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError>;
}
