//! blst-backed G1, G2 and GT groups of BLS12-381.
//!
//! Hash-to-curve uses the `XMD:SHA-256` / `SSWU_RO` suites of
//! draft-irtf-cfrg-hash-to-curve as implemented by `blstrs`.
//!
//! # Feature
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::{G1Affine, G1Projective, G2Affine, G2Projective, Gt as BlstGt, Scalar};
use group::Group;

use crate::{BackendError, ByteEncoding, CurvePoint, TargetGroup};

pub type G1 = G1Projective;
pub type G2 = G2Projective;
pub type Gt = BlstGt;

impl ByteEncoding for G1 {
    const ENCODED_LEN: usize = 48;

    fn to_bytes(&self) -> Vec<u8> {
        G1Affine::from(self).to_compressed().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let bytes: [u8; 48] = bytes
            .try_into()
            .map_err(|_| BackendError::Serialization("invalid G1 length"))?;
        Option::<G1Affine>::from(G1Affine::from_compressed(&bytes))
            .map(G1Projective::from)
            .ok_or(BackendError::Serialization("invalid G1 point encoding"))
    }
}

impl ByteEncoding for G2 {
    const ENCODED_LEN: usize = 96;

    fn to_bytes(&self) -> Vec<u8> {
        G2Affine::from(self).to_compressed().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let bytes: [u8; 96] = bytes
            .try_into()
            .map_err(|_| BackendError::Serialization("invalid G2 length"))?;
        Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
            .map(G2Projective::from)
            .ok_or(BackendError::Serialization("invalid G2 point encoding"))
    }
}

impl CurvePoint for G1 {
    type Scalar = Scalar;

    fn identity() -> Self {
        <G1Projective as Group>::identity()
    }

    fn generator() -> Self {
        <G1Projective as Group>::generator()
    }

    fn is_identity(&self) -> bool {
        <Self as Group>::is_identity(self).into()
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn negate(&self) -> Self {
        -self
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self * scalar
    }

    fn multi_scalar_multiplication(points: &[Self], scalars: &[Scalar]) -> Result<Self, BackendError> {
        if points.len() != scalars.len() {
            return Err(BackendError::Math("points and scalars length mismatch"));
        }
        Ok(G1Projective::multi_exp(points, scalars))
    }

    fn hash_to_curve(message: &[u8], dst: &[u8]) -> Self {
        G1Projective::hash_to_curve(message, dst, &[])
    }
}

impl CurvePoint for G2 {
    type Scalar = Scalar;

    fn identity() -> Self {
        <G2Projective as Group>::identity()
    }

    fn generator() -> Self {
        <G2Projective as Group>::generator()
    }

    fn is_identity(&self) -> bool {
        <Self as Group>::is_identity(self).into()
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn negate(&self) -> Self {
        -self
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self * scalar
    }

    fn multi_scalar_multiplication(points: &[Self], scalars: &[Scalar]) -> Result<Self, BackendError> {
        if points.len() != scalars.len() {
            return Err(BackendError::Math("points and scalars length mismatch"));
        }
        Ok(G2Projective::multi_exp(points, scalars))
    }

    fn hash_to_curve(message: &[u8], dst: &[u8]) -> Self {
        G2Projective::hash_to_curve(message, dst, &[])
    }
}

impl TargetGroup for Gt {
    fn identity() -> Self {
        <Gt as Group>::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldElement;

    #[test]
    fn compressed_encoding_roundtrips_both_groups() {
        let s = Scalar::from_u64(1234);
        let p1 = CurvePoint::mul_scalar(&<G1 as CurvePoint>::generator(), &s);
        let p2 = CurvePoint::mul_scalar(&<G2 as CurvePoint>::generator(), &s);
        let b1 = ByteEncoding::to_bytes(&p1);
        let b2 = ByteEncoding::to_bytes(&p2);
        assert_eq!(b1.len(), <G1 as ByteEncoding>::ENCODED_LEN);
        assert_eq!(b2.len(), <G2 as ByteEncoding>::ENCODED_LEN);
        assert_eq!(<G1 as ByteEncoding>::from_bytes(&b1).unwrap(), p1);
        assert_eq!(<G2 as ByteEncoding>::from_bytes(&b2).unwrap(), p2);
    }

    #[test]
    fn decoding_rejects_garbage() {
        assert!(<G1 as ByteEncoding>::from_bytes(&[0x11; 48]).is_err());
        assert!(<G2 as ByteEncoding>::from_bytes(&[0x11; 95]).is_err());
    }

    #[test]
    fn msm_rejects_length_mismatch() {
        let points = vec![<G1 as CurvePoint>::generator(); 2];
        let scalars = vec![Scalar::from_u64(1)];
        assert!(G1::multi_scalar_multiplication(&points, &scalars).is_err());
    }

    #[test]
    fn hash_to_curve_depends_on_message_and_dst() {
        let a = <G1 as CurvePoint>::hash_to_curve(b"msg", b"DST-A");
        let b = <G1 as CurvePoint>::hash_to_curve(b"msg", b"DST-B");
        let c = <G1 as CurvePoint>::hash_to_curve(b"other", b"DST-A");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, <G1 as CurvePoint>::hash_to_curve(b"msg", b"DST-A"));
    }
}
