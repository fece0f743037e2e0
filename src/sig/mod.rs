//! BLS signatures and their threshold variant.
//!
//! [`SignatureScheme`] is the seam between the sharing layer and the pairing
//! backend. It fixes which group carries signatures and which carries public
//! keys, the hash-to-curve domain, and the verification equation. Everything
//! else (partial signing, Lagrange recombination, plain aggregation) is
//! written once against the trait.
//!
//! - **[`bls`]**: [`G1Scheme`] (short signatures) and [`G2Scheme`] (short keys)
//! - **[`threshold`]**: [`ThresholdSigner`] and the [`SigningSession`] state machine

use std::fmt::Debug;

use rand_core::RngCore;

use crate::{CurvePoint, Error, FieldElement};

pub mod bls;
pub mod threshold;

pub use bls::{G1Scheme, G2Scheme};
pub use threshold::{Recovery, SessionState, SigningSession, ThresholdSigner};

/// A BLS signature scheme over a pairing-friendly curve.
///
/// Signatures are `secret * H(message)` in [`Signature`](Self::Signature) and
/// public keys are `secret * generator` in [`PublicKey`](Self::PublicKey).
/// Both groups act under the same scalar field, so shares of one secret sign
/// and verify the same way a whole key does.
pub trait SignatureScheme: Clone + Debug + Send + Sync {
    /// Scalar field shared by keys and signatures.
    type Scalar: FieldElement;
    /// Group holding public keys and commitment polynomials.
    type PublicKey: CurvePoint<Scalar = Self::Scalar>;
    /// Group holding message hashes and signatures.
    type Signature: CurvePoint<Scalar = Self::Scalar>;

    /// Domain separation tag for hashing messages.
    fn dst(&self) -> &[u8];

    /// Checks `e(signature, ·) == e(H(message), public_key)` in whichever
    /// order the group placement requires.
    fn verify(
        &self,
        public_key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> Result<(), Error>;

    /// Base point public keys and commitments are taken against.
    fn public_base(&self) -> Self::PublicKey {
        Self::PublicKey::generator()
    }

    fn public_key(&self, secret: &Self::Scalar) -> Self::PublicKey {
        self.public_base().mul_scalar(secret)
    }

    /// Samples a non-zero secret key and its public key.
    fn keypair<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::Scalar, Self::PublicKey), Error> {
        loop {
            let secret = Self::Scalar::random(rng)?;
            if !secret.is_zero() {
                return Ok((secret, self.public_key(&secret)));
            }
        }
    }

    fn hash_message(&self, message: &[u8]) -> Self::Signature {
        Self::Signature::hash_to_curve(message, self.dst())
    }

    /// Signs `message` with `secret`. A zero key is refused.
    fn sign(&self, secret: &Self::Scalar, message: &[u8]) -> Result<Self::Signature, Error> {
        if secret.is_zero() {
            return Err(Error::Signing("secret key is zero".into()));
        }
        Ok(self.hash_message(message).mul_scalar(secret))
    }

    /// Sums signatures from distinct signers (plain multi-signature).
    fn aggregate_signatures(&self, signatures: &[Self::Signature]) -> Result<Self::Signature, Error> {
        sum_points(signatures, "no signatures to aggregate")
    }

    /// Sums public keys; the result verifies an aggregate signature over a
    /// message every signer signed.
    fn aggregate_public_keys(
        &self,
        public_keys: &[Self::PublicKey],
    ) -> Result<Self::PublicKey, Error> {
        sum_points(public_keys, "no public keys to aggregate")
    }
}

fn sum_points<P: CurvePoint>(points: &[P], empty: &str) -> Result<P, Error> {
    if points.is_empty() {
        return Err(Error::MalformedInput(empty.into()));
    }
    Ok(points.iter().fold(P::identity(), |acc, p| acc.add(p)))
}
