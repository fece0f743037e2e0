//! # tbls: Shamir sharing and threshold BLS signatures
//!
//! Shamir secret sharing over the scalar field of BLS12-381, Feldman
//! commitments to the sharing polynomial, and threshold BLS signatures where
//! any `t` of `n` share holders jointly produce a signature that verifies
//! under one group public key.
//!
//! ## Overview
//!
//! A secret is the constant term of a random polynomial of degree `t - 1`.
//! Share `i` is the polynomial evaluated at `x = i + 1`; any `t` shares
//! determine the polynomial and so the secret, while `t - 1` shares reveal
//! nothing about it. Multiplying every coefficient by a base point gives a
//! commitment polynomial that lets anyone check a share without learning it.
//!
//! Signing reuses the same interpolation in the signature group: each share
//! holder signs with its share, and `t` partial signatures combine with
//! Lagrange coefficients into the signature of the secret.
//!
//! ## Architecture
//!
//! - **arith** (re-exported at the root): [`FieldElement`], [`CurvePoint`] and
//!   [`PairingBackend`] with a blstrs backend ([`Fr`], [`G1`], [`G2`],
//!   [`PairingEngine`])
//! - **[`poly`]**: [`PrivatePoly`] and its commitment [`PublicPoly`]
//! - **[`share`]**: [`Share`], [`ShareSet`] and the share wire encoding
//! - **[`recover`]**: Lagrange reconstruction of secrets, commitments and
//!   whole polynomials
//! - **[`combine`]**: sums of polynomials, commitments and shares
//! - **[`sig`]**: BLS ([`G1Scheme`], [`G2Scheme`]), multi-signatures and
//!   [`ThresholdSigner`]
//! - **[`dkg`]**: joint key generation without a trusted dealer
//! - **[`config`]**: [`ThresholdParameters`] and [`SchemeConfig`]
//! - **[`rng`]**: [`ReplayRng`](rng::ReplayRng) for deterministic runs
//!
//! ## Quick Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tbls::{
//!     G1Scheme, PairingEngine, PrivatePoly, SchemeConfig, SignatureGroup, SignatureScheme,
//!     ThresholdParameters, ThresholdSigner,
//! };
//!
//! # fn main() -> Result<(), tbls::Error> {
//! // 3-of-5, signatures in G1 and keys in G2
//! let params = ThresholdParameters::new(5, 3, SchemeConfig::new(SignatureGroup::G1))?;
//! let signer = ThresholdSigner::new(G1Scheme::<PairingEngine>::from_config(&params.scheme)?);
//!
//! let mut rng = StdRng::from_entropy();
//! let poly = PrivatePoly::new(params.threshold, None, &mut rng)?;
//! let public_poly = poly.commit(&signer.scheme().public_base());
//! let shares = poly.shares(params.parties)?;
//!
//! // Any three holders sign
//! let partials = [&shares[0], &shares[2], &shares[4]]
//!     .into_iter()
//!     .map(|share| signer.partial_sign(share, b"hello"))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let recovery = signer.recover(&public_poly, b"hello", &partials, params.threshold, params.parties)?;
//! signer.verify(&public_poly.commit(), b"hello", &recovery.signature)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - **`blst`** (default): blstrs backend for BLS12-381
//!
//! ## Performance
//!
//! Point recombination uses multi-scalar multiplication, inversions in
//! Lagrange coefficients are batched, and per-share signature checks during
//! recovery run on the Rayon pool.
//!
//! ## Security Considerations
//!
//! - Fewer than `t` shares reveal nothing about the secret; a dealer that
//!   knows the whole polynomial can always sign alone, so use [`dkg`] when no
//!   party should hold the secret.
//! - Recovered signatures are verified against the group public key before
//!   they are returned.
//! - Randomness comes from the caller's `RngCore`; failures are reported as
//!   [`Error::RandomnessUnavailable`] rather than panicking.

mod arith;
mod errors;
mod serde_impl;

pub mod combine;
pub mod config;
pub mod dkg;
pub mod poly;
pub mod recover;
pub mod rng;
pub mod share;
pub mod sig;

pub use arith::*;
pub use combine::{accumulate_private_shares, add_commitments, add_polynomials, eval_combined};
pub use config::{CurveId, SchemeConfig, SignatureGroup, ThresholdParameters, DST_G1, DST_G2};
pub use errors::*;
pub use poly::{PrivatePoly, PublicPoly};
pub use recover::{
    lagrange_coefficients, recover_commitment, recover_private_poly, recover_public_poly,
    recover_secret,
};
pub use share::{Index, PrivateShare, PublicShare, Share, ShareSet, SignatureShare};
pub use sig::{
    G1Scheme, G2Scheme, Recovery, SessionState, SignatureScheme, SigningSession, ThresholdSigner,
};
