//! Secret-sharing polynomials and their commitments.
//!
//! A [`PrivatePoly`] of threshold `t` holds coefficients `a_0..a_{t-1}` in
//! ascending order, with `a_0` the shared secret:
//!
//! ```text
//! f(x) = a_0 + a_1*x + a_2*x^2 + ... + a_{t-1}*x^{t-1}
//! ```
//!
//! Committing multiplies every coefficient by a base point, giving a
//! [`PublicPoly`] that evaluates to `base * f(x)` without revealing `f`.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use tbls::{CurvePoint, FieldElement, Fr, PrivatePoly, G2};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let poly = PrivatePoly::new(3, Some(Fr::from_u64(42)), &mut rng).unwrap();
//! let public = poly.commit(&G2::generator());
//!
//! for share in poly.shares(5).unwrap() {
//!     assert!(public.check(&share));
//! }
//! assert_eq!(public.commit(), G2::generator().mul_scalar(&Fr::from_u64(42)));
//! ```

use std::fmt;
use std::ops::Range;

use rand_core::RngCore;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::{instrument, trace};

use crate::share::{eval_point, Index, PrivateShare, PublicShare, Share};
use crate::{CurvePoint, Error, FieldElement};

fn share_indices(n: usize) -> Result<Range<Index>, Error> {
    let end = Index::try_from(n)
        .map_err(|_| Error::InvalidConfig(format!("cannot index {} shares with a u32", n)))?;
    Ok(0..end)
}

/// Private polynomial over the scalar field.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivatePoly<F> {
    coeffs: Vec<F>,
}

// Coefficients stay out of logs and panic messages.
impl<F> fmt::Debug for PrivatePoly<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivatePoly")
            .field("threshold", &self.coeffs.len())
            .finish_non_exhaustive()
    }
}

impl<F: FieldElement> PrivatePoly<F> {
    /// Samples a polynomial of the given threshold (degree `threshold - 1`).
    ///
    /// The constant term is `secret` when given and sampled otherwise; the
    /// other `threshold - 1` coefficients are always fresh.
    #[instrument(level = "debug", skip_all, fields(threshold = threshold, with_secret = secret.is_some()))]
    pub fn new<R: RngCore + ?Sized>(
        threshold: usize,
        secret: Option<F>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if threshold == 0 {
            return Err(Error::InvalidConfig(
                "threshold must be greater than 0".into(),
            ));
        }
        let mut coeffs = Vec::with_capacity(threshold);
        coeffs.push(match secret {
            Some(secret) => secret,
            None => F::random(rng)?,
        });
        for _ in 1..threshold {
            coeffs.push(F::random(rng)?);
        }
        trace!(threshold, "sampled private polynomial");
        Ok(Self { coeffs })
    }

    /// Builds a polynomial from coefficients in ascending order.
    pub fn from_coefficients(coeffs: Vec<F>) -> Result<Self, Error> {
        if coeffs.is_empty() {
            return Err(Error::MalformedInput(
                "polynomial needs at least one coefficient".into(),
            ));
        }
        Ok(Self { coeffs })
    }

    /// Number of coefficients, i.e. the number of shares needed to reconstruct.
    pub fn threshold(&self) -> usize {
        self.coeffs.len()
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn coefficients(&self) -> &[F] {
        &self.coeffs
    }

    /// The constant term `a_0`.
    pub fn secret(&self) -> F {
        self.coeffs[0]
    }

    /// Evaluates the polynomial at `x` using Horner's method.
    pub fn evaluate_at(&self, x: &F) -> F {
        let mut result = F::zero();
        for coeff in self.coeffs.iter().rev() {
            result = result * *x + *coeff;
        }
        result
    }

    /// Private share for `index`, i.e. `f(index + 1)`.
    pub fn eval(&self, index: Index) -> PrivateShare<F> {
        Share::new(index, self.evaluate_at(&eval_point(index)))
    }

    /// Shares for indices `0..n`.
    ///
    /// Fails with [`Error::InvalidConfig`] when `n` does not fit in an [`Index`].
    pub fn shares(&self, n: usize) -> Result<Vec<PrivateShare<F>>, Error> {
        Ok(share_indices(n)?.map(|i| self.eval(i)).collect())
    }

    /// Commits every coefficient to `base`.
    pub fn commit<P: CurvePoint<Scalar = F>>(&self, base: &P) -> PublicPoly<P> {
        PublicPoly {
            base: *base,
            commits: self.coeffs.iter().map(|c| base.mul_scalar(c)).collect(),
        }
    }

    /// Coefficient-wise sum; both polynomials must have the same threshold.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        if self.threshold() != other.threshold() {
            return Err(Error::DegreeMismatch {
                expected: self.degree(),
                actual: other.degree(),
            });
        }
        Ok(Self {
            coeffs: self
                .coeffs
                .iter()
                .zip(other.coeffs.iter())
                .map(|(a, b)| *a + *b)
                .collect(),
        })
    }
}

/// Commitment polynomial: every coefficient multiplied by a base point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicPoly<P> {
    base: P,
    commits: Vec<P>,
}

impl<P: CurvePoint> PublicPoly<P> {
    /// Builds a commitment polynomial from `base * a_k` values in ascending order.
    pub fn from_commitments(base: P, commits: Vec<P>) -> Result<Self, Error> {
        if commits.is_empty() {
            return Err(Error::MalformedInput(
                "commitment polynomial needs at least one coefficient".into(),
            ));
        }
        Ok(Self { base, commits })
    }

    pub fn base(&self) -> &P {
        &self.base
    }

    pub fn threshold(&self) -> usize {
        self.commits.len()
    }

    pub fn degree(&self) -> usize {
        self.commits.len() - 1
    }

    pub fn commitments(&self) -> &[P] {
        &self.commits
    }

    /// The committed secret `base * a_0`, which is the group public key.
    pub fn commit(&self) -> P {
        self.commits[0]
    }

    /// Evaluates `base * f(x)` using Horner's method in the group.
    pub fn evaluate_at(&self, x: &P::Scalar) -> P {
        let mut result = P::identity();
        for commit in self.commits.iter().rev() {
            result = result.mul_scalar(x).add(commit);
        }
        result
    }

    /// Public share for `index`, i.e. `base * f(index + 1)`.
    pub fn eval(&self, index: Index) -> PublicShare<P> {
        Share::new(index, self.evaluate_at(&eval_point(index)))
    }

    /// Public shares for indices `0..n`.
    pub fn shares(&self, n: usize) -> Result<Vec<PublicShare<P>>, Error> {
        Ok(share_indices(n)?
            .into_par_iter()
            .map(|i| self.eval(i))
            .collect())
    }

    /// Coefficient-wise point sum; both polynomials must share degree and base.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        if self.threshold() != other.threshold() {
            return Err(Error::DegreeMismatch {
                expected: self.degree(),
                actual: other.degree(),
            });
        }
        if self.base != other.base {
            return Err(Error::MalformedInput(
                "commitment polynomials use different base points".into(),
            ));
        }
        Ok(Self {
            base: self.base,
            commits: self
                .commits
                .iter()
                .zip(other.commits.iter())
                .map(|(a, b)| a.add(b))
                .collect(),
        })
    }

    /// Feldman check: `base * share.value == self.eval(share.index)`.
    pub fn check(&self, share: &PrivateShare<P::Scalar>) -> bool {
        self.base.mul_scalar(&share.value) == self.eval(share.index).value
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::rng::ReplayRng;
    use crate::{Fr, G1, G2};

    #[test]
    fn evaluation_matches_hand_computation() {
        // f(x) = 5 + 3x + 2x^2
        let poly = PrivatePoly::from_coefficients(vec![
            Fr::from_u64(5),
            Fr::from_u64(3),
            Fr::from_u64(2),
        ])
        .unwrap();

        assert_eq!(poly.evaluate_at(&Fr::zero()), Fr::from_u64(5));
        assert_eq!(poly.evaluate_at(&Fr::one()), Fr::from_u64(10));
        assert_eq!(poly.evaluate_at(&Fr::from_u64(2)), Fr::from_u64(19));

        // share index 0 is x = 1
        assert_eq!(poly.eval(0).value, Fr::from_u64(10));
        assert_eq!(poly.eval(1).value, Fr::from_u64(19));
    }

    #[test]
    fn new_keeps_given_secret() {
        let mut rng = StdRng::seed_from_u64(1);
        let secret = Fr::from_u64(7);
        let poly = PrivatePoly::new(4, Some(secret), &mut rng).unwrap();
        assert_eq!(poly.secret(), secret);
        assert_eq!(poly.threshold(), 4);
        assert_eq!(poly.degree(), 3);
    }

    #[test]
    fn new_samples_secret_when_absent() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = PrivatePoly::<Fr>::new(2, None, &mut rng).unwrap();
        let b = PrivatePoly::<Fr>::new(2, None, &mut rng).unwrap();
        assert_ne!(a.secret(), b.secret());
    }

    #[test]
    fn same_seed_same_polynomial() {
        let a = PrivatePoly::<Fr>::new(3, None, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = PrivatePoly::<Fr>::new(3, None, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            PrivatePoly::<Fr>::new(0, None, &mut rng),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn exhausted_randomness_surfaces_as_error() {
        // enough bytes for the secret but not for the second coefficient
        let mut rng = ReplayRng::new(vec![1u8; 32]);
        let result = PrivatePoly::<Fr>::new(2, None, &mut rng);
        assert!(matches!(result, Err(Error::RandomnessUnavailable(_))));
    }

    #[test]
    fn shares_use_consecutive_indices() {
        let mut rng = StdRng::seed_from_u64(2);
        let poly = PrivatePoly::<Fr>::new(3, None, &mut rng).unwrap();
        let shares = poly.shares(5).unwrap();
        assert_eq!(
            shares.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
        // the secret is never one of the shares
        assert!(shares.iter().all(|s| s.value != poly.secret()));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn share_count_must_fit_an_index() {
        let mut rng = StdRng::seed_from_u64(2);
        let poly = PrivatePoly::<Fr>::new(2, None, &mut rng).unwrap();
        let too_many = u32::MAX as usize + 1;
        assert!(matches!(poly.shares(too_many), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            poly.commit(&G2::generator()).shares(too_many),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn commitment_is_consistent_with_shares() {
        let mut rng = StdRng::seed_from_u64(3);
        let poly = PrivatePoly::<Fr>::new(4, None, &mut rng).unwrap();
        let public = poly.commit(&G2::generator());
        assert_eq!(public.threshold(), poly.threshold());
        let public_shares = public.shares(6).unwrap();
        for (private, public_share) in poly.shares(6).unwrap().iter().zip(public_shares) {
            assert_eq!(private.index, public_share.index);
            assert_eq!(G2::generator().mul_scalar(&private.value), public_share.value);
        }
        assert_eq!(public.commit(), G2::generator().mul_scalar(&poly.secret()));
    }

    #[test]
    fn check_rejects_tampered_share() {
        let mut rng = StdRng::seed_from_u64(4);
        let poly = PrivatePoly::<Fr>::new(3, None, &mut rng).unwrap();
        let public = poly.commit(&G1::generator());
        let mut share = poly.eval(2);
        assert!(public.check(&share));
        share.value += Fr::one();
        assert!(!public.check(&share));
    }

    #[test]
    fn add_rejects_degree_mismatch() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = PrivatePoly::<Fr>::new(2, None, &mut rng).unwrap();
        let b = PrivatePoly::<Fr>::new(3, None, &mut rng).unwrap();
        assert!(matches!(a.add(&b), Err(Error::DegreeMismatch { expected: 1, actual: 2 })));
        assert!(matches!(
            a.commit(&G1::generator()).add(&b.commit(&G1::generator())),
            Err(Error::DegreeMismatch { .. })
        ));
    }

    #[test]
    fn debug_output_hides_coefficients() {
        let poly = PrivatePoly::from_coefficients(vec![Fr::from_u64(99)]).unwrap();
        let rendered = format!("{:?}", poly);
        assert!(rendered.contains("threshold: 1"));
        assert!(!rendered.contains("99"));
    }
}
