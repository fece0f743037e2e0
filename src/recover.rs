//! Lagrange reconstruction from threshold-many shares.
//!
//! Every routine here follows the same steps: deduplicate the shares by index,
//! check that at least `t` distinct indices remain, keep the `t` lowest ones
//! and interpolate. For share `i` the evaluation point is `x_i = i + 1`, and
//! the coefficient used to recover `f(0)` is
//!
//! ```text
//! L_i = Π_{j != i} (0 - x_j) / (x_i - x_j) = Π_{j != i} x_j / (x_j - x_i)
//! ```
//!
//! Scalar shares recombine in the field, point shares recombine in the group
//! with a multi-scalar multiplication. Both give the same answer for every
//! `t`-subset of shares drawn from one polynomial.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use tbls::{recover_secret, FieldElement, Fr, PrivatePoly};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let poly = PrivatePoly::new(3, Some(Fr::from_u64(7)), &mut rng).unwrap();
//! let shares = poly.shares(5).unwrap();
//!
//! // any three shares will do
//! let secret = recover_secret(&shares[2..], 3, 5).unwrap();
//! assert_eq!(secret, Fr::from_u64(7));
//! ```

use tracing::{debug, instrument};

use crate::config::check_threshold;
use crate::poly::{PrivatePoly, PublicPoly};
use crate::share::{eval_point, Index, Share, ShareSet};
use crate::{CurvePoint, Error, FieldElement};

/// Lagrange coefficients for evaluating at `x = 0` from the given share indices.
///
/// Fails with [`Error::SingularInterpolation`] when two indices coincide.
pub fn lagrange_coefficients<F: FieldElement>(indices: &[Index]) -> Result<Vec<F>, Error> {
    let xs: Vec<F> = indices.iter().map(|&i| eval_point(i)).collect();

    let mut numerators = Vec::with_capacity(xs.len());
    let mut denominators = Vec::with_capacity(xs.len());
    for (i, xi) in xs.iter().enumerate() {
        let mut num = F::one();
        let mut den = F::one();
        for (j, xj) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            num *= *xj;
            den *= *xj - *xi;
        }
        if den.is_zero() {
            return Err(Error::SingularInterpolation);
        }
        numerators.push(num);
        denominators.push(den);
    }

    F::batch_inversion(&mut denominators).map_err(|_| Error::SingularInterpolation)?;
    Ok(numerators
        .into_iter()
        .zip(denominators)
        .map(|(num, den_inv)| num * den_inv)
        .collect())
}

/// Reconstructs `f(0)` from private shares.
#[instrument(level = "info", skip_all, fields(threshold = t, parties = n, provided = shares.len()))]
pub fn recover_secret<F: FieldElement>(
    shares: &[Share<F>],
    t: usize,
    n: usize,
) -> Result<F, Error> {
    let selected = select_shares(shares, t, n)?;
    let indices: Vec<Index> = selected.iter().map(|s| s.index).collect();
    let coeffs = lagrange_coefficients::<F>(&indices)?;

    let mut acc = F::zero();
    for (share, coeff) in selected.iter().zip(coeffs) {
        acc += share.value * coeff;
    }
    Ok(acc)
}

/// Reconstructs `base * f(0)` from point-valued shares.
///
/// Works for public shares as well as signature shares; the latter gives the
/// threshold signature.
#[instrument(level = "info", skip_all, fields(threshold = t, parties = n, provided = shares.len()))]
pub fn recover_commitment<P: CurvePoint>(
    shares: &[Share<P>],
    t: usize,
    n: usize,
) -> Result<P, Error> {
    let selected = select_shares(shares, t, n)?;
    recombine_points(&selected)
}

/// Reconstructs the whole private polynomial from `t` shares.
#[instrument(level = "info", skip_all, fields(threshold = t, parties = n, provided = shares.len()))]
pub fn recover_private_poly<F: FieldElement>(
    shares: &[Share<F>],
    t: usize,
    n: usize,
) -> Result<PrivatePoly<F>, Error> {
    let selected = select_shares(shares, t, n)?;
    let indices: Vec<Index> = selected.iter().map(|s| s.index).collect();
    let basis = lagrange_basis::<F>(&indices)?;

    let mut coeffs = vec![F::zero(); t];
    for (share, basis_poly) in selected.iter().zip(basis.iter()) {
        for (acc, b) in coeffs.iter_mut().zip(basis_poly.iter()) {
            *acc += share.value * *b;
        }
    }
    PrivatePoly::from_coefficients(coeffs)
}

/// Reconstructs the whole commitment polynomial from `t` public shares.
///
/// `base` is the point the shares were committed to.
#[instrument(level = "info", skip_all, fields(threshold = t, parties = n, provided = shares.len()))]
pub fn recover_public_poly<P: CurvePoint>(
    base: &P,
    shares: &[Share<P>],
    t: usize,
    n: usize,
) -> Result<PublicPoly<P>, Error> {
    let selected = select_shares(shares, t, n)?;
    let indices: Vec<Index> = selected.iter().map(|s| s.index).collect();
    let basis = lagrange_basis::<P::Scalar>(&indices)?;
    let points: Vec<P> = selected.iter().map(|s| s.value).collect();

    let mut commits = Vec::with_capacity(t);
    for k in 0..t {
        let scalars: Vec<P::Scalar> = basis.iter().map(|b| b[k]).collect();
        commits.push(P::multi_scalar_multiplication(&points, &scalars)?);
    }
    PublicPoly::from_commitments(*base, commits)
}

/// Interpolates already-selected point shares at zero.
pub(crate) fn recombine_points<P: CurvePoint>(selected: &[Share<P>]) -> Result<P, Error> {
    let indices: Vec<Index> = selected.iter().map(|s| s.index).collect();
    let coeffs = lagrange_coefficients::<P::Scalar>(&indices)?;
    let points: Vec<P> = selected.iter().map(|s| s.value).collect();
    Ok(P::multi_scalar_multiplication(&points, &coeffs)?)
}

/// Dedups, range-checks and keeps the `t` lowest-indexed shares.
fn select_shares<V: Clone + PartialEq>(
    shares: &[Share<V>],
    t: usize,
    n: usize,
) -> Result<Vec<Share<V>>, Error> {
    check_threshold(t, n)?;
    let set = ShareSet::new(shares.iter().cloned())?;
    set.check_range(n)?;
    if set.len() < t {
        return Err(Error::InsufficientShares {
            required: t,
            provided: set.len(),
        });
    }
    debug!(unique = set.len(), used = t, "selected shares for interpolation");
    Ok(set.first(t).to_vec())
}

/// Coefficient vectors of the Lagrange basis polynomials `ℓ_i(x)` over the
/// evaluation points of `indices`, each of length `indices.len()`.
fn lagrange_basis<F: FieldElement>(indices: &[Index]) -> Result<Vec<Vec<F>>, Error> {
    let xs: Vec<F> = indices.iter().map(|&i| eval_point(i)).collect();
    let mut basis = Vec::with_capacity(xs.len());
    let mut denominators = Vec::with_capacity(xs.len());

    for (i, xi) in xs.iter().enumerate() {
        // Π_{j != i} (x - x_j), lowest degree first
        let mut coeffs = vec![F::one()];
        let mut den = F::one();
        for (j, xj) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            let neg = -*xj;
            coeffs.push(F::zero());
            for k in (0..coeffs.len() - 1).rev() {
                let (left, right) = coeffs.split_at_mut(k + 1);
                right[0] += left[k];
                left[k] *= neg;
            }
            den *= *xi - *xj;
        }
        if den.is_zero() {
            return Err(Error::SingularInterpolation);
        }
        basis.push(coeffs);
        denominators.push(den);
    }

    F::batch_inversion(&mut denominators).map_err(|_| Error::SingularInterpolation)?;
    for (coeffs, den_inv) in basis.iter_mut().zip(denominators) {
        for c in coeffs.iter_mut() {
            *c *= den_inv;
        }
    }
    Ok(basis)
}
