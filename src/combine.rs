//! Homomorphic combination of polynomials, commitments and shares.
//!
//! When every participant deals its own polynomial, the coefficient-wise sum
//! of all of them is a joint polynomial that nobody knows. Its shares are the
//! pointwise sums of the per-participant shares and its commitment is the
//! sum of the per-participant commitments, so
//! `base * joint_private_share(i) == joint_public_share(i)` holds without any
//! party learning the joint secret.

use tracing::{debug, instrument};

use crate::poly::{PrivatePoly, PublicPoly};
use crate::share::{Index, PrivateShare, PublicShare, Share};
use crate::{CurvePoint, Error, FieldElement};

/// Sums commitment polynomials coefficient-wise.
///
/// All inputs must share degree and base point; an empty input is malformed.
#[instrument(level = "info", skip_all, fields(count = polys.len()))]
pub fn add_commitments<P: CurvePoint>(polys: &[PublicPoly<P>]) -> Result<PublicPoly<P>, Error> {
    let (first, rest) = polys
        .split_first()
        .ok_or_else(|| Error::MalformedInput("no commitment polynomials to add".into()))?;
    let combined = rest
        .iter()
        .try_fold(first.clone(), |acc, poly| acc.add(poly))?;
    debug!(threshold = combined.threshold(), "combined commitments");
    Ok(combined)
}

/// Sums private polynomials coefficient-wise.
#[instrument(level = "info", skip_all, fields(count = polys.len()))]
pub fn add_polynomials<F: FieldElement>(polys: &[PrivatePoly<F>]) -> Result<PrivatePoly<F>, Error> {
    let (first, rest) = polys
        .split_first()
        .ok_or_else(|| Error::MalformedInput("no polynomials to add".into()))?;
    rest.iter().try_fold(first.clone(), |acc, poly| acc.add(poly))
}

/// Joint public share for `index` from an already combined commitment.
pub fn eval_combined<P: CurvePoint>(combined: &PublicPoly<P>, index: Index) -> PublicShare<P> {
    combined.eval(index)
}

/// Sums the private shares every dealer produced for one `index`.
///
/// Shares for any other index are rejected as malformed.
pub fn accumulate_private_shares<F: FieldElement>(
    index: Index,
    shares: &[PrivateShare<F>],
) -> Result<PrivateShare<F>, Error> {
    if shares.is_empty() {
        return Err(Error::MalformedInput("no shares to accumulate".into()));
    }
    let mut acc = F::zero();
    for share in shares {
        if share.index != index {
            return Err(Error::MalformedInput(format!(
                "share for index {} cannot be accumulated into index {}",
                share.index, index
            )));
        }
        acc += share.value;
    }
    Ok(Share::new(index, acc))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::recover::{recover_commitment, recover_secret};
    use crate::{Fr, G2};

    struct Dealer {
        poly: PrivatePoly<Fr>,
        public: PublicPoly<G2>,
    }

    fn dealers(count: usize, t: usize) -> Vec<Dealer> {
        let mut rng = StdRng::seed_from_u64(42);
        (0..count)
            .map(|_| {
                let poly = PrivatePoly::new(t, None, &mut rng).expect("polynomial");
                let public = poly.commit(&G2::generator());
                Dealer { poly, public }
            })
            .collect()
    }

    #[test]
    fn joint_shares_match_joint_commitment() {
        let (t, n) = (3, 5);
        let dealers = dealers(n, t);
        let publics: Vec<_> = dealers.iter().map(|d| d.public.clone()).collect();
        let combined = add_commitments(&publics).unwrap();

        for index in 0..n as Index {
            let received: Vec<_> = dealers.iter().map(|d| d.poly.eval(index)).collect();
            let joint = accumulate_private_shares(index, &received).unwrap();
            assert_eq!(
                G2::generator().mul_scalar(&joint.value),
                eval_combined(&combined, index).value
            );
        }
    }

    #[test]
    fn joint_secret_is_sum_of_secrets() {
        let (t, n) = (2, 4);
        let dealers = dealers(n, t);
        let joint_shares: Vec<_> = (0..n as Index)
            .map(|i| {
                let received: Vec<_> = dealers.iter().map(|d| d.poly.eval(i)).collect();
                accumulate_private_shares(i, &received).unwrap()
            })
            .collect();

        let expected = dealers
            .iter()
            .fold(Fr::zero(), |acc, d| acc + d.poly.secret());
        assert_eq!(recover_secret(&joint_shares[1..3], t, n).unwrap(), expected);

        let polys: Vec<_> = dealers.iter().map(|d| d.poly.clone()).collect();
        let joint_poly = add_polynomials(&polys).unwrap();
        assert_eq!(joint_poly.secret(), expected);
        assert_eq!(joint_poly.shares(n).unwrap(), joint_shares);

        let publics: Vec<_> = dealers.iter().map(|d| d.public.clone()).collect();
        let combined = add_commitments(&publics).unwrap();
        let public_shares = combined.shares(n).unwrap();
        assert_eq!(
            recover_commitment(&public_shares, t, n).unwrap(),
            G2::generator().mul_scalar(&expected)
        );
    }

    #[test]
    fn mismatched_degrees_are_rejected() {
        let mut publics: Vec<_> = dealers(2, 3).into_iter().map(|d| d.public).collect();
        publics.push(dealers(1, 2).remove(0).public);
        assert!(matches!(
            add_commitments(&publics),
            Err(Error::DegreeMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn empty_inputs_are_malformed() {
        assert!(matches!(
            add_commitments::<G2>(&[]),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            add_polynomials::<Fr>(&[]),
            Err(Error::MalformedInput(_))
        ));
        assert!(matches!(
            accumulate_private_shares::<Fr>(0, &[]),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn foreign_index_is_rejected() {
        let dealers = dealers(2, 2);
        let received = vec![dealers[0].poly.eval(1), dealers[1].poly.eval(2)];
        assert!(matches!(
            accumulate_private_shares(1, &received),
            Err(Error::MalformedInput(_))
        ));
    }
}
