//! Joint key generation without a trusted dealer.
//!
//! Every participant samples its own polynomial and deals one share to every
//! party together with a Feldman commitment. Each recipient checks the share
//! against the commitment, and once contributions from all `n` parties have
//! arrived it sums them into its share of the joint secret. The joint secret
//! is the sum of all constant terms and is never held by anyone.
//!
//! Share transport is out of scope: [`Deal`] holds the shares for every
//! recipient in the clear, and callers are expected to route each share only
//! to its owner over a private channel.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use tbls::dkg::Participant;
//! use tbls::{CurvePoint, G2};
//!
//! let mut rng = StdRng::seed_from_u64(5);
//! let (t, n) = (2, 3);
//! let mut parties: Vec<_> = (0..n as u32)
//!     .map(|i| Participant::new(i, t, n, G2::generator(), &mut rng).unwrap())
//!     .collect();
//!
//! let deals: Vec<_> = parties.iter().map(|p| p.deal().unwrap()).collect();
//! for deal in &deals {
//!     for party in parties.iter_mut() {
//!         party.receive_deal(deal).unwrap();
//!     }
//! }
//!
//! let keys: Vec<_> = parties.into_iter().map(|p| p.finalize().unwrap()).collect();
//! assert!(keys.windows(2).all(|w| w[0].public_key() == w[1].public_key()));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use rand_core::RngCore;
use tracing::{debug, info, instrument};

use crate::combine::{accumulate_private_shares, add_commitments};
use crate::config::check_threshold;
use crate::poly::{PrivatePoly, PublicPoly};
use crate::share::{Index, PrivateShare, PublicShare};
use crate::{CurvePoint, Error};

/// One participant's contribution: its commitment and a share for every party.
#[derive(Clone, Debug)]
pub struct Deal<P: CurvePoint> {
    pub sender: Index,
    pub commitment: PublicPoly<P>,
    pub shares: Vec<PrivateShare<P::Scalar>>,
}

impl<P: CurvePoint> Deal<P> {
    /// The share addressed to `recipient`, if the deal carries one.
    pub fn share_for(&self, recipient: Index) -> Option<&PrivateShare<P::Scalar>> {
        self.shares.iter().find(|s| s.index == recipient)
    }
}

/// A participant's output: its share of the joint secret and the joint commitment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributedKey<P: CurvePoint> {
    pub share: PrivateShare<P::Scalar>,
    pub public_poly: PublicPoly<P>,
}

impl<P: CurvePoint> DistributedKey<P> {
    /// Joint public key, `base * joint_secret`.
    pub fn public_key(&self) -> P {
        self.public_poly.commit()
    }

    /// Public counterpart of this participant's share.
    pub fn public_share(&self) -> PublicShare<P> {
        self.public_poly.eval(self.share.index)
    }
}

/// State held by one party during key generation.
#[derive(Clone)]
pub struct Participant<P: CurvePoint> {
    index: Index,
    threshold: usize,
    parties: usize,
    base: P,
    poly: PrivatePoly<P::Scalar>,
    received: BTreeMap<Index, (PrivateShare<P::Scalar>, PublicPoly<P>)>,
}

impl<P: CurvePoint> fmt::Debug for Participant<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("index", &self.index)
            .field("threshold", &self.threshold)
            .field("parties", &self.parties)
            .field("received", &self.received.len())
            .finish_non_exhaustive()
    }
}

impl<P: CurvePoint> Participant<P> {
    /// Samples this party's contribution polynomial.
    #[instrument(level = "info", skip_all, fields(index = index, threshold = threshold, parties = parties))]
    pub fn new<R: RngCore + ?Sized>(
        index: Index,
        threshold: usize,
        parties: usize,
        base: P,
        rng: &mut R,
    ) -> Result<Self, Error> {
        check_threshold(threshold, parties)?;
        if index as usize >= parties {
            return Err(Error::IndexOutOfRange { index, parties });
        }
        let poly = PrivatePoly::new(threshold, None, rng)?;
        Ok(Self {
            index,
            threshold,
            parties,
            base,
            poly,
            received: BTreeMap::new(),
        })
    }

    pub fn index(&self) -> Index {
        self.index
    }

    /// Number of contributions accepted so far, own included once delivered.
    pub fn received(&self) -> usize {
        self.received.len()
    }

    /// Commitment and shares for every party.
    pub fn deal(&self) -> Result<Deal<P>, Error> {
        Ok(Deal {
            sender: self.index,
            commitment: self.poly.commit(&self.base),
            shares: self.poly.shares(self.parties)?,
        })
    }

    /// Accepts the share `sender` dealt to this participant.
    ///
    /// The share is checked against the sender's commitment; a failing check
    /// is reported as [`Error::InvalidShare`] with the sender's index.
    pub fn receive(
        &mut self,
        sender: Index,
        commitment: &PublicPoly<P>,
        share: &PrivateShare<P::Scalar>,
    ) -> Result<(), Error> {
        if sender as usize >= self.parties {
            return Err(Error::IndexOutOfRange {
                index: sender,
                parties: self.parties,
            });
        }
        if share.index != self.index {
            return Err(Error::MalformedInput(format!(
                "share for index {} delivered to participant {}",
                share.index, self.index
            )));
        }
        if commitment.threshold() != self.threshold {
            return Err(Error::DegreeMismatch {
                expected: self.threshold - 1,
                actual: commitment.degree(),
            });
        }
        if commitment.base() != &self.base {
            return Err(Error::MalformedInput(format!(
                "participant {} committed against a different base",
                sender
            )));
        }
        if self.received.contains_key(&sender) {
            return Err(Error::DuplicateIndex(sender));
        }
        if !commitment.check(share) {
            return Err(Error::InvalidShare(sender));
        }
        debug!(sender, recipient = self.index, "accepted dealt share");
        self.received.insert(sender, (*share, commitment.clone()));
        Ok(())
    }

    /// Accepts this participant's share out of a full [`Deal`].
    pub fn receive_deal(&mut self, deal: &Deal<P>) -> Result<(), Error> {
        let share = deal.share_for(self.index).ok_or_else(|| {
            Error::MalformedInput(format!(
                "deal from {} has no share for participant {}",
                deal.sender, self.index
            ))
        })?;
        self.receive(deal.sender, &deal.commitment, share)
    }

    /// Sums all accepted contributions into this party's joint key.
    ///
    /// Requires a contribution from every party, including this one.
    #[instrument(level = "info", skip_all, fields(index = self.index))]
    pub fn finalize(self) -> Result<DistributedKey<P>, Error> {
        if self.received.len() < self.parties {
            return Err(Error::InsufficientShares {
                required: self.parties,
                provided: self.received.len(),
            });
        }
        let (shares, commitments): (Vec<_>, Vec<_>) = self.received.into_values().unzip();
        let share = accumulate_private_shares(self.index, &shares)?;
        let public_poly = add_commitments(&commitments)?;
        info!(index = self.index, "derived distributed key share");
        Ok(DistributedKey { share, public_poly })
    }
}
