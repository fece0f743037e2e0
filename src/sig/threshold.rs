//! Threshold BLS: partial signing with private shares and `t`-of-`n` recovery.
//!
//! Each holder of a private share `s_i` signs with `sigma_i = s_i * H(m)`,
//! which verifies against its public share `base * s_i` exactly like a plain
//! BLS signature. Any `t` valid partial signatures interpolate at zero to
//! `f(0) * H(m)`, which verifies against the group public key `base * f(0)`.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use tbls::{G1Scheme, PairingEngine, PrivatePoly, SignatureScheme, ThresholdSigner};
//!
//! let mut rng = StdRng::seed_from_u64(3);
//! let signer = ThresholdSigner::new(G1Scheme::<PairingEngine>::new());
//!
//! let poly = PrivatePoly::new(2, None, &mut rng).unwrap();
//! let public = poly.commit(&signer.scheme().public_base());
//!
//! let partials: Vec<_> = poly
//!     .shares(3)
//!     .unwrap()
//!     .iter()
//!     .map(|share| signer.partial_sign(share, b"msg").unwrap())
//!     .collect();
//! let recovery = signer.recover(&public, b"msg", &partials, 2, 3).unwrap();
//! assert_eq!(recovery.used, vec![0, 1]);
//! assert!(signer.verify(&public.commit(), b"msg", &recovery.signature).is_ok());
//! ```

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info, instrument, warn};

use crate::config::check_threshold;
use crate::poly::PublicPoly;
use crate::recover::recombine_points;
use crate::share::{Index, PrivateShare, Share, ShareSet, SignatureShare};
use crate::sig::SignatureScheme;
use crate::Error;

/// Outcome of a successful threshold recovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recovery<P> {
    /// Signature under the group public key.
    pub signature: P,
    /// Indices of the shares that were interpolated, ascending.
    pub used: Vec<Index>,
    /// Indices of the shares excluded because they failed verification.
    pub rejected: Vec<Index>,
}

/// Partial signing and recovery on top of a [`SignatureScheme`].
#[derive(Clone, Debug)]
pub struct ThresholdSigner<S> {
    scheme: S,
}

impl<S: SignatureScheme> ThresholdSigner<S> {
    pub fn new(scheme: S) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Signs `message` with one private share; the result carries the share's index.
    #[instrument(level = "debug", skip_all, fields(index = share.index))]
    pub fn partial_sign(
        &self,
        share: &PrivateShare<S::Scalar>,
        message: &[u8],
    ) -> Result<SignatureShare<S::Signature>, Error> {
        let sigma = self.scheme.sign(&share.value, message)?;
        Ok(Share::new(share.index, sigma))
    }

    /// Checks one partial signature against the public share for its index.
    ///
    /// Fails with [`Error::InvalidShare`] carrying the share index.
    pub fn partial_verify(
        &self,
        public_poly: &PublicPoly<S::PublicKey>,
        message: &[u8],
        share: &SignatureShare<S::Signature>,
    ) -> Result<(), Error> {
        let public_share = public_poly.eval(share.index);
        self.scheme
            .verify(&public_share.value, message, &share.value)
            .map_err(|_| Error::InvalidShare(share.index))
    }

    /// Recombines `t` valid partial signatures into a signature under
    /// `public_poly.commit()`.
    ///
    /// Every share is verified before anything else looks at it. Shares that
    /// fail, or whose index is not below `n`, are excluded and listed in
    /// [`Recovery::rejected`], even when a valid share carries the same
    /// index. Valid shares for one index are identical since signing is
    /// deterministic, so they collapse into one. Fewer than `t` distinct
    /// valid shares fail with [`Error::InsufficientShares`]. The recombined
    /// signature is checked before it is returned.
    #[instrument(level = "info", skip_all, fields(threshold = t, parties = n, provided = shares.len()))]
    pub fn recover(
        &self,
        public_poly: &PublicPoly<S::PublicKey>,
        message: &[u8],
        shares: &[SignatureShare<S::Signature>],
        t: usize,
        n: usize,
    ) -> Result<Recovery<S::Signature>, Error> {
        check_threshold(t, n)?;
        if public_poly.threshold() != t {
            return Err(Error::DegreeMismatch {
                expected: t - 1,
                actual: public_poly.degree(),
            });
        }

        let checked: Vec<(Share<S::Signature>, bool)> = shares
            .par_iter()
            .map(|share| {
                let ok = (share.index as usize) < n
                    && self.partial_verify(public_poly, message, share).is_ok();
                (*share, ok)
            })
            .collect();

        let mut verified = Vec::with_capacity(checked.len());
        let mut rejected = Vec::new();
        for (share, ok) in checked {
            if ok {
                verified.push(share);
            } else {
                warn!(index = share.index, "excluding invalid signature share");
                rejected.push(share.index);
            }
        }
        rejected.sort_unstable();
        rejected.dedup();

        let mut valid = ShareSet::new(verified)?.into_vec();
        if valid.len() < t {
            return Err(Error::InsufficientShares {
                required: t,
                provided: valid.len(),
            });
        }
        valid.truncate(t);

        let signature = recombine_points(&valid)?;
        self.scheme
            .verify(&public_poly.commit(), message, &signature)?;

        let used: Vec<Index> = valid.iter().map(|s| s.index).collect();
        info!(used = used.len(), rejected = rejected.len(), "recovered threshold signature");
        Ok(Recovery {
            signature,
            used,
            rejected,
        })
    }

    /// Verifies a (recovered or plain) signature under a public key.
    pub fn verify(
        &self,
        public_key: &S::PublicKey,
        message: &[u8],
        signature: &S::Signature,
    ) -> Result<(), Error> {
        self.scheme.verify(public_key, message, signature)
    }

    /// Opens a session collecting partial signatures over `message`.
    pub fn session(
        &self,
        public_poly: PublicPoly<S::PublicKey>,
        message: impl Into<Vec<u8>>,
        t: usize,
        n: usize,
    ) -> Result<SigningSession<S>, Error> {
        check_threshold(t, n)?;
        Ok(SigningSession {
            signer: self.clone(),
            public_poly,
            message: message.into(),
            threshold: t,
            parties: n,
            shares: Vec::new(),
            state: SessionState::Unsigned,
            recovery: None,
        })
    }
}

/// Lifecycle of a [`SigningSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No partial signature collected yet
    Unsigned,
    /// At least one partial signature collected
    PartiallySigned,
    /// A threshold signature was recovered
    Recovered,
    /// Recovery failed for a reason more shares cannot fix
    Failed,
}

impl SessionState {
    pub fn is_closed(&self) -> bool {
        matches!(self, SessionState::Recovered | SessionState::Failed)
    }
}

/// Collects partial signatures over one message until `t` of them recover.
///
/// `Unsigned -> PartiallySigned -> Recovered | Failed`. A finalize attempt
/// that only lacks shares leaves the session open.
#[derive(Clone, Debug)]
pub struct SigningSession<S: SignatureScheme> {
    signer: ThresholdSigner<S>,
    public_poly: PublicPoly<S::PublicKey>,
    message: Vec<u8>,
    threshold: usize,
    parties: usize,
    shares: Vec<SignatureShare<S::Signature>>,
    state: SessionState,
    recovery: Option<Recovery<S::Signature>>,
}

impl<S: SignatureScheme> SigningSession<S> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn shares(&self) -> &[SignatureShare<S::Signature>] {
        &self.shares
    }

    /// The recovery result once the session reached `Recovered`.
    pub fn recovery(&self) -> Option<&Recovery<S::Signature>> {
        self.recovery.as_ref()
    }

    /// Adds a partial signature produced elsewhere.
    pub fn add_share(&mut self, share: SignatureShare<S::Signature>) -> Result<(), Error> {
        if self.state.is_closed() {
            return Err(Error::SessionClosed);
        }
        debug!(index = share.index, "collected signature share");
        self.shares.push(share);
        self.state = SessionState::PartiallySigned;
        Ok(())
    }

    /// Signs the session message with a local share and collects the result.
    pub fn sign_with(
        &mut self,
        share: &PrivateShare<S::Scalar>,
    ) -> Result<SignatureShare<S::Signature>, Error> {
        if self.state.is_closed() {
            return Err(Error::SessionClosed);
        }
        let partial = self.signer.partial_sign(share, &self.message)?;
        self.add_share(partial)?;
        Ok(partial)
    }

    /// Attempts recovery with everything collected so far.
    pub fn finalize(&mut self) -> Result<Recovery<S::Signature>, Error> {
        if self.state.is_closed() {
            return Err(Error::SessionClosed);
        }
        match self.signer.recover(
            &self.public_poly,
            &self.message,
            &self.shares,
            self.threshold,
            self.parties,
        ) {
            Ok(recovery) => {
                self.state = SessionState::Recovered;
                self.recovery = Some(recovery.clone());
                Ok(recovery)
            }
            Err(err @ Error::InsufficientShares { .. }) => Err(err),
            Err(err) => {
                self.state = SessionState::Failed;
                Err(err)
            }
        }
    }
}
