//! Configuration types for threshold sharing and signing.
//!
//! # Example
//!
//! ```rust
//! use tbls::{SchemeConfig, SignatureGroup, ThresholdParameters};
//!
//! // 3-of-5 sharing, signatures in G1 and public keys in G2
//! let params = ThresholdParameters::new(5, 3, SchemeConfig::new(SignatureGroup::G1))
//!     .expect("valid params");
//! assert_eq!(params.scheme.dst(), b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_".to_vec());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BackendError, Error};

/// Domain separation tag for signatures hashed into G1.
pub const DST_G1: &str = "BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";
/// Domain separation tag for signatures hashed into G2.
pub const DST_G2: &str = "BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// Supported pairing-friendly elliptic curves.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurveId {
    /// BLS12-381 curve (~128-bit security)
    #[default]
    Bls12_381,
}

impl CurveId {
    /// Checks that a backend for this curve was compiled in.
    pub fn ensure_supported(&self) -> Result<(), BackendError> {
        match self {
            CurveId::Bls12_381 => {
                if cfg!(feature = "blst") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `blst` feature to use BLS12-381",
                    ))
                }
            }
        }
    }
}

/// Group that carries signatures (and message hashes).
///
/// Public keys and commitment polynomials live in the other group.
/// `G1` gives short signatures, `G2` gives short public keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SignatureGroup {
    /// Signatures in G1, public keys in G2
    G1,
    /// Signatures in G2, public keys in G1
    G2,
}

/// Signature scheme configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchemeConfig {
    /// The pairing-friendly curve to use
    #[serde(default)]
    pub curve: CurveId,
    /// Group holding signatures
    pub signature_group: SignatureGroup,
    /// Custom hash-to-curve domain separation tag
    #[serde(default)]
    pub domain: Option<String>,
}

impl SchemeConfig {
    /// Creates a configuration with the standard domain separation tag.
    pub fn new(signature_group: SignatureGroup) -> Self {
        Self {
            curve: CurveId::Bls12_381,
            signature_group,
            domain: None,
        }
    }

    /// Overrides the domain separation tag.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Domain separation tag used when hashing messages to the curve.
    pub fn dst(&self) -> Vec<u8> {
        match (&self.domain, self.signature_group) {
            (Some(domain), _) => domain.as_bytes().to_vec(),
            (None, SignatureGroup::G1) => DST_G1.as_bytes().to_vec(),
            (None, SignatureGroup::G2) => DST_G2.as_bytes().to_vec(),
        }
    }

    /// Validates the curve choice and the domain tag.
    pub fn validate(&self) -> Result<(), Error> {
        self.curve.ensure_supported().map_err(Error::Backend)?;
        if let Some(domain) = &self.domain {
            // RFC 9380 caps DSTs at 255 bytes and forbids empty ones
            if domain.is_empty() || domain.len() > 255 {
                return Err(Error::InvalidConfig(
                    "domain separation tag must be 1..=255 bytes".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Complete `t`-of-`n` threshold parameters.
///
/// # Constraints
///
/// - `parties` must be at least 1 and every share index `0..parties` must fit a `u32`
/// - `threshold` must be between 1 and `parties` (inclusive)
/// - `scheme` must name a supported curve
///
/// # Example
///
/// ```rust
/// use tbls::{SchemeConfig, SignatureGroup, ThresholdParameters};
///
/// let params = ThresholdParameters {
///     parties: 3,
///     threshold: 4, // Invalid: more than parties!
///     scheme: SchemeConfig::new(SignatureGroup::G2),
/// };
/// assert!(params.validate().is_err());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParameters {
    /// Total number of participants (n)
    pub parties: usize,
    /// Minimum number of shares needed to reconstruct or sign (t)
    pub threshold: usize,
    /// Signature scheme configuration
    pub scheme: SchemeConfig,
}

impl ThresholdParameters {
    /// Creates and validates threshold parameters.
    pub fn new(parties: usize, threshold: usize, scheme: SchemeConfig) -> Result<Self, Error> {
        let params = Self {
            parties,
            threshold,
            scheme,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates the threshold parameters.
    pub fn validate(&self) -> Result<(), Error> {
        self.scheme.validate()?;
        check_threshold(self.threshold, self.parties)
    }
}

/// Checks `1 <= threshold <= parties` and that share indices fit a `u32`.
pub(crate) fn check_threshold(threshold: usize, parties: usize) -> Result<(), Error> {
    if parties == 0 {
        return Err(Error::InvalidConfig("need at least one party".into()));
    }
    if u32::try_from(parties).is_err() {
        return Err(Error::InvalidConfig(
            "share indices must fit in a u32".into(),
        ));
    }
    if threshold == 0 || threshold > parties {
        return Err(Error::InvalidConfig(
            "threshold must be within [1, parties]".into(),
        ));
    }
    Ok(())
}
