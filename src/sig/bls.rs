use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::config::{SchemeConfig, SignatureGroup, DST_G1, DST_G2};
use crate::sig::SignatureScheme;
use crate::{CurvePoint, Error, PairingBackend, TargetGroup};

/// BLS with signatures in G1 and public keys in G2.
///
/// # Example
///
/// ```rust
/// use rand::thread_rng;
/// use tbls::{G1Scheme, PairingEngine, SignatureScheme};
///
/// let scheme = G1Scheme::<PairingEngine>::new();
/// let (secret, public) = scheme.keypair(&mut thread_rng()).unwrap();
/// let signature = scheme.sign(&secret, b"hello").unwrap();
/// assert!(scheme.verify(&public, b"hello", &signature).is_ok());
/// assert!(scheme.verify(&public, b"goodbye", &signature).is_err());
/// ```
pub struct G1Scheme<B: PairingBackend> {
    dst: Vec<u8>,
    _backend: PhantomData<B>,
}

/// BLS with signatures in G2 and public keys in G1.
pub struct G2Scheme<B: PairingBackend> {
    dst: Vec<u8>,
    _backend: PhantomData<B>,
}

macro_rules! scheme_common {
    ($scheme:ident, $group:expr, $default_dst:expr) => {
        impl<B: PairingBackend> $scheme<B> {
            /// Scheme with the standard ciphersuite tag.
            pub fn new() -> Self {
                Self::with_dst($default_dst.as_bytes())
            }

            /// Scheme hashing messages under a custom domain separation tag.
            pub fn with_dst(dst: impl AsRef<[u8]>) -> Self {
                Self {
                    dst: dst.as_ref().to_vec(),
                    _backend: PhantomData,
                }
            }

            /// Builds the scheme described by `config`.
            ///
            /// Fails with [`Error::InvalidConfig`] if the configured signature
            /// group does not match this scheme.
            pub fn from_config(config: &SchemeConfig) -> Result<Self, Error> {
                config.validate()?;
                if config.signature_group != $group {
                    return Err(Error::InvalidConfig(format!(
                        "{} cannot sign in {:?}",
                        stringify!($scheme),
                        config.signature_group
                    )));
                }
                Ok(Self::with_dst(config.dst()))
            }
        }

        impl<B: PairingBackend> Default for $scheme<B> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<B: PairingBackend> Clone for $scheme<B> {
            fn clone(&self) -> Self {
                Self::with_dst(&self.dst)
            }
        }

        impl<B: PairingBackend> fmt::Debug for $scheme<B> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($scheme))
                    .field("dst", &String::from_utf8_lossy(&self.dst))
                    .finish()
            }
        }
    };
}

scheme_common!(G1Scheme, SignatureGroup::G1, DST_G1);
scheme_common!(G2Scheme, SignatureGroup::G2, DST_G2);

impl<B: PairingBackend> SignatureScheme for G1Scheme<B> {
    type Scalar = B::Scalar;
    type PublicKey = B::G2;
    type Signature = B::G1;

    fn dst(&self) -> &[u8] {
        &self.dst
    }

    fn verify(
        &self,
        public_key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> Result<(), Error> {
        if public_key.is_identity() || signature.is_identity() {
            return Err(Error::InvalidSignature);
        }
        // e(sig, g2) * e(-H(m), pk) == 1
        let hashed = self.hash_message(message);
        let product = B::multi_pairing(
            &[*signature, hashed.negate()],
            &[B::G2::generator(), *public_key],
        )?;
        if product.is_identity() {
            Ok(())
        } else {
            trace!("G1 pairing check failed");
            Err(Error::InvalidSignature)
        }
    }
}

impl<B: PairingBackend> SignatureScheme for G2Scheme<B> {
    type Scalar = B::Scalar;
    type PublicKey = B::G1;
    type Signature = B::G2;

    fn dst(&self) -> &[u8] {
        &self.dst
    }

    fn verify(
        &self,
        public_key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> Result<(), Error> {
        if public_key.is_identity() || signature.is_identity() {
            return Err(Error::InvalidSignature);
        }
        // e(-g1, sig) * e(pk, H(m)) == 1
        let hashed = self.hash_message(message);
        let product = B::multi_pairing(
            &[B::G1::generator().negate(), *public_key],
            &[*signature, hashed],
        )?;
        if product.is_identity() {
            Ok(())
        } else {
            trace!("G2 pairing check failed");
            Err(Error::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{FieldElement, Fr, PairingEngine};

    fn roundtrip<S: SignatureScheme>(scheme: S) {
        let mut rng = StdRng::seed_from_u64(9);
        let (secret, public) = scheme.keypair(&mut rng).expect("keypair");
        let signature = scheme.sign(&secret, b"payload").expect("sign");
        scheme
            .verify(&public, b"payload", &signature)
            .expect("valid signature");

        assert!(matches!(
            scheme.verify(&public, b"other payload", &signature),
            Err(Error::InvalidSignature)
        ));
        let (_, stranger) = scheme.keypair(&mut rng).expect("keypair");
        assert!(scheme.verify(&stranger, b"payload", &signature).is_err());
    }

    fn multisig<S: SignatureScheme>(scheme: S) {
        let mut rng = StdRng::seed_from_u64(10);
        let keys: Vec<_> = (0..4)
            .map(|_| scheme.keypair(&mut rng).expect("keypair"))
            .collect();
        let signatures: Vec<_> = keys
            .iter()
            .map(|(sk, _)| scheme.sign(sk, b"block 12").expect("sign"))
            .collect();
        let publics: Vec<_> = keys.iter().map(|(_, pk)| *pk).collect();

        let agg_sig = scheme.aggregate_signatures(&signatures).unwrap();
        let agg_pk = scheme.aggregate_public_keys(&publics).unwrap();
        assert!(scheme.verify(&agg_pk, b"block 12", &agg_sig).is_ok());

        // dropping one signer breaks the aggregate
        let partial = scheme.aggregate_signatures(&signatures[1..]).unwrap();
        assert!(scheme.verify(&agg_pk, b"block 12", &partial).is_err());
    }

    #[test]
    fn g1_sign_and_verify() {
        roundtrip(G1Scheme::<PairingEngine>::new());
    }

    #[test]
    fn g2_sign_and_verify() {
        roundtrip(G2Scheme::<PairingEngine>::new());
    }

    #[test]
    fn g1_multisig() {
        multisig(G1Scheme::<PairingEngine>::new());
    }

    #[test]
    fn g2_multisig() {
        multisig(G2Scheme::<PairingEngine>::new());
    }

    #[test]
    fn zero_key_is_refused() {
        let scheme = G1Scheme::<PairingEngine>::new();
        assert!(matches!(
            scheme.sign(&Fr::zero(), b"m"),
            Err(Error::Signing(_))
        ));
    }

    #[test]
    fn identity_signature_never_verifies() {
        let scheme = G2Scheme::<PairingEngine>::new();
        let public = scheme.public_key(&Fr::from_u64(5));
        let identity = <<G2Scheme<PairingEngine> as SignatureScheme>::Signature as CurvePoint>::identity();
        assert!(matches!(
            scheme.verify(&public, b"m", &identity),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn domain_tag_separates_signatures() {
        let secret = Fr::from_u64(77);
        let default = G1Scheme::<PairingEngine>::new();
        let custom = G1Scheme::<PairingEngine>::with_dst(b"APP-V1");
        let sig = custom.sign(&secret, b"m").unwrap();
        assert_ne!(default.sign(&secret, b"m").unwrap(), sig);
        assert!(default.verify(&default.public_key(&secret), b"m", &sig).is_err());
        assert!(custom.verify(&custom.public_key(&secret), b"m", &sig).is_ok());
    }

    #[test]
    fn from_config_checks_group() {
        let g1 = SchemeConfig::new(SignatureGroup::G1);
        assert!(G1Scheme::<PairingEngine>::from_config(&g1).is_ok());
        assert!(matches!(
            G2Scheme::<PairingEngine>::from_config(&g1),
            Err(Error::InvalidConfig(_))
        ));
        let custom = SchemeConfig::new(SignatureGroup::G2).with_domain("APP-V2");
        let scheme = G2Scheme::<PairingEngine>::from_config(&custom).unwrap();
        assert_eq!(scheme.dst(), b"APP-V2");
    }
}
