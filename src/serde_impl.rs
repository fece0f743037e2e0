//! Serde support for shares, polynomials and recovery results.
//!
//! # Serialization Strategy
//!
//! - **Scalars**: canonical 32-byte big-endian encoding
//! - **Curve points**: compressed affine encoding (48 bytes in G1, 96 in G2)
//! - **Polynomials**: arrays of encoded coefficients, lowest degree first
//!
//! Every element goes through [`ByteEncoding`], so decoding rejects
//! non-canonical scalars and points that are off the curve or outside the
//! prime-order subgroup.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use tbls::{CurvePoint, PrivatePoly, PublicPoly, Fr, G2};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let poly = PrivatePoly::<Fr>::new(3, None, &mut rng).unwrap();
//! let public = poly.commit(&G2::generator());
//!
//! let json = serde_json::to_string(&public).unwrap();
//! let back: PublicPoly<G2> = serde_json::from_str(&json).unwrap();
//! assert_eq!(public, back);
//! ```

use serde::de;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::poly::{PrivatePoly, PublicPoly};
use crate::share::{Index, Share};
use crate::sig::Recovery;
use crate::{ByteEncoding, CurvePoint, FieldElement};

fn decode<T, E>(bytes: &[u8]) -> Result<T, E>
where
    T: ByteEncoding,
    E: de::Error,
{
    T::from_bytes(bytes).map_err(E::custom)
}

fn decode_all<T, E>(items: &[Vec<u8>]) -> Result<Vec<T>, E>
where
    T: ByteEncoding,
    E: de::Error,
{
    items.iter().map(|bytes| decode::<T, E>(bytes)).collect()
}

fn encode_all<T: ByteEncoding>(items: &[T]) -> Vec<Vec<u8>> {
    items.iter().map(|item| item.to_bytes()).collect()
}

impl<V: ByteEncoding> Serialize for Share<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Share", 2)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("value", &self.value.to_bytes())?;
        state.end()
    }
}

impl<'de, V: ByteEncoding> Deserialize<'de> for Share<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ShareHelper {
            index: Index,
            value: Vec<u8>,
        }

        let helper = ShareHelper::deserialize(deserializer)?;
        Ok(Share {
            index: helper.index,
            value: decode::<V, D::Error>(&helper.value)?,
        })
    }
}

impl<P: CurvePoint> Serialize for PublicPoly<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PublicPoly", 2)?;
        state.serialize_field("base", &self.base().to_bytes())?;
        state.serialize_field("commitments", &encode_all(self.commitments()))?;
        state.end()
    }
}

impl<'de, P: CurvePoint> Deserialize<'de> for PublicPoly<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PublicPolyHelper {
            base: Vec<u8>,
            commitments: Vec<Vec<u8>>,
        }

        let helper = PublicPolyHelper::deserialize(deserializer)?;
        let base = decode::<P, D::Error>(&helper.base)?;
        let commits = decode_all::<P, D::Error>(&helper.commitments)?;
        PublicPoly::from_commitments(base, commits).map_err(<D::Error as de::Error>::custom)
    }
}

impl<F: FieldElement> Serialize for PrivatePoly<F> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PrivatePoly", 1)?;
        state.serialize_field("coefficients", &encode_all(self.coefficients()))?;
        state.end()
    }
}

impl<'de, F: FieldElement> Deserialize<'de> for PrivatePoly<F> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PrivatePolyHelper {
            coefficients: Vec<Vec<u8>>,
        }

        let helper = PrivatePolyHelper::deserialize(deserializer)?;
        let coeffs = decode_all::<F, D::Error>(&helper.coefficients)?;
        PrivatePoly::from_coefficients(coeffs).map_err(<D::Error as de::Error>::custom)
    }
}

impl<P: CurvePoint> Serialize for Recovery<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Recovery", 3)?;
        state.serialize_field("signature", &self.signature.to_bytes())?;
        state.serialize_field("used", &self.used)?;
        state.serialize_field("rejected", &self.rejected)?;
        state.end()
    }
}

impl<'de, P: CurvePoint> Deserialize<'de> for Recovery<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RecoveryHelper {
            signature: Vec<u8>,
            used: Vec<Index>,
            rejected: Vec<Index>,
        }

        let helper = RecoveryHelper::deserialize(deserializer)?;
        Ok(Recovery {
            signature: decode::<P, D::Error>(&helper.signature)?,
            used: helper.used,
            rejected: helper.rejected,
        })
    }
}
