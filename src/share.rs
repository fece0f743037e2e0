//! Shares and share sets.
//!
//! A share is a polynomial evaluation tagged with the index that produced it.
//! Share index `i` is always the evaluation at `x = i + 1`, so the constant
//! term (the secret) is never handed out as a share.

use std::collections::btree_map::{BTreeMap, Entry};

use crate::{ByteEncoding, Error, FieldElement};

/// Share index. Index `i` evaluates the polynomial at `x = i + 1`.
pub type Index = u32;

/// An `(index, value)` evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Share<V> {
    pub index: Index,
    pub value: V,
}

/// Scalar-valued share of a private polynomial.
pub type PrivateShare<F> = Share<F>;

/// Point-valued share of a commitment polynomial.
pub type PublicShare<P> = Share<P>;

/// Partial signature produced with a private share, tagged with its index.
pub type SignatureShare<P> = Share<P>;

/// Evaluation point for share `index`.
pub fn eval_point<F: FieldElement>(index: Index) -> F {
    F::from_u64(u64::from(index) + 1)
}

impl<V> Share<V> {
    pub fn new(index: Index, value: V) -> Self {
        Self { index, value }
    }
}

impl<V: ByteEncoding> Share<V> {
    /// Length of the encoded index prefix.
    pub const INDEX_LEN: usize = 4;

    /// Encodes the share as a 4-byte big-endian index followed by the value.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::INDEX_LEN + V::ENCODED_LEN);
        out.extend_from_slice(&self.index.to_be_bytes());
        out.extend_from_slice(&self.value.to_bytes());
        out
    }

    /// Decodes a share produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != Self::INDEX_LEN + V::ENCODED_LEN {
            return Err(Error::MalformedInput(format!(
                "share encoding must be {} bytes, got {}",
                Self::INDEX_LEN + V::ENCODED_LEN,
                bytes.len()
            )));
        }
        let (index, value) = bytes.split_at(Self::INDEX_LEN);
        let mut index_bytes = [0u8; 4];
        index_bytes.copy_from_slice(index);
        Ok(Share {
            index: Index::from_be_bytes(index_bytes),
            value: V::from_bytes(value)?,
        })
    }
}

/// Shares with pairwise distinct indices, ordered by index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSet<V> {
    shares: Vec<Share<V>>,
}

impl<V: Clone + PartialEq> ShareSet<V> {
    /// Collects shares, dropping exact duplicates.
    ///
    /// Two shares with the same index and different values fail with
    /// [`Error::DuplicateIndex`]; nothing is silently overwritten.
    pub fn new<I>(shares: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Share<V>>,
    {
        let mut by_index = BTreeMap::new();
        for share in shares {
            match by_index.entry(share.index) {
                Entry::Vacant(slot) => {
                    slot.insert(share.value);
                }
                Entry::Occupied(existing) => {
                    if *existing.get() != share.value {
                        return Err(Error::DuplicateIndex(share.index));
                    }
                }
            }
        }
        Ok(Self {
            shares: by_index
                .into_iter()
                .map(|(index, value)| Share { index, value })
                .collect(),
        })
    }
}

impl<V> ShareSet<V> {
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Share<V>> {
        self.shares.iter()
    }

    /// Indices in ascending order.
    pub fn indices(&self) -> Vec<Index> {
        self.shares.iter().map(|s| s.index).collect()
    }

    pub fn get(&self, index: Index) -> Option<&Share<V>> {
        self.shares
            .binary_search_by_key(&index, |s| s.index)
            .ok()
            .map(|pos| &self.shares[pos])
    }

    /// The `count` lowest-indexed shares, or all of them if there are fewer.
    pub fn first(&self, count: usize) -> &[Share<V>] {
        &self.shares[..count.min(self.shares.len())]
    }

    /// Fails with [`Error::IndexOutOfRange`] if any index is `>= parties`.
    pub fn check_range(&self, parties: usize) -> Result<(), Error> {
        match self.shares.iter().find(|s| s.index as usize >= parties) {
            Some(share) => Err(Error::IndexOutOfRange {
                index: share.index,
                parties,
            }),
            None => Ok(()),
        }
    }

    pub fn into_vec(self) -> Vec<Share<V>> {
        self.shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fr, G1};

    fn share(index: Index, value: u64) -> PrivateShare<Fr> {
        Share::new(index, Fr::from_u64(value))
    }

    #[test]
    fn orders_by_index_and_collapses_agreeing_duplicates() {
        let set = ShareSet::new(vec![share(2, 20), share(0, 5), share(2, 20), share(1, 9)]).unwrap();
        assert_eq!(set.indices(), vec![0, 1, 2]);
        assert_eq!(set.get(1).map(|s| s.value), Some(Fr::from_u64(9)));
        assert!(set.get(7).is_none());
    }

    #[test]
    fn rejects_conflicting_duplicates() {
        let result = ShareSet::new(vec![share(4, 1), share(4, 2)]);
        assert!(matches!(result, Err(Error::DuplicateIndex(4))));
    }

    #[test]
    fn first_is_clamped() {
        let set = ShareSet::new(vec![share(3, 1), share(1, 1)]).unwrap();
        assert_eq!(set.first(1)[0].index, 1);
        assert_eq!(set.first(10).len(), 2);
    }

    #[test]
    fn check_range_reports_offending_index() {
        let set = ShareSet::new(vec![share(0, 1), share(5, 1)]).unwrap();
        assert!(set.check_range(6).is_ok());
        assert!(matches!(
            set.check_range(5),
            Err(Error::IndexOutOfRange { index: 5, parties: 5 })
        ));
    }

    #[test]
    fn index_zero_evaluates_at_one() {
        assert_eq!(eval_point::<Fr>(0), Fr::from_u64(1));
        assert_eq!(eval_point::<Fr>(u32::MAX), Fr::from_u64(u64::from(u32::MAX) + 1));
    }

    #[test]
    fn encoded_share_keeps_index_prefix() {
        let point = <G1 as crate::CurvePoint>::generator();
        let encoded = Share::new(0x0102_0304, point).to_bytes();
        assert_eq!(&encoded[..4], &[1, 2, 3, 4]);
        let decoded = Share::<G1>::from_bytes(&encoded).unwrap();
        assert_eq!(decoded.index, 0x0102_0304);
        assert_eq!(decoded.value, point);
        assert!(matches!(
            Share::<G1>::from_bytes(&encoded[..10]),
            Err(Error::MalformedInput(_))
        ));
    }
}
