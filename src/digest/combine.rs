//! Order-independent digest combination
//!
//! Digests are merged with bitwise XOR, which is commutative and associative,
//! so folding a set of digests gives the same result in any order.
//!
//! XOR is also self-inverse: a value combined an even number of times cancels
//! out without any error. Every contribution folded into one aggregate must be
//! distinct (fold the path into each contribution, see
//! [`UnorderedDigest`](crate::digest::aggregate::UnorderedDigest)).

use crate::types::Digest;

/// XOR two byte sequences.
///
/// The overlapping prefix is XORed; the longer input's remaining tail is
/// copied unchanged. The result has the length of the longer input.
pub fn combine(a: &[u8], b: &[u8]) -> Digest {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len());
    for (x, y) in long.iter().zip(short) {
        out.push(x ^ y);
    }
    out.extend_from_slice(&long[short.len()..]);
    out
}

/// XOR `rhs` into `acc` in place, growing `acc` if `rhs` is longer.
pub fn combine_into(acc: &mut Digest, rhs: &[u8]) {
    let overlap = acc.len().min(rhs.len());
    for (x, y) in acc[..overlap].iter_mut().zip(&rhs[..overlap]) {
        *x ^= y;
    }
    if rhs.len() > overlap {
        acc.extend_from_slice(&rhs[overlap..]);
    }
}

/// Fold any number of digests. Empty input gives an empty digest.
pub fn combine_all<I, D>(digests: I) -> Digest
where
    I: IntoIterator<Item = D>,
    D: AsRef<[u8]>,
{
    digests.into_iter().fold(Vec::new(), |mut acc, digest| {
        combine_into(&mut acc, digest.as_ref());
        acc
    })
}
