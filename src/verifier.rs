//! Sorted-pair Merkle inclusion proofs.
//!
//! Each step hashes the running digest together with the next sibling,
//! smaller digest first. Because the combine is commutative, a proof is just
//! the list of siblings: no left/right direction bits are needed.

use crate::types::Digest;
use crate::utils::keccak256;

/// Combines two digests as `keccak256(min(a, b) || max(a, b))`.
///
/// When `a == b` the pair is hashed as `(b, a)`, which produces the same
/// bytes as `(a, b)`.
#[inline]
#[must_use]
pub fn hash_pair(a: &Digest, b: &Digest) -> Digest {
    let (first, second) = if a < b { (a, b) } else { (b, a) };
    Digest::new(keccak256(&[first.as_bytes(), second.as_bytes()]))
}

/// Folds `proof` into `leaf` and returns the reconstructed root.
#[must_use]
pub fn process_proof(leaf: &Digest, proof: &[Digest]) -> Digest {
    proof
        .iter()
        .fold(*leaf, |computed, sibling| hash_pair(&computed, sibling))
}

/// Returns `true` if `proof` proves `leaf` is part of the tree committed to by `root`.
///
/// An empty proof only verifies a single-leaf tree, where `leaf == root`.
///
/// # Examples
///
/// ```
/// use merkle_allowlist::types::Digest;
/// use merkle_allowlist::verifier::{hash_pair, verify};
///
/// let a = Digest::new([1; 32]);
/// let b = Digest::new([2; 32]);
/// let root = hash_pair(&a, &b);
///
/// assert!(verify(&a, &root, &[b]));
/// assert!(verify(&b, &root, &[a]));
/// assert!(!verify(&a, &root, &[]));
/// ```
#[must_use]
pub fn verify(leaf: &Digest, root: &Digest, proof: &[Digest]) -> bool {
    process_proof(leaf, proof) == *root
}
