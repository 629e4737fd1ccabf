//! One-time claims gated by allow-list membership.
//!
//! [`AllowlistClaim`] owns the committed root and the set of addresses that
//! have claimed. The root is fixed at construction. The claimed set only
//! grows.
//!
//! The set is split into shards, each behind its own mutex, so claims for
//! addresses in different shards never wait on each other. Proof hashing
//! runs outside every lock; the final insert re-checks membership under the
//! shard lock, so two racing claims for one address cannot both succeed.

use crate::address::Address;
use crate::error::ClaimError;
use crate::types::Digest;
use crate::verifier::verify;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Number of independently locked partitions of the claimed set.
pub const CLAIM_SHARDS: usize = 16;

/// Ledger of allow-list claims against a fixed Merkle root.
#[derive(Debug)]
pub struct AllowlistClaim {
    root: Digest,
    shards: Vec<Mutex<HashSet<Address>>>,
}

impl AllowlistClaim {
    /// Creates a ledger with no claims against `root`.
    #[must_use]
    pub fn new(root: Digest) -> Self {
        Self {
            root,
            shards: (0..CLAIM_SHARDS).map(|_| Mutex::default()).collect(),
        }
    }

    /// Restores a ledger from previously recorded claims.
    ///
    /// Duplicates in `claimed` collapse into a single entry.
    pub fn with_claimed<I>(root: Digest, claimed: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        let ledger = Self::new(root);
        for address in claimed {
            ledger.shard(&address).insert(address);
        }
        ledger
    }

    #[must_use]
    pub fn root(&self) -> Digest {
        self.root
    }

    /// Claims on behalf of `caller` with the given sibling path.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::AlreadyClaimed`] if `caller` has claimed before,
    ///   including when a concurrent claim for `caller` won the race.
    /// - [`ClaimError::InvalidProof`] if `proof` does not lead from
    ///   `keccak256(caller)` to the root.
    ///
    /// On error the ledger is unchanged.
    pub fn claim(&self, caller: &Address, proof: &[Digest]) -> Result<(), ClaimError> {
        if self.is_claimed(caller) {
            warn!("Rejected claim from {caller}: already claimed");
            return Err(ClaimError::AlreadyClaimed(*caller));
        }

        let leaf = caller.leaf();
        debug!(
            "Verifying claim from {caller}: leaf={leaf}, depth={}",
            proof.len()
        );
        if !verify(&leaf, &self.root, proof) {
            warn!("Rejected claim from {caller}: invalid proof");
            return Err(ClaimError::InvalidProof(*caller));
        }

        if !self.shard(caller).insert(*caller) {
            warn!("Rejected claim from {caller}: claimed concurrently");
            return Err(ClaimError::AlreadyClaimed(*caller));
        }

        info!("Claim recorded for {caller}");
        Ok(())
    }

    #[must_use]
    pub fn is_claimed(&self, address: &Address) -> bool {
        self.shard(address).contains(address)
    }

    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.shards.iter().map(|s| lock(s).len()).sum()
    }

    /// Sorted snapshot of every address that has claimed.
    #[must_use]
    pub fn claimed(&self) -> Vec<Address> {
        let mut all: Vec<Address> = self
            .shards
            .iter()
            .flat_map(|s| lock(s).iter().copied().collect::<Vec<_>>())
            .collect();
        all.sort_unstable();
        all
    }

    fn shard(&self, address: &Address) -> MutexGuard<'_, HashSet<Address>> {
        lock(&self.shards[address.shard(CLAIM_SHARDS)])
    }
}

// A set insert cannot leave the set half-updated, so a poisoned shard is
// still consistent.
fn lock(shard: &Mutex<HashSet<Address>>) -> MutexGuard<'_, HashSet<Address>> {
    shard.lock().unwrap_or_else(PoisonError::into_inner)
}
