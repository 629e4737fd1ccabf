#[cfg(test)]
mod tests {
    use crate::error::TreeError;
    use crate::types::Digest;
    use crate::verifier::{hash_pair, verify};
    use crate::{Address, MerkleTree};

    fn leaves(n: u8) -> Vec<Digest> {
        (1..=n).map(|i| Digest::new([i; 32])).collect()
    }

    #[test]
    fn test_merkle_tree_creation() {
        let tree = MerkleTree::new(leaves(4)).unwrap();
        assert_ne!(tree.root, Digest::default());
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_empty_tree_is_rejected() {
        assert_eq!(MerkleTree::new(Vec::new()), Err(TreeError::EmptyInput));
    }

    #[test]
    fn test_single_leaf_root_is_leaf() {
        let leaf = Digest::new([42; 32]);
        let tree = MerkleTree::new(vec![leaf]).unwrap();
        assert_eq!(tree.root, leaf);

        let proof = tree.generate_proof(0).unwrap();
        assert!(proof.siblings.is_empty());
        assert!(tree.verify_proof(&proof));
    }

    #[test]
    fn test_two_leaf_root_ignores_input_order() {
        let a = Digest::new([1; 32]);
        let b = Digest::new([2; 32]);
        let forward = MerkleTree::new(vec![a, b]).unwrap();
        let reversed = MerkleTree::new(vec![b, a]).unwrap();
        assert_eq!(forward.root, reversed.root);
        assert!(verify(&a, &reversed.root, &[b]));
    }

    #[test]
    fn test_four_leaf_root_ignores_pair_order() {
        let [a, b, c, d] = [1u8, 2, 3, 4].map(|i| Digest::new([i; 32]));
        let forward = MerkleTree::new(vec![a, b, c, d]).unwrap();
        let swapped_pairs = MerkleTree::new(vec![b, a, d, c]).unwrap();
        let swapped_halves = MerkleTree::new(vec![c, d, a, b]).unwrap();
        assert_eq!(forward.root, swapped_pairs.root);
        assert_eq!(forward.root, swapped_halves.root);

        let expected = hash_pair(&hash_pair(&a, &b), &hash_pair(&c, &d));
        assert_eq!(forward.root, expected);
    }

    #[test]
    fn test_merkle_proof_generation() {
        let tree = MerkleTree::new(leaves(4)).unwrap();
        let proof = tree.generate_proof(0).unwrap();
        assert_eq!(proof.leaf, Digest::new([1; 32]));
        assert_eq!(proof.root, tree.root);
        assert_eq!(proof.siblings.len(), 2);
    }

    #[test]
    fn test_every_leaf_verifies_for_odd_sizes() {
        for n in [3u8, 5, 7, 9, 13] {
            let tree = MerkleTree::new(leaves(n)).unwrap();
            for i in 0..n as usize {
                let proof = tree.generate_proof(i).unwrap();
                assert!(tree.verify_proof(&proof), "leaf {i} of {n} failed");
                assert!(proof.siblings.len() <= tree.depth());
            }
        }
    }

    #[test]
    fn test_merkle_proof_invalid_verification() {
        let tree1 = MerkleTree::new(leaves(4)).unwrap();
        let tree2 = MerkleTree::new((5..=8).map(|i| Digest::new([i; 32])).collect()).unwrap();

        let proof = tree1.generate_proof(0).unwrap();
        assert!(!tree2.verify_proof(&proof));
    }

    #[test]
    fn test_large_merkle_tree() {
        let leaves: Vec<Digest> = (0..1024u32)
            .map(|i| {
                let mut leaf = [0u8; 32];
                leaf[0..4].copy_from_slice(&i.to_be_bytes());
                Digest::new(leaf)
            })
            .collect();

        let tree = MerkleTree::new(leaves).unwrap();
        assert_eq!(tree.depth(), 10);
        let proof = tree.generate_proof(512).unwrap();
        assert_eq!(proof.siblings.len(), 10);
        assert!(tree.verify_proof(&proof));
    }

    #[test]
    fn test_merkle_proof_with_invalid_index() {
        let tree = MerkleTree::new(leaves(4)).unwrap();
        assert!(tree.generate_proof(999).is_none());
    }

    #[test]
    fn test_merkle_proof_with_tampered_root() {
        let tree = MerkleTree::new(leaves(4)).unwrap();
        let mut proof = tree.generate_proof(0).unwrap();
        proof.root = Digest::new([0xFF; 32]);
        assert!(!tree.verify_proof(&proof));
    }

    #[test]
    fn test_merkle_proof_with_tampered_leaf() {
        let tree = MerkleTree::new(leaves(4)).unwrap();
        let mut proof = tree.generate_proof(0).unwrap();
        proof.leaf = Digest::new([0xFF; 32]);
        assert!(!tree.verify_proof(&proof));
    }

    #[test]
    fn test_merkle_proof_with_flipped_sibling_bit() {
        let tree = MerkleTree::new(leaves(4)).unwrap();
        let mut proof = tree.generate_proof(0).unwrap();
        let mut bytes: [u8; 32] = proof.siblings[1].into();
        bytes[31] ^= 0x01;
        proof.siblings[1] = Digest::new(bytes);
        assert!(!tree.verify_proof(&proof));
    }

    #[test]
    fn test_from_addresses_rejects_duplicates() {
        let a = Address::new([1; 20]);
        let b = Address::new([2; 20]);
        let result = MerkleTree::from_addresses(&[a, b, a]);
        assert_eq!(result, Err(TreeError::DuplicateLeaf { index: 2, first: 0 }));
    }

    #[test]
    fn test_from_addresses_uses_address_leaves() {
        let addresses = [Address::new([1; 20]), Address::new([2; 20])];
        let tree = MerkleTree::from_addresses(&addresses).unwrap();
        assert_eq!(tree.leaves[1], addresses[1].leaf());
        assert!(verify(&addresses[0].leaf(), &tree.root, &[addresses[1].leaf()]));
    }
}
