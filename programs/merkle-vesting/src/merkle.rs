//! Allocation set commitments.
//!
//! Leaves are `blake3(0x00 ‖ blake3(claimant ‖ category ‖ allocation_le))`,
//! nodes are `blake3(0x01 ‖ min(a, b) ‖ max(a, b))`. Sorting the pair means a
//! proof is just the list of siblings, bottom-up. On an odd layer the last
//! node is carried up unchanged.
//!
//! Only `verify` runs on-chain; `MerkleTree` builds the published root and
//! per-leaf proofs off-chain.

use anchor_lang::prelude::Pubkey;

use crate::constants::{LEAF_DOMAIN, MAX_PROOF_LEN, NODE_DOMAIN};
use crate::state::Category;

pub type Hash = [u8; 32];

pub fn leaf_hash(claimant: &Pubkey, category: Category, total_allocation: u64) -> Hash {
    let mut inner = blake3::Hasher::new();
    inner.update(claimant.as_ref());
    inner.update(&[category as u8]);
    inner.update(&total_allocation.to_le_bytes());
    let inner = inner.finalize();

    let mut outer = blake3::Hasher::new();
    outer.update(&[LEAF_DOMAIN]);
    outer.update(inner.as_bytes());
    *outer.finalize().as_bytes()
}

pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[NODE_DOMAIN]);
    hasher.update(lo);
    hasher.update(hi);
    *hasher.finalize().as_bytes()
}

/// Fold `leaf` up through `proof` and compare with `root`.
pub fn verify(proof: &[Hash], leaf: Hash, root: Hash) -> bool {
    if proof.len() > MAX_PROOF_LEN {
        return false;
    }
    let computed = proof
        .iter()
        .fold(leaf, |node, sibling| hash_pair(&node, sibling));
    computed == root
}

#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// layers[0] are the leaves, the last layer holds only the root
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Returns `None` for an empty leaf set.
    pub fn new(leaves: Vec<Hash>) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }

        let mut layers = vec![leaves];
        while layers[layers.len() - 1].len() > 1 {
            let next: Vec<Hash> = layers[layers.len() - 1]
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => hash_pair(a, b),
                    [lone] => *lone,
                    _ => unreachable!("chunks(2) yields one or two items"),
                })
                .collect();
            layers.push(next);
        }

        Some(Self { layers })
    }

    pub fn root(&self) -> Hash {
        // new() guarantees a non-empty top layer
        self.layers[self.layers.len() - 1][0]
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    pub fn proof(&self, mut index: usize) -> Option<Vec<Hash>> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut proof = Vec::with_capacity(self.layers.len());
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = index ^ 1;
            if let Some(node) = layer.get(sibling) {
                proof.push(*node);
            }
            index /= 2;
        }
        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn allocations() -> Vec<(Pubkey, Category, u64)> {
        vec![
            (key(1), Category::Seed, 1_000),
            (key(2), Category::Team, 2_500),
            (key(3), Category::Airdrop, 10),
            // same wallet, second cohort
            (key(1), Category::Airdrop, 40),
            (key(5), Category::Public, 777),
        ]
    }

    fn tree() -> MerkleTree {
        let leaves = allocations()
            .iter()
            .map(|(k, c, a)| leaf_hash(k, *c, *a))
            .collect();
        MerkleTree::new(leaves).unwrap()
    }

    #[test]
    fn every_leaf_proves_against_root() {
        let tree = tree();
        for (i, (k, c, a)) in allocations().iter().enumerate() {
            let proof = tree.proof(i).unwrap();
            assert!(verify(&proof, leaf_hash(k, *c, *a), tree.root()), "leaf {i}");
        }
    }

    #[test]
    fn altered_tuple_fails() {
        let tree = tree();
        let proof = tree.proof(0).unwrap();
        let root = tree.root();

        assert!(!verify(&proof, leaf_hash(&key(1), Category::Seed, 1_001), root));
        assert!(!verify(&proof, leaf_hash(&key(1), Category::Team, 1_000), root));
        assert!(!verify(&proof, leaf_hash(&key(9), Category::Seed, 1_000), root));
    }

    #[test]
    fn proof_for_one_category_does_not_unlock_another() {
        let tree = tree();
        let seed_proof = tree.proof(0).unwrap();
        assert!(!verify(
            &seed_proof,
            leaf_hash(&key(1), Category::Airdrop, 40),
            tree.root()
        ));
    }

    #[test]
    fn single_leaf_tree_has_empty_proof() {
        let leaf = leaf_hash(&key(4), Category::Advisors, 99);
        let tree = MerkleTree::new(vec![leaf]).unwrap();
        assert_eq!(tree.root(), leaf);
        assert!(tree.proof(0).unwrap().is_empty());
        assert!(verify(&[], leaf, tree.root()));
        assert!(tree.proof(1).is_none());
    }

    #[test]
    fn empty_leaf_set_has_no_tree() {
        assert!(MerkleTree::new(vec![]).is_none());
    }

    #[test]
    fn internal_node_is_not_a_valid_leaf() {
        let tree = tree();
        // layer 1 node 0 commits to leaves 0 and 1
        let node = tree.layers[1][0];
        let rest = tree.proof(0).unwrap()[1..].to_vec();
        // the raw node folds to the root, but no tuple hashes to it as a leaf
        assert!(verify(&rest, node, tree.root()));
        assert_ne!(leaf_hash(&key(1), Category::Seed, 1_000), node);
    }

    #[test]
    fn pair_hash_is_order_independent() {
        let a = leaf_hash(&key(1), Category::Seed, 1);
        let b = leaf_hash(&key(2), Category::Seed, 1);
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn overlong_proof_is_rejected() {
        let leaf = leaf_hash(&key(1), Category::Seed, 1);
        let proof = vec![[7u8; 32]; MAX_PROOF_LEN + 1];
        let root = proof.iter().fold(leaf, |n, s| hash_pair(&n, s));
        assert!(!verify(&proof, leaf, root));
    }
}
