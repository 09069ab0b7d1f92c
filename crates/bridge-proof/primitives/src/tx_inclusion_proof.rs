//! Transaction inclusion proof.

use bitcoin::Txid;
use bitvm_bridge_primitives::buf::Buf32;
use serde::{Deserialize, Serialize};

use crate::utils::sha256d;

/// A Merkle inclusion proof for a transaction id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInclusionProof {
    /// The 0-based position (index) of the transaction within the block's transaction list
    /// for which this proof is generated.
    position: u32,

    /// The intermediate hashes (sometimes called "siblings") needed to reconstruct the Merkle root
    /// when combined with the target transaction's own ID. These are the Merkle tree nodes at
    /// each step that pair with the current hash (either on the left or the right) to produce
    /// the next level of the tree.
    cohashes: Vec<Buf32>,
}

impl TxInclusionProof {
    /// Creates a new transaction inclusion proof.
    pub const fn new(position: u32, cohashes: Vec<Buf32>) -> Self {
        Self { position, cohashes }
    }

    /// Returns a reference to the cohashes (Merkle tree sibling hashes) in this proof.
    pub fn cohashes(&self) -> &[Buf32] {
        &self.cohashes
    }

    /// Returns the 0-based position of the transaction within the block.
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Generates the proof for the transaction at `idx` in the list of `txids`.
    ///
    /// Returns the proof together with the Merkle root of the list, or `None` if `idx` is out of
    /// range.
    pub fn generate(txids: &[Txid], idx: u32) -> Option<(Self, Buf32)> {
        let (cohashes, root) = get_cohashes(txids, idx)?;

        Some((Self::new(idx, cohashes), root))
    }

    /// Computes the Merkle root for the given `txid` using the proof's cohashes.
    pub fn compute_root(&self, txid: Txid) -> Buf32 {
        compute_root(self.cohashes(), txid.into(), u64::from(self.position()))
    }

    /// Verifies the inclusion proof of the given `txid` against the provided Merkle `root`.
    pub fn verify(&self, txid: Txid, root: Buf32) -> bool {
        self.compute_root(txid) == root
    }
}

/// Combines two sibling nodes into their parent: `SHA256(SHA256(left || right))`.
pub fn double_hash(left: &Buf32, right: &Buf32) -> Buf32 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_ref());
    buf[32..].copy_from_slice(right.as_ref());

    sha256d(&buf)
}

/// Folds `leaf` with the `proof` siblings into a root.
///
/// At each level the running hash goes on the left when the index is even and on the right when
/// it is odd; the index is then halved.
pub fn compute_root(proof: &[Buf32], leaf: Buf32, index: u64) -> Buf32 {
    let (root, _) = proof
        .iter()
        .fold((leaf, index), |(cur_hash, pos), cohash| {
            let parent = if pos & 1 == 0 {
                double_hash(&cur_hash, cohash)
            } else {
                double_hash(cohash, &cur_hash)
            };

            (parent, pos >> 1)
        });

    root
}

/// Verifies that `leaf` at `index` reduces to `root` under `proof`.
pub fn verify_merkle_proof(root: Buf32, proof: &[Buf32], leaf: Buf32, index: u64) -> bool {
    compute_root(proof, leaf, index) == root
}

/// Computes the Merkle cohashes needed for a transaction inclusion proof.
///
/// Given a list of transaction IDs and an index, this function computes the
/// Merkle tree hashes needed to prove that the transaction at `index` is
/// included in the tree. The last node of a level with an odd number of nodes is paired with
/// itself, as the source chain does.
///
/// Returns a tuple of (cohashes, root), or `None` if `index` is out of range.
pub fn get_cohashes<T>(ids: &[T], index: u32) -> Option<(Vec<Buf32>, Buf32)>
where
    T: Into<Buf32> + Clone,
{
    if (index as usize) >= ids.len() {
        return None;
    }

    let mut curr_level: Vec<Buf32> = ids.iter().cloned().map(Into::into).collect();

    let mut curr_index = index as usize;
    let mut cohashes = vec![];
    while curr_level.len() > 1 {
        let sibling = curr_index ^ 1;
        cohashes.push(
            curr_level
                .get(sibling)
                .copied()
                .unwrap_or(curr_level[curr_index]),
        );

        curr_level = curr_level
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => double_hash(left, right),
                [single] => double_hash(single, single),
                _ => unreachable!("chunks(2) yields one or two elements"),
            })
            .collect();

        curr_index /= 2;
    }

    Some((cohashes, curr_level[0]))
}
