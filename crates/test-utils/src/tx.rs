//! Builders for well-formed source-chain transactions and blocks.

use bitcoin::{
    absolute::LockTime,
    block,
    hashes::Hash,
    key::rand::{rngs::OsRng, Rng},
    script::Builder,
    transaction::Version,
    Amount, Block, BlockHash, CompactTarget, OutPoint, ScriptBuf, Sequence, Transaction, TxIn,
    TxMerkleNode, TxOut, Witness,
};
use bitvm_bridge_primitives::types::EvmAddress;

use crate::bitcoin::generate_outpoint;

/// Generates a random transaction.
pub fn generate_tx(num_inputs: usize, num_outputs: usize) -> Transaction {
    let inputs = (0..num_inputs)
        .map(|_| TxIn {
            previous_output: generate_outpoint(),
            witness: Witness::new(),
            sequence: Sequence(0),
            script_sig: ScriptBuf::new(),
        })
        .collect();

    let outputs = (0..num_outputs)
        .map(|_| {
            let value: u32 = OsRng.gen();
            let mut script = [0u8; 22];
            OsRng.fill(&mut script);

            TxOut {
                value: Amount::from_sat(value as u64),
                script_pubkey: ScriptBuf::from_bytes(script.to_vec()),
            }
        })
        .collect();

    Transaction {
        version: Version::TWO,
        lock_time: LockTime::from_consensus(0),
        input: inputs,
        output: outputs,
    }
}

/// Creates a test transaction with specified outpoint and witness elements.
pub fn generate_spending_tx(
    previous_output: OutPoint,
    witness_elements: &[Vec<u8>],
) -> Transaction {
    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output,
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::from_slice(witness_elements),
        }],
        output: vec![],
    }
}

/// Generates a peg-in transaction that locks `amount` in its first output and carries
/// `destination` in a data-carrier second output.
pub fn generate_pegin_tx(amount: Amount, destination: EvmAddress) -> Transaction {
    let mut tx = generate_tx(1, 1);
    tx.output[0].value = amount;
    tx.output.push(TxOut {
        value: Amount::ZERO,
        script_pubkey: ScriptBuf::new_op_return(destination.0),
    });

    tx
}

/// Generates a dispute transaction whose first input spends `finalization_outpoint`.
pub fn generate_dispute_tx(finalization_outpoint: OutPoint) -> Transaction {
    let mut tx = generate_tx(2, 1);
    tx.input[0].previous_output = finalization_outpoint;

    tx
}

/// Creates a block with a coinbase followed by `num_txs` random transactions and a valid Merkle
/// root.
pub fn generate_block(num_txs: usize) -> Block {
    let height: i64 = OsRng.gen_range(17..800_000);

    let coinbase = Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: Builder::new().push_int(height).into_script(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: vec![TxOut {
            value: Amount::from_int_btc(3),
            script_pubkey: ScriptBuf::new(),
        }],
    };

    let mut txdata = vec![coinbase];
    txdata.extend((0..num_txs).map(|_| generate_tx(1, 2)));

    with_transactions(txdata)
}

/// Creates a block containing exactly `txdata`, with the header committing to their Merkle root.
///
/// # Panics
///
/// If `txdata` is empty.
pub fn with_transactions(txdata: Vec<Transaction>) -> Block {
    let mut block = Block {
        header: block::Header {
            version: block::Version::ONE,
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root: TxMerkleNode::all_zeros(),
            time: 0,
            bits: CompactTarget::from_consensus(0),
            nonce: 0,
        },
        txdata,
    };

    block.header.merkle_root = block
        .compute_merkle_root()
        .expect("block must have transactions");

    block
}
