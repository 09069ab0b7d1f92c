//! Module to generate arbitrary values for testing.

use bitcoin::{
    hashes::Hash,
    key::rand::{rngs::OsRng, thread_rng, Rng},
    secp256k1::{Keypair, Secp256k1, XOnlyPublicKey},
    OutPoint, Txid,
};
use bitvm_bridge_primitives::types::{EvmAddress, GraphId, InstanceId};

/// Generates a random transaction ID.
pub fn generate_txid() -> Txid {
    let mut txid = [0u8; 32];
    OsRng.fill(&mut txid);

    Txid::from_byte_array(txid)
}

/// Generates a random outpoint.
pub fn generate_outpoint() -> OutPoint {
    let vout: u32 = OsRng.gen();

    OutPoint {
        txid: generate_txid(),
        vout,
    }
}

/// Generates a random x-only public key.
pub fn generate_xonly_pubkey() -> XOnlyPublicKey {
    let secp = Secp256k1::new();
    let keypair = Keypair::new(&secp, &mut thread_rng());

    keypair.x_only_public_key().0
}

/// Generates a random host-ledger address.
pub fn generate_evm_address() -> EvmAddress {
    let mut address = [0u8; 20];
    OsRng.fill(&mut address);

    EvmAddress(address)
}

/// Generates a random peg-in instance id.
pub fn generate_instance_id() -> InstanceId {
    let mut id = [0u8; 16];
    OsRng.fill(&mut id);

    InstanceId(id)
}

/// Generates a random graph id.
pub fn generate_graph_id() -> GraphId {
    let mut id = [0u8; 16];
    OsRng.fill(&mut id);

    GraphId(id)
}
