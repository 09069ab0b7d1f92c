//! A plain 32-byte buffer used for hashes that travel between the decoder, the Merkle verifier
//! and the light client.

use bitcoin::{hashes::Hash, BlockHash, TxMerkleNode, Txid};

/// A 32-byte buffer in internal (non-reversed) byte order.
///
/// Hashes are kept in the order in which they are produced by the hash function. This is the
/// order in which they appear on the wire, which is the reverse of the order that block explorers
/// display.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Buf32(pub [u8; 32]);

impl_fixed_bytes!(Buf32, 32);

impl From<Txid> for Buf32 {
    fn from(value: Txid) -> Self {
        Self(value.to_byte_array())
    }
}

impl From<Buf32> for Txid {
    fn from(value: Buf32) -> Self {
        Txid::from_byte_array(value.0)
    }
}

impl From<TxMerkleNode> for Buf32 {
    fn from(value: TxMerkleNode) -> Self {
        Self(value.to_byte_array())
    }
}

impl From<BlockHash> for Buf32 {
    fn from(value: BlockHash) -> Self {
        Self(value.to_byte_array())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_txid_conversion_keeps_internal_order() {
        let txid =
            Txid::from_str("4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b")
                .expect("valid txid");

        let buf = Buf32::from(txid);

        // the displayed txid is byte-reversed relative to the internal representation
        assert_eq!(buf.0[0], 0x3b);
        assert_eq!(buf.0[31], 0x4a);
        assert_eq!(Txid::from(buf), txid);
    }

    #[test]
    fn test_hex_parsing() {
        let hex_str = "11".repeat(32);
        let buf: Buf32 = hex_str.parse().expect("must parse");
        assert_eq!(buf, Buf32([0x11; 32]));
        assert_eq!(buf.to_string(), hex_str);

        let prefixed: Buf32 = format!("0x{hex_str}").parse().expect("must parse prefixed");
        assert_eq!(prefixed, buf);

        assert!("11".parse::<Buf32>().is_err(), "short input must be rejected");
    }

    #[test]
    fn test_serde_json() {
        let buf = Buf32([0xab; 32]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));

        let back: Buf32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buf);
        assert!(Buf32::zero().is_zero());
    }
}
