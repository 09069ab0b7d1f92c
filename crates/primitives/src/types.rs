//! Identifier types shared across the bridge.

/// The height of a block on the source chain.
pub type BitcoinBlockHeight = u64;

/// A caller-assigned identifier for a peg-in instance.
///
/// Instance ids are picked off-chain by the relayer before any registry call is made so that
/// no global counter needs to be shared between concurrent submissions.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct InstanceId(pub [u8; 16]);

impl_fixed_bytes!(InstanceId, 16);

/// A caller-assigned identifier for an operator's commitment graph.
///
/// The same id keys the operator record and every withdrawal attempt made against it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GraphId(pub [u8; 16]);

impl_fixed_bytes!(GraphId, 16);

/// An account on the host ledger.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EvmAddress(pub [u8; 20]);

impl_fixed_bytes!(EvmAddress, 20);
