//! Caller authorization.
//!
//! Every mutating operation receives a [`CallContext`] naming its caller and checks the role it
//! requires before looking at any record.

use std::fmt::Display;

use bitvm_bridge_primitives::types::EvmAddress;
use serde::{Deserialize, Serialize};

use crate::errors::{RegistryError, RegistryResult};

/// The roles an operation may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The relayer fixed at construction.
    Relayer,
    /// The operator that owns the withdrawal slot.
    Operator,
    /// Either of the two.
    RelayerOrOperator,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Role::Relayer => "relayer",
            Role::Operator => "operator",
            Role::RelayerOrOperator => "relayer or operator",
        };

        write!(f, "{role}")
    }
}

/// The identity on whose behalf an operation is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    caller: EvmAddress,
}

impl CallContext {
    /// Creates a new context for `caller`.
    pub const fn new(caller: EvmAddress) -> Self {
        Self { caller }
    }

    /// Returns the caller.
    pub const fn caller(&self) -> EvmAddress {
        self.caller
    }

    /// Requires the caller to be the `relayer`.
    pub fn require_relayer(&self, relayer: EvmAddress) -> RegistryResult<()> {
        self.require(self.caller == relayer, Role::Relayer)
    }

    /// Requires the caller to be the `operator`.
    pub fn require_operator(&self, operator: EvmAddress) -> RegistryResult<()> {
        self.require(self.caller == operator, Role::Operator)
    }

    /// Requires the caller to be either the `relayer` or the `operator`.
    pub fn require_relayer_or_operator(
        &self,
        relayer: EvmAddress,
        operator: EvmAddress,
    ) -> RegistryResult<()> {
        self.require(
            self.caller == relayer || self.caller == operator,
            Role::RelayerOrOperator,
        )
    }

    fn require(&self, authorized: bool, required: Role) -> RegistryResult<()> {
        if authorized {
            Ok(())
        } else {
            Err(RegistryError::Authorization {
                caller: self.caller,
                required,
            })
        }
    }
}
