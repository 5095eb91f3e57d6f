//! Configuration for a vaxslot engine instance.

use serde::{Deserialize, Serialize};

use crate::AccountAddr;

/// Engine configuration, fixed at construction.
///
/// The authority is the deployment-time owner of the system: the only
/// identity permitted to issue slots and record vaccinations. There is
/// no way to rotate it at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The only address permitted to issue slots and vaccinate.
    pub authority: AccountAddr,
}

impl EngineConfig {
    #[must_use]
    pub fn new(authority: AccountAddr) -> Self {
        Self { authority }
    }
}
