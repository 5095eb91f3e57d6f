//! System-wide constants for the vaxslot entitlement ledger.

/// Smallest slot type the authority may issue. Issuance with a smaller
/// type is rejected with `VX_ERR_100`.
pub const MIN_SLOT_TYPE: u32 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "vaxslot";
