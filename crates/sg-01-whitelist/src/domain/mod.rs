//! Domain layer for the whitelist.

pub mod defaults;
pub mod errors;
pub mod store;

pub use defaults::{DefaultWhitelist, DEFAULT_IDENTIFIERS, STRICT_SENTINEL};
pub use errors::WhitelistError;
pub use store::{WhitelistConfig, WhitelistStore, DEFAULT_LOCK_WAIT, WHITELIST_CAPACITY};
