//! OAuth redirect-state handling.
//!
//! # Modules
//!
//! - [`state`] - Codec for the resume destination carried through the
//!   provider's `state` parameter

pub mod state;

// Re-export commonly used items for convenience
pub use state::{decode_custom_state, encode_custom_state, resolve_redirect, StateParam};
