//! Ports for the policy controller.

pub mod outbound;

pub use outbound::PolicyInput;
