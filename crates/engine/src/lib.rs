//! Address validation and subscription management for the payment watch list.

pub mod address;
pub mod store;
pub mod strkey;
pub mod subscription;
