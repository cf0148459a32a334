//! Configuration model types.
//!
//! These types describe what the customer has configured. Pricing and layout
//! are pure functions of a [`Configuration`] and live in the `mezzanine` crate.
//!
//! # Organization
//!
//! - [`configuration`] - [`Configuration`] and [`LoadCapacity`]
//! - [`accessory`] - [`Accessory`] and its sizing options

pub mod accessory;
pub mod configuration;

pub use accessory::*;
pub use configuration::*;
