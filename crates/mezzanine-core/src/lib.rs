//! Mezzanine Core Types and Definitions
//!
//! This crate provides the foundational types for describing a mezzanine
//! configuration. It includes:
//!
//! - **Model**: Configuration, load capacity and accessories ([`model`] module)
//! - **Identifiers**: Accessory identifiers ([`identifier::AccessoryId`])
//! - **Geometry**: Points, rotations and edge intervals ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])

pub mod color;
pub mod error;
pub mod geometry;
pub mod identifier;
pub mod model;
