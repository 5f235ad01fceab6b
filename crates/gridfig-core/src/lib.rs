//! Gridfig Core Types and Definitions
//!
//! This crate provides the foundational types for the gridfig figure
//! assembler. It includes:
//!
//! - **Colors**: RGB color handling for title bars, frames and markers
//!   ([`color::Rgb`])
//! - **Geometry**: Physical sizes and per-edge containers ([`geometry`]
//!   module)
//! - **Module model**: The grid-of-images module and its decorations
//!   ([`module`] module)
//! - **Dimensions**: Pure sizing computations over a module ([`dimension`]
//!   module)

pub mod color;
pub mod dimension;
pub mod geometry;
pub mod module;
