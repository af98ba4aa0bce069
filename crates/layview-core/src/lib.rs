//! Layview Core Types and Definitions
//!
//! This crate provides the foundational types used to render serialized
//! layout fixtures. It includes:
//!
//! - **Geometry**: Point/pixel conversion and rectangle overlap ([`geometry`] module)
//! - **Colors**: The fixed box palette and its rotating cursor ([`color`] module)
//! - **Fonts**: The font table and font loading ([`font`] module)
//! - **Canvas**: Raster drawing primitives on RGBA buffers ([`canvas`] module)

pub mod canvas;
pub mod color;
pub mod font;
pub mod geometry;
