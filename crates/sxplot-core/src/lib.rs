//! sxplot Core Types and Definitions
//!
//! This crate provides the foundational types shared by every sxplot crate.
//! It includes:
//!
//! - **Catalog**: Scattering-parameter and frequency-unit identifiers with their
//!   legend, unit and index tables ([`catalog`] module)
//! - **Colors**: Color handling with CSS color support and trace palettes
//!   ([`color::Color`], [`color::Palette`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Stroke and text definitions for figure elements ([`draw`] module)

pub mod catalog;
pub mod color;
pub mod draw;
pub mod geometry;
