//! Procview Core Types
//!
//! Foundational types shared by the procview crates:
//!
//! - **Identifiers**: String-interned node and flow identifiers ([`identifier::Id`])
//! - **Colors**: CSS color handling for figure styling ([`color::Color`])
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Graph**: The attributed process graph with typed node kinds ([`graph`] module)
//! - **Draw**: SVG drawing primitives rendered into layers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod graph;
pub mod identifier;
