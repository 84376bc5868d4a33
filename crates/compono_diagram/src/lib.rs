//! # compono_diagram
//!
//! Graphviz DOT rendering for compono architecture models.
//!
//! The builder walks the area forest from its roots, nests one cluster per
//! area, rank-aligns the components of each level inside it, and finally
//! draws every declared dependency as a non-constraining edge. Layout itself
//! is left to Graphviz.
//!
//! ## Example
//!
//! ```rust
//! use compono_diagram::{DiagramBuilder, RenderOptions};
//! use compono_model::{Area, Component, Diagram};
//!
//! let mut diagram = Diagram::new();
//! diagram.areas.insert("core".into(), Area::new("Core"));
//! diagram
//!     .components
//!     .insert("api".into(), Component::new("API").in_area("core").at_level("apis"));
//!
//! let dot = DiagramBuilder::new(&diagram)
//!     .with_options(RenderOptions::plain())
//!     .render()
//!     .unwrap();
//! assert!(dot.contains("digraph"));
//! ```

pub mod builder;
pub mod error;
pub mod options;

pub use builder::{DiagramBuilder, NodeTable};
pub use error::{DiagramError, DiagramResult};
pub use options::{RankDir, RenderOptions};
