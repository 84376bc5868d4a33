//! # compono_model
//!
//! In-memory architecture model for compono.
//!
//! A [`Diagram`] is decoded once from the concatenated input documents and is
//! read-only afterwards. It holds five keyed sections:
//!
//! - **areas**: organizational groupings, nested through `parent` keys
//! - **components**: software units placed in an area at a level
//! - **levels**: horizontal tiers used to rank-align components
//! - **teams**: owners, with contact details and display colors
//! - **types**: component kinds (not used for rendering yet)
//!
//! ## Example
//!
//! ```rust
//! use compono_model::Diagram;
//!
//! let diagram: Diagram = serde_yaml::from_str(
//!     r#"
//! areas:
//!   core:
//!     name: Core
//!   edge:
//!     name: Edge
//!     parent: core
//! "#,
//! )
//! .unwrap();
//!
//! let roots: Vec<_> = diagram.root_areas().map(|(key, _)| key).collect();
//! assert_eq!(roots, vec!["core"]);
//! ```

pub mod models;
pub mod strict;

pub use models::*;
