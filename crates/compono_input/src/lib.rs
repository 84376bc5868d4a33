//! # compono_input
//!
//! Input collection and decoding for compono.
//!
//! Architecture documents are spread over any number of `.yaml`, `.yml` or
//! `.comp` files below one directory. They are concatenated into a single
//! buffer and decoded once, in strict mode, into a [`Diagram`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use compono_input::{DocumentParser, FileCollector};
//!
//! let data = FileCollector::new("./architecture").read_all().unwrap();
//! let diagram = DocumentParser::parse(&data).unwrap();
//! println!("{} components", diagram.components.len());
//! ```

pub mod collector;
pub mod error;
pub mod parser;

use std::path::Path;

use compono_model::Diagram;

pub use collector::{FileCollector, DEFAULT_EXTENSIONS};
pub use error::{InputError, InputResult};
pub use parser::DocumentParser;

/// Collect every matching file below `root` and decode them as one document.
pub fn load<I, S>(root: impl AsRef<Path>, extensions: I) -> InputResult<Diagram>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let data = FileCollector::new(root.as_ref())
        .with_extensions(extensions)
        .read_all()?;
    DocumentParser::parse(&data)
}
