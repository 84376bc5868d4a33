//! The collect, parse and build pipeline behind the `compono` binary.

use anyhow::{Context, Result};
use tracing::info;

use compono_diagram::DiagramBuilder;
use compono_input::{DocumentParser, FileCollector};

use crate::config::Settings;

/// Run the whole pipeline and return the DOT text.
pub fn render(settings: &Settings) -> Result<String> {
    info!("Reading architecture documents from {:?}", settings.input_dir);

    let data = FileCollector::new(&settings.input_dir)
        .with_extensions(settings.extensions.iter().cloned())
        .read_all()
        .with_context(|| format!("Failed to collect input from {:?}", settings.input_dir))?;

    let diagram = DocumentParser::parse(&data).context("Failed to decode architecture documents")?;

    let dot = DiagramBuilder::new(&diagram)
        .with_options(settings.options)
        .render()
        .context("Failed to build diagram")?;

    Ok(dot)
}
