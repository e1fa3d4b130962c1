//! Prompt templates and response schemas for the generation tasks
//!
//! Templates are compiled into the binary and rendered with a strict
//! Handlebars registry, so a context missing a field is a render error
//! instead of a silently blank prompt.

use handlebars::{Handlebars, no_escape};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod schemas;

pub const ITINERARY: &str = "itinerary";
pub const SUGGESTIONS: &str = "suggestions";
pub const PACKING_LIST: &str = "packing_list";

const TEMPLATES: &[(&str, &str)] = &[
    (ITINERARY, include_str!("templates/itinerary.hbs")),
    (SUGGESTIONS, include_str!("templates/suggestions.hbs")),
    (PACKING_LIST, include_str!("templates/packing_list.hbs")),
];

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Invalid prompt template '{name}': {source}")]
    Template {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Failed to render prompt '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Registry of the embedded prompt templates
pub struct PromptLibrary {
    hbs: Handlebars<'static>,
}

impl PromptLibrary {
    /// Compile all embedded templates
    pub fn new() -> Result<Self, PromptError> {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(no_escape);

        for &(name, template) in TEMPLATES {
            hbs.register_template_string(name, template)
                .map_err(|e| PromptError::Template {
                    name,
                    source: Box::new(e),
                })?;
        }

        Ok(Self { hbs })
    }

    /// Render a template with the given context
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, PromptError> {
        let prompt = self
            .hbs
            .render(name, context)
            .map_err(|e| PromptError::Render {
                name: name.to_string(),
                source: Box::new(e),
            })?;
        debug!(template = name, len = prompt.len(), "rendered prompt");
        Ok(prompt)
    }
}
