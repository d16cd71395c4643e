//! Template resolution and rendering.

pub mod locator;
pub mod renderer;

pub use locator::{candidate_paths, TemplateLocator, TemplateQuery, TemplateRoots};
pub use renderer::{
    render_many, ConfigRenderer, ConfigTemplate, PlacementHints, RenderedConfigs, NETWORK_OS_KEY,
};

use crate::config::Config;

impl TemplateRoots {
    /// Roots in the order the service configuration prescribes
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.template_dir_candidates())
    }
}
