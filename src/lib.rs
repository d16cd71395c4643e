pub mod actions;
pub mod config;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod inventory;
pub mod models;
pub mod normalizers;
pub mod render;
pub mod router;
pub mod validators;

pub use error::{Error, Result};

use config::Config;
use render::{TemplateLocator, TemplateRoots};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub locator: TemplateLocator,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let locator = TemplateLocator::new(TemplateRoots::from_config(&config));
        Self { config, locator }
    }
}
