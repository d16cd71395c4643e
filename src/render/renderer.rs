use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tera::{Context, Tera};

use super::locator::{TemplateLocator, TemplateQuery};
use crate::error::{from_tera, Error, Result};
use crate::filters::register_filters;
use crate::normalizers::{network_os_normalize, NetworkOs};

/// Variable key the normalized OS tag is injected under
pub const NETWORK_OS_KEY: &str = "ansible_network_os";

/// A family of configs rendered from one named template.
///
/// Implementors choose the template and may reject a fragment's variables
/// before anything is rendered.
pub trait ConfigTemplate {
    fn template_name(&self) -> &'static str;

    fn validate_template_variables(&self, variables: &Map<String, Value>) -> Result<()>;
}

/// Device placement hints used to pick the most specific template
#[derive(Debug, Clone, Default)]
pub struct PlacementHints {
    pub network_os: Option<String>,
    pub solution: Option<String>,
    pub family: Option<String>,
    pub model: Option<String>,
}

impl PlacementHints {
    /// Read `ansible_network_os`, `solution`, `family` and `model` from hostvars
    pub fn from_hostvars(hostvars: &Map<String, Value>) -> Self {
        let get = |key: &str| hostvars.get(key).and_then(Value::as_str).map(String::from);
        Self {
            network_os: get(NETWORK_OS_KEY),
            solution: get("solution"),
            family: get("family"),
            model: get("model"),
        }
    }

    fn query<'a>(&'a self, template_name: &'a str) -> TemplateQuery<'a> {
        TemplateQuery {
            template_name,
            solution: self.solution.as_deref(),
            family: self.family.as_deref(),
            model: self.model.as_deref(),
        }
    }
}

/// Rendered fragments in input order plus every line across all of them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedConfigs {
    pub rendered: Vec<String>,
    pub rendered_lines: Vec<String>,
}

impl RenderedConfigs {
    fn push(&mut self, rendered: String) {
        self.rendered_lines.extend(rendered.lines().map(String::from));
        self.rendered.push(rendered);
    }
}

/// Renders one fragment of variables for one device
#[derive(Debug)]
pub struct ConfigRenderer<'a> {
    locator: &'a TemplateLocator,
    network_os: NetworkOs,
    variables: Map<String, Value>,
}

impl<'a> ConfigRenderer<'a> {
    /// Normalizes the OS alias and injects it into the variables
    pub fn new(
        locator: &'a TemplateLocator,
        mut variables: Map<String, Value>,
        network_os: &str,
    ) -> Result<Self> {
        let network_os = network_os_normalize(network_os)?;
        variables.insert(NETWORK_OS_KEY.to_string(), Value::String(network_os.to_string()));

        Ok(Self {
            locator,
            network_os,
            variables,
        })
    }

    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Locate the template and render it with the fragment's variables
    pub fn render_config(&self, src: Option<&str>, query: &TemplateQuery<'_>) -> Result<String> {
        let path = self.locator.find_template(self.network_os, src, query)?;
        self.render_template(&path)
    }

    /// Render a template file. Undefined variables are an error and the
    /// template's trailing newline is kept.
    pub fn render_template(&self, path: &Path) -> Result<String> {
        let source = fs::read_to_string(path).map_err(|e| Error::TemplateRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let name = path.display().to_string();
        let mut tera = Tera::default();
        // Plain substitution whatever the file extension
        tera.autoescape_on(vec![]);
        register_filters(&mut tera);
        tera.add_raw_template(&name, &source)
            .map_err(|e| from_tera(e, &name))?;

        let context = Context::from_serialize(&self.variables).map_err(|e| from_tera(e, &name))?;
        tera.render(&name, &context).map_err(|e| from_tera(e, &name))
    }
}

/// Render every fragment independently, in order, failing on the first error
pub fn render_many<T: ConfigTemplate>(
    locator: &TemplateLocator,
    template: &T,
    hints: &PlacementHints,
    src: Option<&str>,
    fragments: Vec<Map<String, Value>>,
) -> Result<RenderedConfigs> {
    let network_os = hints.network_os.as_deref().unwrap_or_default();
    let query = hints.query(template.template_name());
    let mut out = RenderedConfigs::default();

    for fragment in fragments {
        let renderer = ConfigRenderer::new(locator, fragment, network_os)?;
        template.validate_template_variables(renderer.variables())?;
        out.push(renderer.render_config(src, &query)?);
    }

    tracing::debug!(
        "rendered {} fragment(s) from {}",
        out.rendered.len(),
        template.template_name()
    );
    Ok(out)
}
