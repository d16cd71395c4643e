mod values;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::render::RenderedConfigs;

pub use values::IntOrString;

/// RenderAclsRequest for rendering ACL configs for one device
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderAclsRequest {
    /// The device's hostvars; `ansible_network_os`, `solution`, `family` and
    /// `model` drive template selection
    #[serde(default)]
    pub hostvars: Map<String, Value>,
    /// Per-ACL variable sets, required unless `from_hostvars` is set
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub from_hostvars: bool,
    /// Exact template path; skips template lookup
    #[serde(default)]
    pub src: Option<String>,
}

/// RenderResult returned by the render actions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult {
    pub changed: bool,
    #[serde(flatten)]
    pub configs: RenderedConfigs,
}

impl From<RenderedConfigs> for RenderResult {
    fn from(configs: RenderedConfigs) -> Self {
        Self {
            changed: false,
            configs,
        }
    }
}

/// ApplyFilterRequest for running one filter outside a template
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyFilterRequest {
    pub value: Value,
    #[serde(default)]
    pub args: HashMap<String, Value>,
}

/// NormalizeRequest carries a raw ansible_network_os value
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeRequest {
    pub value: String,
}

/// ValueResponse wraps a single filtered or normalized value
#[derive(Debug, Clone, Serialize)]
pub struct ValueResponse<T> {
    pub value: T,
}

/// FilterListResponse lists every registered template filter
#[derive(Debug, Clone, Serialize)]
pub struct FilterListResponse {
    pub filters: Vec<&'static str>,
}
