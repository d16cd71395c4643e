//! Render actions: turn a device's hostvars plus ACL data into config.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::models::{RenderAclsRequest, RenderResult};
use crate::render::{render_many, ConfigTemplate, PlacementHints, TemplateLocator};

/// The ACL flavours that can be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclAction {
    Standard,
    Extended,
}

impl AclAction {
    /// Hostvars key holding the ACL data when `from_hostvars` is set
    pub fn hostvars_key(&self) -> &'static str {
        match self {
            Self::Standard => "standard_acls",
            Self::Extended => "extended_acls",
        }
    }

    /// Pick the config data from the request or the hostvars
    pub fn get_config_data(&self, request: &RenderAclsRequest) -> Result<Vec<Map<String, Value>>> {
        let data = if request.from_hostvars {
            match request.hostvars.get(self.hostvars_key()) {
                Some(Value::Array(items)) => Some(items.clone()),
                Some(Value::Null) | None => None,
                Some(other) => {
                    return Err(Error::validation(
                        "get_config_data",
                        other,
                        format!("hostvars '{}' must be a list", self.hostvars_key()),
                    ))
                }
            }
        } else {
            let Some(data) = &request.data else {
                return Err(Error::validation(
                    "get_config_data",
                    "data",
                    "required option was not supplied, set option 'from_hostvars' to true if you \
                     want to get data from the hostvars",
                ));
            };
            Some(data.clone())
        };

        let data = data.unwrap_or_default();
        if data.is_empty() {
            return Err(Error::validation("get_config_data", "config_data", "could not be found"));
        }

        data.into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                other => Err(Error::validation("get_config_data", other, "each item must be a mapping")),
            })
            .collect()
    }

    /// Render every ACL in the request for the device described by its hostvars
    pub fn run(&self, locator: &TemplateLocator, request: &RenderAclsRequest) -> Result<RenderResult> {
        let config_data = self.get_config_data(request)?;
        let hints = PlacementHints::from_hostvars(&request.hostvars);

        tracing::debug!(
            "rendering {} {} acl(s) for {:?}",
            config_data.len(),
            self.hostvars_key(),
            hints.network_os
        );

        render_many(locator, self, &hints, request.src.as_deref(), config_data).map(RenderResult::from)
    }
}

impl ConfigTemplate for AclAction {
    fn template_name(&self) -> &'static str {
        match self {
            Self::Standard => "standard_acl.j2",
            Self::Extended => "extended_acl.j2",
        }
    }

    /// Each ACL needs a `name` string and an `entries` list
    fn validate_template_variables(&self, variables: &Map<String, Value>) -> Result<()> {
        let op = "validate_template_variables";

        match variables.get("name") {
            Some(Value::String(_)) => {}
            Some(other) => return Err(Error::validation(op, other, "acl 'name' must be a string")),
            None => return Err(Error::validation(op, "name", "is required for every acl")),
        }

        match variables.get("entries") {
            Some(Value::Array(_)) => Ok(()),
            Some(other) => Err(Error::validation(op, other, "acl 'entries' must be a list")),
            None => Err(Error::validation(op, "entries", "is required for every acl")),
        }
    }
}
