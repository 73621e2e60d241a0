//! Reader for the JSON state produced by `terraform show -json`.

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::address::AddressError;
use crate::resource::{self, InstanceKey, Resource};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to decode state JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read state: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported state format version {found:?}, expected 1.x")]
    UnsupportedVersion { found: Option<String> },

    #[error("invalid resource address in state: {0}")]
    Address(#[from] AddressError),
}

#[derive(Debug, Deserialize)]
struct StateDocument {
    format_version: Option<String>,
    #[serde(default)]
    values: Option<StateValues>,
}

#[derive(Debug, Deserialize)]
struct StateValues {
    root_module: StateModule,
}

#[derive(Debug, Deserialize)]
struct StateModule {
    #[serde(default)]
    resources: Vec<StateResource>,
    #[serde(default)]
    child_modules: Vec<StateModule>,
}

#[derive(Debug, Deserialize)]
struct StateResource {
    address: String,
    mode: String,
    #[serde(rename = "type")]
    type_: String,
    name: String,
    #[serde(default)]
    index: Option<InstanceKey>,
    #[serde(default)]
    provider_name: Option<String>,
    #[serde(default)]
    values: Map<String, Value>,
}

impl StateResource {
    fn into_resource(self) -> Result<Resource, StateError> {
        let module_path = resource::module_path_of(&self.address)?;
        Ok(Resource {
            address: self.address,
            resource_type: self.type_,
            name: self.name,
            index: self.index,
            module_path,
            provider_name: self.provider_name,
            attributes: Value::Object(self.values),
        })
    }
}

fn is_supported_version(version: &str) -> bool {
    version.split('.').next() == Some("1")
}

/// Parses a state document into its managed resources.
///
/// Resources are returned module by module, depth first, in document order.
/// Data sources are left out.
pub fn parse_state(input: &str) -> Result<Vec<Resource>, StateError> {
    let document: StateDocument = serde_json::from_str(input)?;

    match document.format_version.as_deref() {
        Some(version) if is_supported_version(version) => {}
        _ => {
            return Err(StateError::UnsupportedVersion {
                found: document.format_version,
            });
        }
    }

    let Some(values) = document.values else {
        tracing::debug!("state has no values, nothing to read");
        return Ok(Vec::new());
    };

    let mut resources = Vec::new();
    collect_module(values.root_module, &mut resources)?;
    tracing::info!(count = resources.len(), "managed resources read from state");
    Ok(resources)
}

pub fn read_state<R: Read>(mut reader: R) -> Result<Vec<Resource>, StateError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_state(&input)
}

fn collect_module(module: StateModule, out: &mut Vec<Resource>) -> Result<(), StateError> {
    for state_resource in module.resources {
        if state_resource.mode != "managed" {
            continue;
        }
        out.push(state_resource.into_resource()?);
    }
    for child in module.child_modules {
        collect_module(child, out)?;
    }
    Ok(())
}
