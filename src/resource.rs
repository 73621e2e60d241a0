use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::{self, AddressError};

/// Instance key of a resource created with `count` or `for_each`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstanceKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceKey::Int(i) => write!(f, "[{i}]"),
            InstanceKey::Str(s) => write!(f, "[{}]", serde_json::Value::String(s.clone())),
        }
    }
}

/// One managed resource instance read from state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub address: String,
    pub resource_type: String,
    pub name: String,
    pub index: Option<InstanceKey>,
    /// Module call names from the root, each with its instance key if any (`net[0]`).
    pub module_path: Vec<String>,
    pub provider_name: Option<String>,
    pub attributes: serde_json::Value,
}

impl Resource {
    /// Builds a resource from its address, deriving the module path from it.
    pub fn new(
        address: impl Into<String>,
        resource_type: impl Into<String>,
        name: impl Into<String>,
        index: Option<InstanceKey>,
        attributes: serde_json::Value,
    ) -> Result<Self, AddressError> {
        let address = address.into();
        let module_path = module_path_of(&address)?;
        Ok(Self {
            address,
            resource_type: resource_type.into(),
            name: name.into(),
            index,
            module_path,
            provider_name: None,
            attributes,
        })
    }

    pub fn with_provider(mut self, provider_name: impl Into<String>) -> Self {
        self.provider_name = Some(provider_name.into());
        self
    }

    /// Rebuilds the address from module path, type, name and index.
    pub fn canonical_address(&self) -> String {
        let mut out = String::new();
        for module in &self.module_path {
            out.push_str("module.");
            out.push_str(module);
            out.push('.');
        }
        out.push_str(&self.resource_type);
        out.push('.');
        out.push_str(&self.name);
        if let Some(index) = &self.index {
            out.push_str(&index.to_string());
        }
        out
    }

    /// The resource address without any instance keys.
    pub fn base_address(&self) -> String {
        address::strip_instance_keys(&self.address)
    }

    /// Link to the provider's import documentation for this resource type.
    ///
    /// Only known for providers published on the public registry.
    pub fn import_docs_url(&self) -> Option<String> {
        let source = self.provider_name.as_deref()?;
        let mut parts = source.strip_prefix("registry.terraform.io/")?.split('/');
        let (namespace, provider) = (parts.next()?, parts.next()?);
        let kind = self
            .resource_type
            .strip_prefix(provider)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(&self.resource_type);
        Some(format!(
            "https://registry.terraform.io/providers/{namespace}/{provider}/latest/docs/resources/{kind}#import"
        ))
    }
}

/// Module call segments of an address: `module.a.module.b[0].x.y` -> `["a", "b[0]"]`.
pub fn module_path_of(address: &str) -> Result<Vec<String>, AddressError> {
    let segments = address::split_segments(address)?;
    let mut path = Vec::new();
    let mut rest = segments.as_slice();
    while let ["module", call, tail @ ..] = rest {
        if tail.is_empty() {
            break;
        }
        path.push((*call).to_string());
        rest = tail;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_path_of_root_resource() {
        assert!(module_path_of("aws_s3_bucket.this").unwrap().is_empty());
    }

    #[test]
    fn test_module_path_of_nested_keyed_modules() {
        let path = module_path_of(r#"module.net[0].module.subnets["a"].aws_subnet.this"#).unwrap();
        assert_eq!(path, vec!["net[0]".to_string(), r#"subnets["a"]"#.to_string()]);
    }

    #[test]
    fn test_canonical_address_matches_state_address() {
        let resource = Resource::new(
            r#"module.net.aws_subnet.private["eu-west-1a"]"#,
            "aws_subnet",
            "private",
            Some(InstanceKey::Str("eu-west-1a".to_string())),
            json!({}),
        )
        .unwrap();
        assert_eq!(resource.canonical_address(), resource.address);

        let counted = Resource::new(
            "aws_s3_bucket.logs[2]",
            "aws_s3_bucket",
            "logs",
            Some(InstanceKey::Int(2)),
            json!({}),
        )
        .unwrap();
        assert_eq!(counted.canonical_address(), "aws_s3_bucket.logs[2]");
    }

    #[test]
    fn test_base_address_strips_keys() {
        let resource = Resource::new(
            "module.a[1].aws_s3_bucket.b[0]",
            "aws_s3_bucket",
            "b",
            Some(InstanceKey::Int(0)),
            json!({}),
        )
        .unwrap();
        assert_eq!(resource.base_address(), "module.a.aws_s3_bucket.b");
    }

    #[test]
    fn test_import_docs_url() {
        let resource = Resource::new("aws_s3_bucket.b", "aws_s3_bucket", "b", None, json!({}))
            .unwrap()
            .with_provider("registry.terraform.io/hashicorp/aws");
        assert_eq!(
            resource.import_docs_url().as_deref(),
            Some("https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/s3_bucket#import")
        );
    }

    #[test]
    fn test_import_docs_url_unknown_provider() {
        let resource =
            Resource::new("aws_s3_bucket.b", "aws_s3_bucket", "b", None, json!({})).unwrap();
        assert!(resource.import_docs_url().is_none());

        let private = resource.with_provider("example.com/acme/aws");
        assert!(private.import_docs_url().is_none());
    }

    #[test]
    fn test_instance_key_deserialization() {
        let int: InstanceKey = serde_json::from_str("3").unwrap();
        let text: InstanceKey = serde_json::from_str(r#""blue""#).unwrap();
        assert_eq!(int, InstanceKey::Int(3));
        assert_eq!(text, InstanceKey::Str("blue".to_string()));
        assert_eq!(text.to_string(), r#"["blue"]"#);
    }

    #[test]
    fn test_resource_serializes_field_names() {
        let resource =
            Resource::new("aws_s3_bucket.b", "aws_s3_bucket", "b", None, json!({"bucket": "b"}))
                .unwrap();
        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains("resource_type"));
        assert!(json.contains("module_path"));
        assert!(!json.contains("resourceType"));
    }
}
