//! Import identifier formatting.
//!
//! Every supported resource type has a [`FormatRule`]: a list of templates,
//! each guarded by a [`Condition`] over the resource's attributes. The first
//! template whose condition holds is rendered by concatenating its [`Part`]s.
//! Rules are plain data; [`Registry::format`] is the only evaluator.
//!
//! The identifier conventions come from the providers' import documentation
//! and are best effort. Generated identifiers should be reviewed before use.

pub mod aws;
pub mod cloudflare;

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value;
use thiserror::Error;

use crate::resource::Resource;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no import identifier rule for resource type {0}")]
    Unsupported(String),

    #[error("missing required attribute '{0}'")]
    MissingAttribute(String),

    #[error("attribute '{0}' is not a scalar value")]
    NotScalar(String),

    #[error("attributes of {0} do not match any known identifier shape")]
    Ambiguous(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate identifier rule for resource type {0}")]
    DuplicateRule(String),
}

/// A piece of an identifier template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Value of the attribute at a dot-separated path.
    Attr(&'static str),
    /// Fixed text, usually a separator.
    Lit(&'static str),
    /// Text after the last separator in an attribute value (the name in an ARN).
    Tail(&'static str, char),
    /// Elements of a list attribute joined with a separator.
    List(&'static str, &'static str),
}

/// Precondition selecting one of a rule's templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Present(&'static str),
    Absent(&'static str),
    Equals(&'static str, &'static str),
    All(&'static [Condition]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub when: Condition,
    pub parts: &'static [Part],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRule {
    pub resource_type: &'static str,
    pub templates: &'static [Template],
}

/// Declares a rule with a single unconditional template.
macro_rules! rule {
    ($resource_type:literal => $($part:expr),+ $(,)?) => {
        $crate::providers::FormatRule {
            resource_type: $resource_type,
            templates: &[$crate::providers::Template {
                when: $crate::providers::Condition::Always,
                parts: &[$($part),+],
            }],
        }
    };
}
pub(crate) use rule;

impl FormatRule {
    pub fn apply(&self, attributes: &Value) -> Result<String, FormatError> {
        let template = self
            .templates
            .iter()
            .find(|t| t.when.holds(attributes))
            .ok_or_else(|| FormatError::Ambiguous(self.resource_type.to_string()))?;

        let mut id = String::new();
        for part in template.parts {
            match *part {
                Part::Lit(text) => id.push_str(text),
                Part::Attr(path) => id.push_str(&scalar(attributes, path)?),
                Part::Tail(path, sep) => {
                    let value = scalar(attributes, path)?;
                    id.push_str(value.rsplit(sep).next().unwrap_or(value.as_str()));
                }
                Part::List(path, sep) => {
                    let items = match lookup(attributes, path) {
                        Some(Value::Array(items)) if !items.is_empty() => items,
                        Some(Value::Array(_)) | None | Some(Value::Null) => {
                            return Err(FormatError::MissingAttribute(path.to_string()));
                        }
                        Some(_) => return Err(FormatError::NotScalar(path.to_string())),
                    };
                    let rendered = items
                        .iter()
                        .map(|item| {
                            scalar_value(item).ok_or_else(|| FormatError::NotScalar(path.to_string()))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    id.push_str(&rendered.join(sep));
                }
            }
        }
        Ok(id)
    }
}

impl Condition {
    fn holds(&self, attributes: &Value) -> bool {
        match self {
            Condition::Always => true,
            Condition::Present(path) => is_present(lookup(attributes, path)),
            Condition::Absent(path) => !is_present(lookup(attributes, path)),
            Condition::Equals(path, expected) => lookup(attributes, path)
                .and_then(scalar_value)
                .is_some_and(|v| v == *expected),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(attributes)),
        }
    }
}

/// Resolves `a.b.0.c` through nested objects and arrays.
fn lookup<'a>(attributes: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(attributes, |value, key| match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

fn scalar_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar(attributes: &Value, path: &str) -> Result<String, FormatError> {
    let value = lookup(attributes, path);
    if !is_present(value) {
        return Err(FormatError::MissingAttribute(path.to_string()));
    }
    value
        .and_then(scalar_value)
        .ok_or_else(|| FormatError::NotScalar(path.to_string()))
}

/// Resource type to rule lookup table.
#[derive(Debug, Default)]
pub struct Registry {
    rules: HashMap<&'static str, &'static FormatRule>,
}

static BUILTIN: LazyLock<Result<Registry, RegistryError>> =
    LazyLock::new(|| Registry::from_rules(aws::RULES.iter().chain(cloudflare::RULES)));

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of every rule shipped with this crate.
    ///
    /// Built on first use and shared for the rest of the process.
    pub fn builtin() -> Result<&'static Registry, RegistryError> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    pub fn from_rules<I>(rules: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = &'static FormatRule>,
    {
        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule)?;
        }
        tracing::debug!(count = registry.len(), "identifier rules registered");
        Ok(registry)
    }

    pub fn register(&mut self, rule: &'static FormatRule) -> Result<(), RegistryError> {
        if self.rules.contains_key(rule.resource_type) {
            return Err(RegistryError::DuplicateRule(rule.resource_type.to_string()));
        }
        self.rules.insert(rule.resource_type, rule);
        Ok(())
    }

    pub fn supports(&self, resource_type: &str) -> bool {
        self.rules.contains_key(resource_type)
    }

    pub fn rule(&self, resource_type: &str) -> Option<&'static FormatRule> {
        self.rules.get(resource_type).copied()
    }

    /// Supported resource types, sorted.
    pub fn resource_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.rules.keys().copied().collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Derives the import identifier for a resource.
    pub fn format(&self, resource: &Resource) -> Result<String, FormatError> {
        self.rule(&resource.resource_type)
            .ok_or_else(|| FormatError::Unsupported(resource.resource_type.clone()))?
            .apply(&resource.attributes)
    }
}
