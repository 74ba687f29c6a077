//! Declarative attribute schema.
//!
//! The schema is the wire contract with the host: attribute names, which
//! fields the user must set, which the system computes, and which defaults
//! apply. The host enforces required fields against this metadata before an
//! operation is dispatched, so resource implementations can assume declared
//! config is structurally complete.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::diagnostics::Diagnostics;

/// Metadata for a single schema attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Documentation string surfaced by the host.
    pub description: String,
    /// The user must supply a value.
    pub required: bool,
    /// The user may supply a value.
    pub optional: bool,
    /// The system computes the value.
    pub computed: bool,
    /// Default applied when the user supplies nothing.
    pub default: Option<Value>,
    /// Once set, the value is carried forward unchanged across updates
    /// instead of being recomputed.
    pub stable_across_updates: bool,
}

impl Attribute {
    /// A user-supplied, mandatory attribute.
    pub fn required(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            required: true,
            optional: false,
            computed: false,
            default: None,
            stable_across_updates: false,
        }
    }

    /// An optional attribute with a default applied by the host.
    pub fn optional_with_default(description: impl Into<String>, default: Value) -> Self {
        Self {
            description: description.into(),
            required: false,
            optional: true,
            computed: true,
            default: Some(default),
            stable_across_updates: false,
        }
    }

    /// A system-computed attribute.
    pub fn computed(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            required: false,
            optional: false,
            computed: true,
            default: None,
            stable_across_updates: false,
        }
    }

    /// Marks the attribute as carried forward unchanged across updates.
    #[must_use]
    pub fn stable(mut self) -> Self {
        self.stable_across_updates = true;
        self
    }
}

/// Attribute schema for a resource or provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Documentation string surfaced by the host.
    pub description: String,
    /// Attribute metadata keyed by wire name.
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Creates an empty schema with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Validates a declared configuration object against this schema.
    ///
    /// Checks that every required attribute is present and non-null, and
    /// that no unknown attributes are declared. This runs at the host
    /// boundary; resource implementations do not repeat it.
    #[must_use]
    pub fn validate(&self, config: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();

        let Some(object) = config.as_object() else {
            diags.add_error(
                "Configuration Error",
                "declared configuration must be an object",
            );
            return diags;
        };

        for (name, attr) in &self.attributes {
            if attr.required && object.get(name).map_or(true, Value::is_null) {
                diags.add_error(
                    "Configuration Error",
                    format!("required attribute '{name}' is not set"),
                );
            }
        }

        for name in object.keys() {
            if !self.attributes.contains_key(name) {
                diags.add_error(
                    "Configuration Error",
                    format!("unknown attribute '{name}'"),
                );
            }
        }

        diags
    }

    /// Fills absent optional attributes with their declared defaults.
    pub fn apply_defaults(&self, config: &mut Value) {
        let Some(object) = config.as_object_mut() else {
            return;
        };

        for (name, attr) in &self.attributes {
            if let Some(default) = &attr.default {
                let missing = object.get(name).map_or(true, Value::is_null);
                if missing {
                    object.insert(name.clone(), default.clone());
                }
            }
        }
    }
}
