use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use super::{HostError, Value};

/// Getter backing a property or field. Getters may fail like any host call.
pub type Accessor = Arc<dyn Fn() -> Result<Value, HostError> + Send + Sync>;

/// An instance (or a type's static surface) exposing named properties and fields.
///
/// Lookups are case-sensitive. Properties and fields live in separate
/// namespaces, so the same name may exist as both.
pub struct HostObject {
    type_name: String,
    properties: HashMap<String, Accessor>,
    fields: HashMap<String, Accessor>,
}

impl HostObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: HashMap::new(),
            fields: HashMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Add a property backed by a getter
    pub fn with_property<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn() -> Result<Value, HostError> + Send + Sync + 'static,
    {
        self.properties.insert(name.into(), Arc::new(getter));
        self
    }

    /// Add a property that always returns the same value
    pub fn with_property_value(self, name: impl Into<String>, value: Value) -> Self {
        self.with_property(name, move || Ok(value.clone()))
    }

    /// Add a field backed by a getter
    pub fn with_field<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn() -> Result<Value, HostError> + Send + Sync + 'static,
    {
        self.fields.insert(name.into(), Arc::new(getter));
        self
    }

    /// Add a field that always holds the same value
    pub fn with_field_value(self, name: impl Into<String>, value: Value) -> Self {
        self.with_field(name, move || Ok(value.clone()))
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Read a property. `None` if no property of that name exists.
    pub fn read_property(&self, name: &str) -> Option<Result<Value, HostError>> {
        self.properties.get(name).map(|getter| getter())
    }

    /// Read a field. `None` if no field of that name exists.
    pub fn read_field(&self, name: &str) -> Option<Result<Value, HostError>> {
        self.fields.get(name).map(|getter| getter())
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostObject")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}
