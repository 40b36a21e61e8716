use std::fmt;
use std::sync::Arc;

use super::{HostError, HostObject, Value};

/// Body of a host method, called with one argument per declared parameter.
pub type MethodBody = Arc<dyn Fn(&[Value]) -> Result<Value, HostError> + Send + Sync>;

/// Declared type of a method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// A connected client wrapper
    Client,
    /// The client's underlying session handle
    Session,
    /// Any object; accepts a client directly
    Any,
    String,
    Float32,
    Float64,
    Int32,
    /// Anything else (custom enums, structs, delegates, ...)
    Other(String),
}

impl ParamType {
    /// True if a client can be passed as-is
    pub fn accepts_client(&self) -> bool {
        matches!(self, ParamType::Client | ParamType::Any)
    }

    pub fn accepts_session(&self) -> bool {
        matches!(self, ParamType::Session | ParamType::Any)
    }
}

/// A declared method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A callable method on a host type
pub struct HostMethod {
    pub name: String,
    pub is_static: bool,
    pub params: Vec<Param>,
    body: MethodBody,
}

impl HostMethod {
    pub fn new_static<F>(name: impl Into<String>, params: Vec<Param>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            is_static: true,
            params,
            body: Arc::new(body),
        }
    }

    pub fn new_instance<F>(name: impl Into<String>, params: Vec<Param>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        Self {
            is_static: false,
            ..Self::new_static(name, params, body)
        }
    }

    /// Call the method. The argument count must match the declared parameters.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, HostError> {
        if args.len() != self.params.len() {
            return Err(HostError::Invocation {
                method: self.name.clone(),
                reason: format!(
                    "expected {} arguments, got {}",
                    self.params.len(),
                    args.len()
                ),
            });
        }
        (self.body)(args)
    }
}

impl fmt::Debug for HostMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostMethod")
            .field("name", &self.name)
            .field("is_static", &self.is_static)
            .field("params", &self.params)
            .finish()
    }
}

/// A public type inside a host module
#[derive(Debug)]
pub struct HostType {
    pub full_name: String,
    statics: HostObject,
    methods: Vec<Arc<HostMethod>>,
}

impl HostType {
    pub fn new(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        Self {
            statics: HostObject::new(full_name.clone()),
            full_name,
            methods: Vec::new(),
        }
    }

    /// Replace the static member surface (static properties and fields)
    pub fn with_statics(mut self, statics: HostObject) -> Self {
        self.statics = statics;
        self
    }

    pub fn with_method(mut self, method: HostMethod) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn statics(&self) -> &HostObject {
        &self.statics
    }

    pub fn methods(&self) -> &[Arc<HostMethod>] {
        &self.methods
    }

    /// First static method (in declaration order) whose name matches ignoring case
    pub fn find_static_method_ignore_case(&self, name: &str) -> Option<&Arc<HostMethod>> {
        self.methods
            .iter()
            .find(|m| m.is_static && m.name.eq_ignore_ascii_case(name))
    }
}

/// A loaded module and its public types
#[derive(Debug)]
pub struct HostModule {
    pub name: String,
    types: Result<Vec<Arc<HostType>>, HostError>,
}

impl HostModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Ok(Vec::new()),
        }
    }

    /// A module whose type list cannot be enumerated
    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            types: Err(HostError::TypeLoad {
                module: name.clone(),
                reason: reason.into(),
            }),
            name,
        }
    }

    pub fn with_type(mut self, ty: HostType) -> Self {
        if let Ok(types) = &mut self.types {
            types.push(Arc::new(ty));
        }
        self
    }

    /// Public types in declaration order
    pub fn types(&self) -> Result<&[Arc<HostType>], HostError> {
        match &self.types {
            Ok(types) => Ok(types),
            Err(e) => Err(e.clone()),
        }
    }

    /// Look up a type by its exact fully-qualified name
    pub fn find_type(&self, full_name: &str) -> Option<Arc<HostType>> {
        self.types()
            .ok()?
            .iter()
            .find(|t| t.full_name == full_name)
            .cloned()
    }
}
