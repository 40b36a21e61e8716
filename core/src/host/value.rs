use std::fmt;
use std::sync::Arc;

use super::HostObject;
use crate::roster::{Client, SessionHandle};

/// A dynamically typed value read from or passed to the host.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Object(Arc<HostObject>),
    Client(Client),
    Session(SessionHandle),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Arc<HostObject>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the carried type, for logging
    pub fn type_label(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int16(_) => "i16",
            Value::Int32(_) => "i32",
            Value::UInt32(_) => "u32",
            Value::Int64(_) => "i64",
            Value::Float32(_) => "f32",
            Value::Float64(_) => "f64",
            Value::Str(_) => "string",
            Value::Object(obj) => obj.type_name(),
            Value::Client(_) => "client",
            Value::Session(_) => "session",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::Int16(v) => write!(f, "Int16({v})"),
            Value::Int32(v) => write!(f, "Int32({v})"),
            Value::UInt32(v) => write!(f, "UInt32({v})"),
            Value::Int64(v) => write!(f, "Int64({v})"),
            Value::Float32(v) => write!(f, "Float32({v})"),
            Value::Float64(v) => write!(f, "Float64({v})"),
            Value::Str(v) => write!(f, "Str({v:?})"),
            Value::Object(obj) => write!(f, "Object({})", obj.type_name()),
            Value::Client(c) => write!(f, "Client({})", c.id),
            Value::Session(s) => write!(f, "Session({})", s.0),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Arc<HostObject>> for Value {
    fn from(obj: Arc<HostObject>) -> Self {
        Value::Object(obj)
    }
}
