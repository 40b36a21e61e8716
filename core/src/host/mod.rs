//! Host runtime model
//!
//! The respawn manager and the hint backend live in modules the plugin is never
//! linked against. The host registers those modules here, and the resolver and
//! bridge discover what they need by name at runtime:
//!
//! ```text
//! HostRuntime
//!   └── HostModule ("Assembly-CSharp", "RueI", ...)
//!         └── HostType ("Respawning.RespawnManager", "RueI.API.HintOverlay", ...)
//!               ├── static members  (HostObject: properties + fields)
//!               └── methods         (HostMethod: declared params + body)
//! ```

mod error;
mod module;
mod object;
mod runtime;
mod value;

pub use error::HostError;
pub use module::{HostMethod, HostModule, HostType, MethodBody, Param, ParamType};
pub use object::{Accessor, HostObject};
pub use runtime::HostRuntime;
pub use value::Value;
