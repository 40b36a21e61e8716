//! Runtime-discovered hint backend
//!
//! The backend module is searched once, on first use, for a static "show"
//! method and an optional static "hide all" method. Calls are then adapted to
//! whatever parameter list the discovered method declares. Anything that does
//! not bind cleanly is refused so the caller can fall back.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use super::OverlayRenderer;
use crate::host::{HostMethod, HostRuntime, HostType, Param, ParamType, Value};
use crate::roster::Client;

/// Type-name substrings that mark a type as display related (lowercase)
const DISPLAY_TYPE_HINTS: [&str; 4] = ["hint", "hud", "overlay", "ui"];

/// Show entry point names, highest priority first
const SHOW_METHOD_NAMES: [&str; 4] = ["Show", "ShowHint", "Display", "Render"];

/// Hide-all entry point names, highest priority first
const HIDE_METHOD_NAMES: [&str; 3] = ["HideAll", "ClearAll", "RemoveAll"];

/// String parameter names containing any of these receive the channel id (lowercase)
const CHANNEL_PARAM_HINTS: [&str; 4] = ["id", "key", "name", "channel"];

/// A discovered static method and the type that declares it
#[derive(Debug, Clone)]
pub struct EntryPoint {
    pub type_name: String,
    pub method: Arc<HostMethod>,
}

/// Outcome of the one-time backend search
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Name of the matched module, if one was loaded
    pub module: Option<String>,
    pub show: Option<EntryPoint>,
    pub hide_all: Option<EntryPoint>,
}

/// Search `runtime` for a backend module and its entry points.
pub fn discover(runtime: &HostRuntime, module_name: &str) -> Discovery {
    let Some(module) = runtime.find_module_ignore_case(module_name) else {
        tracing::info!(module = module_name, "Hint backend not loaded, using fallback display");
        return Discovery::default();
    };

    let types: Vec<&Arc<HostType>> = match module.types() {
        Ok(types) => types
            .iter()
            .filter(|t| is_display_type(&t.full_name))
            .collect(),
        Err(e) => {
            tracing::warn!(module = %module.name, error = %e, "Hint backend types unreadable");
            return Discovery {
                module: Some(module.name.clone()),
                ..Discovery::default()
            };
        }
    };

    let show = find_entry_point(&types, &SHOW_METHOD_NAMES);
    let hide_all = find_entry_point(&types, &HIDE_METHOD_NAMES);

    match &show {
        Some(entry) => {
            let bindable = entry.method.params.iter().all(|p| show_slot(p).is_some());
            tracing::info!(
                module = %module.name,
                type_name = %entry.type_name,
                method = %entry.method.name,
                params = entry.method.params.len(),
                bindable,
                "Hint backend entry point found"
            );
        }
        None => {
            tracing::info!(module = %module.name, "Hint backend has no show entry point");
        }
    }

    Discovery {
        module: Some(module.name.clone()),
        show,
        hide_all,
    }
}

fn is_display_type(full_name: &str) -> bool {
    let lower = full_name.to_lowercase();
    DISPLAY_TYPE_HINTS.iter().any(|hint| lower.contains(hint))
}

/// First type (in enumeration order) exposing any of `names`; within a type, `names` order decides
fn find_entry_point(types: &[&Arc<HostType>], names: &[&str]) -> Option<EntryPoint> {
    types.iter().find_map(|ty| {
        names
            .iter()
            .find_map(|name| ty.find_static_method_ignore_case(name))
            .map(|method| EntryPoint {
                type_name: ty.full_name.clone(),
                method: Arc::clone(method),
            })
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameter Binding
// ─────────────────────────────────────────────────────────────────────────────

/// What a show parameter receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShowSlot {
    Target,
    Session,
    ChannelId,
    Text,
    DurationF32,
    DurationF64,
    DurationI32,
}

fn show_slot(param: &Param) -> Option<ShowSlot> {
    if param.ty.accepts_client() {
        return Some(ShowSlot::Target);
    }
    if param.ty.accepts_session() {
        return Some(ShowSlot::Session);
    }
    match &param.ty {
        ParamType::String => {
            let name = param.name.to_lowercase();
            if CHANNEL_PARAM_HINTS.iter().any(|hint| name.contains(hint)) {
                Some(ShowSlot::ChannelId)
            } else {
                Some(ShowSlot::Text)
            }
        }
        ParamType::Float32 => Some(ShowSlot::DurationF32),
        ParamType::Float64 => Some(ShowSlot::DurationF64),
        ParamType::Int32 => Some(ShowSlot::DurationI32),
        _ => None,
    }
}

/// Build the argument list for a show call. `None` if any parameter is unrecognised.
pub fn bind_show_args(
    params: &[Param],
    target: &Client,
    channel_id: &str,
    text: &str,
    duration_secs: f32,
) -> Option<Vec<Value>> {
    params
        .iter()
        .map(|param| {
            Some(match show_slot(param)? {
                ShowSlot::Target => Value::Client(target.clone()),
                ShowSlot::Session => Value::Session(target.session),
                ShowSlot::ChannelId => Value::Str(channel_id.to_string()),
                ShowSlot::Text => Value::Str(text.to_string()),
                ShowSlot::DurationF32 => Value::Float32(duration_secs),
                ShowSlot::DurationF64 => Value::Float64(f64::from(duration_secs)),
                ShowSlot::DurationI32 => Value::Int32(duration_secs.ceil() as i32),
            })
        })
        .collect()
}

/// Build the argument list for a hide-all call: strings get the channel id, nothing else binds.
pub fn bind_hide_args(params: &[Param], channel_id: &str) -> Option<Vec<Value>> {
    params
        .iter()
        .map(|param| match param.ty {
            ParamType::String => Some(Value::Str(channel_id.to_string())),
            _ => None,
        })
        .collect()
}

/// Invoke host code, absorbing both errors and panics
fn invoke_guarded(method: &HostMethod, args: &[Value]) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| method.invoke(args))) {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::debug!(method = %method.name, error = %e, "Hint backend call failed");
            false
        }
        Err(_) => {
            tracing::debug!(method = %method.name, "Hint backend call panicked");
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// Renderer bound to whatever the backend module exposes.
///
/// Discovery runs at most once per renderer. A backend loaded after the first
/// call is not picked up.
#[derive(Debug)]
pub struct DiscoveredRenderer {
    runtime: Arc<HostRuntime>,
    module_name: String,
    discovery: OnceLock<Discovery>,
}

impl DiscoveredRenderer {
    pub fn new(runtime: Arc<HostRuntime>, module_name: impl Into<String>) -> Self {
        Self {
            runtime,
            module_name: module_name.into(),
            discovery: OnceLock::new(),
        }
    }

    /// The memoized discovery result, searching on first access
    pub fn discovery(&self) -> &Discovery {
        self.discovery
            .get_or_init(|| discover(&self.runtime, &self.module_name))
    }

    pub fn has_show_entry_point(&self) -> bool {
        self.discovery().show.is_some()
    }
}

impl OverlayRenderer for DiscoveredRenderer {
    fn try_show(&self, target: &Client, channel_id: &str, text: &str, duration_secs: f32) -> bool {
        let Some(entry) = &self.discovery().show else {
            return false;
        };
        let Some(args) =
            bind_show_args(&entry.method.params, target, channel_id, text, duration_secs)
        else {
            tracing::trace!(method = %entry.method.name, "Show signature not bindable");
            return false;
        };
        invoke_guarded(&entry.method, &args)
    }

    fn try_hide_all(&self, channel_id: &str) {
        let Some(entry) = &self.discovery().hide_all else {
            return;
        };
        if let Some(args) = bind_hide_args(&entry.method.params, channel_id) {
            invoke_guarded(&entry.method, &args);
        }
    }
}
