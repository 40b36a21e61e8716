use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use respawn_types::TimeSourceConfig;

use super::{RawNumber, RemainingSecondsSource, RemainingTime, normalize};
use crate::host::{HostError, HostObject, HostRuntime, Value};

/// Best-effort reader for the respawn manager singleton.
///
/// Every call walks the full path (module, type, singleton, candidates), so the
/// value shows up as soon as the module is loaded and tracks version changes
/// without a restart.
#[derive(Debug, Clone)]
pub struct ProbingTimeSource {
    runtime: Arc<HostRuntime>,
    config: TimeSourceConfig,
}

impl ProbingTimeSource {
    pub fn new(runtime: Arc<HostRuntime>, config: TimeSourceConfig) -> Self {
        Self { runtime, config }
    }

    pub fn config(&self) -> &TimeSourceConfig {
        &self.config
    }

    /// Resolve the current value. `None` if any step of the lookup fails.
    pub fn resolve(&self) -> Option<RemainingTime> {
        let Some(module) = self.runtime.find_module(&self.config.module) else {
            tracing::trace!(module = %self.config.module, "time source module not loaded");
            return None;
        };
        let Some(ty) = module.find_type(&self.config.type_name) else {
            tracing::trace!(type_name = %self.config.type_name, "time source type not found");
            return None;
        };
        let singleton = read_static_object(ty.statics(), &self.config.singleton)?;

        self.config
            .candidates
            .iter()
            .find_map(|name| read_number(&singleton, name))
            .map(normalize)
    }
}

impl RemainingSecondsSource for ProbingTimeSource {
    fn remaining_seconds(&self) -> RemainingTime {
        // Getters are host code and may panic; that still counts as "unknown".
        panic::catch_unwind(AssertUnwindSafe(|| self.resolve()))
            .ok()
            .flatten()
            .unwrap_or(RemainingTime::ZERO)
    }
}

/// Static property, then static field, holding a non-null object
fn read_static_object(statics: &HostObject, name: &str) -> Option<Arc<HostObject>> {
    let value = match statics.read_property(name) {
        Some(result) => ok_or_trace(result, name)?,
        None => ok_or_trace(statics.read_field(name)?, name)?,
    };
    value.as_object().cloned()
}

/// Instance property, then field, with a numeric value
fn read_number(obj: &HostObject, name: &str) -> Option<RawNumber> {
    let from_property = obj
        .read_property(name)
        .and_then(|r| ok_or_trace(r, name))
        .and_then(|v| RawNumber::from_value(&v));

    from_property.or_else(|| {
        obj.read_field(name)
            .and_then(|r| ok_or_trace(r, name))
            .and_then(|v| RawNumber::from_value(&v))
    })
}

fn ok_or_trace(result: Result<Value, HostError>, member: &str) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!(member, error = %e, "time source member unreadable");
            None
        }
    }
}
