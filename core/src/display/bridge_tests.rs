//! Tests for backend discovery and call binding
//!
//! Verifies that:
//! - Discovery filters types by name and honours method priority
//! - Discovery runs once and never changes its answer
//! - Parameters bind by type and name, and unknown shapes are refused
//! - Backend failures surface only as `false`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{DiscoveredRenderer, OverlayRenderer, bind_show_args, discover};
use crate::host::{HostError, HostMethod, HostModule, HostRuntime, HostType, Param, ParamType, Value};
use crate::roster::{Client, ClientRole, SessionHandle};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

type Calls = Arc<Mutex<Vec<Vec<Value>>>>;

fn spectator() -> Client {
    Client::new(4, "ghost", ClientRole::Spectator)
}

/// Static method that records its arguments
fn recording(name: &str, params: Vec<Param>, calls: &Calls) -> HostMethod {
    let calls = Arc::clone(calls);
    HostMethod::new_static(name, params, move |args| {
        calls.lock().unwrap().push(args.to_vec());
        Ok(Value::Null)
    })
}

/// Static method that only counts calls
fn counting(name: &str, params: Vec<Param>, count: &Arc<AtomicUsize>) -> HostMethod {
    let count = Arc::clone(count);
    HostMethod::new_static(name, params, move |_| {
        count.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    })
}

fn noop(name: &str) -> HostMethod {
    HostMethod::new_static(name, Vec::new(), |_| Ok(Value::Null))
}

fn standard_show_params() -> Vec<Param> {
    vec![
        Param::new("player", ParamType::Client),
        Param::new("id", ParamType::String),
        Param::new("text", ParamType::String),
        Param::new("duration", ParamType::Float32),
    ]
}

fn runtime_with(module: HostModule) -> Arc<HostRuntime> {
    let runtime = Arc::new(HostRuntime::new());
    runtime.load(module);
    runtime
}

// ═══════════════════════════════════════════════════════════════════════════
// Discovery
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_module_disables_bridge() {
    let renderer = DiscoveredRenderer::new(Arc::new(HostRuntime::new()), "RueI");

    assert!(!renderer.try_show(&spectator(), "respawn_timer", "01:15", 2.0));
    renderer.try_hide_all("respawn_timer");

    let discovery = renderer.discovery();
    assert!(discovery.module.is_none());
    assert!(discovery.show.is_none());
    assert!(discovery.hide_all.is_none());
}

#[test]
fn test_module_name_matches_ignoring_case() {
    let runtime = runtime_with(
        HostModule::new("RUEI").with_type(HostType::new("RueI.API.HintOverlay").with_method(noop("Show"))),
    );
    let discovery = discover(&runtime, "ruei");
    assert_eq!(discovery.module.as_deref(), Some("RUEI"));
    assert!(discovery.show.is_some());
}

#[test]
fn test_only_display_types_are_searched() {
    let runtime = runtime_with(
        HostModule::new("Backend")
            .with_type(HostType::new("Backend.Network.Socket").with_method(noop("Show")))
            .with_type(HostType::new("Backend.HudService").with_method(noop("Display"))),
    );
    let discovery = discover(&runtime, "Backend");
    let show = discovery.show.expect("show entry point");
    assert_eq!(show.type_name, "Backend.HudService");
    assert_eq!(show.method.name, "Display");
}

#[test]
fn test_method_priority_within_type() {
    let runtime = runtime_with(
        HostModule::new("RueI").with_type(
            HostType::new("RueI.Hints")
                .with_method(noop("Render"))
                .with_method(noop("show")),
        ),
    );
    let show = discover(&runtime, "RueI").show.unwrap();
    assert_eq!(show.method.name, "show");
}

#[test]
fn test_first_matching_type_wins() {
    let runtime = runtime_with(
        HostModule::new("RueI")
            .with_type(HostType::new("RueI.OverlayA").with_method(noop("Render")))
            .with_type(HostType::new("RueI.OverlayB").with_method(noop("Show"))),
    );
    let show = discover(&runtime, "RueI").show.unwrap();
    assert_eq!(show.type_name, "RueI.OverlayA");
}

#[test]
fn test_instance_methods_are_ignored() {
    let runtime = runtime_with(
        HostModule::new("RueI").with_type(
            HostType::new("RueI.Display")
                .with_method(HostMethod::new_instance("Show", Vec::new(), |_| Ok(Value::Null))),
        ),
    );
    assert!(discover(&runtime, "RueI").show.is_none());
}

#[test]
fn test_hide_entry_point_found_separately() {
    let runtime = runtime_with(
        HostModule::new("RueI")
            .with_type(HostType::new("RueI.HintA").with_method(noop("Show")))
            .with_type(HostType::new("RueI.HintB").with_method(noop("ClearAll"))),
    );
    let discovery = discover(&runtime, "RueI");
    assert_eq!(discovery.show.unwrap().type_name, "RueI.HintA");
    let hide = discovery.hide_all.unwrap();
    assert_eq!(hide.type_name, "RueI.HintB");
    assert_eq!(hide.method.name, "ClearAll");
}

#[test]
fn test_unreadable_module_finds_nothing() {
    let runtime = runtime_with(HostModule::unreadable("RueI", "type load failed"));
    let discovery = discover(&runtime, "RueI");
    assert_eq!(discovery.module.as_deref(), Some("RueI"));
    assert!(discovery.show.is_none());
}

#[test]
fn test_discovery_is_memoized() {
    let runtime = runtime_with(
        HostModule::new("RueI").with_type(HostType::new("RueI.HintOverlay").with_method(noop("Show"))),
    );
    let renderer = DiscoveredRenderer::new(Arc::clone(&runtime), "RueI");

    let first = renderer.discovery() as *const _;
    let first_method = Arc::clone(&renderer.discovery().show.as_ref().unwrap().method);

    // A later, better-looking module must not change the cached answer
    runtime.unload("RueI");
    runtime.load(
        HostModule::new("RueI").with_type(HostType::new("RueI.Hud").with_method(noop("ShowHint"))),
    );

    let second = renderer.discovery() as *const _;
    assert_eq!(first, second);
    let second_method = &renderer.discovery().show.as_ref().unwrap().method;
    assert!(Arc::ptr_eq(&first_method, second_method));
}

#[test]
fn test_backend_loaded_after_first_use_is_not_picked_up() {
    let runtime = Arc::new(HostRuntime::new());
    let renderer = DiscoveredRenderer::new(Arc::clone(&runtime), "RueI");
    assert!(!renderer.has_show_entry_point());

    runtime.load(
        HostModule::new("RueI").with_type(HostType::new("RueI.HintOverlay").with_method(noop("Show"))),
    );
    assert!(!renderer.has_show_entry_point());
}

// ═══════════════════════════════════════════════════════════════════════════
// Binding
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_bind_client_channel_text_duration() {
    let args = bind_show_args(&standard_show_params(), &spectator(), "respawn_timer", "Respawn in 01:15", 2.0)
        .unwrap();

    assert_eq!(args.len(), 4);
    assert!(matches!(&args[0], Value::Client(c) if c.id.0 == 4));
    assert_eq!(args[1].as_str(), Some("respawn_timer"));
    assert_eq!(args[2].as_str(), Some("Respawn in 01:15"));
    assert!(matches!(args[3], Value::Float32(d) if d == 2.0));
}

#[test]
fn test_bind_session_and_integer_duration() {
    let params = vec![
        Param::new("hub", ParamType::Session),
        Param::new("content", ParamType::String),
        Param::new("seconds", ParamType::Int32),
    ];
    let args = bind_show_args(&params, &spectator(), "chan", "hello", 2.5).unwrap();

    assert!(matches!(args[0], Value::Session(SessionHandle(4))));
    assert_eq!(args[1].as_str(), Some("hello"));
    assert!(matches!(args[2], Value::Int32(3)));
}

#[test]
fn test_bind_any_object_takes_client_and_double() {
    let params = vec![
        Param::new("target", ParamType::Any),
        Param::new("hintKey", ParamType::String),
        Param::new("duration", ParamType::Float64),
    ];
    let args = bind_show_args(&params, &spectator(), "chan", "hello", 1.5).unwrap();

    assert!(matches!(args[0], Value::Client(_)));
    assert_eq!(args[1].as_str(), Some("chan"));
    assert!(matches!(args[2], Value::Float64(d) if d == 1.5));
}

#[test]
fn test_bind_refuses_unknown_type() {
    let params = vec![
        Param::new("player", ParamType::Client),
        Param::new("priority", ParamType::Other("HintPriority".into())),
    ];
    assert!(bind_show_args(&params, &spectator(), "chan", "hello", 2.0).is_none());
}

#[test]
fn test_unbindable_show_is_never_invoked() {
    let count = Arc::new(AtomicUsize::new(0));
    let params = vec![
        Param::new("player", ParamType::Client),
        Param::new("text", ParamType::String),
        Param::new("layer", ParamType::Other("HintLayer".into())),
    ];
    let runtime = runtime_with(
        HostModule::new("RueI")
            .with_type(HostType::new("RueI.HintOverlay").with_method(counting("Show", params, &count))),
    );
    let renderer = DiscoveredRenderer::new(runtime, "RueI");

    assert!(!renderer.try_show(&spectator(), "respawn_timer", "00:10", 2.0));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Invocation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_try_show_invokes_backend() {
    let calls: Calls = Arc::default();
    let runtime = runtime_with(HostModule::new("RueI").with_type(
        HostType::new("RueI.API.HintOverlay").with_method(recording("Show", standard_show_params(), &calls)),
    ));
    let renderer = DiscoveredRenderer::new(runtime, "RueI");

    assert!(renderer.try_show(&spectator(), "respawn_timer", "Respawn in 00:42", 2.0));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][2].as_str(), Some("Respawn in 00:42"));
}

#[test]
fn test_backend_error_reports_false() {
    let method = HostMethod::new_static("Show", standard_show_params(), |_| {
        Err(HostError::Invocation {
            method: "Show".into(),
            reason: "display not ready".into(),
        })
    });
    let runtime =
        runtime_with(HostModule::new("RueI").with_type(HostType::new("RueI.Hint").with_method(method)));
    let renderer = DiscoveredRenderer::new(runtime, "RueI");

    assert!(!renderer.try_show(&spectator(), "respawn_timer", "x", 2.0));
}

#[test]
fn test_backend_panic_reports_false() {
    let method = HostMethod::new_static("Show", standard_show_params(), |_| panic!("backend crashed"));
    let runtime =
        runtime_with(HostModule::new("RueI").with_type(HostType::new("RueI.Hint").with_method(method)));
    let renderer = DiscoveredRenderer::new(runtime, "RueI");

    assert!(!renderer.try_show(&spectator(), "respawn_timer", "x", 2.0));
    // Still usable afterwards
    assert!(!renderer.try_show(&spectator(), "respawn_timer", "y", 2.0));
}

#[test]
fn test_hide_all_passes_channel_id() {
    let calls: Calls = Arc::default();
    let runtime = runtime_with(
        HostModule::new("RueI").with_type(
            HostType::new("RueI.HintOverlay")
                .with_method(noop("Show"))
                .with_method(recording("HideAll", vec![Param::new("id", ParamType::String)], &calls)),
        ),
    );
    let renderer = DiscoveredRenderer::new(runtime, "RueI");
    renderer.try_hide_all("respawn_timer");

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].as_str(), Some("respawn_timer"));
}

#[test]
fn test_parameterless_hide_all_is_invoked() {
    let count = Arc::new(AtomicUsize::new(0));
    let runtime = runtime_with(HostModule::new("RueI").with_type(
        HostType::new("RueI.Hud").with_method(counting("RemoveAll", Vec::new(), &count)),
    ));
    DiscoveredRenderer::new(runtime, "RueI").try_hide_all("respawn_timer");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_hide_all_with_unknown_params_is_skipped() {
    let count = Arc::new(AtomicUsize::new(0));
    let params = vec![Param::new("player", ParamType::Client)];
    let runtime = runtime_with(HostModule::new("RueI").with_type(
        HostType::new("RueI.Hud").with_method(counting("HideAll", params, &count)),
    ));
    DiscoveredRenderer::new(runtime, "RueI").try_hide_all("respawn_timer");
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
