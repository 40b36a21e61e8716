//! A stand-in game server
//!
//! Registers host modules shaped like the real ones: a respawn manager in
//! `Assembly-CSharp` whose countdown restarts every wave, and an optional
//! `RueI` hint backend. Everything shown ends up in the log.

use std::sync::Arc;
use std::time::Duration;

use respawn_core::display::{DisplayError, FallbackDisplay};
use respawn_core::host::{
    HostError, HostMethod, HostModule, HostObject, HostRuntime, HostType, Param, ParamType, Value,
};
use respawn_core::roster::{Client, ClientRole, InMemoryRoster};
use respawn_types::TimerConfig;
use tokio::time::Instant;

pub const HINT_OVERLAY_TYPE: &str = "RueI.API.HintOverlay";

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOptions {
    /// Length of a respawn wave
    pub respawn_in: Duration,
    pub spectators: u32,
    pub alive: u32,
    pub with_backend: bool,
    pub with_time_source: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            respawn_in: Duration::from_secs(75),
            spectators: 2,
            alive: 2,
            with_backend: true,
            with_time_source: true,
        }
    }
}

/// Countdown that restarts at `period` whenever it reaches zero
#[derive(Debug, Clone, Copy)]
struct RespawnWave {
    started: Instant,
    period: Duration,
}

impl RespawnWave {
    fn remaining_secs(&self) -> f32 {
        let period = self.period.as_secs_f32();
        if period <= 0.0 {
            return 0.0;
        }
        period - self.started.elapsed().as_secs_f32() % period
    }
}

pub struct SimulatedHost {
    pub runtime: Arc<HostRuntime>,
    pub roster: Arc<InMemoryRoster>,
}

impl SimulatedHost {
    pub fn new(options: &SimulationOptions, config: &TimerConfig) -> Self {
        let runtime = Arc::new(HostRuntime::new());
        if options.with_time_source {
            let wave = RespawnWave {
                started: Instant::now(),
                period: options.respawn_in,
            };
            runtime.load(respawn_manager_module(config, wave));
        }
        if options.with_backend {
            runtime.load(hint_overlay_module(&config.backend.module));
        }

        let roster = Arc::new(InMemoryRoster::new());
        let mut next_id = 1;
        for n in 0..options.spectators {
            roster.join(Client::new(next_id, format!("spectator-{n}"), ClientRole::Spectator));
            next_id += 1;
        }
        for n in 0..options.alive {
            roster.join(Client::new(next_id, format!("player-{n}"), ClientRole::Alive));
            next_id += 1;
        }

        tracing::info!(
            modules = runtime.modules().len(),
            clients = roster.len(),
            "Simulated host ready"
        );
        Self { runtime, roster }
    }
}

fn respawn_manager_module(config: &TimerConfig, wave: RespawnWave) -> HostModule {
    let source = &config.time_source;
    let member = source
        .candidates
        .first()
        .cloned()
        .unwrap_or_else(|| "TimeTillRespawn".to_string());

    let manager = HostObject::new(source.type_name.as_str())
        .with_property(member, move || Ok(Value::Float32(wave.remaining_secs())));
    let statics = HostObject::new(source.type_name.as_str())
        .with_property_value(source.singleton.as_str(), Value::Object(Arc::new(manager)));

    HostModule::new(source.module.as_str())
        .with_type(HostType::new(source.type_name.as_str()).with_statics(statics))
}

fn hint_overlay_module(name: &str) -> HostModule {
    let show = HostMethod::new_static(
        "Show",
        vec![
            Param::new("player", ParamType::Client),
            Param::new("id", ParamType::String),
            Param::new("text", ParamType::String),
            Param::new("duration", ParamType::Float32),
        ],
        |args| {
            let Some(Value::Client(player)) = args.first() else {
                return Err(HostError::Invocation {
                    method: "Show".to_string(),
                    reason: "first argument is not a client".to_string(),
                });
            };
            let channel = args.get(1).and_then(Value::as_str).unwrap_or_default();
            let text = args.get(2).and_then(Value::as_str).unwrap_or_default();
            tracing::info!(target: "rue_i", player = %player.nickname, channel, text, "Hint");
            Ok(Value::Null)
        },
    );
    let hide_all = HostMethod::new_static(
        "HideAll",
        vec![Param::new("id", ParamType::String)],
        |args| {
            let channel = args.first().and_then(Value::as_str).unwrap_or_default();
            tracing::info!(target: "rue_i", channel, "Hints cleared");
            Ok(Value::Null)
        },
    );

    HostModule::new(name).with_type(
        HostType::new(HINT_OVERLAY_TYPE)
            .with_method(show)
            .with_method(hide_all),
    )
}

/// Host hint primitive: logs what would have been broadcast
#[derive(Debug, Default)]
pub struct LoggingFallback;

impl FallbackDisplay for LoggingFallback {
    fn show(&self, target: &Client, text: &str, duration_secs: f32) -> Result<(), DisplayError> {
        tracing::info!(
            target: "broadcast",
            player = %target.nickname,
            duration_secs,
            text,
            "Hint"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use respawn_core::roster::ClientRoster;
    use respawn_core::time_source::{ProbingTimeSource, RemainingSecondsSource};

    #[tokio::test(start_paused = true)]
    async fn test_wave_counts_down_and_restarts() {
        let config = TimerConfig::default();
        let options = SimulationOptions {
            respawn_in: Duration::from_secs(10),
            ..SimulationOptions::default()
        };
        let host = SimulatedHost::new(&options, &config);
        let source = ProbingTimeSource::new(Arc::clone(&host.runtime), config.time_source.clone());

        assert_eq!(source.remaining_seconds().seconds(), 10);
        tokio::time::advance(Duration::from_millis(3500)).await;
        assert_eq!(source.remaining_seconds().seconds(), 7);
        tokio::time::advance(Duration::from_secs(7)).await;
        assert_eq!(source.remaining_seconds().seconds(), 10);
    }

    #[test]
    fn test_roster_and_modules_follow_options() {
        let options = SimulationOptions {
            spectators: 3,
            alive: 1,
            with_backend: false,
            ..SimulationOptions::default()
        };
        let host = SimulatedHost::new(&options, &TimerConfig::default());

        let snapshot = host.roster.snapshot();
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.iter().filter(|c| c.is_spectator()).count(), 3);
        assert!(host.runtime.find_module("RueI").is_none());
        assert!(host.runtime.find_module("Assembly-CSharp").is_some());
    }
}
