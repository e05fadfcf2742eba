//! Relay service — the lifecycle host for one endpoint
//!
//! Hosting code (the demo binary, or platform glue on a real device)
//! creates a `RelayService` for its role, calls `start()`, and tears it
//! down with `stop()`. The service owns the relay state for the process
//! lifetime; nothing survives teardown.

use crate::channel::MessageChannel;
use crate::relay::{AlertSink, HandheldRelay, WristRelay};
use crate::sensor::{MockHeartRateSensor, SensorConfig, SensorHandle};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during service lifecycle operations
#[derive(Debug, Error, Clone)]
pub enum ServiceError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("service in invalid state: {0}")]
    InvalidState(String),
}

/// Which half of the pair this service hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceRole {
    /// Wrist device: samples values, broadcasts them, surfaces the alert
    Wrist,
    /// Handheld: displays received values, sends the one-shot warning
    Handheld,
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceRole::Wrist => write!(f, "wrist"),
            DeviceRole::Handheld => write!(f, "handheld"),
        }
    }
}

/// Current state of the relay service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    Stopped,
    Running,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Stopped => write!(f, "Stopped"),
            ServiceState::Running => write!(f, "Running"),
        }
    }
}

enum RelayEndpoint {
    Wrist(Arc<WristRelay>),
    Handheld(Arc<HandheldRelay>),
}

/// Hosts one relay endpoint and its background tasks.
pub struct RelayService {
    role: DeviceRole,
    state: RwLock<ServiceState>,
    relay: RelayEndpoint,
    sensor_config: SensorConfig,
    sampler: Mutex<Option<SensorHandle>>,
}

impl RelayService {
    /// Build a wrist-side service. Starting it runs the mock sensor with
    /// the given config, feeding the relay at the sensor's own cadence.
    pub fn wrist(
        channel: MessageChannel,
        alerts: Arc<dyn AlertSink>,
        sensor_config: SensorConfig,
    ) -> Result<Self, ServiceError> {
        sensor_config
            .validate()
            .map_err(|e| ServiceError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            role: DeviceRole::Wrist,
            state: RwLock::new(ServiceState::Stopped),
            relay: RelayEndpoint::Wrist(WristRelay::new(channel, alerts)),
            sensor_config,
            sampler: Mutex::new(None),
        })
    }

    /// Build a handheld-side service. Purely reactive: no sampler.
    pub fn handheld(channel: MessageChannel) -> Self {
        Self {
            role: DeviceRole::Handheld,
            state: RwLock::new(ServiceState::Stopped),
            relay: RelayEndpoint::Handheld(HandheldRelay::new(channel)),
            sensor_config: SensorConfig::default(),
            sampler: Mutex::new(None),
        }
    }

    /// Start the service. Must be called within a tokio runtime.
    ///
    /// Transitions: Stopped -> Running
    pub fn start(&self) -> Result<(), ServiceError> {
        let mut state = self.state.write();
        if *state == ServiceState::Running {
            return Err(ServiceError::InvalidState(
                "service already running".to_string(),
            ));
        }

        if let RelayEndpoint::Wrist(relay) = &self.relay {
            let sensor = MockHeartRateSensor::new(self.sensor_config.clone())
                .map_err(|e| ServiceError::InvalidConfig(e.to_string()))?;
            let relay = relay.clone();
            let handle = sensor.start(move |value| relay.on_new_value(value));
            *self.sampler.lock() = Some(handle);
        }

        *state = ServiceState::Running;
        tracing::info!(role = %self.role, "relay service started");
        Ok(())
    }

    /// Stop the service, aborting the sampler if one is running.
    ///
    /// Transitions: Running -> Stopped
    pub fn stop(&self) -> Result<(), ServiceError> {
        let mut state = self.state.write();
        if *state == ServiceState::Stopped {
            return Err(ServiceError::InvalidState(
                "service already stopped".to_string(),
            ));
        }

        if let Some(handle) = self.sampler.lock().take() {
            handle.stop();
        }

        *state = ServiceState::Stopped;
        tracing::info!(role = %self.role, "relay service stopped");
        Ok(())
    }

    /// Get current service state
    pub fn state(&self) -> ServiceState {
        *self.state.read()
    }

    pub fn role(&self) -> DeviceRole {
        self.role
    }

    /// The hosted wrist relay, if this is a wrist service.
    pub fn wrist_relay(&self) -> Option<Arc<WristRelay>> {
        match &self.relay {
            RelayEndpoint::Wrist(relay) => Some(relay.clone()),
            RelayEndpoint::Handheld(_) => None,
        }
    }

    /// The hosted handheld relay, if this is a handheld service.
    pub fn handheld_relay(&self) -> Option<Arc<HandheldRelay>> {
        match &self.relay {
            RelayEndpoint::Wrist(_) => None,
            RelayEndpoint::Handheld(relay) => Some(relay.clone()),
        }
    }
}
