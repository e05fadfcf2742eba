// Heart-rate producers — the synthetic sensor feeding the wrist relay
//
// On real hardware a sensor driver invokes the relay callback from its
// own context; this module provides the mock generator the original
// device setup runs with, emitting random values at a fixed cadence.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Delay between samples.
pub const SAMPLE_INTERVAL_MS: u64 = 2000;

/// Minimum generated heart rate.
pub const MIN_HEART_RATE: u32 = 80;

/// Maximum generated heart rate.
pub const MAX_HEART_RATE: u32 = 120;

#[derive(Debug, Error, Clone)]
pub enum SensorError {
    #[error("invalid sensor config: {0}")]
    InvalidConfig(String),
}

/// Sampling cadence and value bounds for the mock generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Milliseconds between samples
    pub interval_ms: u64,
    /// Inclusive lower bound of generated values
    pub min_rate: u32,
    /// Inclusive upper bound of generated values
    pub max_rate: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            interval_ms: SAMPLE_INTERVAL_MS,
            min_rate: MIN_HEART_RATE,
            max_rate: MAX_HEART_RATE,
        }
    }
}

impl SensorConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), SensorError> {
        if self.interval_ms == 0 {
            return Err(SensorError::InvalidConfig(
                "interval_ms must be nonzero".to_string(),
            ));
        }
        if self.min_rate > self.max_rate {
            return Err(SensorError::InvalidConfig(format!(
                "min_rate {} exceeds max_rate {}",
                self.min_rate, self.max_rate
            )));
        }
        Ok(())
    }
}

/// Generates random heart rates on its own task.
///
/// Consecutive duplicates are legal output; the wrist relay dedupes.
pub struct MockHeartRateSensor {
    config: SensorConfig,
}

impl MockHeartRateSensor {
    pub fn new(config: SensorConfig) -> Result<Self, SensorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Spawn the sampling task. The first sample fires immediately, then
    /// one every `interval_ms`. Must be called within a tokio runtime.
    pub fn start<F>(&self, mut on_sample: F) -> SensorHandle
    where
        F: FnMut(u32) + Send + 'static,
    {
        let config = self.config.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(config.interval_ms));
            loop {
                ticker.tick().await;
                let value = rand::thread_rng().gen_range(config.min_rate..=config.max_rate);
                tracing::debug!(value, "generated heart rate sample");
                on_sample(value);
            }
        });
        SensorHandle { task }
    }
}

/// Handle to a running sampler; dropping it stops the sampling task.
pub struct SensorHandle {
    task: JoinHandle<()>,
}

impl SensorHandle {
    /// Stop sampling.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SensorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
