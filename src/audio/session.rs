// Playback session: the output device and config picked once at startup

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{HostId, SupportedStreamConfig};

use super::AudioError;

/// Default output device of the default host, resolved once.
///
/// Only the host id, device name and config are kept. The output thread
/// that owns the stream looks the device up again by that name.
#[derive(Clone)]
pub struct AudioSession {
    host_id: HostId,
    device_name: String,
    config: SupportedStreamConfig,
}

impl AudioSession {
    pub fn activate() -> Result<Self, AudioError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::SessionActivation("no output device available".into()))?;

        let config = device.default_output_config().map_err(|e| {
            AudioError::SessionActivation(format!("failed to get default output config: {}", e))
        })?;

        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        tracing::info!(
            host = host.id().name(),
            device = %device_name,
            sample_rate = config.sample_rate().0,
            channels = config.channels(),
            "Audio session active"
        );

        Ok(Self {
            host_id: host.id(),
            device_name,
            config,
        })
    }

    pub fn config(&self) -> &SupportedStreamConfig {
        &self.config
    }

    /// The device picked at activation, or the host's current default
    /// when it has gone away
    pub(crate) fn device(&self) -> Result<cpal::Device, AudioError> {
        let host = cpal::host_from_id(self.host_id)
            .map_err(|e| AudioError::Output(format!("audio host unavailable: {}", e)))?;

        let named = host
            .output_devices()
            .ok()
            .and_then(|devices| find_named(devices, &self.device_name, |d| d.name().ok()));
        if let Some(device) = named {
            return Ok(device);
        }

        tracing::warn!(device = %self.device_name, "Session device not found, using default");
        host.default_output_device()
            .ok_or_else(|| AudioError::Output("no output device available".into()))
    }
}

fn find_named<T>(
    items: impl IntoIterator<Item = T>,
    name: &str,
    name_of: impl Fn(&T) -> Option<String>,
) -> Option<T> {
    items
        .into_iter()
        .find(|item| name_of(item).as_deref() == Some(name))
}
