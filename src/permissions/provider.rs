#[cfg(not(target_os = "macos"))]
use super::state::status_code;

/// OS-level microphone permission capability.
///
/// `request_record_permission` completes exactly once, on whatever thread
/// the platform chooses. Marshaling the completion back to the caller is
/// the bridge's job, not the provider's.
pub trait MicrophonePermission: Send + Sync {
    /// Current raw platform status code (see `state::status_code`).
    fn record_permission(&self) -> i32;

    /// Show the system prompt if needed and complete with the grant result.
    fn request_record_permission(&self, on_complete: Box<dyn FnOnce(bool) + Send + 'static>);
}

/// Production provider backed by the OS audio subsystem.
pub struct SystemMicrophone;

impl SystemMicrophone {
    pub fn new() -> Self {
        SystemMicrophone
    }
}

impl Default for SystemMicrophone {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "macos")]
impl MicrophonePermission for SystemMicrophone {
    fn record_permission(&self) -> i32 {
        crate::macos::microphone_permission_status()
    }

    fn request_record_permission(&self, on_complete: Box<dyn FnOnce(bool) + Send + 'static>) {
        crate::macos::request_microphone_permission(on_complete);
    }
}

#[cfg(not(target_os = "macos"))]
impl MicrophonePermission for SystemMicrophone {
    fn record_permission(&self) -> i32 {
        use cpal::traits::HostTrait;

        // No permission API to ask outside macOS; probe for a usable input
        // device instead.
        let host = cpal::default_host();
        match host.default_input_device() {
            Some(_) => status_code::GRANTED,
            None => status_code::DENIED,
        }
    }

    fn request_record_permission(&self, on_complete: Box<dyn FnOnce(bool) + Send + 'static>) {
        // Nothing to prompt for; complete immediately with the probe result.
        on_complete(self.record_permission() == status_code::GRANTED);
    }
}
