use serde::{Deserialize, Serialize};

/// Raw status codes shared with the platform shims.
///
/// The Swift side returns these from `fisiomap_microphone_status`; keep the
/// two lists in sync when adding a platform.
pub mod status_code {
    pub const UNDETERMINED: i32 = 0;
    pub const DENIED: i32 = 1;
    pub const GRANTED: i32 = 2;
}

/// Platform-independent microphone permission state.
///
/// `checkMicrophonePermission` replies with the lowercase string form, so
/// the serde renaming here is wire-visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MicPermission {
    Granted,
    Denied,
    Undetermined,
}

impl MicPermission {
    /// Translate a raw platform status code.
    ///
    /// Total over all of `i32`: codes this build does not know about fold
    /// to `Undetermined` instead of surfacing as an error.
    pub fn from_status_code(code: i32) -> Self {
        match code {
            status_code::GRANTED => MicPermission::Granted,
            status_code::DENIED => MicPermission::Denied,
            status_code::UNDETERMINED => MicPermission::Undetermined,
            _ => MicPermission::Undetermined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MicPermission::Granted => "granted",
            MicPermission::Denied => "denied",
            MicPermission::Undetermined => "undetermined",
        }
    }
}
