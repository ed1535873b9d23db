use std::sync::{Arc, OnceLock, Weak};

use tauri::AppHandle;

use crate::logger::{error, info, Component};

use super::bridge::{MethodReply, MicrophoneBridge, ReplyContext};
use super::provider::{MicrophonePermission, SystemMicrophone};

/// Name of the UI-facing microphone channel.
pub const MICROPHONE_CHANNEL: &str = "com.fisiomap.pro/microphone";

/// Delivers replies on the app's main thread.
struct MainThreadContext {
    app_handle: AppHandle,
}

impl ReplyContext for MainThreadContext {
    fn run(&self, task: Box<dyn FnOnce() + Send>) {
        if let Err(e) = self.app_handle.run_on_main_thread(task) {
            error(
                Component::Bridge,
                &format!("Failed to schedule reply on main thread: {}", e),
            );
        }
    }
}

/// The named channel: the bridge plus the owner context it replies on.
///
/// The strong context reference lives here; the bridge itself only holds a
/// weak one.
pub struct MicrophoneChannel {
    bridge: MicrophoneBridge,
    _context: Arc<MainThreadContext>,
}

impl MicrophoneChannel {
    fn new(app_handle: AppHandle) -> Self {
        let context = Arc::new(MainThreadContext { app_handle });
        let owner: Weak<dyn ReplyContext> = Arc::downgrade(&context);
        let provider: Arc<dyn MicrophonePermission> = Arc::new(SystemMicrophone::new());

        Self {
            bridge: MicrophoneBridge::new(provider, owner),
            _context: context,
        }
    }

    pub fn invoke(&self, method: &str, reply: MethodReply) {
        self.bridge.dispatch(method, reply);
    }
}

// Global channel instance, established once at app start and held for the
// lifetime of the process.
static MICROPHONE: OnceLock<MicrophoneChannel> = OnceLock::new();

/// Register the microphone channel. Called from the app's setup hook.
pub fn initialize_microphone_channel(app_handle: AppHandle) {
    if MICROPHONE.set(MicrophoneChannel::new(app_handle)).is_err() {
        info(
            Component::Bridge,
            "Microphone channel already initialized, skipping",
        );
        return;
    }

    info(
        Component::Bridge,
        &format!("Microphone channel registered: {}", MICROPHONE_CHANNEL),
    );
}

/// Channel handle, if `initialize_microphone_channel` has run.
pub fn microphone_channel() -> Option<&'static MicrophoneChannel> {
    MICROPHONE.get()
}
