use std::sync::{Arc, Weak};

use crate::logger::{debug, Component};

use super::provider::MicrophonePermission;
use super::state::MicPermission;

/// Method names recognized on the microphone channel.
pub mod methods {
    pub const REQUEST_MICROPHONE_PERMISSION: &str = "requestMicrophonePermission";
    pub const CHECK_MICROPHONE_PERMISSION: &str = "checkMicrophonePermission";
}

/// Value a method call resolves with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyValue {
    /// `requestMicrophonePermission`: true = granted, false = denied.
    Granted(bool),
    /// `checkMicrophonePermission`: current permission state.
    Status(MicPermission),
    /// Any method name the channel does not handle.
    NotImplemented,
}

/// Single-use completion handle for one in-flight method call.
///
/// `resolve` consumes the handle, so a reply cannot be delivered twice.
pub struct MethodReply {
    deliver: Box<dyn FnOnce(ReplyValue) + Send>,
}

impl MethodReply {
    pub fn new<F>(deliver: F) -> Self
    where
        F: FnOnce(ReplyValue) + Send + 'static,
    {
        Self {
            deliver: Box::new(deliver),
        }
    }

    pub fn resolve(self, value: ReplyValue) {
        (self.deliver)(value);
    }
}

/// Execution context replies must be delivered on.
///
/// The production context schedules onto the app's main thread; tests
/// substitute recording or dedicated-thread contexts.
pub trait ReplyContext: Send + Sync {
    fn run(&self, task: Box<dyn FnOnce() + Send>);
}

/// Routes named method calls from the UI to the permission provider and
/// delivers exactly one reply per call.
///
/// The bridge holds only a weak reference to its owning context. If the
/// owner is torn down while a request is in flight, the completion becomes
/// a no-op instead of touching a dead context.
pub struct MicrophoneBridge {
    provider: Arc<dyn MicrophonePermission>,
    owner: Weak<dyn ReplyContext>,
}

impl MicrophoneBridge {
    pub fn new(provider: Arc<dyn MicrophonePermission>, owner: Weak<dyn ReplyContext>) -> Self {
        Self { provider, owner }
    }

    pub fn dispatch(&self, method: &str, reply: MethodReply) {
        match method {
            methods::REQUEST_MICROPHONE_PERMISSION => self.request_permission(reply),
            methods::CHECK_MICROPHONE_PERMISSION => self.check_permission(reply),
            _ => {
                debug(
                    Component::Bridge,
                    &format!("Unhandled method call: {}", method),
                );
                reply.resolve(ReplyValue::NotImplemented);
            }
        }
    }

    /// Asynchronous path. The provider completes on a platform-chosen
    /// thread; the reply is marshaled onto the owner context before it is
    /// resolved.
    fn request_permission(&self, reply: MethodReply) {
        let owner = Weak::clone(&self.owner);
        self.provider
            .request_record_permission(Box::new(move |granted| {
                match owner.upgrade() {
                    Some(context) => {
                        context.run(Box::new(move || reply.resolve(ReplyValue::Granted(granted))));
                    }
                    None => {
                        // No caller left to observe the result.
                        debug(
                            Component::Bridge,
                            "Owner gone before permission completion, dropping reply",
                        );
                    }
                }
            }));
    }

    /// Synchronous path. The status query never leaves the calling thread,
    /// so the reply resolves inline with no context hop.
    fn check_permission(&self, reply: MethodReply) {
        let state = MicPermission::from_status_code(self.provider.record_permission());
        reply.resolve(ReplyValue::Status(state));
    }
}
