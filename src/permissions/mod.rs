mod bridge;
mod channel;
mod provider;
mod state;

pub use bridge::{methods, MethodReply, MicrophoneBridge, ReplyContext, ReplyValue};
pub use channel::{
    initialize_microphone_channel, microphone_channel, MicrophoneChannel, MICROPHONE_CHANNEL,
};
pub use provider::{MicrophonePermission, SystemMicrophone};
pub use state::{status_code, MicPermission};
