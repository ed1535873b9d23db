use tokio::sync::oneshot;

use crate::logger::{info, Component};
use crate::permissions::{methods, microphone_channel, MethodReply, ReplyValue};

/// Dispatch one call over the microphone channel and wait for its reply.
async fn invoke_microphone(method: &str) -> Result<ReplyValue, String> {
    let channel =
        microphone_channel().ok_or_else(|| "Microphone channel not initialized".to_string())?;

    let (tx, rx) = oneshot::channel();
    channel.invoke(
        method,
        MethodReply::new(move |value| {
            let _ = tx.send(value);
        }),
    );

    rx.await
        .map_err(|_| "Microphone channel dropped the reply".to_string())
}

#[tauri::command]
pub async fn check_microphone_permission() -> Result<String, String> {
    match invoke_microphone(methods::CHECK_MICROPHONE_PERMISSION).await? {
        ReplyValue::Status(state) => Ok(state.as_str().to_string()),
        other => Err(format!("Unexpected reply to permission check: {:?}", other)),
    }
}

#[tauri::command]
pub async fn request_microphone_permission() -> Result<bool, String> {
    match invoke_microphone(methods::REQUEST_MICROPHONE_PERMISSION).await? {
        ReplyValue::Granted(granted) => {
            info(
                Component::Permissions,
                &format!("Microphone permission request completed: granted={}", granted),
            );
            Ok(granted)
        }
        other => Err(format!("Unexpected reply to permission request: {:?}", other)),
    }
}

#[tauri::command]
pub async fn open_system_preferences_audio() -> Result<(), String> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg("x-apple.systempreferences:com.apple.preference.security?Privacy_Microphone")
            .spawn()
            .map_err(|e| format!("Failed to open system preferences: {}", e))?;
    }
    Ok(())
}
