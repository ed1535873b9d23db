use once_cell::sync::Lazy;
use std::sync::Mutex;

// FFI declarations for the Swift microphone shim
extern "C" {
    fn fisiomap_microphone_status() -> i32;
    fn fisiomap_microphone_request(callback: extern "C" fn(bool));
}

// Completions waiting on the system permission prompt, drained in FIFO
// order by the Swift callback. AVFoundation invokes the callback once per
// request, on an arbitrary queue.
static PENDING_COMPLETIONS: Lazy<Mutex<Vec<Box<dyn FnOnce(bool) + Send>>>> =
    Lazy::new(|| Mutex::new(Vec::new()));

extern "C" fn permission_callback(granted: bool) {
    let completion = match PENDING_COMPLETIONS.lock() {
        Ok(mut pending) => {
            if pending.is_empty() {
                None
            } else {
                Some(pending.remove(0))
            }
        }
        Err(_) => None,
    };

    if let Some(completion) = completion {
        completion(granted);
    }
}

/// Raw capture-authorization status from AVFoundation.
pub fn microphone_permission_status() -> i32 {
    unsafe { fisiomap_microphone_status() }
}

/// Ask AVFoundation for record permission. Shows the system prompt on the
/// first call; `on_complete` fires once, on a platform-chosen queue.
pub fn request_microphone_permission(on_complete: Box<dyn FnOnce(bool) + Send>) {
    if let Ok(mut pending) = PENDING_COMPLETIONS.lock() {
        pending.push(on_complete);
    }

    unsafe {
        fisiomap_microphone_request(permission_callback);
    }
}
