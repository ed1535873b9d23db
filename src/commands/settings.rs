use tauri::State;

use crate::settings;
use crate::AppState;

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<serde_json::Value, String> {
    let settings = state.settings.lock().await;
    serde_json::to_value(settings.get()).map_err(|e| format!("Failed to serialize settings: {}", e))
}

#[tauri::command]
pub async fn update_settings(
    state: State<'_, AppState>,
    new_settings: serde_json::Value,
) -> Result<(), String> {
    let app_settings: settings::AppSettings = serde_json::from_value(new_settings)
        .map_err(|e| format!("Invalid settings format: {}", e))?;

    let mut settings_lock = state.settings.lock().await;
    settings_lock.update(|s| *s = app_settings)
}
