#[tauri::command]
pub async fn get_log_file_path() -> Result<Option<String>, String> {
    Ok(crate::logger::get_log_file_path().map(|p| p.to_string_lossy().to_string()))
}
