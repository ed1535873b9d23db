// Public API modules
pub mod commands;
pub mod permissions;

// Core functionality - kept at root for wide usage
mod logger;
mod settings;

#[cfg(target_os = "macos")]
mod macos;

use std::sync::Arc;

use tauri::Manager;
use tokio::sync::Mutex;

use crate::logger::{info, warn, Component};
use crate::permissions::{
    initialize_microphone_channel, methods, microphone_channel, MethodReply, ReplyValue,
};
use crate::settings::SettingsManager;

pub struct AppState {
    pub settings: Arc<Mutex<SettingsManager>>,
}

pub fn run() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "fisiomap=info");
    }

    let env_logger = env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stdout)
        .build();

    log::set_boxed_logger(Box::new(env_logger)).expect("Failed to set logger");
    log::set_max_level(log::LevelFilter::Info);

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let app_data_dir = app.path().app_data_dir().expect("Failed to get app data dir");

            if !app_data_dir.exists() {
                std::fs::create_dir_all(&app_data_dir)
                    .expect("Failed to create app data directory");
                #[cfg(target_os = "macos")]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let permissions = std::fs::Permissions::from_mode(0o700);
                    std::fs::set_permissions(&app_data_dir, permissions)
                        .expect("Failed to set secure permissions on app data directory");
                }
            }

            if let Err(e) = logger::init_logger(&app_data_dir) {
                eprintln!("Failed to initialize file logger: {}", e);
            } else {
                info(
                    Component::UI,
                    &format!(
                        "FisioMap Pro starting - logs available at: {:?}",
                        logger::get_log_file_path()
                    ),
                );
            }

            let settings_manager = SettingsManager::new(&app_data_dir)
                .expect("Failed to initialize settings manager");

            // Channel is registered once here and lives for the whole
            // process; there is no teardown path.
            initialize_microphone_channel(app.handle().clone());

            if settings_manager.get().permissions.check_on_launch {
                if let Some(channel) = microphone_channel() {
                    let reply = MethodReply::new(|value| match value {
                        ReplyValue::Status(state) => info(
                            Component::Permissions,
                            &format!("Microphone permission at launch: {}", state.as_str()),
                        ),
                        other => warn(
                            Component::Permissions,
                            &format!("Unexpected reply to launch check: {:?}", other),
                        ),
                    });
                    channel.invoke(methods::CHECK_MICROPHONE_PERMISSION, reply);
                }
            }

            app.manage(AppState {
                settings: Arc::new(Mutex::new(settings_manager)),
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            crate::commands::check_microphone_permission,
            crate::commands::request_microphone_permission,
            crate::commands::open_system_preferences_audio,
            crate::commands::get_settings,
            crate::commands::update_settings,
            crate::commands::get_log_file_path
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
