// Tunera - 442Hz Reference Tone Player
// Module declarations
pub mod audio;
pub mod links;
pub mod logging;
pub mod playback;
pub mod settings;

#[cfg(feature = "app")]
mod commands;
#[cfg(feature = "app")]
mod state;

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use anyhow::Context;
    use state::AppState;
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            logging::init();

            // Get app data directory
            let app_dir = app
                .path()
                .app_data_dir()
                .context("Failed to get app data directory")?;

            // Restore preferences and set up the audio session
            tracing::info!(app_dir = %app_dir.display(), "Starting");
            app.manage(AppState::new(&app_dir));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_playback_state,
            commands::home_appeared,
            commands::toggle_pause,
            commands::set_volume,
            commands::get_selected_tab,
            commands::select_tab,
            commands::open_terms_of_service,
            commands::open_privacy_policy,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
