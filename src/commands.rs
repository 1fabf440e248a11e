// Tauri command handlers
use tauri::{AppHandle, State};

use crate::links::{self, ExternalLink};
use crate::playback::PlaybackSnapshot;
use crate::settings::Tab;
use crate::state::AppState;

// ===== Playback Commands =====

#[tauri::command]
pub fn get_playback_state(state: State<'_, AppState>) -> Result<PlaybackSnapshot, String> {
    Ok(state.controller.lock().snapshot())
}

/// Called by the home screen once it is visible
#[tauri::command]
pub fn home_appeared(state: State<'_, AppState>) -> Result<PlaybackSnapshot, String> {
    let mut controller = state.controller.lock();
    controller.on_appear();
    Ok(controller.snapshot())
}

#[tauri::command]
pub fn toggle_pause(state: State<'_, AppState>) -> Result<PlaybackSnapshot, String> {
    let mut controller = state.controller.lock();
    controller.toggle_pause();
    Ok(controller.snapshot())
}

#[tauri::command]
pub fn set_volume(volume: f64, state: State<'_, AppState>) -> Result<PlaybackSnapshot, String> {
    let mut controller = state.controller.lock();
    controller.set_volume(volume);
    Ok(controller.snapshot())
}

// ===== Navigation Commands =====

#[tauri::command]
pub fn get_selected_tab(state: State<'_, AppState>) -> Result<Tab, String> {
    Ok(state.preferences.selected_tab())
}

#[tauri::command]
pub fn select_tab(tab: Tab, state: State<'_, AppState>) -> Result<(), String> {
    state
        .preferences
        .select_tab(tab)
        .map_err(|e| format!("Failed to save selected tab: {}", e))
}

// ===== About Commands =====

#[tauri::command]
pub fn open_terms_of_service(app: AppHandle) -> Result<(), String> {
    links::open(&app, ExternalLink::TermsOfService);
    Ok(())
}

#[tauri::command]
pub fn open_privacy_policy(app: AppHandle) -> Result<(), String> {
    links::open(&app, ExternalLink::PrivacyPolicy);
    Ok(())
}
