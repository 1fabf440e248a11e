// Legal documents shown on the settings screen

pub const TERMS_OF_SERVICE_URL: &str =
    "https://doc-hosting.flycricket.io/tunera-terms-of-use/3262f52a-69b7-4ca0-ad29-be5abe7aa237/terms";

pub const PRIVACY_POLICY_URL: &str =
    "https://doc-hosting.flycricket.io/tunera-privacy-policy/da58ad16-59bb-4be5-a3c3-82d46e3c1d84/privacy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalLink {
    TermsOfService,
    PrivacyPolicy,
}

impl ExternalLink {
    pub fn url(self) -> &'static str {
        match self {
            Self::TermsOfService => TERMS_OF_SERVICE_URL,
            Self::PrivacyPolicy => PRIVACY_POLICY_URL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TermsOfService => "Terms Of Service",
            Self::PrivacyPolicy => "Privacy Policy",
        }
    }
}

/// Open `link` in the external browser without waiting for it.
/// The outcome is only logged.
#[cfg(feature = "app")]
pub fn open<R: tauri::Runtime>(app: &tauri::AppHandle<R>, link: ExternalLink) {
    use tauri_plugin_opener::OpenerExt;

    let app = app.clone();
    tauri::async_runtime::spawn_blocking(move || {
        match app.opener().open_url(link.url(), None::<&str>) {
            Ok(()) => tracing::debug!(?link, "Opened external link"),
            Err(e) => tracing::warn!(?link, "Failed to open {}: {}", link.label(), e),
        }
    });
}
