use std::future::Future;

use tauri::{window::Color, AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use url::Url;

use crate::{
    startup_mode::UiLocator, DEV_SERVER_PREFLIGHT_TIMEOUT, MAIN_WINDOW_BACKGROUND_RGBA,
    MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL, MAIN_WINDOW_TITLE, MAIN_WINDOW_WIDTH,
};

/// The native operations the startup coordinator and the window-control
/// signals need from the single main window.
pub(crate) trait MainWindow: Clone + Send + Sync + 'static {
    fn load(&self, locator: &UiLocator) -> impl Future<Output = Result<(), String>> + Send;

    fn show(&self) -> Result<(), String>;

    fn open_devtools(&self);

    fn minimize(&self) -> Result<(), String>;

    fn is_maximized(&self) -> Result<bool, String>;

    fn maximize(&self) -> Result<(), String>;

    fn unmaximize(&self) -> Result<(), String>;

    fn close(&self) -> Result<(), String>;
}

pub(crate) trait WindowFactory: Send + Sync {
    type Window: MainWindow;

    fn create_main_window(&self) -> Result<Self::Window, String>;
}

#[derive(Clone)]
pub(crate) struct TauriMainWindow {
    window: WebviewWindow,
    preflight: reqwest::Client,
}

fn app_protocol_base() -> &'static str {
    if cfg!(any(target_os = "windows", target_os = "android")) {
        "http://tauri.localhost/"
    } else {
        "tauri://localhost/"
    }
}

/// Painted before the first load, so a window revealed after failed loads is not white.
pub(crate) fn main_window_background() -> Color {
    let [red, green, blue, alpha] = MAIN_WINDOW_BACKGROUND_RGBA;
    Color(red, green, blue, alpha)
}

pub(crate) fn packaged_entry_url(entry: &str) -> Result<Url, String> {
    let base = Url::parse(app_protocol_base())
        .map_err(|error| format!("Invalid app protocol base URL: {error}"))?;
    base.join(entry.trim_start_matches('/'))
        .map_err(|error| format!("Invalid packaged UI entry '{entry}': {error}"))
}

async fn preflight_dev_server(client: &reqwest::Client, url: &Url) -> Result<(), String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|error| format!("Dev server {url} is unreachable: {error}"))?;
    if !response.status().is_success() {
        return Err(format!(
            "Dev server {url} answered with status {}",
            response.status()
        ));
    }
    Ok(())
}

impl TauriMainWindow {
    fn resolve_target(&self, locator: &UiLocator) -> Result<Url, String> {
        match locator {
            UiLocator::DevServer(url) => Ok(url.clone()),
            UiLocator::PackagedEntry(entry) => {
                let asset_key = entry.trim_start_matches('/').to_string();
                if self
                    .window
                    .app_handle()
                    .asset_resolver()
                    .get(asset_key)
                    .is_none()
                {
                    return Err(format!("Packaged UI entry is missing: {entry}"));
                }
                packaged_entry_url(entry)
            }
        }
    }
}

impl MainWindow for TauriMainWindow {
    async fn load(&self, locator: &UiLocator) -> Result<(), String> {
        if let UiLocator::DevServer(url) = locator {
            preflight_dev_server(&self.preflight, url).await?;
        }
        let target = self.resolve_target(locator)?;
        self.window
            .navigate(target)
            .map_err(|error| format!("Failed to navigate main window: {error}"))
    }

    fn show(&self) -> Result<(), String> {
        self.window
            .show()
            .map_err(|error| format!("Failed to show main window: {error}"))?;
        if let Err(error) = self.window.set_focus() {
            crate::append_desktop_log(&format!("failed to focus main window: {error}"));
        }
        Ok(())
    }

    fn open_devtools(&self) {
        self.window.open_devtools();
    }

    fn minimize(&self) -> Result<(), String> {
        self.window
            .minimize()
            .map_err(|error| format!("Failed to minimize main window: {error}"))
    }

    fn is_maximized(&self) -> Result<bool, String> {
        self.window
            .is_maximized()
            .map_err(|error| format!("Failed to read main window maximized state: {error}"))
    }

    fn maximize(&self) -> Result<(), String> {
        self.window
            .maximize()
            .map_err(|error| format!("Failed to maximize main window: {error}"))
    }

    fn unmaximize(&self) -> Result<(), String> {
        self.window
            .unmaximize()
            .map_err(|error| format!("Failed to unmaximize main window: {error}"))
    }

    fn close(&self) -> Result<(), String> {
        self.window
            .close()
            .map_err(|error| format!("Failed to close main window: {error}"))
    }
}

pub(crate) struct TauriWindowFactory {
    app_handle: AppHandle,
    preflight: reqwest::Client,
}

impl TauriWindowFactory {
    pub(crate) fn new(app_handle: AppHandle) -> Result<Self, String> {
        let preflight = reqwest::Client::builder()
            .timeout(DEV_SERVER_PREFLIGHT_TIMEOUT)
            .no_proxy()
            .build()
            .map_err(|error| format!("Failed to build dev server preflight client: {error}"))?;
        Ok(Self {
            app_handle,
            preflight,
        })
    }

    fn wrap(&self, window: WebviewWindow) -> TauriMainWindow {
        TauriMainWindow {
            window,
            preflight: self.preflight.clone(),
        }
    }
}

impl WindowFactory for TauriWindowFactory {
    type Window = TauriMainWindow;

    fn create_main_window(&self) -> Result<TauriMainWindow, String> {
        if let Some(existing) = self.app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
            return Ok(self.wrap(existing));
        }

        let blank = Url::parse("about:blank")
            .map_err(|error| format!("Invalid placeholder URL: {error}"))?;
        let window = WebviewWindowBuilder::new(
            &self.app_handle,
            MAIN_WINDOW_LABEL,
            WebviewUrl::External(blank),
        )
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .decorations(false)
        .background_color(main_window_background())
        .visible(false)
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;
        Ok(self.wrap(window))
    }
}

#[cfg(test)]
mod tests {
    use super::{main_window_background, packaged_entry_url};

    #[test]
    fn packaged_entry_url_targets_app_protocol() {
        let url = packaged_entry_url("index.html").unwrap();
        if cfg!(any(target_os = "windows", target_os = "android")) {
            assert_eq!(url.as_str(), "http://tauri.localhost/index.html");
        } else {
            assert_eq!(url.as_str(), "tauri://localhost/index.html");
        }
    }

    #[test]
    fn main_window_background_is_opaque_black() {
        let color = main_window_background();
        assert_eq!((color.0, color.1, color.2, color.3), (0, 0, 0, 255));
    }

    #[test]
    fn packaged_entry_url_ignores_leading_slash() {
        assert_eq!(
            packaged_entry_url("/index.html").unwrap(),
            packaged_entry_url("index.html").unwrap()
        );
    }
}
