// Fullscreen image window, reached through the `app.open-fullscreen` action

use std::path::Path;

use gtk4::prelude::*;
use gdk4::Key;
use gio::SimpleAction;
use glib::{Propagation, VariantTy};
use gtk4::{Application, ContentFit, EventControllerKey, GestureClick, Picture, Window};
use tracing::{debug, warn};

use crate::presenter::{FullscreenViewer, NavigationRequest};

/// Application action that opens an image fullscreen. Takes the path as a string.
pub const OPEN_FULLSCREEN_ACTION: &str = "open-fullscreen";

/// Register the fullscreen action on the application.
pub fn install_action(app: &Application) {
    let action = SimpleAction::new(OPEN_FULLSCREEN_ACTION, Some(VariantTy::STRING));
    let app_weak = app.downgrade();
    action.connect_activate(move |_action, parameter| {
        let Some(app) = app_weak.upgrade() else {
            return;
        };
        match parameter.and_then(|p| p.get::<String>()) {
            Some(path) => {
                FullscreenWindow::show(&app, Path::new(&path));
            }
            None => warn!("open-fullscreen activated without a path"),
        }
    });
    app.add_action(&action);
}

/// Viewer collaborator handed to the grid presenter.
#[derive(Clone)]
pub struct ActionViewer {
    app: Application,
}

impl ActionViewer {
    pub fn new(app: &Application) -> Self {
        Self { app: app.clone() }
    }
}

impl FullscreenViewer for ActionViewer {
    fn open(&self, request: NavigationRequest) {
        let path = request.path.to_string_lossy().into_owned();
        self.app
            .activate_action(OPEN_FULLSCREEN_ACTION, Some(&path.to_variant()));
    }
}

pub struct FullscreenWindow;

impl FullscreenWindow {
    /// Show the original image at `path` fullscreen. Escape or a click closes it.
    pub fn show(app: &Application, path: &Path) -> Window {
        debug!(?path, "Showing fullscreen image");

        let picture = Picture::for_filename(path);
        picture.set_content_fit(ContentFit::Contain);
        picture.set_can_shrink(true);
        picture.set_hexpand(true);
        picture.set_vexpand(true);

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let window = Window::builder()
            .application(app)
            .title(title)
            .child(&picture)
            .build();
        window.add_css_class("fullscreen-viewer");

        let keys = EventControllerKey::new();
        let window_weak = window.downgrade();
        keys.connect_key_pressed(move |_, keyval, _, _| {
            if keyval == Key::Escape {
                if let Some(window) = window_weak.upgrade() {
                    window.close();
                }
                Propagation::Stop
            } else {
                Propagation::Proceed
            }
        });
        window.add_controller(keys);

        let click = GestureClick::new();
        let window_weak = window.downgrade();
        click.connect_released(move |_, _, _, _| {
            if let Some(window) = window_weak.upgrade() {
                window.close();
            }
        });
        picture.add_controller(click);

        window.fullscreen();
        window.present();
        window
    }
}
