use std::rc::Rc;

use gio::ApplicationFlags;
use gtk4::prelude::*;
use gtk4::Application;

use crate::config::{GalleryConfig, IndexSource};
use crate::ui::fullscreen;
use crate::ui::MainWindow;

const APP_ID: &str = "nz.thumbgrid.Gallery";

pub struct GalleryApp {
    app: Application,
}

impl GalleryApp {
    pub fn new(config: GalleryConfig) -> Self {
        let app = Application::builder()
            .application_id(APP_ID)
            .flags(ApplicationFlags::HANDLES_OPEN)
            .build();

        let config = Rc::new(config);

        app.connect_startup(fullscreen::install_action);

        let activate_config = config.clone();
        app.connect_activate(move |app| Self::present(app, &activate_config));

        app.connect_open(move |app, files, _hint| {
            // A file or folder on the command line replaces the configured listing.
            let config = match files.first().and_then(|f| f.path()) {
                Some(path) => config.with_source(IndexSource::for_path(&path)),
                None => (*config).clone(),
            };
            Self::present(app, &config);
        });

        Self { app }
    }

    pub fn run(&self) -> i32 {
        self.app.run().into()
    }

    fn present(app: &Application, config: &GalleryConfig) {
        let window = MainWindow::new(app, config);
        window.present();
    }
}
