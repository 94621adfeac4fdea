// Main window for the gallery
// GTK4 ApplicationWindow holding the thumbnail grid and its status line

use anyhow::{Context, Result};
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Box as GtkBox, Orientation};
use tracing::{error, info};

use super::fullscreen::ActionViewer;
use super::grid_view::ImageGridView;
use crate::config::GalleryConfig;
use crate::thumbnails::ThumbnailLoader;

const DEFAULT_WIDTH: i32 = 960;
const DEFAULT_HEIGHT: i32 = 720;

pub struct MainWindow {
    window: ApplicationWindow,
    grid: ImageGridView,
}

impl MainWindow {
    pub fn new(app: &Application, config: &GalleryConfig) -> Self {
        let grid = ImageGridView::new(ActionViewer::new(app));

        let content = GtkBox::new(Orientation::Vertical, 0);
        content.append(grid.status_label());
        content.append(grid.widget());

        let window = ApplicationWindow::builder()
            .application(app)
            .title("Gallery")
            .default_width(DEFAULT_WIDTH)
            .default_height(DEFAULT_HEIGHT)
            .child(&content)
            .build();

        let main_window = Self { window, grid };
        if let Err(e) = main_window.start_loading(config) {
            error!(error = ?e, "Gallery could not start loading");
            main_window.grid.status_label().set_text(&e.to_string());
            main_window.grid.status_label().set_visible(true);
        }
        main_window
    }

    fn start_loading(&self, config: &GalleryConfig) -> Result<()> {
        info!(source = ?config.source, thumb_size = config.thumb_size, "Loading gallery");
        let loader = ThumbnailLoader::new(config.thumb_size);
        self.grid
            .initialize(&loader, config.source.open())
            .context("Failed to start thumbnail loader")
    }

    pub fn present(&self) {
        self.window.present();
    }
}
