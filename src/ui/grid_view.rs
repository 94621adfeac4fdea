// Thumbnail grid widget
// GTK4 FlowBox fed by the grid presenter, one picture per loaded thumbnail

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gdk4::{MemoryFormat, MemoryTexture, Texture};
use gtk4::{Align, FlowBox, Label, Picture, PolicyType, ScrolledWindow, SelectionMode};
use tracing::{debug, warn};

use super::fullscreen::ActionViewer;
use crate::error::PresenterError;
use crate::index::MediaIndex;
use crate::models::DisplayEntry;
use crate::presenter::{GridPresenter, GridSink};
use crate::thumbnails::{LoadFailure, LoadReport, Thumbnail, ThumbnailLoader};

const GRID_SPACING: u32 = 4;
const MAX_CHILDREN_PER_LINE: u32 = 64;

/// Scrollable grid of thumbnails with a status line above it.
pub struct ImageGridView {
    scrolled_window: ScrolledWindow,
    flow_box: FlowBox,
    status: Label,
    presenter: Rc<RefCell<GridPresenter<ActionViewer>>>,
}

impl ImageGridView {
    pub fn new(viewer: ActionViewer) -> Self {
        let flow_box = FlowBox::builder()
            .homogeneous(true)
            .selection_mode(SelectionMode::Single)
            .activate_on_single_click(true)
            .min_children_per_line(1)
            .max_children_per_line(MAX_CHILDREN_PER_LINE)
            .column_spacing(GRID_SPACING)
            .row_spacing(GRID_SPACING)
            .valign(Align::Start)
            .build();
        flow_box.add_css_class("thumbnail-grid");

        let scrolled_window = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .kinetic_scrolling(true)
            .hexpand(true)
            .vexpand(true)
            .child(&flow_box)
            .build();

        let status = Label::builder()
            .xalign(0.0)
            .margin_start(8)
            .margin_top(4)
            .margin_bottom(4)
            .visible(false)
            .build();
        status.add_css_class("dim-label");

        let presenter = Rc::new(RefCell::new(GridPresenter::new(viewer)));

        let presenter_select = presenter.clone();
        flow_box.connect_child_activated(move |_flow_box, child| {
            let Ok(position) = usize::try_from(child.index()) else {
                return;
            };
            if let Err(e) = presenter_select.borrow().on_select(position) {
                warn!(error = %e, "Ignoring selection");
            }
        });

        Self {
            scrolled_window,
            flow_box,
            status,
            presenter,
        }
    }

    pub fn widget(&self) -> &ScrolledWindow {
        &self.scrolled_window
    }

    pub fn status_label(&self) -> &Label {
        &self.status
    }

    /// Start loading thumbnails; the grid fills in as they arrive.
    pub fn initialize<I>(&self, loader: &ThumbnailLoader, index: I) -> Result<(), PresenterError>
    where
        I: MediaIndex + Send + 'static,
    {
        let handle = self.presenter.borrow_mut().initialize(loader, index)?;
        let events = handle.events();
        let presenter = self.presenter.clone();
        let status = self.status.clone();
        let mut sink = FlowBoxSink {
            flow_box: self.flow_box.clone(),
            thumb_size: loader.thumb_size() as i32,
        };

        update_status(&status, presenter.borrow().status_text());

        glib::spawn_future_local(async move {
            while let Ok(event) = events.recv().await {
                let mut presenter = presenter.borrow_mut();
                presenter.apply(event, &mut sink);
                update_status(&status, presenter.status_text());
            }
            if let Err(e) = handle.finished().await {
                warn!(error = %e, "Thumbnail loader ended abnormally");
            }
        });

        Ok(())
    }
}

struct FlowBoxSink {
    flow_box: FlowBox,
    thumb_size: i32,
}

impl GridSink for FlowBoxSink {
    fn item_appended(&mut self, position: usize, entry: &DisplayEntry) {
        let picture = Picture::for_paintable(&thumbnail_texture(&entry.thumbnail));
        picture.set_size_request(self.thumb_size, self.thumb_size);
        picture.set_can_shrink(false);
        picture.set_tooltip_text(entry.path().to_str());
        self.flow_box.insert(&picture, position as i32);
    }

    fn item_skipped(&mut self, failure: &LoadFailure) {
        debug!(path = ?failure.path, error = %failure.error, "Thumbnail left out of grid");
    }

    fn load_finished(&mut self, report: &LoadReport) {
        debug!(loaded = report.loaded, "Grid populated");
    }
}

fn update_status(label: &Label, text: Option<String>) {
    match text {
        Some(text) => {
            label.set_text(&text);
            label.set_visible(true);
        }
        None => label.set_visible(false),
    }
}

fn thumbnail_texture(thumbnail: &Thumbnail) -> Texture {
    let bytes = glib::Bytes::from(thumbnail.pixels());
    MemoryTexture::new(
        thumbnail.width() as i32,
        thumbnail.height() as i32,
        MemoryFormat::R8g8b8a8,
        &bytes,
        thumbnail.stride(),
    )
    .upcast()
}
