pub mod fullscreen;
pub mod grid_view;
pub mod window;

pub use window::MainWindow;
