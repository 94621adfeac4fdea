pub mod display_list;
pub mod image_record;

pub use display_list::*;
pub use image_record::*;
