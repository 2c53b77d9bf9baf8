pub mod display;
pub mod frame_source;
pub mod image_writer;
pub mod overlay;
