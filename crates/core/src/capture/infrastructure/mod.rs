pub mod image_file_writer;
pub mod opencv_camera;
pub mod opencv_display;
