pub mod image_file_writer;
pub mod opencv_camera;
