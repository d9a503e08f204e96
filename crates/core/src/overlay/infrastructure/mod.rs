pub mod box_outline_renderer;
