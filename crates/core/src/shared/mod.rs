pub mod constants;
pub mod frame;
pub mod mat_convert;
pub mod region;
