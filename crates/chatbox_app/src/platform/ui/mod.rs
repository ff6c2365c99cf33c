pub mod constants;
pub mod gesture;
pub mod render;
pub mod surface;
