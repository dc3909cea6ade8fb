pub mod camera_backend;
pub mod preview_surface;
pub mod session_delegate;
