pub mod camera_session;
pub(crate) mod lease;
