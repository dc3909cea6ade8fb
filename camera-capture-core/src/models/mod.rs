pub mod config;
pub mod constraints;
pub mod error;
pub mod frame;
pub mod origin;
pub mod snapshot;
pub mod state;
