//! Featured-VOD resolution shared by the server and the CLI

pub mod service;

pub use service::VodPortal;
