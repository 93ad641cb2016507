//! HTML pages served to browsers

pub mod composer;

pub use composer::{Page, PageComposer, Placeholder, substitute};
