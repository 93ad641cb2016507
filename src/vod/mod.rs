//! VOD selection over provider asset listings

pub mod selector;

pub use selector::{
    SelectedVod, SelectionError, first_eligible, hls_manifest_url, is_eligible, select,
};
