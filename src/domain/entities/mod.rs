//! Core business data structures.

mod url_record;

pub use url_record::UrlRecord;
