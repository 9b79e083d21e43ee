//! UI Components
//!
//! Leptos components mounted into server-rendered pages.

mod delete_post_link;

pub use delete_post_link::DeletePostLink;
