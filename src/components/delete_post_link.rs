//! Delete Post Link Component
//!
//! Client-rendered trigger element following the same DOM contract as the
//! server templates, so the binder handles it like any other.

use leptos::prelude::*;

/// Trigger link for deleting one post
///
/// # Arguments
/// * `trigger_class` - trigger marker class (e.g. "delete-post")
/// * `post_id` - value for `data-post-id`
/// * `post_type` - value for `data-post-type` ("ticket" or "review")
/// * `label` - link text
#[component]
pub fn DeletePostLink(
    #[prop(into)] trigger_class: String,
    #[prop(into)] post_id: String,
    #[prop(into)] post_type: String,
    #[prop(into)] label: String,
) -> impl IntoView {
    view! {
        <a
            class=trigger_class
            href="#"
            data-post-id=post_id
            data-post-type=post_type
        >
            {label}
        </a>
    }
}
