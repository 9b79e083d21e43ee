//! Deletion Routes
//!
//! Maps a post type to the server endpoint that deletes it.

use std::collections::BTreeMap;

use crate::models::PostType;

/// Placeholder replaced by the post id in route templates
pub const ID_PLACEHOLDER: &str = "{id}";

/// Routes the server exposes out of the box
pub fn default_routes() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("ticket".to_string(), "/ticket/{id}/delete".to_string()),
        ("review".to_string(), "/review/{id}/delete".to_string()),
    ])
}

/// Post type -> URL template
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    templates: BTreeMap<String, String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(default_routes())
    }
}

impl RouteTable {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    /// Deletion URL for a post, `None` when the type has no route.
    ///
    /// The id is substituted verbatim, without percent-encoding.
    pub fn url_for(&self, post_type: &PostType, id: &str) -> Option<String> {
        self.templates
            .get(post_type.as_str())
            .map(|template| template.replace(ID_PLACEHOLDER, id))
    }
}
