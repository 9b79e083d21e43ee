//! Frontend Models
//!
//! Data read from trigger elements emitted by the server templates.

use std::fmt;

/// Attribute carrying the post identifier
pub const POST_ID_ATTR: &str = "data-post-id";
/// Attribute carrying the post kind
pub const POST_TYPE_ATTR: &str = "data-post-type";

/// Kind of post a trigger element deletes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostType {
    Ticket,
    Review,
    /// Anything else the markup carries, kept verbatim
    Unknown(String),
}

impl PostType {
    pub fn as_str(&self) -> &str {
        match self {
            PostType::Ticket => "ticket",
            PostType::Review => "review",
            PostType::Unknown(raw) => raw,
        }
    }

    /// Exact, case-sensitive match on the attribute value
    pub fn parse(s: &str) -> Self {
        match s {
            "ticket" => PostType::Ticket,
            "review" => PostType::Review,
            other => PostType::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes of one trigger element, read at click time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostRef {
    /// Opaque identifier, `None` when the attribute is missing
    pub id: Option<String>,
    pub post_type: Option<PostType>,
}

impl PostRef {
    pub fn new(id: impl Into<String>, post_type: PostType) -> Self {
        Self {
            id: Some(id.into()),
            post_type: Some(post_type),
        }
    }

    /// Build from raw attribute values as `getAttribute` returns them
    pub fn from_attributes(id: Option<String>, post_type: Option<String>) -> Self {
        Self {
            id,
            post_type: post_type.as_deref().map(PostType::parse),
        }
    }

    /// Read both data attributes off an element
    pub fn from_element(element: &web_sys::Element) -> Self {
        Self::from_attributes(
            element.get_attribute(POST_ID_ATTR),
            element.get_attribute(POST_TYPE_ATTR),
        )
    }
}
