//! The pagination envelope sent with every BigML list response.

use serde::{Deserialize, Serialize};

/// Describes one page of a list response.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Meta {
    /// The maximum number of objects on this page.
    pub limit: u64,

    /// Cursor for the next page, or `None` on the last page.
    pub next: Option<String>,

    /// How many objects were skipped before this page.
    pub offset: u64,

    /// Cursor for the previous page, or `None` on the first page.
    pub previous: Option<String>,

    /// The number of objects across all pages.
    pub total_count: u64,
}

impl Meta {
    /// Is there another page after this one?
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Is there a page before this one?
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[test]
fn null_cursors_decode_as_none() {
    let json = r#"{"limit": 20, "next": null, "offset": 0, "previous": null, "total_count": 1}"#;
    let meta: Meta = serde_json::from_str(json).unwrap();
    assert_eq!(meta.limit, 20);
    assert_eq!(meta.offset, 0);
    assert_eq!(meta.total_count, 1);
    assert_eq!(meta.next, None);
    assert!(!meta.has_next());
    assert!(!meta.has_previous());
}

#[test]
fn present_cursors_are_kept_verbatim() {
    let json = r#"{"limit": 20, "next": "/andromeda/dataset?limit=20&offset=20", "offset": 0, "previous": null, "total_count": 45}"#;
    let meta: Meta = serde_json::from_str(json).unwrap();
    assert!(meta.has_next());
    assert_eq!(
        meta.next.as_deref(),
        Some("/andromeda/dataset?limit=20&offset=20")
    );
}
