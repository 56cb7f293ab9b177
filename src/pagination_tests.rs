//! Tests for pagination shapes.

use super::*;

mod offset {
    use super::*;

    /// Verify has_more is derived from page arithmetic.
    #[test]
    fn test_has_more_when_items_remain() {
        let page = Page::from_offset(
            vec!["a", "b"],
            OffsetPagination {
                total: 5,
                page: 1,
                page_size: 2,
            },
        );
        assert!(page.has_more);
        assert_eq!(page.total, 5);
        assert_eq!(page.items(), &["a", "b"]);
    }

    /// Verify the last page reports no more items.
    #[test]
    fn test_no_more_on_last_page() {
        let page = Page::from_offset(
            vec!["e"],
            OffsetPagination {
                total: 5,
                page: 3,
                page_size: 2,
            },
        );
        assert!(!page.has_more);
    }

    /// Verify an exactly-full final page reports no more items.
    #[test]
    fn test_exactly_full_final_page() {
        let page = Page::from_offset(
            vec!["c", "d"],
            OffsetPagination {
                total: 4,
                page: 2,
                page_size: 2,
            },
        );
        assert!(!page.has_more);
    }

    /// Verify an empty result set.
    #[test]
    fn test_empty_results() {
        let page: Page<&str> = Page::from_offset(Vec::new(), OffsetPagination::default());
        assert!(!page.has_more);
        assert!(page.items().is_empty());
    }

    /// Verify the envelope tolerates a missing pagination block.
    #[test]
    fn test_envelope_defaults() {
        let pagination: OffsetPagination = serde_json::from_str("{}").unwrap();
        assert_eq!(pagination.total, 0);
        assert_eq!(pagination.page, 0);
        assert_eq!(pagination.page_size, 0);
    }
}

mod cursor {
    use super::*;

    /// Verify cursor fields pass straight through.
    #[test]
    fn test_cursor_page() {
        let page = CursorPage::from_cursor(
            vec!["a"],
            CursorPagination {
                has_more: true,
                next_cursor: Some("cur_next".to_string()),
            },
        );
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("cur_next"));
        assert_eq!(page.items(), &["a"]);
    }

    /// Verify the envelope parses camelCase keys.
    #[test]
    fn test_envelope_parsing() {
        let pagination: CursorPagination =
            serde_json::from_str(r#"{"hasMore": true, "nextCursor": "cur_1"}"#).unwrap();
        assert!(pagination.has_more);
        assert_eq!(pagination.next_cursor.as_deref(), Some("cur_1"));

        let pagination: CursorPagination = serde_json::from_str("{}").unwrap();
        assert!(!pagination.has_more);
        assert!(pagination.next_cursor.is_none());
    }
}
