//! Fixed-size pagination over ordered sequences.

use serde::Serialize;

/// Items per page across every listing.
pub const PAGE_SIZE: usize = 10;

/// One page of an ordered sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served (after clamping).
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Split an ordered sequence into fixed-size pages and return one of them.
///
/// Page N covers items `[(N-1)*size, N*size)` clipped to the sequence
/// length. Out-of-range requests never error: zero or negative numbers
/// are served as page 1, numbers past the end as the last page.
pub fn paginate<T>(items: Vec<T>, page: i64, page_size: usize) -> Page<T> {
    debug_assert!(page_size > 0);

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);

    let number = if page < 1 {
        1
    } else {
        (page as usize).min(total_pages)
    };

    let start = (number - 1) * page_size;
    let items = items
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect::<Vec<_>>();

    Page {
        items,
        number,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_items_split_ten_three() {
        let items: Vec<u32> = (0..13).collect();

        let first = paginate(items.clone(), 1, PAGE_SIZE);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_items, 13);

        let second = paginate(items, 2, PAGE_SIZE);
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.items[0], 10);
    }

    #[test]
    fn test_page_zero_and_negative_serve_first_page() {
        let items: Vec<u32> = (0..5).collect();

        let page = paginate(items.clone(), 0, PAGE_SIZE);
        assert_eq!(page.number, 1);
        assert_eq!(page.items.len(), 5);

        let page = paginate(items, -3, PAGE_SIZE);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn test_past_the_end_serves_last_page() {
        let items: Vec<u32> = (0..13).collect();

        let page = paginate(items, 99, PAGE_SIZE);
        assert_eq!(page.number, 2);
        assert_eq!(page.items.len(), 3);
    }

    #[test]
    fn test_empty_sequence_has_one_empty_page() {
        let page = paginate(Vec::<u32>::new(), 1, PAGE_SIZE);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_page() {
        let items: Vec<u32> = (0..20).collect();
        let page = paginate(items, 3, PAGE_SIZE);
        assert_eq!(page.number, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 10);
    }
}
