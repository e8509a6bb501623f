//! Client-side paging over an already fetched list.

/// Entry in a page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Page(usize),
    Ellipsis,
}

/// Figures describing the visible page. Indices are zero-based and the last
/// index is exclusive, so they can slice the list directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total_items: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub items_per_page: usize,
    pub first_item_index: usize,
    pub last_item_index: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// Current page of a list with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    items_per_page: usize,
    current_page: usize,
    total_items: usize,
}

impl Paginator {
    /// Start on page 1. A page size of zero is treated as one.
    pub fn new(items_per_page: usize, total_items: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            current_page: 1,
            total_items,
        }
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page)
    }

    /// Track a new list length, pulling the current page back into range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        let total_pages = self.total_pages();
        if total_pages > 0 {
            self.current_page = self.current_page.clamp(1, total_pages);
        }
    }

    /// Jump to `page`, clamped to the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.min(self.total_pages()).max(1);
    }

    pub fn next(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    fn bounds(&self) -> (usize, usize) {
        let end = self.current_page * self.items_per_page;
        (end - self.items_per_page, end.min(self.total_items))
    }

    /// The slice of `data` on the current page.
    pub fn items<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        let (start, end) = self.bounds();
        let end = end.min(data.len());
        data.get(start..end).unwrap_or_default()
    }

    pub fn info(&self) -> PageInfo {
        let (first_item_index, last_item_index) = self.bounds();
        PageInfo {
            total_items: self.total_items,
            current_page: self.current_page,
            total_pages: self.total_pages(),
            items_per_page: self.items_per_page,
            first_item_index,
            last_item_index,
            has_previous_page: self.current_page > 1,
            has_next_page: self.current_page < self.total_pages(),
        }
    }

    /// Page selector entries: every page up to seven, otherwise a window
    /// around the current page framed by the first and last page.
    pub fn page_numbers(&self) -> Vec<PageNumber> {
        use PageNumber::{Ellipsis, Page};

        let total = self.total_pages();
        let current = self.current_page;
        if total <= 7 {
            return (1..=total).map(Page).collect();
        }

        let mut pages = Vec::with_capacity(7);
        if current <= 3 {
            pages.extend((1..=5).map(Page));
            pages.extend([Ellipsis, Page(total)]);
        } else if current >= total - 2 {
            pages.extend([Page(1), Ellipsis]);
            pages.extend((total - 4..=total).map(Page));
        } else {
            pages.extend([Page(1), Ellipsis]);
            pages.extend((current - 1..=current + 1).map(Page));
            pages.extend([Ellipsis, Page(total)]);
        }
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::PageNumber::{Ellipsis, Page};
    use super::*;

    #[test]
    fn slices_current_page() {
        let data: Vec<u32> = (1..=25).collect();
        let mut pager = Paginator::new(10, data.len());
        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.items(&data), &data[0..10]);

        pager.go_to(3);
        assert_eq!(pager.items(&data), &data[20..25]);
        let info = pager.info();
        assert_eq!(info.first_item_index, 20);
        assert_eq!(info.last_item_index, 25);
        assert!(info.has_previous_page);
        assert!(!info.has_next_page);
    }

    #[test]
    fn navigation_stays_in_range() {
        let mut pager = Paginator::new(10, 25);
        pager.previous();
        assert_eq!(pager.current_page(), 1);
        pager.go_to(99);
        assert_eq!(pager.current_page(), 3);
        pager.next();
        assert_eq!(pager.current_page(), 3);
        pager.go_to(0);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn shrinking_list_clamps_current_page() {
        let mut pager = Paginator::new(5, 50);
        pager.go_to(10);
        pager.set_total_items(12);
        assert_eq!(pager.current_page(), 3);

        pager.set_total_items(0);
        assert_eq!(pager.current_page(), 3);
        assert!(pager.items::<u8>(&[]).is_empty());
    }

    #[test]
    fn empty_list_has_no_pages() {
        let pager = Paginator::new(10, 0);
        let info = pager.info();
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.first_item_index, 0);
        assert_eq!(info.last_item_index, 0);
        assert!(!info.has_next_page);
        assert!(pager.page_numbers().is_empty());
    }

    #[test]
    fn page_numbers_window() {
        let mut pager = Paginator::new(1, 7);
        assert_eq!(pager.page_numbers(), (1..=7).map(Page).collect::<Vec<_>>());

        pager = Paginator::new(1, 20);
        assert_eq!(
            pager.page_numbers(),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );

        pager.go_to(18);
        assert_eq!(
            pager.page_numbers(),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );

        pager.go_to(10);
        assert_eq!(
            pager.page_numbers(),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn zero_page_size_is_one() {
        let pager = Paginator::new(0, 3);
        assert_eq!(pager.items_per_page(), 1);
        assert_eq!(pager.total_pages(), 3);
    }
}
