use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PagerError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    #[error("page-number window must be greater than zero")]
    ZeroWindow,
}

/// One element of the rendered page-number controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Fixed-size 1-based pagination over an ordered sequence, shared by the
/// radical list and the related-kanji list. Out-of-range pages clamp; an
/// empty sequence still has one (empty) page.
#[derive(Clone, Copy, Debug)]
pub struct Pager {
    page_size: usize,
    max_visible: usize,
}

impl Pager {
    pub fn new(page_size: usize, max_visible: usize) -> Result<Self, PagerError> {
        if page_size == 0 {
            return Err(PagerError::ZeroPageSize);
        }
        if max_visible == 0 {
            return Err(PagerError::ZeroWindow);
        }
        Ok(Self {
            page_size,
            max_visible,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    pub fn clamp_page(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.page_count(len))
    }

    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let page = self.clamp_page(page, items.len());
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());
        if start >= items.len() {
            &[]
        } else {
            &items[start..end]
        }
    }

    /// Contiguous window of page numbers centered on `current` where
    /// possible, with first/last shortcuts and ellipsis markers when the
    /// window is detached from either end.
    pub fn window(&self, current: usize, len: usize) -> Vec<PageItem> {
        let total = self.page_count(len);
        let current = current.clamp(1, total);

        let mut start = current.saturating_sub(self.max_visible / 2).max(1);
        let end = (start + self.max_visible - 1).min(total);
        if end - start + 1 < self.max_visible {
            start = end.saturating_sub(self.max_visible - 1).max(1);
        }

        let mut items = Vec::new();
        if start > 1 {
            items.push(PageItem::Page(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        for page in start..=end {
            items.push(PageItem::Page(page));
        }
        if end < total {
            if end < total - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page(total));
        }

        items
    }
}
