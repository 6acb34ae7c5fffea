/// Page math for a ranked result list.
///
/// The pager holds no result state; totals are re-derived by re-ranking on
/// every transition, which is what keeps stale buttons harmless.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// The items of `page`; empty when the page is past the end.
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let start = page.saturating_mul(self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// `Next` is a valid transition iff another page of results exists.
    pub fn has_next(&self, page: usize, total: usize) -> bool {
        page.saturating_add(1).saturating_mul(self.page_size) < total
    }

    /// `Previous` is a valid transition iff we are past page 0.
    pub fn has_prev(&self, page: usize) -> bool {
        page > 0
    }
}
