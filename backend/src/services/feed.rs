//! Cursor-paginated listing feed with client-side filter/sort.
//!
//! The hosted backend only supports one order (created_at descending), so
//! the feed accumulates fetched pages and re-applies filters over the whole
//! accumulated set. Filters never see unfetched pages; callers cap how far
//! they are willing to walk.

use rust_decimal::Decimal;
use showroom_platform_shared::{ListingCursor, PriceSort};

use crate::models::{Car, Rental};
use crate::store::PageQuery;

/// What the feed needs to know about a listing.
pub trait FeedItem {
    fn cursor(&self) -> ListingCursor;
    fn brand(&self) -> &str;
    fn price_key(&self) -> Decimal;
}

impl FeedItem for Car {
    fn cursor(&self) -> ListingCursor {
        ListingCursor {
            created_at: self.created_at,
            id: self.id.clone(),
        }
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn price_key(&self) -> Decimal {
        self.price
    }
}

impl FeedItem for Rental {
    fn cursor(&self) -> ListingCursor {
        ListingCursor {
            created_at: self.created_at,
            id: self.id.clone(),
        }
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn price_key(&self) -> Decimal {
        Decimal::from(self.price_per_day())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    /// Case-insensitive substring match on the brand name.
    pub brand_query: Option<String>,
    /// Inclusive price range.
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<PriceSort>,
}

impl ListingFilter {
    pub fn matches<T: FeedItem>(&self, item: &T) -> bool {
        if let Some(query) = &self.brand_query {
            let query = query.trim().to_lowercase();
            if !query.is_empty() && !item.brand().to_lowercase().contains(&query) {
                return false;
            }
        }
        let price = item.price_key();
        if let Some(min) = self.min_price {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if price > max {
                return false;
            }
        }
        true
    }
}

pub struct ListingFeed<T> {
    items: Vec<T>,
    cursor: Option<ListingCursor>,
    has_more: bool,
    page_size: usize,
}

impl<T: FeedItem> ListingFeed<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            has_more: true,
            page_size: page_size.max(1),
        }
    }

    /// The next page to fetch, or `None` once the collection is exhausted.
    pub fn next_request(&self) -> Option<PageQuery> {
        self.has_more.then(|| PageQuery {
            limit: self.page_size,
            after: self.cursor.clone(),
        })
    }

    /// Append a fetched page. A full page implies more may exist; a short
    /// page means exhausted. When the collection size is an exact multiple
    /// of the page size this costs one extra empty fetch, which lands here
    /// as an empty page and simply flips `has_more` off.
    pub fn ingest(&mut self, page: Vec<T>) {
        self.has_more = page.len() == self.page_size;
        if let Some(last) = page.last() {
            self.cursor = Some(last.cursor());
        }
        self.items.extend(page);
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Filter and sort the entire accumulated set. Without a price sort the
    /// fetch order (created_at descending) is preserved.
    pub fn filtered(&self, filter: &ListingFilter) -> Vec<&T> {
        let mut out: Vec<&T> = self.items.iter().filter(|item| filter.matches(*item)).collect();
        match filter.sort {
            Some(PriceSort::PriceAsc) => out.sort_by_key(|item| item.price_key()),
            Some(PriceSort::PriceDesc) => {
                out.sort_by_key(|item| std::cmp::Reverse(item.price_key()))
            }
            None => {}
        }
        out
    }
}
