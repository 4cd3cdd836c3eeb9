use rust_decimal::Decimal;
use vodca::References;

use crate::entity::{Book, BookCategory};

#[derive(Debug, Clone, Default, Eq, PartialEq, References)]
pub struct BookFilter {
    category: Option<BookCategory>,
    term: Option<String>,
    min_rent: Option<Decimal>,
    max_rent: Option<Decimal>,
}

impl BookFilter {
    pub fn new(
        category: Option<BookCategory>,
        term: Option<String>,
        min_rent: Option<Decimal>,
        max_rent: Option<Decimal>,
    ) -> Self {
        Self {
            category,
            term,
            min_rent,
            max_rent,
        }
    }

    pub fn by_term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn by_rent_range(min: Decimal, max: Decimal) -> Self {
        Self {
            min_rent: Some(min),
            max_rent: Some(max),
            ..Self::default()
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let rent = book.rent_per_day().as_ref();
        self.category
            .as_ref()
            .map_or(true, |category| category == book.category())
            && self
                .term
                .as_ref()
                .map_or(true, |term| contains_ignore_case(book.name().as_ref(), term))
            && self.min_rent.map_or(true, |min| rent >= &min)
            && self.max_rent.map_or(true, |max| rent <= &max)
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
