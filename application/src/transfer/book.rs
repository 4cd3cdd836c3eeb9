use rust_decimal::Decimal;
use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub rent_per_day: Decimal,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            name,
            category,
            rent_per_day,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            rent_per_day: rent_per_day.into(),
        }
    }
}

pub struct CreateBookDto {
    pub name: String,
    pub category: String,
    pub rent_per_day: Decimal,
}

pub struct SearchBookDto {
    pub term: String,
}

pub struct RentRangeDto {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Default)]
pub struct FilterBookDto {
    pub category: Option<String>,
    pub term: Option<String>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}
