mod category;
mod filter;
mod id;
mod name;
mod rent_per_day;

pub use self::{category::*, filter::*, id::*, name::*, rent_per_day::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    name: BookName,
    category: BookCategory,
    rent_per_day: RentPerDay,
}

impl Book {
    pub fn new(id: BookId, name: BookName, category: BookCategory, rent_per_day: RentPerDay) -> Self {
        Self {
            id,
            name,
            category,
            rent_per_day,
        }
    }
}
