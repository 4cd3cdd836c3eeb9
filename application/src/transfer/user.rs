use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::Loan;

#[derive(Debug, Clone, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub rented_books: Vec<RentedBookDto>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentedBookDto {
    pub book_id: Uuid,
    pub rent_date: OffsetDateTime,
    pub return_date: Option<OffsetDateTime>,
}

impl From<&Loan> for RentedBookDto {
    fn from(value: &Loan) -> Self {
        Self {
            book_id: *value.book_id().as_ref(),
            rent_date: *value.issued_at().as_ref(),
            return_date: (*value.returned_at()).map(OffsetDateTime::from),
        }
    }
}

pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password: String,
}
