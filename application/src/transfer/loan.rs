use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use kernel::prelude::entity::{DestructLoan, DestructUser, Loan, User};

#[derive(Debug, Clone, PartialEq)]
pub struct LoanDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub issued_at: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
    pub rent_amount: Option<Decimal>,
}

impl From<Loan> for LoanDto {
    fn from(value: Loan) -> Self {
        let DestructLoan {
            id,
            user_id,
            book_id,
            issued_at,
            returned_at,
            rent_amount,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            book_id: book_id.into(),
            issued_at: issued_at.into(),
            returned_at: returned_at.map(Into::into),
            rent_amount: rent_amount.map(Into::into),
        }
    }
}

pub struct IssueBookDto {
    pub user_name: String,
    pub book_name: String,
    pub issued_at: OffsetDateTime,
}

pub struct ReturnBookDto {
    pub user_name: String,
    pub book_name: String,
    pub returned_at: OffsetDateTime,
}

pub struct GetBookStatusDto {
    pub book_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookStatusDto {
    pub total_issued_count: usize,
    pub current_holder: Option<HolderDto>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HolderDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for HolderDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id, name, email, ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

pub struct GetBookRentDto {
    pub book_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookRentDto {
    pub book_name: String,
    pub total_rent: Decimal,
}

pub struct GetUserBooksDto {
    pub user_name: String,
}

pub struct GetLoansInPeriodDto {
    pub start: Date,
    pub end: Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanPartiesDto {
    pub book_name: String,
    pub user_name: String,
}
