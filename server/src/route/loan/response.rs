use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{BookRentDto, BookStatusDto, HolderDto, LoanDto, LoanPartiesDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    id: Uuid,
    user_id: Uuid,
    book_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    issue_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    return_date: Option<OffsetDateTime>,
    #[serde(with = "rust_decimal::serde::float_option")]
    rent_amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct BookStatusResponse {
    total_issued_count: usize,
    current_status: CurrentStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum CurrentStatus {
    #[serde(rename = "Currently Issued")]
    Issued { currently_issued_to: HolderResponse },
    #[serde(rename = "Not Issued at the Moment")]
    Available,
}

#[derive(Debug, Serialize)]
pub struct HolderResponse {
    id: Uuid,
    user_name: String,
    email: String,
}

impl From<HolderDto> for HolderResponse {
    fn from(value: HolderDto) -> Self {
        Self {
            id: value.id,
            user_name: value.name,
            email: value.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookRentResponse {
    book_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    total_rent_generated: Decimal,
}

#[derive(Debug, Serialize)]
pub struct LoanPartiesResponse {
    book_name: String,
    user_name: String,
}

pub struct Presenter;

impl Exhaust<LoanDto> for Presenter {
    type To = Json<LoanResponse>;
    fn emit(&self, input: LoanDto) -> Self::To {
        Json(LoanResponse {
            id: input.id,
            user_id: input.user_id,
            book_id: input.book_id,
            issue_date: input.issued_at,
            return_date: input.returned_at,
            rent_amount: input.rent_amount,
        })
    }
}

impl Exhaust<BookStatusDto> for Presenter {
    type To = Json<BookStatusResponse>;
    fn emit(&self, input: BookStatusDto) -> Self::To {
        let current_status = match input.current_holder {
            Some(holder) => CurrentStatus::Issued {
                currently_issued_to: HolderResponse::from(holder),
            },
            None => CurrentStatus::Available,
        };
        Json(BookStatusResponse {
            total_issued_count: input.total_issued_count,
            current_status,
        })
    }
}

impl Exhaust<BookRentDto> for Presenter {
    type To = Json<BookRentResponse>;
    fn emit(&self, input: BookRentDto) -> Self::To {
        Json(BookRentResponse {
            book_name: input.book_name,
            total_rent_generated: input.total_rent,
        })
    }
}

impl Exhaust<Vec<String>> for Presenter {
    type To = Json<Vec<String>>;
    fn emit(&self, input: Vec<String>) -> Self::To {
        Json(input)
    }
}

impl Exhaust<Vec<LoanPartiesDto>> for Presenter {
    type To = Json<Vec<LoanPartiesResponse>>;
    fn emit(&self, input: Vec<LoanPartiesDto>) -> Self::To {
        Json(
            input
                .into_iter()
                .map(|parties| LoanPartiesResponse {
                    book_name: parties.book_name,
                    user_name: parties.user_name,
                })
                .collect(),
        )
    }
}
