use serde::{Deserialize, Deserializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use application::transfer::{
    GetBookRentDto, GetBookStatusDto, GetLoansInPeriodDto, GetUserBooksDto, IssueBookDto,
    ReturnBookDto,
};

use crate::controller::Intake;

fn parse_instant(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    match Date::parse(value, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Ok(date.midnight().assume_utc()),
        Err(_) => OffsetDateTime::parse(value, &Rfc3339),
    }
}

fn instant<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_instant(value.trim()).map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
pub struct IssueRequest {
    #[serde(alias = "username")]
    user_name: String,
    #[serde(alias = "bookname")]
    book_name: String,
    #[serde(alias = "issueDate", deserialize_with = "instant")]
    issue_date: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    #[serde(alias = "username")]
    user_name: String,
    #[serde(alias = "bookname")]
    book_name: String,
    #[serde(alias = "returnDate", deserialize_with = "instant")]
    return_date: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct BookNameRequest {
    #[serde(alias = "bookName")]
    book_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UserBooksRequest {
    #[serde(alias = "userName")]
    user_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeRequest {
    #[serde(alias = "startDate", deserialize_with = "instant")]
    start_date: OffsetDateTime,
    #[serde(alias = "endDate", deserialize_with = "instant")]
    end_date: OffsetDateTime,
}

pub struct RequestedBook(String);

impl From<RequestedBook> for GetBookStatusDto {
    fn from(value: RequestedBook) -> Self {
        Self {
            book_name: value.0,
        }
    }
}

impl From<RequestedBook> for GetBookRentDto {
    fn from(value: RequestedBook) -> Self {
        Self {
            book_name: value.0,
        }
    }
}

pub struct Transformer;

impl Intake<IssueRequest> for Transformer {
    type To = IssueBookDto;
    fn emit(&self, input: IssueRequest) -> Self::To {
        IssueBookDto {
            user_name: input.user_name,
            book_name: input.book_name,
            issued_at: input.issue_date,
        }
    }
}

impl Intake<ReturnRequest> for Transformer {
    type To = ReturnBookDto;
    fn emit(&self, input: ReturnRequest) -> Self::To {
        ReturnBookDto {
            user_name: input.user_name,
            book_name: input.book_name,
            returned_at: input.return_date,
        }
    }
}

impl Intake<BookNameRequest> for Transformer {
    type To = RequestedBook;
    fn emit(&self, input: BookNameRequest) -> Self::To {
        RequestedBook(input.book_name)
    }
}

impl Intake<UserBooksRequest> for Transformer {
    type To = GetUserBooksDto;
    fn emit(&self, input: UserBooksRequest) -> Self::To {
        GetUserBooksDto {
            user_name: input.user_name,
        }
    }
}

impl Intake<DateRangeRequest> for Transformer {
    type To = GetLoansInPeriodDto;
    fn emit(&self, input: DateRangeRequest) -> Self::To {
        GetLoansInPeriodDto {
            start: input.start_date.to_offset(UtcOffset::UTC).date(),
            end: input.end_date.to_offset(UtcOffset::UTC).date(),
        }
    }
}
