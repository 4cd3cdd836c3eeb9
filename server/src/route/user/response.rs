use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{RentedBookDto, UserDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: Uuid,
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: Uuid,
    user_name: String,
    email: String,
    rented_books: Vec<RentedBookResponse>,
}

#[derive(Debug, Serialize)]
pub struct RentedBookResponse {
    book_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    rent_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    return_date: Option<OffsetDateTime>,
}

impl From<RentedBookDto> for RentedBookResponse {
    fn from(value: RentedBookDto) -> Self {
        Self {
            book_id: value.book_id,
            rent_date: value.rent_date,
            return_date: value.return_date,
        }
    }
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            user_name: value.name,
            email: value.email,
            rented_books: value
                .rented_books
                .into_iter()
                .map(RentedBookResponse::from)
                .collect(),
        }
    }
}

pub struct Presenter;

impl Exhaust<Uuid> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: Uuid) -> Self::To {
        CreatedResponse { id: input }
    }
}

impl Exhaust<Vec<UserDto>> for Presenter {
    type To = Json<Vec<UserResponse>>;
    fn emit(&self, input: Vec<UserDto>) -> Self::To {
        Json(input.into_iter().map(UserResponse::from).collect())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use application::transfer::{RentedBookDto, UserDto};

    use crate::route::user::response::UserResponse;

    #[test]
    fn user_json_has_history_and_no_password() {
        let user = UserDto {
            id: Uuid::nil(),
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            rented_books: vec![RentedBookDto {
                book_id: Uuid::nil(),
                rent_date: datetime!(2024-03-01 0:00 UTC),
                return_date: None,
            }],
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["user_name"], "alice");
        assert!(json.get("password").is_none());
        assert_eq!(
            json["rented_books"][0]["rent_date"],
            "2024-03-01T00:00:00Z"
        );
        assert!(json["rented_books"][0]["return_date"].is_null());
    }
}
