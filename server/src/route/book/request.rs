use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use application::transfer::{CreateBookDto, FilterBookDto, RentRangeDto, SearchBookDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(alias = "name")]
    book_name: String,
    category: String,
    rent_per_day: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    term: String,
}

#[derive(Debug, Deserialize)]
pub struct RentRangeRequest {
    min: Decimal,
    max: Decimal,
}

// `?min=` leaves the bound unset
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    category: Option<String>,
    term: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    min: Option<Decimal>,
    #[serde(default, deserialize_with = "blank_as_none")]
    max: Option<Decimal>,
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateBookDto {
            name: input.book_name,
            category: input.category,
            rent_per_day: input.rent_per_day,
        }
    }
}

impl Intake<SearchRequest> for Transformer {
    type To = SearchBookDto;
    fn emit(&self, input: SearchRequest) -> Self::To {
        SearchBookDto { term: input.term }
    }
}

impl Intake<RentRangeRequest> for Transformer {
    type To = RentRangeDto;
    fn emit(&self, input: RentRangeRequest) -> Self::To {
        RentRangeDto {
            min: input.min,
            max: input.max,
        }
    }
}

impl Intake<FilterRequest> for Transformer {
    type To = FilterBookDto;
    fn emit(&self, input: FilterRequest) -> Self::To {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
        FilterBookDto {
            category: non_empty(input.category),
            term: non_empty(input.term),
            min: input.min,
            max: input.max,
        }
    }
}
