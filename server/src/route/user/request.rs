use serde::Deserialize;

use application::transfer::CreateUserDto;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(alias = "username")]
    user_name: String,
    email: String,
    password: String,
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateUserDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateUserDto {
            name: input.user_name,
            email: input.email,
            password: input.password,
        }
    }
}
