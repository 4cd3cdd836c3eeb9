use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnLoanQuery, DependOnUserQuery, LoanQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{DestructUser, User, UserEmail, UserId, UserName, UserPassword};
use kernel::KernelError;

use crate::transfer::{CreateUserDto, RentedBookDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery + DependOnLoanQuery {
    async fn get_all_users(&self) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let users = self.user_query().find_all(&mut connection).await?;
        let mut result = Vec::with_capacity(users.len());
        for user in users {
            let loans = self
                .loan_query()
                .find_by_user_id(&mut connection, user.id())
                .await?;
            let DestructUser {
                id, name, email, ..
            } = user.into_destruct();
            result.push(UserDto {
                id: id.into(),
                name: name.into(),
                email: email.into(),
                rented_books: loans.iter().map(RentedBookDto::from).collect(),
            });
        }
        Ok(result)
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery + DependOnLoanQuery {}

#[async_trait::async_trait]
pub trait CreateUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn create_user(&self, dto: CreateUserDto) -> error_stack::Result<Uuid, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let uuid = Uuid::new_v4();
        let user = User::new(
            UserId::new(uuid),
            UserName::new(dto.name),
            UserEmail::new(dto.email),
            UserPassword::new(dto.password),
        );
        self.user_modifier().create(&mut connection, &user).await?;

        connection.commit().await?;

        tracing::info!(user_id = %uuid, "user created");
        Ok(uuid)
    }
}

impl<T> CreateUserService for T where T: DependOnUserModifier {}
