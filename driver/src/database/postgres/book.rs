use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookCategory, BookFilter, BookId, BookName, RentPerDay};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_filter(con, &BookFilter::default()).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_name(
        &self,
        con: &mut PostgresConnection,
        name: &BookName,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_name(con, name).await
    }

    async fn find_first_containing(
        &self,
        con: &mut PostgresConnection,
        term: &str,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_first_containing(con, term).await
    }

    async fn find_by_filter(
        &self,
        con: &mut PostgresConnection,
        filter: &BookFilter,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_filter(con, filter).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    name: String,
    category: String,
    rent_per_day: Decimal,
}

impl TryFrom<BookRow> for Book {
    type Error = Report<KernelError>;
    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(
            BookId::new(value.id),
            BookName::new(value.name),
            BookCategory::new(value.category),
            RentPerDay::new(value.rent_per_day)?,
        ))
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, category, rent_per_day
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    async fn find_by_name(
        con: &mut PgConnection,
        name: &BookName,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, category, rent_per_day
            FROM books
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    async fn find_first_containing(
        con: &mut PgConnection,
        term: &str,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, category, rent_per_day
            FROM books
            WHERE strpos(lower(name), lower($1)) > 0
            ORDER BY name, id
            LIMIT 1
            "#,
        )
        .bind(term)
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    async fn find_by_filter(
        con: &mut PgConnection,
        filter: &BookFilter,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let category: Option<&String> = filter.category().as_ref().map(AsRef::as_ref);
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, category, rent_per_day
            FROM books
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR strpos(lower(name), lower($2)) > 0)
              AND ($3::numeric IS NULL OR rent_per_day >= $3)
              AND ($4::numeric IS NULL OR rent_per_day <= $4)
            ORDER BY name, id
            "#,
        )
        .bind(category)
        .bind(filter.term().as_deref())
        .bind(*filter.min_rent())
        .bind(*filter.max_rent())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Book::try_from).collect()
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO books (id, name, category, rent_per_day)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.name().as_ref())
        .bind(book.category().as_ref())
        .bind(book.rent_per_day().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
