use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookCategory, BookFilter, BookId, BookName, RentPerDay};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, FilterBookDto, RentRangeDto, SearchBookDto};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn search_books(
        &self,
        dto: SearchBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        self.find_books(BookFilter::by_term(dto.term)).await
    }

    async fn get_books_by_rent_range(
        &self,
        dto: RentRangeDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        self.find_books(BookFilter::by_rent_range(dto.min, dto.max))
            .await
    }

    async fn filter_books(
        &self,
        dto: FilterBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let filter = BookFilter::new(
            dto.category.map(BookCategory::new),
            dto.term,
            dto.min,
            dto.max,
        );
        self.find_books(filter).await
    }

    async fn find_books(
        &self,
        filter: BookFilter,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self
            .book_query()
            .find_by_filter(&mut connection, &filter)
            .await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<Uuid, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let uuid = Uuid::new_v4();
        let book = Book::new(
            BookId::new(uuid),
            BookName::new(dto.name),
            BookCategory::new(dto.category),
            RentPerDay::new(dto.rent_per_day)?,
        );
        self.book_modifier().create(&mut connection, &book).await?;

        connection.commit().await?;

        tracing::info!(book_id = %uuid, "book created");
        Ok(uuid)
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}
