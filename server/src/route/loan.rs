mod request;
mod response;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{GetLoanService, LendingService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::loan::request::{
    BookNameRequest, DateRangeRequest, IssueRequest, ReturnRequest, Transformer, UserBooksRequest,
};
use crate::route::loan::response::Presenter;

pub trait LoanRouter {
    fn route_loan(self) -> Self;
}

impl LoanRouter for Router<AppModule> {
    fn route_loan(self) -> Self {
        self.route(
            "/transactions/issue",
            post(
                |State(handler): State<AppModule>, Json(req): Json<IssueRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { handler.pgpool().issue_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/transactions/return",
            post(
                |State(handler): State<AppModule>, Json(req): Json<ReturnRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { handler.pgpool().return_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/transactions/book-status",
            get(
                |State(handler): State<AppModule>, Query(req): Query<BookNameRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|name| async move {
                            handler.pgpool().get_book_status(name.into()).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/transactions/book-rent",
            get(
                |State(handler): State<AppModule>, Query(req): Query<BookNameRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|name| async move {
                            handler.pgpool().get_book_rent(name.into()).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/transactions/user-books",
            get(
                |State(handler): State<AppModule>, Query(req): Query<UserBooksRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { handler.pgpool().get_user_books(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/transactions/date-range",
            get(
                |State(handler): State<AppModule>, Query(req): Query<DateRangeRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move {
                            handler.pgpool().get_loans_in_period(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
