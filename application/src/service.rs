mod book;
mod lending;
mod loan;
mod user;

pub use self::{book::*, lending::*, loan::*, user::*};
