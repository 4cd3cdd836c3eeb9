pub use self::{book::*, loan::*, user::*};

mod book;
mod loan;
mod user;
