use std::fmt::{Debug, Formatter};

use vodca::{AsRefln, Fromln};

#[derive(Clone, PartialEq, Eq, Fromln, AsRefln)]
pub struct UserPassword(String);

impl UserPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl Debug for UserPassword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("UserPassword(***)")
    }
}
