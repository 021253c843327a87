//! Password hashing, bearer tokens, and the route guard built on them.

pub mod middleware;
pub mod password;
pub mod token;
