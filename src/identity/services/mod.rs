//! Application services for account lifecycle orchestration.

mod account;

pub use account::{AccountError, AccountResult, AccountService, RegisterRequest};
