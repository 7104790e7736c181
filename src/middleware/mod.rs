pub mod auth;
pub mod role;
pub mod student;
