pub mod auth;
pub mod books;
pub mod circulation;
pub mod classes;
pub mod config;
pub mod logs;
pub mod streams;
pub mod student_auth;
pub mod students;
pub mod users;
