//! Per-entity queries. Every insert validates its input before touching the
//! database; missing rows surface as `AppError::NotFound`.

pub mod actors;
pub mod customers;
pub mod directors;
pub mod plays;
pub mod showtimes;
pub mod tickets;
pub mod users;
