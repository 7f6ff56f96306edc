pub mod admin;
pub mod answer;
pub mod auth;
pub mod comment;
pub mod notification;
pub mod question;
pub mod report;
pub mod upload;

pub use auth::*;
