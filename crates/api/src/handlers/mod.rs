pub mod contact;
pub mod download;
pub mod strategies;
pub mod users;
