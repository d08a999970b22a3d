pub mod feed;
pub mod history;
pub mod models;
