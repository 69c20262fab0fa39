pub mod cart;
pub mod feed;
pub mod format;
pub mod quote;
