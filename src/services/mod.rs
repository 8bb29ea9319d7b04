// Service exports
pub mod deal_book;

pub use deal_book::{DealBook, DealBookError};
