pub mod document;
pub mod quote;
