pub mod document_service;
pub mod normalize;
pub mod quote_service;
pub mod report;
