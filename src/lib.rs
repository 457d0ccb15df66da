// 公开导出的模块，供外部使用
pub mod models;
pub mod errors;
pub mod config;
pub mod scrapers;
pub mod services;

#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::quote::{Outcome, PricePoint, Report, SymbolResult, SymbolSeries};
pub use models::document::Document;
pub use config::Config;
pub use scrapers::base::{PriceSource, RawHistory};
pub use services::document_service::{DocumentService, UpdatePolicy};
pub use services::quote_service::QuoteService;
pub use services::report::render_report;
pub use errors::{Result, TrackerError};
