pub mod utils;
pub mod write;

pub use utils::connect;
pub use write::{PgQuoteWriter, QuoteSink};
