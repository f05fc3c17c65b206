pub mod av;
pub mod base;
pub mod normalize;
pub mod utils;

pub use av::AlphaVantageClient;
pub use base::QuoteSource;
pub use normalize::normalize;
