pub mod ddg_scraper;
pub mod enrichment;

pub use ddg_scraper::*;
pub use enrichment::*;
