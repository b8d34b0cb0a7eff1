pub mod blacklist;
pub mod candidate;
pub mod company_row;
pub mod normalizer;
