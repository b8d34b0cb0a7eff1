pub mod blacklist_db;
pub mod company_db;
pub mod google_auth;
pub mod sheet_db;

pub use google_auth::GoogleCredentials;
pub use sheet_db::*;
