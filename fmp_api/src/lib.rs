mod client;
mod endpoint;
mod errors;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::endpoint::{
    encode_component, Endpoint, ESTIMATE_PERIODS, HISTORY_DAYS, INCOME_QUARTERS, INSIDER_LIMIT,
    NEWS_LIMIT,
};
pub use self::errors::Error;
