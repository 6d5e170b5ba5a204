pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod utils;

// Re-export
pub use api::{ApiTrait, ExchangeDataTrait, TokenDataTrait};
pub use client::{CoinGecko, create_http_client};
pub use config::{COINGECKO_API_BASE, ClientConfig, load_dotenv};
pub use errors::{ErrorKind, MarketDataError};
pub use utils::{
    clamp_to_now, epoch_to_time, format_history_date, normalize_id, parse_api_datetime,
    require_id, time_to_epoch_seconds, value_to_f64,
};
