pub use credentials::{AuthState, CredentialTable};
pub use dataset::{Dataset, FilteredView};
pub use error::EngineError;
pub use filter::FilterSelection;
pub use loader::{CSV_HEADERS, DATE_FORMAT, TIMESTAMP_FORMAT, parse_date, parse_timestamp};
pub use metrics::Metrics;
pub use money::Money;
pub use order::Order;

pub mod charts;

mod credentials;
mod dataset;
mod error;
mod filter;
mod loader;
mod metrics;
mod money;
mod order;

type ResultEngine<T> = Result<T, EngineError>;
