pub mod config;
pub mod error;
pub mod load;
pub mod logging;
pub mod record;
pub mod remote;
pub mod sql;
pub mod staged;
pub mod timestamp;
pub mod transform;

pub use config::Config;
pub use error::{EtlError, Result};
pub use load::{load, LoadSummary};
pub use remote::{RpcClient, SqlExecutor};
pub use transform::transform;
