//! 数据同步客户端
//!
//! ```rust,ignore
//! let api = ApiClient::new("http://localhost:8080")?;
//! let mut store = DataStore::new(api);
//! store.login("admin@localhost", "secret").await?;
//! for trainer in store.trainers() {
//!     println!("{}", trainer.full_name);
//! }
//! ```

pub mod api;
pub mod error;
pub mod normalize;
pub mod store;

pub use api::{ApiClient, Upload};
pub use error::{ClientError, ClientResult};
pub use store::{ALL_REQUESTS_FAILED, DataStore, Resource, SESSION_EXPIRED};
