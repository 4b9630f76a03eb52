//! 对象缓存：Moka 内存缓存与可选的 Redis 后端

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};
