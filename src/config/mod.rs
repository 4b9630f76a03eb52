//! 配置管理：文件 + 环境变量，全局单例

mod r#impl;
mod structs;

pub use structs::*;
