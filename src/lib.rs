//! Parc - 培训管理平台
//!
//! 基于 Actix Web 的多角色培训管理后端（管理员、讲师、学员、员工），
//! 以及供仪表盘使用的数据同步客户端。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `client`: 数据同步层（reqwest）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、授权与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod client;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
