// 存储模块 - 只读数据源

// 子模块
pub mod config;
pub mod database;
pub mod models;

// 重新导出主要类型
pub use config::StoreConfig;
pub use database::Database;
pub use models::*;
