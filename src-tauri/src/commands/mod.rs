//! Tauri 命令模块
//!
//! 提供前端调用的所有 Tauri 命令接口，按功能分组：
//! - query: 仪表盘渲染与数据库状态查询
//! - config: 配置读取

pub mod config;
pub mod query;

// 重新导出所有命令
pub use config::*;
pub use query::*;
