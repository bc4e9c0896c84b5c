//! 仪表盘错误类型
//!
//! - `StoreUnavailable` / `QueryError`：致命错误，整页渲染中止，直接展示给用户
//! - `InputParseError`：输入框自身处理（回退到上一次有效值），不会传到计算器

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardError {
    /// 数据库文件不存在或无法打开
    #[error("数据库不可用 ({path}): {reason}")]
    StoreUnavailable { path: String, reason: String },

    /// 表不存在或内容格式不正确
    #[error("查询表 {table} 失败: {reason}")]
    QueryError { table: String, reason: String },

    /// 用户输入无法解析为十进制数
    #[error("字段 {field} 的输入无效: {value:?}")]
    InputParseError { field: String, value: String },
}

impl DashboardError {
    pub fn unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn query(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::QueryError {
            table: table.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
