// 数据库读取模块 - 只读 SQLite 数据源

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row, TypeInfo, ValueRef};
use tracing::{error, info, warn};

use super::config::{StoreConfig, DESCRIPTION_TABLE, FORECAST_TABLE, MACRO_TABLE};
use super::models::{CellValue, DashboardData, DataTable};
use crate::error::{DashboardError, Result};

/// 只读数据库读取器
///
/// 每次加载只打开一个连接，读完三张表后立即关闭；
/// 任何失败路径上连接都会在返回错误前释放
pub struct Database;

impl Database {
    /// 加载仪表盘所需的三张表
    pub async fn load(config: &StoreConfig) -> Result<DashboardData> {
        info!("打开只读数据库: {}", config.display_path());

        let mut conn = Self::open(&config.db_path).await?;
        let result = Self::read_all(&mut conn).await;

        if let Err(e) = conn.close().await {
            warn!("关闭数据库连接失败: {}", e);
        }

        match &result {
            Ok(data) => info!(
                "数据加载完成: {} 行宏观数据, {} 行预测, {} 条指标说明",
                data.macro_table.row_count(),
                data.forecast_table.row_count(),
                data.description_table.row_count()
            ),
            Err(e) => error!("数据加载失败: {}", e),
        }

        result
    }

    async fn open(path: &Path) -> Result<SqliteConnection> {
        let display = path.display().to_string();

        if !path.is_file() {
            return Err(DashboardError::unavailable(display, "文件不存在"));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let mut conn = options
            .connect()
            .await
            .map_err(|e| DashboardError::unavailable(&display, e))?;

        // 打开是惰性的，非 SQLite 文件在第一次读取时才报错
        if let Err(e) = sqlx::query("PRAGMA schema_version")
            .fetch_one(&mut conn)
            .await
        {
            let _ = conn.close().await;
            return Err(DashboardError::unavailable(display, e));
        }

        Ok(conn)
    }

    async fn read_all(conn: &mut SqliteConnection) -> Result<DashboardData> {
        let macro_table = Self::read_table(conn, MACRO_TABLE).await?;
        let forecast_table = Self::read_table(conn, FORECAST_TABLE).await?;
        let description_table = Self::read_table(conn, DESCRIPTION_TABLE).await?;

        DashboardData::from_tables(macro_table, forecast_table, description_table)
    }

    /// 执行 `SELECT *`，按数据库返回顺序保留所有行
    async fn read_table(conn: &mut SqliteConnection, table: &str) -> Result<DataTable> {
        let sql = format!("SELECT * FROM \"{}\"", table);
        let rows = sqlx::query(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| DashboardError::query(table, e))?;

        let columns = match rows.first() {
            Some(row) => row
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            None => Self::table_columns(conn, table).await?,
        };

        let mut cells = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut values = Vec::with_capacity(row.len());
            for index in 0..row.len() {
                let cell = decode_cell(row, index).map_err(|e| DashboardError::query(table, e))?;
                values.push(cell);
            }
            cells.push(values);
        }

        Ok(DataTable {
            name: table.to_string(),
            columns,
            rows: cells,
        })
    }

    /// 空表时从表结构获取列名
    async fn table_columns(conn: &mut SqliteConnection, table: &str) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
            .bind(table)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| DashboardError::query(table, e))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DashboardError::query(table, e))
    }
}

/// 按值的实际存储类型解码单元格
fn decode_cell(row: &SqliteRow, index: usize) -> std::result::Result<CellValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(CellValue::Null);
    }
    let type_name = raw.type_info().name().to_string();

    let value = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => CellValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" | "NUMERIC" => CellValue::Real(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            CellValue::Text(format!("<{} bytes>", bytes.len()))
        }
        _ => CellValue::Text(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_preserves_row_order_and_columns() {
        let temp_dir = tempdir().unwrap();
        let path = fixtures::write_sample_store(temp_dir.path()).await;

        let data = Database::load(&StoreConfig::new(&path)).await.unwrap();

        assert_eq!(
            data.macro_table.columns,
            vec!["year", "inflation", "gdp", "unemployment", "rnd", "ict_services"]
        );
        assert_eq!(data.macro_table.row_count(), 15);
        let years: Vec<_> = data.macro_records.iter().map(|r| r.year).collect();
        assert_eq!(years, (2010..=2024).collect::<Vec<_>>());

        // 预测表按写入顺序（混合模型类型）返回
        let models: Vec<_> = data.forecasts.iter().map(|r| r.model_type.as_str()).collect();
        assert_eq!(
            models,
            vec!["SARIMAX", "ARIMA", "SARIMAX", "ARIMA", "SARIMAX", "SARIMAX", "SARIMAX"]
        );
        assert_eq!(data.description_table.row_count(), 3);
        assert_eq!(
            data.description_of("ict_services"),
            Some("Volume of ICT services, trillion")
        );
    }

    #[tokio::test]
    async fn test_duplicate_rows_are_kept() {
        let temp_dir = tempdir().unwrap();
        let path = fixtures::write_sample_store(temp_dir.path()).await;
        fixtures::execute(
            &path,
            "INSERT INTO indicator_description VALUES ('gdp', 'GDP, trillion')",
        )
        .await;

        let data = Database::load(&StoreConfig::new(&path)).await.unwrap();
        let gdp_rows = data
            .descriptions
            .iter()
            .filter(|d| d.indicator == "gdp")
            .count();
        assert_eq!(gdp_rows, 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_store_unavailable() {
        let temp_dir = tempdir().unwrap();
        let config = StoreConfig::new(temp_dir.path().join("absent.db"));

        let err = Database::load(&config).await.unwrap_err();
        assert!(matches!(err, DashboardError::StoreUnavailable { .. }));
        // 只读模式不会创建文件
        assert!(!config.db_path.exists());
    }

    #[tokio::test]
    async fn test_non_database_file_is_store_unavailable() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("garbage.db");
        std::fs::write(&path, b"this is not a sqlite database, just some text padding it out")
            .unwrap();

        let err = Database::load(&StoreConfig::new(&path)).await.unwrap_err();
        assert!(matches!(err, DashboardError::StoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_missing_forecast_table_is_query_error() {
        let temp_dir = tempdir().unwrap();
        let path = fixtures::write_sample_store(temp_dir.path()).await;
        fixtures::execute(&path, "DROP TABLE forecast_results").await;

        match Database::load(&StoreConfig::new(&path)).await {
            Err(DashboardError::QueryError { table, reason }) => {
                assert_eq!(table, FORECAST_TABLE);
                assert!(reason.contains("no such table"), "{}", reason);
            }
            other => panic!("意外结果: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_table_still_reports_columns() {
        let temp_dir = tempdir().unwrap();
        let path = fixtures::write_sample_store(temp_dir.path()).await;
        fixtures::execute(&path, "DELETE FROM forecast_results").await;

        let data = Database::load(&StoreConfig::new(&path)).await.unwrap();
        assert!(data.forecasts.is_empty());
        assert_eq!(
            data.forecast_table.columns,
            vec!["year", "model_type", "forecast_value", "lower_bound", "upper_bound"]
        );
    }

    #[tokio::test]
    async fn test_load_does_not_modify_store() {
        let temp_dir = tempdir().unwrap();
        let path = fixtures::write_sample_store(temp_dir.path()).await;
        let before = std::fs::read(&path).unwrap();

        Database::load(&StoreConfig::new(&path)).await.unwrap();
        Database::load(&StoreConfig::new(&path)).await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}
