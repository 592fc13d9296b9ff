// ==========================================
// 集成测试辅助 - 远程平台内存模拟
// ==========================================
// 职责: RemoteTableApi 的内存实现 + 可注入失败 + 操作日志
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use masters_import::config::ImportConfigReader;
use masters_import::repository::{RemoteTableApi, RepositoryError, RepositoryResult};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

// ==========================================
// MockRemoteApi - 远程表内存模拟
// ==========================================
#[derive(Default)]
pub struct MockRemoteApi {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    ops: Mutex<Vec<String>>,
    // 失败注入: 整表写入失败
    fail_write_tables: Mutex<HashSet<String>>,
    // 失败注入: 载荷中某列等于某值时写入失败
    fail_payload: Mutex<Option<(String, String)>>, // (column, value)
    // 失败注入: 键预解析查询失败（模拟运行前网络故障）
    fail_select: AtomicBool,
}

impl MockRemoteApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注入: 对指定表的所有写入返回远程拒绝
    pub fn fail_writes_on(&self, table: &str) {
        if let Ok(mut tables) = self.fail_write_tables.lock() {
            tables.insert(table.to_string());
        }
    }

    /// 注入: 载荷中 column == value 的写入返回远程拒绝
    pub fn fail_payload_with(&self, column: &str, value: &str) {
        if let Ok(mut guard) = self.fail_payload.lock() {
            *guard = Some((column.to_string(), value.to_string()));
        }
    }

    /// 注入: select_keys_in 返回传输错误
    pub fn fail_select(&self) {
        self.fail_select.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .map(|t| t.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn count(&self, table: &str) -> usize {
        self.rows(table).len()
    }

    /// 操作日志（"insert fabric_master x1" / "upsert fabric_colors x2"）
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().map(|o| o.clone()).unwrap_or_default()
    }

    fn log(&self, op: &str) {
        if let Ok(mut ops) = self.ops.lock() {
            ops.push(op.to_string());
        }
    }

    fn check_write_allowed(&self, table: &str, rows: &[Value]) -> RepositoryResult<()> {
        let table_blocked = self
            .fail_write_tables
            .lock()
            .map(|t| t.contains(table))
            .unwrap_or(false);
        if table_blocked {
            return Err(RepositoryError::RemoteRejected {
                table: table.to_string(),
                status: 500,
                message: "injected table failure".to_string(),
            });
        }

        let payload_rule = self.fail_payload.lock().map(|g| g.clone()).unwrap_or(None);
        if let Some((column, value)) = payload_rule {
            let hit = rows
                .iter()
                .any(|row| row.get(&column).and_then(Value::as_str) == Some(value.as_str()));
            if hit {
                return Err(RepositoryError::RemoteRejected {
                    table: table.to_string(),
                    status: 409,
                    message: format!("injected failure for {}={}", column, value),
                });
            }
        }

        Ok(())
    }
}

#[async_trait]
impl RemoteTableApi for MockRemoteApi {
    async fn select_keys_in(
        &self,
        table: &str,
        key_column: &str,
        keys: &[String],
    ) -> RepositoryResult<Vec<String>> {
        if self.fail_select.load(Ordering::SeqCst) {
            return Err(RepositoryError::Transport(
                "injected connection failure".to_string(),
            ));
        }

        let wanted: HashSet<&str> = keys.iter().map(String::as_str).collect();
        let mut existing = Vec::new();
        for row in self.rows(table) {
            if let Some(key) = row.get(key_column).and_then(Value::as_str) {
                if wanted.contains(key) && !existing.iter().any(|e| e == key) {
                    existing.push(key.to_string());
                }
            }
        }
        Ok(existing)
    }

    async fn find_by_key(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
    ) -> RepositoryResult<Option<Value>> {
        Ok(self
            .rows(table)
            .into_iter()
            .find(|row| row.get(key_column).and_then(Value::as_str) == Some(key)))
    }

    async fn insert(&self, table: &str, row: Value) -> RepositoryResult<()> {
        self.check_write_allowed(table, std::slice::from_ref(&row))?;
        self.log(&format!("insert {} x1", table));

        if let Ok(mut tables) = self.tables.lock() {
            tables.entry(table.to_string()).or_default().push(row);
        }
        Ok(())
    }

    async fn insert_many(&self, table: &str, rows: Vec<Value>) -> RepositoryResult<usize> {
        self.check_write_allowed(table, &rows)?;
        let count = rows.len();
        self.log(&format!("insert {} x{}", table, count));

        if let Ok(mut tables) = self.tables.lock() {
            tables.entry(table.to_string()).or_default().extend(rows);
        }
        Ok(count)
    }

    async fn upsert_many(
        &self,
        table: &str,
        rows: Vec<Value>,
        conflict_column: &str,
    ) -> RepositoryResult<usize> {
        self.check_write_allowed(table, &rows)?;
        let count = rows.len();
        self.log(&format!("upsert {} x{}", table, count));

        if let Ok(mut tables) = self.tables.lock() {
            let stored = tables.entry(table.to_string()).or_default();
            for row in rows {
                let key = row.get(conflict_column).and_then(Value::as_str).map(str::to_string);
                let existing = key.as_deref().and_then(|k| {
                    stored
                        .iter()
                        .position(|r| r.get(conflict_column).and_then(Value::as_str) == Some(k))
                });
                match existing {
                    Some(pos) => stored[pos] = row,
                    None => stored.push(row),
                }
            }
        }
        Ok(count)
    }
}

// ==========================================
// TestConfig - 可调的导入配置
// ==========================================
pub struct TestConfig {
    pub preview_limit: usize,
    pub chunk_size: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            preview_limit: 4,
            chunk_size: 500,
        }
    }
}

#[async_trait]
impl ImportConfigReader for TestConfig {
    async fn preview_row_limit(&self) -> Result<usize, Box<dyn Error>> {
        Ok(self.preview_limit)
    }

    async fn child_chunk_size(&self) -> Result<usize, Box<dyn Error>> {
        Ok(self.chunk_size)
    }
}

// ==========================================
// CSV 夹具
// ==========================================

pub const FABRIC_HEADER: &str =
    "fabric_code,fabric_name,fabric_type,color,gsm,uom,price,supplier,description,hex_code";

pub const PRODUCT_HEADER: &str =
    "sku,size,class name,color,brand,category,hsn,gst %,mrp,cost price,selling price,image";

/// 场景 A: 同一面料两种颜色
pub fn fabric_csv_two_colors() -> String {
    format!(
        "{}\nCOTTON,Combed Cotton,Knit,BLACK,220,kg,450,Sree Textiles,Single jersey,#000000\nCOTTON,Combed Cotton,Knit,WHITE,220,kg,450,Sree Textiles,Single jersey,#ffffff\n",
        FABRIC_HEADER
    )
}

/// 三种面料各一行
pub fn fabric_csv_three_codes() -> String {
    format!(
        "{}\nCOTTON,Combed Cotton,Knit,BLACK,220,kg,450,,,\nLINEN,Pure Linen,Woven,NATURAL,180,m,600,,,\nSILK,Mulberry Silk,Woven,IVORY,90,m,1200,,,\n",
        FABRIC_HEADER
    )
}
