// ==========================================
// 服装业务管理系统 - 导入规格 Trait
// ==========================================
// 职责: 以策略接口统一各主数据界面重复的导入逻辑；
//       每种实体只提供列契约、校验规则与父/子写入映射
// ==========================================

use crate::domain::types::ParentConflict;
use crate::domain::{RawRow, RowGroup};
use crate::importer::row_validator::{CrossRule, FieldRule};
use serde_json::Value;

// ==========================================
// ImportSpec Trait
// ==========================================
// 用途: 通用导入管道的实体参数化接口
// 实现者: ProductImportSpec / FabricImportSpec / CustomerImportSpec
pub trait ImportSpec: Send + Sync {
    // ===== 展示标签 =====

    /// 父实体单数标签（汇总文案用，如 "fabric"）
    fn entity_name(&self) -> &'static str;

    /// 父实体复数标签（如 "fabrics"）
    fn entity_plural(&self) -> &'static str;

    /// 子实体复数标签；平面实体返回 None
    fn child_plural(&self) -> Option<&'static str> {
        None
    }

    // ===== 列契约与校验 =====

    /// 表头必须包含的列（顺序即模板列序）
    fn required_columns(&self) -> &'static [&'static str];

    /// 列规则
    fn field_rules(&self) -> Vec<FieldRule>;

    /// 跨列规则
    fn cross_rules(&self) -> Vec<CrossRule> {
        Vec::new()
    }

    // ===== 分组 =====

    /// 父键提取
    ///
    /// # 返回
    /// - Some(key): 行归入该父键的分组
    /// - None: 实体不分组（每行自成一组，键取 row_key）
    fn parent_key(&self, row: &RawRow) -> Option<String>;

    /// 平面实体的行唯一标识（如 sku）
    fn row_key(&self, row: &RawRow) -> String;

    // ===== 父实体写入 =====

    fn parent_table(&self) -> &'static str;

    /// 父实体自然键列名（查询与 upsert 冲突键）
    fn parent_key_column(&self) -> &'static str;

    /// 父键已存在时的策略（复用 / 合并更新）
    fn parent_conflict(&self) -> ParentConflict;

    /// 构造父实体持久化载荷
    ///
    /// 分组内多行给出不同父级字段时不做调和：首行取值获胜
    fn build_parent(&self, group: &RowGroup) -> anyhow::Result<Value>;

    // ===== 子实体写入 =====

    /// 子表名；平面实体返回 None
    fn child_table(&self) -> Option<&'static str> {
        None
    }

    /// 子记录 upsert 冲突键列名
    fn child_conflict_column(&self) -> &'static str {
        "id"
    }

    /// 构造分组全部子记录载荷，每条引用已解析的父标识
    fn build_children(&self, _group: &RowGroup, _parent_id: &str) -> anyhow::Result<Vec<Value>> {
        Ok(Vec::new())
    }

    // ===== 模板下载 =====

    /// 模板示例行（与 required_columns 同序）
    fn template_example(&self) -> &'static [&'static str];
}

/// 分组键：有父键用父键，平面实体退化为行唯一键
pub fn group_key(spec: &dyn ImportSpec, row: &RawRow) -> String {
    spec.parent_key(row)
        .unwrap_or_else(|| spec.row_key(row))
}

/// 生成模板 CSV（表头 + 一条示例行）
pub fn csv_template(spec: &dyn ImportSpec) -> String {
    let header = spec.required_columns().join(",");
    let example = spec.template_example().join(",");
    format!("{}\n{}\n", header, example)
}

// ===== 单元格读取辅助 =====

/// 读取单元格文本（缺失列视为空）
pub fn cell<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// 读取单元格文本，空值归一为 None
pub fn opt_cell(row: &RawRow, column: &str) -> Option<String> {
    let value = cell(row, column);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// 解析浮点单元格，空或非法取 0（与来源界面行为一致）
pub fn float_or_zero(row: &RawRow, column: &str) -> f64 {
    cell(row, column).parse::<f64>().unwrap_or(0.0)
}

/// 解析可选整数单元格（空或非法为 None）
pub fn opt_int(row: &RawRow, column: &str) -> Option<i64> {
    let value = cell(row, column);
    if value.is_empty() {
        return None;
    }
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().map(|f| f as i64))
}

/// 解析可选浮点单元格（空或非法为 None）
pub fn opt_float(row: &RawRow, column: &str) -> Option<f64> {
    let value = cell(row, column);
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::specs::ProductImportSpec;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_cell_helpers() {
        let raw = row(&[("gsm", "220"), ("price", "150.5"), ("uom", "")]);

        assert_eq!(cell(&raw, "gsm"), "220");
        assert_eq!(cell(&raw, "absent"), "");
        assert_eq!(opt_cell(&raw, "uom"), None);
        assert_eq!(opt_int(&raw, "gsm"), Some(220));
        assert_eq!(opt_float(&raw, "price"), Some(150.5));
        assert_eq!(opt_float(&raw, "uom"), None);
        assert_eq!(float_or_zero(&raw, "absent"), 0.0);
    }

    #[test]
    fn test_csv_template_shape() {
        let spec = ProductImportSpec;
        let template = csv_template(&spec);
        let lines: Vec<&str> = template.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("sku,"));
        // 示例行与表头列数一致
        assert_eq!(
            lines[0].split(',').count(),
            lines[1].split(',').count()
        );
    }
}
