// ==========================================
// 服装业务管理系统 - 面料导入规格
// ==========================================
// 契约: 按 fabric_code 分组；面料为父实体（键已存在则复用），
//       色卡为子实体，按确定性 id 批量 upsert
// ==========================================

use crate::domain::types::ParentConflict;
use crate::domain::{FabricColorRecord, FabricRecord, RawRow, RowGroup};
use crate::importer::import_spec::{cell, opt_cell, opt_float, opt_int, ImportSpec};
use crate::importer::row_validator::FieldRule;
use anyhow::Context;
use serde_json::Value;

const COLUMNS: [&str; 10] = [
    "fabric_code",
    "fabric_name",
    "fabric_type",
    "color",
    "gsm",
    "uom",
    "price",
    "supplier",
    "description",
    "hex_code",
];

const TEMPLATE_EXAMPLE: [&str; 10] = [
    "COTTON",
    "Combed Cotton",
    "Knit",
    "BLACK",
    "220",
    "kg",
    "450",
    "Sree Textiles",
    "Single jersey",
    "#000000",
];

pub struct FabricImportSpec;

impl ImportSpec for FabricImportSpec {
    fn entity_name(&self) -> &'static str {
        "fabric"
    }

    fn entity_plural(&self) -> &'static str {
        "fabrics"
    }

    fn child_plural(&self) -> Option<&'static str> {
        Some("variants")
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    fn field_rules(&self) -> Vec<FieldRule> {
        vec![
            FieldRule::required("fabric_code"),
            FieldRule::required("fabric_name"),
            FieldRule::numeric_or_empty("gsm"),
            FieldRule::non_negative_number_or_empty("price"),
            FieldRule::hex_color_or_empty("hex_code"),
        ]
    }

    fn parent_key(&self, row: &RawRow) -> Option<String> {
        Some(cell(row, "fabric_code").to_string())
    }

    fn row_key(&self, row: &RawRow) -> String {
        cell(row, "fabric_code").to_string()
    }

    fn parent_table(&self) -> &'static str {
        "fabric_master"
    }

    fn parent_key_column(&self) -> &'static str {
        "id"
    }

    fn parent_conflict(&self) -> ParentConflict {
        ParentConflict::Reuse
    }

    fn build_parent(&self, group: &RowGroup) -> anyhow::Result<Value> {
        // 父级字段取首行值（同组多行不一致时不做调和）
        let first = group.rows.first().context("分组为空")?;
        let raw = &first.raw;

        let record = FabricRecord {
            id: group.parent_key.clone(),
            fabric_name: cell(raw, "fabric_name").to_string(),
            fabric_type: opt_cell(raw, "fabric_type"),
            gsm: opt_int(raw, "gsm"),
            uom: opt_cell(raw, "uom"),
            price: opt_float(raw, "price"),
            supplier: opt_cell(raw, "supplier"),
            main_image_url: None,
        };

        Ok(serde_json::to_value(record)?)
    }

    fn child_table(&self) -> Option<&'static str> {
        Some("fabric_colors")
    }

    fn build_children(&self, group: &RowGroup, parent_id: &str) -> anyhow::Result<Vec<Value>> {
        let mut children = Vec::with_capacity(group.rows.len());

        for (index, row) in group.rows.iter().enumerate() {
            let raw = &row.raw;
            let color = cell(raw, "color").to_string();

            // 子记录 id 确定性拼接：颜色缺失时退化为组内序号
            let suffix = if color.is_empty() {
                (index + 1).to_string()
            } else {
                color.clone()
            };

            let record = FabricColorRecord {
                id: format!("{}-{}", parent_id, suffix),
                fabric_id: parent_id.to_string(),
                color,
                description: opt_cell(raw, "description"),
                hex_code: opt_cell(raw, "hex_code"),
                image_url: None,
            };
            children.push(serde_json::to_value(record)?);
        }

        Ok(children)
    }

    fn template_example(&self) -> &'static [&'static str] {
        &TEMPLATE_EXAMPLE
    }
}
