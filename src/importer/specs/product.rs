// ==========================================
// 服装业务管理系统 - 商品导入规格
// ==========================================
// 契约: 平面实体（无分组），sku 为自然键，按冲突键 upsert
// ==========================================

use crate::domain::types::ParentConflict;
use crate::domain::{ProductRecord, RawRow, RowGroup};
use crate::importer::import_spec::{
    cell, float_or_zero, opt_cell, ImportSpec,
};
use crate::importer::row_validator::{number_or_zero, CrossRule, FieldRule};
use anyhow::Context;
use serde_json::Value;

// 模板表头（列名与远程列的映射在 build_parent 中完成）
const COLUMNS: [&str; 12] = [
    "sku",
    "size",
    "class name",
    "color",
    "brand",
    "category",
    "hsn",
    "gst %",
    "mrp",
    "cost price",
    "selling price",
    "image",
];

const TEMPLATE_EXAMPLE: [&str; 12] = [
    "NF-PET-T-GRE-XL",
    "XL",
    "NF-PET-T-GRE",
    "GREEN",
    "Cutiepaw",
    "Pet T-shirts",
    "610099",
    "5",
    "999",
    "199",
    "399",
    "https://example.com/image.jpg",
];

fn mrp_not_below_selling(raw: &RawRow) -> Option<String> {
    if number_or_zero(raw, "mrp") < number_or_zero(raw, "selling price") {
        Some("mrp < selling price".to_string())
    } else {
        None
    }
}

pub struct ProductImportSpec;

impl ImportSpec for ProductImportSpec {
    fn entity_name(&self) -> &'static str {
        "product"
    }

    fn entity_plural(&self) -> &'static str {
        "products"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    fn field_rules(&self) -> Vec<FieldRule> {
        vec![
            FieldRule::required("sku"),
            FieldRule::numeric_or_empty("gst %"),
            FieldRule::numeric_or_empty("mrp"),
            FieldRule::numeric_or_empty("cost price"),
            FieldRule::numeric_or_empty("selling price"),
            FieldRule::url_or_empty("image"),
        ]
    }

    fn cross_rules(&self) -> Vec<CrossRule> {
        vec![CrossRule {
            name: "mrp_not_below_selling",
            check: mrp_not_below_selling,
        }]
    }

    fn parent_key(&self, _row: &RawRow) -> Option<String> {
        None
    }

    fn row_key(&self, row: &RawRow) -> String {
        cell(row, "sku").to_string()
    }

    fn parent_table(&self) -> &'static str {
        "product_master"
    }

    fn parent_key_column(&self) -> &'static str {
        "sku"
    }

    fn parent_conflict(&self) -> ParentConflict {
        ParentConflict::Merge
    }

    fn build_parent(&self, group: &RowGroup) -> anyhow::Result<Value> {
        let first = group.rows.first().context("分组为空")?;
        let raw = &first.raw;

        let record = ProductRecord {
            sku: cell(raw, "sku").to_string(),
            size: opt_cell(raw, "size"),
            class_name: opt_cell(raw, "class name"),
            color: opt_cell(raw, "color"),
            brand: opt_cell(raw, "brand"),
            category: opt_cell(raw, "category"),
            hsn: opt_cell(raw, "hsn"),
            gst_percent: float_or_zero(raw, "gst %"),
            mrp: float_or_zero(raw, "mrp"),
            cost_price: float_or_zero(raw, "cost price"),
            selling_price: float_or_zero(raw, "selling price"),
            image_url: opt_cell(raw, "image"),
        };

        Ok(serde_json::to_value(record)?)
    }

    fn template_example(&self) -> &'static [&'static str] {
        &TEMPLATE_EXAMPLE
    }
}
