// ==========================================
// 服装业务管理系统 - 客户导入规格
// ==========================================
// 契约: 平面实体，customer_id 为自然键，按冲突键 upsert
// ==========================================

use crate::domain::types::ParentConflict;
use crate::domain::{CustomerRecord, RawRow, RowGroup};
use crate::importer::import_spec::{cell, opt_cell, ImportSpec};
use crate::importer::row_validator::FieldRule;
use anyhow::Context;
use serde_json::Value;

const COLUMNS: [&str; 11] = [
    "customer_id",
    "contact_person",
    "company",
    "mobile",
    "email",
    "address_line1",
    "address_line2",
    "state",
    "city",
    "pincode",
    "avatar_url",
];

const TEMPLATE_EXAMPLE: [&str; 11] = [
    "CUST-001",
    "Asha Verma",
    "Cutiepaw Retail",
    "9876543210",
    "asha@example.com",
    "12 MG Road",
    "",
    "Karnataka",
    "Bengaluru",
    "560001",
    "",
];

pub struct CustomerImportSpec;

impl ImportSpec for CustomerImportSpec {
    fn entity_name(&self) -> &'static str {
        "customer"
    }

    fn entity_plural(&self) -> &'static str {
        "customers"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    fn field_rules(&self) -> Vec<FieldRule> {
        vec![
            // 幂等重导入依赖稳定自然键，批量通道要求显式 customer_id
            FieldRule::required("customer_id"),
            FieldRule::email_or_empty("email"),
            FieldRule::digits_or_empty("pincode"),
            FieldRule::url_or_empty("avatar_url"),
        ]
    }

    fn parent_key(&self, _row: &RawRow) -> Option<String> {
        None
    }

    fn row_key(&self, row: &RawRow) -> String {
        cell(row, "customer_id").to_string()
    }

    fn parent_table(&self) -> &'static str {
        "customers"
    }

    fn parent_key_column(&self) -> &'static str {
        "customer_id"
    }

    fn parent_conflict(&self) -> ParentConflict {
        ParentConflict::Merge
    }

    fn build_parent(&self, group: &RowGroup) -> anyhow::Result<Value> {
        let first = group.rows.first().context("分组为空")?;
        let raw = &first.raw;

        let record = CustomerRecord {
            customer_id: cell(raw, "customer_id").to_string(),
            contact_person: opt_cell(raw, "contact_person"),
            company: opt_cell(raw, "company"),
            mobile: opt_cell(raw, "mobile"),
            email: opt_cell(raw, "email"),
            address_line1: opt_cell(raw, "address_line1"),
            address_line2: opt_cell(raw, "address_line2"),
            state: opt_cell(raw, "state"),
            city: opt_cell(raw, "city"),
            pincode: opt_cell(raw, "pincode"),
            avatar_url: opt_cell(raw, "avatar_url"),
        };

        Ok(serde_json::to_value(record)?)
    }

    fn template_example(&self) -> &'static [&'static str] {
        &TEMPLATE_EXAMPLE
    }
}
