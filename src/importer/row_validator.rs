// ==========================================
// 服装业务管理系统 - 行校验器
// ==========================================
// 职责: 对单行执行全部列规则与跨列规则，聚合错误消息
// 红线: 规则全部执行（不短路），一行可同时携带多条错误
// 说明: 校验仅为客户端建议性拦截，错误消息直接面向预览表格展示
// ==========================================

use crate::domain::{RawRow, ValidatedRow};

// ==========================================
// RuleKind - 列规则类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Required,                 // 非空
    NumericOrEmpty,           // 数值或空
    NonNegativeNumberOrEmpty, // 非负数值或空
    UrlOrEmpty,               // http(s) URL 或空
    HexColorOrEmpty,          // #rrggbb 或空
    DigitsOrEmpty,            // 纯数字或空
    EmailOrEmpty,             // 邮箱或空
}

// ==========================================
// FieldRule - 单列规则
// ==========================================
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub column: &'static str,
    pub kind: RuleKind,
}

impl FieldRule {
    pub fn required(column: &'static str) -> Self {
        Self {
            column,
            kind: RuleKind::Required,
        }
    }

    pub fn numeric_or_empty(column: &'static str) -> Self {
        Self {
            column,
            kind: RuleKind::NumericOrEmpty,
        }
    }

    pub fn non_negative_number_or_empty(column: &'static str) -> Self {
        Self {
            column,
            kind: RuleKind::NonNegativeNumberOrEmpty,
        }
    }

    pub fn url_or_empty(column: &'static str) -> Self {
        Self {
            column,
            kind: RuleKind::UrlOrEmpty,
        }
    }

    pub fn hex_color_or_empty(column: &'static str) -> Self {
        Self {
            column,
            kind: RuleKind::HexColorOrEmpty,
        }
    }

    pub fn digits_or_empty(column: &'static str) -> Self {
        Self {
            column,
            kind: RuleKind::DigitsOrEmpty,
        }
    }

    pub fn email_or_empty(column: &'static str) -> Self {
        Self {
            column,
            kind: RuleKind::EmailOrEmpty,
        }
    }

    /// 对单元格文本执行规则
    ///
    /// # 返回
    /// - None: 通过
    /// - Some(String): 面向用户的错误消息
    pub fn check(&self, value: &str) -> Option<String> {
        match self.kind {
            RuleKind::Required => {
                if value.is_empty() {
                    Some(format!("{} required", self.column))
                } else {
                    None
                }
            }
            RuleKind::NumericOrEmpty => {
                if value.is_empty() || value.parse::<f64>().is_ok() {
                    None
                } else {
                    Some(format!("{} must be a number", self.column))
                }
            }
            RuleKind::NonNegativeNumberOrEmpty => {
                if value.is_empty() {
                    return None;
                }
                match value.parse::<f64>() {
                    Ok(n) if n >= 0.0 => None,
                    Ok(_) => Some(format!("{} must be >= 0", self.column)),
                    Err(_) => Some(format!("{} must be a number", self.column)),
                }
            }
            RuleKind::UrlOrEmpty => {
                if value.is_empty() || is_http_url(value) {
                    None
                } else {
                    Some(format!("{} must be a URL", self.column))
                }
            }
            RuleKind::HexColorOrEmpty => {
                if value.is_empty() || is_hex_color(value) {
                    None
                } else {
                    Some(format!("{} must be a hex color like #1a2b3c", self.column))
                }
            }
            RuleKind::DigitsOrEmpty => {
                if value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) {
                    None
                } else {
                    Some(format!("{} must contain digits only", self.column))
                }
            }
            RuleKind::EmailOrEmpty => {
                if value.is_empty() || is_email(value) {
                    None
                } else {
                    Some(format!("{} must be an email", self.column))
                }
            }
        }
    }
}

fn is_http_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

// ==========================================
// CrossRule - 跨列规则
// ==========================================
#[derive(Clone)]
pub struct CrossRule {
    pub name: &'static str,
    pub check: fn(&RawRow) -> Option<String>,
}

/// 空单元格按 0 解释、非法数值按 NaN 解释（NaN 参与比较恒为假）
pub fn number_or_zero(row: &RawRow, column: &str) -> f64 {
    match row.get(column).map(String::as_str) {
        None | Some("") => 0.0,
        Some(value) => value.parse::<f64>().unwrap_or(f64::NAN),
    }
}

// ==========================================
// RowValidator - 行校验器
// ==========================================
pub struct RowValidator {
    field_rules: Vec<FieldRule>,
    cross_rules: Vec<CrossRule>,
}

impl RowValidator {
    pub fn new(field_rules: Vec<FieldRule>, cross_rules: Vec<CrossRule>) -> Self {
        Self {
            field_rules,
            cross_rules,
        }
    }

    /// 校验单行，返回带错误列表的 ValidatedRow
    pub fn validate(&self, raw: RawRow, row_number: usize) -> ValidatedRow {
        let mut errors = Vec::new();

        for rule in &self.field_rules {
            let value = raw.get(rule.column).map(String::as_str).unwrap_or("");
            if let Some(message) = rule.check(value) {
                errors.push(message);
            }
        }

        for rule in &self.cross_rules {
            if let Some(message) = (rule.check)(&raw) {
                errors.push(message);
            }
        }

        ValidatedRow::new(raw, row_number, errors)
    }
}
