// ==========================================
// 服装业务管理系统 - 商品主数据
// ==========================================
// 用途: 批量导入写入 product_master 表的平面记录
// 对齐: 远程 product_master 表（唯一键 sku）
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    // ===== 唯一键 =====
    pub sku: String, // 商品 SKU（自然键，upsert 冲突列）

    // ===== 基础信息 =====
    pub size: Option<String>,       // 尺码
    pub class_name: Option<String>, // 款式编码
    pub color: Option<String>,      // 颜色
    pub brand: Option<String>,      // 品牌
    pub category: Option<String>,   // 品类

    // ===== 税务与价格 =====
    pub hsn: Option<String>,     // HSN 编码
    pub gst_percent: f64,        // GST 税率（%）
    pub mrp: f64,                // 最高零售价
    pub cost_price: f64,         // 成本价
    pub selling_price: f64,      // 售价

    // ===== 图片 =====
    pub image_url: Option<String>,
}
