// ==========================================
// 服装业务管理系统 - 面料主数据
// ==========================================
// 用途: 批量导入写入 fabric_master / fabric_colors 表
// 结构: 面料为父实体，色卡为子实体（按 fabric_code 分组）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// FabricRecord - 面料父记录
// ==========================================
// 对齐: 远程 fabric_master 表（主键 id = 面料编码）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricRecord {
    pub id: String, // 面料编码（自然键）

    pub fabric_name: String,
    pub fabric_type: Option<String>, // 面料类型（梭织/针织等）
    pub gsm: Option<i64>,            // 克重（g/m²）
    pub uom: Option<String>,         // 计量单位
    pub price: Option<f64>,          // 采购单价
    pub supplier: Option<String>,    // 供应商
    pub main_image_url: Option<String>,
}

// ==========================================
// FabricColorRecord - 面料色卡子记录
// ==========================================
// 对齐: 远程 fabric_colors 表（主键 id = "{面料编码}-{颜色}"）
// 说明: 子记录 id 由面料编码与颜色确定性拼接，重复导入按该键 upsert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricColorRecord {
    pub id: String,
    pub fabric_id: String, // 关联 fabric_master.id

    pub color: String,
    pub description: Option<String>,
    pub hex_code: Option<String>,
    pub image_url: Option<String>,
}
