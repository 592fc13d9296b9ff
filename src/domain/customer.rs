// ==========================================
// 服装业务管理系统 - 客户主数据
// ==========================================
// 用途: 批量导入写入 customers 表的平面记录
// 对齐: 远程 customers 表（唯一键 customer_id）
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    // ===== 唯一键 =====
    pub customer_id: String, // 客户编码（自然键，upsert 冲突列）

    // ===== 联系信息 =====
    pub contact_person: Option<String>,
    pub company: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,

    // ===== 地址 =====
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,

    // ===== 头像 =====
    pub avatar_url: Option<String>,
}
