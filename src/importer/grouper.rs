// ==========================================
// 服装业务管理系统 - 行分组器
// ==========================================
// 职责: 将有序行序列按父键聚合为分组
// 不变式: 组序 = 父键首次出现序；组内行序 = 文件行序；
//         不丢行、不重复
// ==========================================

use crate::domain::{RawRow, RowGroup, ValidatedRow};
use std::collections::HashMap;

/// 按父键聚合行
///
/// # 参数
/// - rows: 校验后的有序行（调用方通常已过滤掉无效行）
/// - key_of: 父键提取函数；平面实体传行唯一键即可退化为单行组
pub fn group_rows<F>(rows: Vec<ValidatedRow>, key_of: F) -> Vec<RowGroup>
where
    F: Fn(&RawRow) -> String,
{
    let mut groups: Vec<RowGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let key = key_of(&row.raw);
        match index.get(&key) {
            Some(&pos) => groups[pos].rows.push(row),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RowGroup {
                    parent_key: key,
                    rows: vec![row],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(key: &str, marker: &str, row_number: usize) -> ValidatedRow {
        let raw: RawRow = [
            ("code".to_string(), key.to_string()),
            ("marker".to_string(), marker.to_string()),
        ]
        .into_iter()
        .collect();
        ValidatedRow::new(raw, row_number, Vec::new())
    }

    #[test]
    fn test_group_order_is_first_seen() {
        let rows = vec![
            make_row("COTTON", "black", 1),
            make_row("LINEN", "white", 2),
            make_row("COTTON", "white", 3),
        ];

        let groups = group_rows(rows, |raw| raw["code"].clone());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].parent_key, "COTTON");
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(groups[1].parent_key, "LINEN");
    }

    #[test]
    fn test_grouping_is_stable_and_lossless() {
        let rows: Vec<ValidatedRow> = (1..=6)
            .map(|i| make_row(if i % 2 == 0 { "B" } else { "A" }, &i.to_string(), i))
            .collect();

        let groups = group_rows(rows, |raw| raw["code"].clone());

        // 组内行序保持文件顺序，且总行数不变
        let flattened: Vec<usize> = groups
            .iter()
            .flat_map(|g| g.rows.iter().map(|r| r.row_number))
            .collect();
        assert_eq!(flattened, vec![1, 3, 5, 2, 4, 6]);
        assert_eq!(flattened.len(), 6);
    }

    #[test]
    fn test_identity_key_degenerates_to_singletons() {
        let rows = vec![
            make_row("SKU-1", "a", 1),
            make_row("SKU-2", "b", 2),
            make_row("SKU-3", "c", 3),
        ];

        let groups = group_rows(rows, |raw| raw["code"].clone());

        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.rows.len() == 1));
    }
}
