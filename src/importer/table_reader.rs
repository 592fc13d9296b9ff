// ==========================================
// 服装业务管理系统 - 表格文件解析器
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 契约: 表头为第 0 行；每个声明列在每条记录上都以 key 存在，
//       缺失单元格为空字符串；单元格两端空白被裁剪；全空行被丢弃
// ==========================================

use crate::domain::RawRow;
use crate::importer::error::ImportError;
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::path::Path;

/// 按声明列顺序收集表头中缺失的必需列
fn missing_columns(headers: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect()
}

/// 将一条已按表头对齐的记录装配为 RawRow；全空行返回 None
fn assemble_row(headers: &[String], cells: impl Iterator<Item = String>) -> Option<RawRow> {
    let mut row = RawRow::new();
    let mut cells = cells;
    for header in headers {
        let value = cells.next().unwrap_or_default();
        row.insert(header.clone(), value);
    }

    if row.values().all(|v| v.is_empty()) {
        None
    } else {
        Some(row)
    }
}

// ==========================================
// CSV Reader
// ==========================================
pub struct CsvReader;

impl CsvReader {
    /// 从原始文本解析 CSV
    ///
    /// # 参数
    /// - text: 完整文件内容（首行为表头）
    /// - required_columns: 实体契约要求的列名
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 非空数据行（顺序 = 文件顺序）
    /// - Err(MissingColumns): 表头缺少必需列，任何行处理前即失败
    pub fn read_str(text: &str, required_columns: &[&str]) -> Result<Vec<RawRow>, ImportError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let missing = missing_columns(&headers, required_columns);
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let cells = (0..headers.len())
                .map(|idx| record.get(idx).unwrap_or("").trim().to_string());
            if let Some(row) = assemble_row(&headers, cells) {
                records.push(row);
            }
        }

        Ok(records)
    }

    /// 从文件解析 CSV
    pub fn read_file(
        file_path: &Path,
        required_columns: &[&str],
    ) -> Result<Vec<RawRow>, ImportError> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let text = std::fs::read_to_string(file_path)?;
        Self::read_str(&text, required_columns)
    }
}

// ==========================================
// Excel Reader
// ==========================================
pub struct ExcelReader;

impl ExcelReader {
    /// 从 Excel 文件解析第一个工作表
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 与 CSV 解析相同形状的行记录
    pub fn read_file(
        file_path: &Path,
        required_columns: &[&str],
    ) -> Result<Vec<RawRow>, ImportError> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        // 打开 Excel 文件
        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let missing = missing_columns(&headers, required_columns);
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let cells = data_row.iter().map(|cell| cell.to_string().trim().to_string());
            if let Some(row) = assemble_row(&headers, cells) {
                records.push(row);
            }
        }

        Ok(records)
    }
}

// ==========================================
// 通用表格解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalTableReader;

impl UniversalTableReader {
    pub fn read<P: AsRef<Path>>(
        file_path: P,
        required_columns: &[&str],
    ) -> Result<Vec<RawRow>, ImportError> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvReader::read_file(path, required_columns),
            "xlsx" | "xls" => ExcelReader::read_file(path, required_columns),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COLUMNS: [&str; 3] = ["sku", "size", "color"];

    #[test]
    fn test_read_str_valid() {
        let text = "sku,size,color\nSKU-1,XL,GREEN\nSKU-2,M,BLACK\n";
        let records = CsvReader::read_str(text, &COLUMNS).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("sku"), Some(&"SKU-1".to_string()));
        assert_eq!(records[1].get("color"), Some(&"BLACK".to_string()));
    }

    #[test]
    fn test_read_str_missing_columns() {
        let text = "sku,size\nSKU-1,XL\n";
        let result = CsvReader::read_str(text, &COLUMNS);

        match result {
            Err(ImportError::MissingColumns(cols)) => assert_eq!(cols, vec!["color"]),
            other => panic!("期望 MissingColumns，实际 {:?}", other),
        }
    }

    #[test]
    fn test_read_str_missing_columns_named_in_message() {
        let text = "size,color\nXL,GREEN\n";
        let err = CsvReader::read_str(text, &COLUMNS).unwrap_err();
        assert!(err.to_string().contains("sku"));
    }

    #[test]
    fn test_read_str_skips_blank_lines_and_trailing_newline() {
        let text = "sku,size,color\nSKU-1,XL,GREEN\n\nSKU-2,M,BLACK\n\n";
        let records = CsvReader::read_str(text, &COLUMNS).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_read_str_short_row_fills_empty() {
        let text = "sku,size,color\nSKU-1,XL\n";
        let records = CsvReader::read_str(text, &COLUMNS).unwrap();

        assert_eq!(records.len(), 1);
        // 缺失单元格以空字符串存在
        assert_eq!(records[0].get("color"), Some(&String::new()));
    }

    #[test]
    fn test_read_str_trims_cells() {
        let text = "sku , size ,color\n SKU-1 , XL ,GREEN\n";
        let records = CsvReader::read_str(text, &COLUMNS).unwrap();
        assert_eq!(records[0].get("sku"), Some(&"SKU-1".to_string()));
        assert_eq!(records[0].get("size"), Some(&"XL".to_string()));
    }

    #[test]
    fn test_read_str_quoted_comma_in_cell() {
        // 带引号的逗号按 CSV 语法归入同一单元格
        let text = "sku,size,color\n\"SKU,1\",XL,GREEN\n";
        let records = CsvReader::read_str(text, &COLUMNS).unwrap();
        assert_eq!(records[0].get("sku"), Some(&"SKU,1".to_string()));
    }

    #[test]
    fn test_read_str_crlf() {
        let text = "sku,size,color\r\nSKU-1,XL,GREEN\r\n";
        let records = CsvReader::read_str(text, &COLUMNS).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("color"), Some(&"GREEN".to_string()));
    }

    #[test]
    fn test_read_file_valid() {
        let mut temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(temp_file, "sku,size,color").unwrap();
        writeln!(temp_file, "SKU-1,XL,GREEN").unwrap();

        let records = CsvReader::read_file(temp_file.path(), &COLUMNS).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_read_file_not_found() {
        let result = CsvReader::read_file(Path::new("non_existent.csv"), &COLUMNS);
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_reader_unsupported_format() {
        let temp_file = NamedTempFile::with_suffix(".txt").unwrap();
        let result = UniversalTableReader::read(temp_file.path(), &COLUMNS);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_excel_reader_rejects_wrong_extension() {
        let temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        let result = ExcelReader::read_file(temp_file.path(), &COLUMNS);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
