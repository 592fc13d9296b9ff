// ==========================================
// 集成测试 - 导入对话框状态机
// ==========================================
// 测试目标: ImportSession 的状态转换与非法转换拒绝
// ==========================================

mod test_helpers;

use masters_import::api::{ApiError, ImportApi};
use masters_import::domain::types::ImportPhase;
use masters_import::importer::{
    BulkImporterImpl, FabricImportSpec, NullProgress, ProductImportSpec,
};
use masters_import::logging;
use std::sync::Arc;
use test_helpers::{fabric_csv_two_colors, MockRemoteApi, TestConfig, PRODUCT_HEADER};

fn api_with(repo: Arc<MockRemoteApi>) -> ImportApi {
    let importer = BulkImporterImpl::new(repo, TestConfig::default());
    ImportApi::new(Arc::new(importer))
}

// ==========================================
// 测试用例 1: 正常流程 Idle → ... → Completed
// ==========================================

#[tokio::test]
async fn test_happy_path_reaches_completed() {
    logging::init_test();

    let repo = Arc::new(MockRemoteApi::new());
    let api = api_with(Arc::clone(&repo));
    let mut session = api.session(Box::new(FabricImportSpec));

    assert_eq!(session.phase(), ImportPhase::Idle);

    // 选择文本即解析
    let preview = session
        .select_text(&fabric_csv_two_colors())
        .await
        .expect("解析应该成功");
    assert_eq!(preview.parsed, 2);
    assert_eq!(session.phase(), ImportPhase::Parsed);

    // 预览
    let preview = session.preview().expect("预览应该可读");
    assert!(!preview.rows.is_empty());
    assert_eq!(session.phase(), ImportPhase::Previewing);

    // 确认导入
    let result = session.confirm(&NullProgress).await.expect("导入应该成功");
    assert_eq!(result.parents_created, 1);
    assert_eq!(session.phase(), ImportPhase::Completed);
    assert!(session.result().is_some());

    // Completed 之后关闭保持 Completed
    assert_eq!(session.close(), ImportPhase::Completed);
    assert_eq!(repo.count("fabric_master"), 1);
}

// ==========================================
// 测试用例 2: 解析失败回到 Idle
// ==========================================

#[tokio::test]
async fn test_parse_failure_resets_to_idle() {
    logging::init_test();

    let repo = Arc::new(MockRemoteApi::new());
    let api = api_with(repo);
    let mut session = api.session(Box::new(FabricImportSpec));

    // 表头缺少必需列
    let result = session.select_text("fabric_code,fabric_name\nCOTTON,Cotton\n").await;
    match result {
        Err(ApiError::ValidationError(msg)) => assert!(msg.contains("gsm")),
        other => panic!("期望 ValidationError，实际 {:?}", other.map(|_| ())),
    }
    assert_eq!(session.phase(), ImportPhase::Idle);
}

// ==========================================
// 测试用例 3: 非法转换被拒绝
// ==========================================

#[tokio::test]
async fn test_illegal_transitions_rejected() {
    logging::init_test();

    let repo = Arc::new(MockRemoteApi::new());
    let api = api_with(repo);
    let mut session = api.session(Box::new(ProductImportSpec));

    // 未选择文件不能预览
    assert!(matches!(
        session.preview(),
        Err(ApiError::InvalidStateTransition { .. })
    ));

    // 未选择文件不能确认导入
    assert!(matches!(
        session.confirm(&NullProgress).await,
        Err(ApiError::InvalidStateTransition { .. })
    ));
}

// ==========================================
// 测试用例 4: Importing 之前关闭 → Aborted，临时实体丢弃
// ==========================================

#[tokio::test]
async fn test_close_before_import_aborts() {
    logging::init_test();

    let repo = Arc::new(MockRemoteApi::new());
    let api = api_with(Arc::clone(&repo));
    let mut session = api.session(Box::new(ProductImportSpec));

    let text = format!("{}\nSKU-1,,,,,,,,999,199,399,\n", PRODUCT_HEADER);
    session.select_text(&text).await.expect("解析应该成功");
    session.preview().expect("预览应该可读");

    assert_eq!(session.close(), ImportPhase::Aborted);
    assert!(session.result().is_none());

    // 关闭后不能再确认导入
    assert!(matches!(
        session.confirm(&NullProgress).await,
        Err(ApiError::InvalidStateTransition { .. })
    ));

    // 远程无任何写入
    assert_eq!(repo.count("product_master"), 0);
}

// ==========================================
// 测试用例 5: Parsed 可直接确认（预览为可选步骤）
// ==========================================

#[tokio::test]
async fn test_confirm_directly_from_parsed() {
    logging::init_test();

    let repo = Arc::new(MockRemoteApi::new());
    let api = api_with(Arc::clone(&repo));
    let mut session = api.session(Box::new(FabricImportSpec));

    session
        .select_text(&fabric_csv_two_colors())
        .await
        .expect("解析应该成功");
    let result = session.confirm(&NullProgress).await.expect("导入应该成功");

    assert_eq!(result.children_created, 2);
    assert_eq!(repo.count("fabric_colors"), 2);
}

// ==========================================
// 测试用例 6: 模板生成
// ==========================================

#[tokio::test]
async fn test_template_download_matches_columns() {
    let repo = Arc::new(MockRemoteApi::new());
    let api = api_with(repo);

    let template = api.csv_template(&ProductImportSpec);
    let lines: Vec<&str> = template.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], PRODUCT_HEADER);
}
