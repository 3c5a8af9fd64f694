//! 方法克隆处理器级测试
//!
//! 处理器接内存仓储跑完整同步流程，检视目标域表的落库结果：
//! 标识换发、费率重解析、保根重建与整单复制。

mod support;

use serde_json::json;
use uuid::Uuid;

use anvil_mf_method::application::SyncMethodCommand;
use anvil_mf_method::domain::entities::{
    MakeMethod, MethodMaterial, MethodOperation, MethodOwner, OperationAttribute,
    OperationParameter, OperationTool, Quote, QuoteLine, QuoteLinePrice, QuotePayment,
    QuoteShipment,
};
use anvil_mf_method::domain::enums::{
    ItemType, JobStatus, MethodDomain, MethodType, OperationKind, QuoteStatus, SyncOp, TimeUnit,
    TrackingKind,
};
use anvil_mf_method::domain::value_objects::{
    ConfigurationRuleId, ItemId, JobId, MakeMethodId, MaterialId, OperationId, ProcessId, QuoteId,
    QuoteLineId, SupplierProcessId, ToolId, WorkCenterId,
};
use anvil_mf_method::domain::views::{ConfigurationRule, Item, Job, SupplierProcess, WorkCenter};
use common::types::{AuditInfo, CompanyId, UserId};
use errors::AppError;

use support::MemoryStore;

// ============================================================================
// 造数辅助
// ============================================================================

fn part(
    id: &ItemId,
    company: &CompanyId,
    readable_id: &str,
    name: &str,
    method_type: MethodType,
    tracking: TrackingKind,
    unit_cost: f64,
) -> Item {
    Item::from_parts(
        id.clone(),
        company.clone(),
        readable_id.to_string(),
        name.to_string(),
        None,
        ItemType::Part,
        method_type,
        "EA".to_string(),
        unit_cost,
        tracking,
        true,
    )
}

fn material(
    company: &CompanyId,
    method_id: &MakeMethodId,
    item_id: &ItemId,
    method_type: MethodType,
    quantity: f64,
    order: f64,
    description: &str,
) -> MethodMaterial {
    MethodMaterial::new(
        MaterialId::new(),
        company.clone(),
        method_id.clone(),
        item_id.clone(),
        ItemType::Part,
        method_type,
        quantity,
        "EA",
        10.0,
        description,
        order,
        TrackingKind::None,
        None,
    )
}

/// 物品主数据方法树：根(顶层件) -> 制造件(带子树) + 采购件，
/// 子树再挂一个采购叶子。根上一道厂内工序，子树一道外协工序。
struct ItemTreeFixture {
    company: CompanyId,
    top_item: ItemId,
    sub_item: ItemId,
    buy_item: ItemId,
    leaf_item: ItemId,
    root_method: MakeMethodId,
    child_method: MakeMethodId,
    make_material: MaterialId,
    inside_process: ProcessId,
    outside_process: ProcessId,
    work_center: WorkCenterId,
    supplier_process: SupplierProcessId,
    source_inside_op: OperationId,
}

fn seed_item_tree(store: &MemoryStore) -> ItemTreeFixture {
    let company = CompanyId::new();
    let top_item = ItemId::new();
    let sub_item = ItemId::new();
    let buy_item = ItemId::new();
    let leaf_item = ItemId::new();

    store.add_item(part(
        &top_item,
        &company,
        "FG-100",
        "减速器总成",
        MethodType::Make,
        TrackingKind::Serial,
        0.0,
    ));
    store.add_item(part(
        &sub_item,
        &company,
        "SA-200",
        "齿轮箱体",
        MethodType::Make,
        TrackingKind::Batch,
        80.0,
    ));
    store.add_item(part(
        &buy_item,
        &company,
        "RM-300",
        "轴承",
        MethodType::Buy,
        TrackingKind::None,
        15.0,
    ));
    store.add_item(part(
        &leaf_item,
        &company,
        "RM-310",
        "铸铝毛坯",
        MethodType::Buy,
        TrackingKind::None,
        42.0,
    ));

    let inside_process = ProcessId::new();
    let outside_process = ProcessId::new();
    let work_center = WorkCenterId::new();
    let supplier_process = SupplierProcessId::new();

    store.add_work_center(WorkCenter::from_parts(
        work_center.clone(),
        company.clone(),
        "三轴加工中心".to_string(),
        60.0,
        90.0,
        30.0,
        true,
        vec![inside_process.clone()],
    ));
    store.add_supplier_process(SupplierProcess::from_parts(
        supplier_process.clone(),
        company.clone(),
        outside_process.clone(),
        Uuid::now_v7(),
        120.0,
        7.0,
    ));

    // 根方法与两行物料
    let root_method = MakeMethodId::new();
    store.add_method(
        MethodDomain::Item,
        MakeMethod::new(
            root_method.clone(),
            company.clone(),
            top_item.clone(),
            MethodOwner::Item,
            None,
            1.0,
            None,
        ),
    );
    let make_row = material(
        &company,
        &root_method,
        &sub_item,
        MethodType::Make,
        2.0,
        1.0,
        "齿轮箱体",
    );
    let make_material = make_row.id().clone();
    store.add_material(MethodDomain::Item, make_row);
    store.add_material(
        MethodDomain::Item,
        material(
            &company,
            &root_method,
            &buy_item,
            MethodType::Buy,
            4.0,
            2.0,
            "轴承",
        ),
    );

    // 子方法与采购叶子
    let child_method = MakeMethodId::new();
    store.add_method(
        MethodDomain::Item,
        MakeMethod::new(
            child_method.clone(),
            company.clone(),
            sub_item.clone(),
            MethodOwner::Item,
            Some(make_material.clone()),
            2.0,
            None,
        ),
    );
    store.add_material(
        MethodDomain::Item,
        material(
            &company,
            &child_method,
            &leaf_item,
            MethodType::Buy,
            3.0,
            1.0,
            "铸铝毛坯",
        ),
    );

    // 根上厂内工序：费率存的是旧值，克隆时必须按费率簿重解析
    let source_inside_op = OperationId::new();
    let mut inside = MethodOperation::new(
        source_inside_op.clone(),
        company.clone(),
        root_method.clone(),
        inside_process.clone(),
        "箱体精铣",
        OperationKind::Inside,
        1.0,
        None,
    );
    inside.set_work_center(Some(work_center.clone()));
    inside.set_timing(
        0.5,
        TimeUnit::TotalHours,
        2.0,
        TimeUnit::HoursPerPiece,
        1.5,
        TimeUnit::HoursPerPiece,
    );
    inside.set_rates(1.0, 1.0, 1.0);
    inside.replace_tools(vec![OperationTool::new(ToolId::new(), 1.0)]);
    inside.replace_parameters(vec![OperationParameter::new("夹持方式", "三爪卡盘")]);
    inside.replace_attributes(vec![OperationAttribute::new(
        "表面粗糙度",
        "number",
        Some(0.8),
        Some(3.2),
        None,
    )]);
    store.add_operation(MethodDomain::Item, inside);

    // 子树上外协工序
    let mut outside = MethodOperation::new(
        OperationId::new(),
        company.clone(),
        child_method.clone(),
        outside_process.clone(),
        "表面阳极氧化",
        OperationKind::Outside,
        1.0,
        None,
    );
    outside.set_outside_process(Some(supplier_process.clone()), 0.0, 0.0);
    store.add_operation(MethodDomain::Item, outside);

    ItemTreeFixture {
        company,
        top_item,
        sub_item,
        buy_item,
        leaf_item,
        root_method,
        child_method,
        make_material,
        inside_process,
        outside_process,
        work_center,
        supplier_process,
        source_inside_op,
    }
}

fn sync_command(fx: &ItemTreeFixture, op: SyncOp, source: String, target: Option<String>) -> SyncMethodCommand {
    SyncMethodCommand {
        op,
        source_id: source,
        target_id: target,
        company_id: fx.company.clone(),
        user_id: UserId::new(),
        configuration: None,
    }
}

// ============================================================================
// 成对克隆
// ============================================================================

#[tokio::test]
async fn test_item_to_job_clones_whole_tree() {
    let store = MemoryStore::new();
    let fx = seed_item_tree(&store);
    let job_id = JobId::new();
    store.add_job(Job::from_parts(
        job_id.clone(),
        fx.company.clone(),
        "J-1001".to_string(),
        fx.top_item.clone(),
        10.0,
        JobStatus::Ready,
        None,
    ));

    let handler = support::handler(&store);
    let outcome = handler
        .sync_method(sync_command(
            &fx,
            SyncOp::ItemToJob,
            fx.top_item.to_string(),
            Some(job_id.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(outcome.stats.methods, 2);
    assert_eq!(outcome.stats.materials, 3);
    assert_eq!(outcome.stats.operations, 2);
    assert_eq!(outcome.stats.tools, 1);
    assert_eq!(outcome.stats.parameters, 1);
    assert_eq!(outcome.stats.attributes, 1);
    assert_eq!(outcome.stats.deleted_methods, 0);
    assert_eq!(outcome.stats.sales_rows, 0);
    assert!(outcome.new_quote_id.is_none());

    // 根节点：作业归属、单位用量 1、标识换发
    let methods = store.methods(MethodDomain::Job);
    assert_eq!(methods.len(), 2);
    let root = methods.iter().find(|m| m.is_root()).unwrap();
    assert_eq!(root.job_id(), Some(&job_id));
    assert_eq!(root.item_id(), &fx.top_item);
    assert_eq!(root.quantity_per_parent(), 1.0);
    assert_ne!(root.id(), &fx.root_method);

    // 物料行：作业域预填需求量字段
    let materials = store.materials(MethodDomain::Job);
    assert_eq!(materials.len(), 3);
    let make_row = materials
        .iter()
        .find(|m| m.item_id() == &fx.sub_item)
        .unwrap();
    assert_eq!(make_row.quantity(), 2.0);
    assert_eq!(make_row.estimated_quantity(), Some(2.0));
    assert_eq!(make_row.make_method_id(), root.id());
    let buy_row = materials
        .iter()
        .find(|m| m.item_id() == &fx.buy_item)
        .unwrap();
    assert_eq!(buy_row.estimated_quantity(), Some(4.0));

    // 子方法挂在换发后的物料行下
    let child = methods.iter().find(|m| !m.is_root()).unwrap();
    assert_eq!(child.parent_material_id(), Some(make_row.id()));
    assert_eq!(child.quantity_per_parent(), 2.0);
    assert_eq!(child.job_id(), Some(&job_id));
    assert_ne!(child.id(), &fx.child_method);
    let leaf_row = materials
        .iter()
        .find(|m| m.item_id() == &fx.leaf_item)
        .unwrap();
    assert_eq!(leaf_row.make_method_id(), child.id());

    // 工序：厂内费率按费率簿重解析，旧值不带过来
    let operations = store.operations(MethodDomain::Job);
    assert_eq!(operations.len(), 2);
    let inside = operations
        .iter()
        .find(|o| o.kind() == OperationKind::Inside)
        .unwrap();
    assert_eq!(inside.make_method_id(), root.id());
    assert_ne!(inside.id(), &fx.source_inside_op);
    assert_eq!(inside.labor_rate(), 60.0);
    assert_eq!(inside.machine_rate(), 90.0);
    assert_eq!(inside.overhead_rate(), 30.0);
    assert_eq!(inside.work_center_id(), Some(&fx.work_center));
    assert_eq!(inside.setup_time(), 0.5);
    assert_eq!(inside.tools().len(), 1);
    assert_eq!(inside.parameters().len(), 1);
    assert_eq!(inside.attributes().len(), 1);
    assert!(inside.operation_quantity().is_none());

    let outside = operations
        .iter()
        .find(|o| o.kind() == OperationKind::Outside)
        .unwrap();
    assert_eq!(outside.make_method_id(), child.id());
    assert_eq!(outside.process_id(), &fx.outside_process);
    assert_eq!(outside.supplier_process_id(), Some(&fx.supplier_process));
    assert_eq!(outside.operation_minimum_cost(), 120.0);
    assert_eq!(outside.operation_lead_time(), 7.0);

    // 源树原样保留
    let source_methods = store.methods(MethodDomain::Item);
    assert_eq!(source_methods.len(), 2);
    assert!(source_methods.iter().any(|m| m.id() == &fx.root_method));
    assert!(source_methods.iter().any(|m| m.id() == &fx.child_method));
}

#[tokio::test]
async fn test_item_to_item_rebuild_keeps_target_root_row() {
    let store = MemoryStore::new();
    let fx = seed_item_tree(&store);

    // 目标物品已有一棵旧方法树：根 + 一个旧子树
    let target_item = ItemId::new();
    store.add_item(part(
        &target_item,
        &fx.company,
        "FG-900",
        "变速器总成",
        MethodType::Make,
        TrackingKind::Serial,
        0.0,
    ));
    let target_root = MakeMethodId::new();
    store.add_method(
        MethodDomain::Item,
        MakeMethod::new(
            target_root.clone(),
            fx.company.clone(),
            target_item.clone(),
            MethodOwner::Item,
            None,
            1.0,
            None,
        ),
    );
    let stale_material = material(
        &fx.company,
        &target_root,
        &fx.buy_item,
        MethodType::Make,
        5.0,
        1.0,
        "旧物料",
    );
    let stale_material_id = stale_material.id().clone();
    store.add_material(MethodDomain::Item, stale_material);
    let stale_child = MakeMethodId::new();
    store.add_method(
        MethodDomain::Item,
        MakeMethod::new(
            stale_child.clone(),
            fx.company.clone(),
            fx.buy_item.clone(),
            MethodOwner::Item,
            Some(stale_material_id),
            5.0,
            None,
        ),
    );
    store.add_operation(
        MethodDomain::Item,
        MethodOperation::new(
            OperationId::new(),
            fx.company.clone(),
            target_root.clone(),
            fx.inside_process.clone(),
            "旧工序",
            OperationKind::Inside,
            1.0,
            None,
        ),
    );

    let handler = support::handler(&store);
    let outcome = handler
        .sync_method(sync_command(
            &fx,
            SyncOp::ItemToItem,
            fx.top_item.to_string(),
            Some(target_item.to_string()),
        ))
        .await
        .unwrap();

    // 保根重建：旧后代删掉，根方法行原地保留
    assert_eq!(outcome.stats.deleted_methods, 1);
    assert_eq!(outcome.stats.methods, 1);
    assert_eq!(outcome.stats.materials, 3);

    let methods = store.methods(MethodDomain::Item);
    // 源树 2 个 + 目标根 + 新子树 1 个
    assert_eq!(methods.len(), 4);
    assert!(methods.iter().any(|m| m.id() == &target_root));
    assert!(!methods.iter().any(|m| m.id() == &stale_child));

    let materials = store.materials(MethodDomain::Item);
    assert!(!materials.iter().any(|m| m.description() == "旧物料"));
    let rebuilt: Vec<_> = materials
        .iter()
        .filter(|m| m.make_method_id() == &target_root)
        .collect();
    assert_eq!(rebuilt.len(), 2);

    let operations = store.operations(MethodDomain::Item);
    assert!(!operations.iter().any(|o| o.description() == "旧工序"));
    assert!(
        operations
            .iter()
            .any(|o| o.make_method_id() == &target_root && o.description() == "箱体精铣")
    );
}

#[tokio::test]
async fn test_configuration_override_rewrites_quantity() {
    let store = MemoryStore::new();
    let fx = seed_item_tree(&store);
    let job_id = JobId::new();
    store.add_job(Job::from_parts(
        job_id.clone(),
        fx.company.clone(),
        "J-1002".to_string(),
        fx.top_item.clone(),
        10.0,
        JobStatus::Ready,
        None,
    ));
    // 规则登记在源物品上：制造件行的用量来自请求载荷
    store.add_rule(ConfigurationRule::from_parts(
        ConfigurationRuleId::new(),
        fx.company.clone(),
        fx.top_item.clone(),
        format!("quantity:{}", fx.make_material),
        json!({"type": "input", "key": "bladeCount"}),
        true,
    ));

    let handler = support::handler(&store);
    let mut cmd = sync_command(
        &fx,
        SyncOp::ItemToJob,
        fx.top_item.to_string(),
        Some(job_id.to_string()),
    );
    cmd.configuration = Some(json!({"bladeCount": 6.0}));
    let outcome = handler.sync_method(cmd).await.unwrap();

    assert_eq!(outcome.overrides.applied, 1);
    assert_eq!(outcome.overrides.degraded, 0);

    let materials = store.materials(MethodDomain::Job);
    let make_row = materials
        .iter()
        .find(|m| m.item_id() == &fx.sub_item)
        .unwrap();
    assert_eq!(make_row.quantity(), 6.0);
    assert_eq!(make_row.estimated_quantity(), Some(6.0));
    // 覆盖后的用量同时成为子方法的单位用量
    let child = store
        .methods(MethodDomain::Job)
        .into_iter()
        .find(|m| !m.is_root())
        .unwrap();
    assert_eq!(child.quantity_per_parent(), 6.0);
    // 没有规则的行保持源值
    let buy_row = materials
        .iter()
        .find(|m| m.item_id() == &fx.buy_item)
        .unwrap();
    assert_eq!(buy_row.quantity(), 4.0);
}

// ============================================================================
// 整单复制
// ============================================================================

#[tokio::test]
async fn test_quote_to_quote_duplicates_revision() {
    let store = MemoryStore::new();
    let fx = seed_item_tree(&store);

    let quote = Quote::from_parts(
        QuoteId::new(),
        fx.company.clone(),
        "Q-2001".to_string(),
        2,
        Uuid::now_v7(),
        Some("PO-77".to_string()),
        QuoteStatus::Sent,
        None,
        None,
        AuditInfo::new(None),
    );
    let quote_id = quote.id().clone();
    store.add_quote(quote);

    let line_one = QuoteLine::from_parts(
        QuoteLineId::new(),
        fx.company.clone(),
        quote_id.clone(),
        fx.top_item.clone(),
        "减速器总成".to_string(),
        MethodType::Make,
        5.0,
        "EA".to_string(),
        "Active".to_string(),
        1.0,
        AuditInfo::new(None),
    );
    let line_one_id = line_one.id().clone();
    store.add_quote_line(line_one);
    let line_two = QuoteLine::from_parts(
        QuoteLineId::new(),
        fx.company.clone(),
        quote_id.clone(),
        fx.buy_item.clone(),
        "轴承".to_string(),
        MethodType::Buy,
        40.0,
        "EA".to_string(),
        "Active".to_string(),
        2.0,
        AuditInfo::new(None),
    );
    let line_two_id = line_two.id().clone();
    store.add_quote_line(line_two);

    store.add_quote_payment(QuotePayment::from_parts(
        Uuid::now_v7(),
        fx.company.clone(),
        quote_id.clone(),
        Some(Uuid::now_v7()),
        AuditInfo::new(None),
    ));
    store.add_quote_shipment(QuoteShipment::from_parts(
        Uuid::now_v7(),
        fx.company.clone(),
        quote_id.clone(),
        None,
        45.0,
        None,
        AuditInfo::new(None),
    ));
    for (quantity, unit_price) in [(5.0, 900.0), (50.0, 720.0)] {
        store.add_quote_line_price(QuoteLinePrice::from_parts(
            Uuid::now_v7(),
            fx.company.clone(),
            quote_id.clone(),
            line_one_id.clone(),
            quantity,
            unit_price,
            0.0,
            21.0,
            AuditInfo::new(None),
        ));
    }
    store.add_quote_line_price(QuoteLinePrice::from_parts(
        Uuid::now_v7(),
        fx.company.clone(),
        quote_id.clone(),
        line_two_id.clone(),
        40.0,
        16.0,
        5.0,
        3.0,
        AuditInfo::new(None),
    ));

    // 第一行挂一棵单层方法树，第二行只有行本身
    let line_root = MakeMethodId::new();
    store.add_method(
        MethodDomain::Quote,
        MakeMethod::new(
            line_root.clone(),
            fx.company.clone(),
            fx.top_item.clone(),
            MethodOwner::QuoteLine(quote_id.clone(), line_one_id.clone()),
            None,
            1.0,
            None,
        ),
    );
    store.add_material(
        MethodDomain::Quote,
        material(
            &fx.company,
            &line_root,
            &fx.buy_item,
            MethodType::Buy,
            2.0,
            1.0,
            "轴承",
        ),
    );
    store.add_operation(
        MethodDomain::Quote,
        MethodOperation::new(
            OperationId::new(),
            fx.company.clone(),
            line_root.clone(),
            fx.inside_process.clone(),
            "箱体精铣",
            OperationKind::Inside,
            1.0,
            None,
        ),
    );

    let handler = support::handler(&store);
    let mut cmd = sync_command(&fx, SyncOp::QuoteToQuote, quote_id.to_string(), None);
    // 整单复制忽略配置载荷
    cmd.configuration = Some(json!({"bladeCount": 9.0}));
    let outcome = handler.sync_method(cmd).await.unwrap();

    let new_quote_id = outcome.new_quote_id.expect("应产出新报价单 ID");
    assert_eq!(outcome.overrides.applied, 0);
    // 单头 1 + 行 2 + 付款 1 + 发运 1 + 阶梯价 3
    assert_eq!(outcome.stats.sales_rows, 8);
    assert_eq!(outcome.stats.methods, 1);
    assert_eq!(outcome.stats.materials, 1);
    assert_eq!(outcome.stats.operations, 1);

    // 新修订：单号保留，版本加一，状态重置为草稿
    let quotes = store.quotes();
    assert_eq!(quotes.len(), 2);
    let new_quote = quotes.iter().find(|q| q.id() == &new_quote_id).unwrap();
    assert_eq!(new_quote.readable_id(), "Q-2001");
    assert_eq!(new_quote.revision(), 3);
    assert_eq!(new_quote.status(), QuoteStatus::Draft);
    assert_eq!(new_quote.customer_reference(), Some("PO-77"));

    // 行与阶梯价逐行跟随新单
    let lines = store.quote_lines();
    assert_eq!(lines.len(), 4);
    let new_lines: Vec<_> = lines
        .iter()
        .filter(|line| line.quote_id() == &new_quote_id)
        .collect();
    assert_eq!(new_lines.len(), 2);
    let new_line_one = new_lines
        .iter()
        .find(|line| line.item_id() == &fx.top_item)
        .unwrap();
    assert_ne!(new_line_one.id(), &line_one_id);
    assert_eq!(new_line_one.quantity(), 5.0);

    let prices = store.quote_line_prices();
    let new_line_one_prices: Vec<_> = prices
        .iter()
        .filter(|price| price.quote_line_id() == new_line_one.id())
        .collect();
    assert_eq!(new_line_one_prices.len(), 2);
    assert!(new_line_one_prices.iter().all(|p| p.quote_id() == &new_quote_id));

    assert_eq!(
        store
            .quote_payments()
            .iter()
            .filter(|p| p.quote_id() == &new_quote_id)
            .count(),
        1
    );
    let shipments = store.quote_shipments();
    let new_shipment = shipments
        .iter()
        .find(|s| s.quote_id() == &new_quote_id)
        .unwrap();
    assert_eq!(new_shipment.shipping_cost(), 45.0);

    // 第一行的方法树跟着新行重挂
    let methods = store.methods(MethodDomain::Quote);
    assert_eq!(methods.len(), 2);
    let new_root = methods.iter().find(|m| m.id() != &line_root).unwrap();
    assert_eq!(new_root.quote_id(), Some(&new_quote_id));
    assert_eq!(new_root.quote_line_id(), Some(new_line_one.id()));
    assert_eq!(new_root.item_id(), &fx.top_item);
}

// ============================================================================
// 命令校验
// ============================================================================

#[tokio::test]
async fn test_pair_clone_requires_target() {
    let store = MemoryStore::new();
    let fx = seed_item_tree(&store);

    let handler = support::handler(&store);
    let err = handler
        .sync_method(sync_command(
            &fx,
            SyncOp::ItemToJob,
            fx.top_item.to_string(),
            None,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_missing_source_tree_is_not_found() {
    let store = MemoryStore::new();
    let fx = seed_item_tree(&store);
    // 有物品没有方法树
    let bare_item = ItemId::new();
    store.add_item(part(
        &bare_item,
        &fx.company,
        "FG-500",
        "裸物品",
        MethodType::Make,
        TrackingKind::None,
        0.0,
    ));
    let job_id = JobId::new();
    store.add_job(Job::from_parts(
        job_id.clone(),
        fx.company.clone(),
        "J-1003".to_string(),
        bare_item.clone(),
        1.0,
        JobStatus::Draft,
        None,
    ));

    let handler = support::handler(&store);
    let err = handler
        .sync_method(sync_command(
            &fx,
            SyncOp::ItemToJob,
            bare_item.to_string(),
            Some(job_id.to_string()),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
