//! 方法仓储 PostgreSQL 集成测试
//!
//! 跑在真实数据库上，迁移由 sqlx::test 自动套用，用例之间
//! 数据库隔离。覆盖写计划执行、树装载回读、保根清理与
//! 跨公司隔离。

use sqlx::PgPool;

use anvil_mf_method::domain::entities::{
    MakeMethod, MethodMaterial, MethodOperation, MethodOwner, OperationAttribute,
    OperationParameter, OperationTool,
};
use anvil_mf_method::domain::enums::{
    ItemType, MethodDomain, MethodType, OperationKind, TimeUnit, TrackingKind,
};
use anvil_mf_method::domain::plan::{MethodWritePlan, WriteOp};
use anvil_mf_method::domain::repositories::MethodRepository;
use anvil_mf_method::domain::value_objects::{
    ItemId, JobId, MakeMethodId, MaterialId, OperationId, ProcessId, ToolId,
};
use anvil_mf_method::infrastructure::persistence::PostgresMethodRepository;
use common::types::CompanyId;

// ============================================================================
// 造数辅助
// ============================================================================

async fn seed_item(pool: &PgPool, company: &CompanyId, readable_id: &str, name: &str) -> ItemId {
    let item_id = ItemId::new();
    sqlx::query(
        "INSERT INTO items
             (id, company_id, readable_id, name, item_type, default_method_type,
              unit_of_measure_code, unit_cost, tracking)
         VALUES ($1, $2, $3, $4, 'Part', 'Make', 'EA', 12.5, 'None')",
    )
    .bind(item_id.0)
    .bind(company.0)
    .bind(readable_id)
    .bind(name)
    .execute(pool)
    .await
    .unwrap();
    item_id
}

async fn seed_process(pool: &PgPool, company: &CompanyId, name: &str) -> ProcessId {
    let process_id = ProcessId::new();
    sqlx::query("INSERT INTO processes (id, company_id, name) VALUES ($1, $2, $3)")
        .bind(process_id.0)
        .bind(company.0)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    process_id
}

async fn seed_job(pool: &PgPool, company: &CompanyId, item_id: &ItemId) -> JobId {
    let job_id = JobId::new();
    sqlx::query(
        "INSERT INTO jobs (id, company_id, readable_id, item_id, production_quantity, status)
         VALUES ($1, $2, 'J-1001', $3, 10, 'Ready')",
    )
    .bind(job_id.0)
    .bind(company.0)
    .bind(item_id.0)
    .execute(pool)
    .await
    .unwrap();
    job_id
}

struct SeededTree {
    root: MakeMethodId,
    child: MakeMethodId,
    material: MaterialId,
}

/// 两层物品方法树写进库：根 + 制造物料行 + 挂其下的子方法
async fn seed_item_tree(
    repo: &PostgresMethodRepository,
    pool: &PgPool,
    company: &CompanyId,
    top_item: &ItemId,
) -> SeededTree {
    let sub_item = seed_item(pool, company, "SA-200", "焊接组件").await;
    let root = MakeMethodId::new();
    let child = MakeMethodId::new();
    let material = MaterialId::new();

    let mut plan = MethodWritePlan::new(MethodDomain::Item, top_item.0);
    plan.push(WriteOp::InsertMethod(MakeMethod::new(
        root.clone(),
        company.clone(),
        top_item.clone(),
        MethodOwner::Item,
        None,
        1.0,
        None,
    )));
    plan.push(WriteOp::InsertMaterial(MethodMaterial::new(
        material.clone(),
        company.clone(),
        root.clone(),
        sub_item.clone(),
        ItemType::Part,
        MethodType::Make,
        2.0,
        "EA",
        30.0,
        "焊接组件",
        1.0,
        TrackingKind::None,
        None,
    )));
    plan.push(WriteOp::InsertMethod(MakeMethod::new(
        child.clone(),
        company.clone(),
        sub_item,
        MethodOwner::Item,
        Some(material.clone()),
        2.0,
        None,
    )));
    repo.execute(&plan).await.unwrap();

    SeededTree {
        root,
        child,
        material,
    }
}

// ============================================================================
// 写计划执行与回读
// ============================================================================

#[sqlx::test]
#[ignore] // 需要 PostgreSQL 实例
async fn test_execute_roundtrips_item_tree(pool: PgPool) {
    let company = CompanyId::new();
    let top_item = seed_item(&pool, &company, "FG-100", "变速箱总成").await;
    let process = seed_process(&pool, &company, "精铣").await;
    let repo = PostgresMethodRepository::new(pool.clone());

    let tree = seed_item_tree(&repo, &pool, &company, &top_item).await;

    // 根上补一道带工装、参数和属性的工序
    let operation_id = OperationId::new();
    let mut operation = MethodOperation::new(
        operation_id.clone(),
        company.clone(),
        tree.root.clone(),
        process.clone(),
        "箱体精铣",
        OperationKind::Inside,
        1.0,
        None,
    );
    operation.set_timing(
        0.5,
        TimeUnit::TotalHours,
        2.0,
        TimeUnit::HoursPerPiece,
        1.5,
        TimeUnit::HoursPerPiece,
    );
    operation.set_rates(60.0, 90.0, 30.0);
    operation.replace_tools(vec![OperationTool::new(ToolId::new(), 1.0)]);
    operation.replace_parameters(vec![OperationParameter::new("夹持方式", "三爪卡盘")]);
    operation.replace_attributes(vec![OperationAttribute::new(
        "表面粗糙度",
        "Numeric",
        Some(0.8),
        Some(3.2),
        None,
    )]);
    let mut plan = MethodWritePlan::new(MethodDomain::Item, top_item.0);
    plan.push(WriteOp::InsertOperation(operation));
    let stats = repo.execute(&plan).await.unwrap();
    assert_eq!(stats.operations, 1);
    assert_eq!(stats.tools, 1);
    assert_eq!(stats.parameters, 1);
    assert_eq!(stats.attributes, 1);

    // 根查找
    let root = repo
        .find_root_for_item(&top_item, &company)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(root.id(), &tree.root);
    assert!(root.is_root());

    // 树装载：父行在前，物料与子方法原样回读
    let rows = repo
        .load_tree_rows(MethodDomain::Item, &tree.root, &company)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    let root_row = rows
        .iter()
        .find(|row| row.method.id() == &tree.root)
        .unwrap();
    assert!(root_row.parent_method_id.is_none());
    assert_eq!(root_row.materials.len(), 1);
    assert_eq!(root_row.materials[0].id(), &tree.material);
    assert_eq!(root_row.materials[0].quantity(), 2.0);
    let child_row = rows
        .iter()
        .find(|row| row.method.id() == &tree.child)
        .unwrap();
    assert_eq!(child_row.parent_method_id.as_ref(), Some(&tree.root));
    assert_eq!(child_row.method.parent_material_id(), Some(&tree.material));
    assert_eq!(child_row.method.quantity_per_parent(), 2.0);

    // 工序连同子行回读
    let operations = repo
        .load_operations(
            MethodDomain::Item,
            &[tree.root.clone(), tree.child.clone()],
            &company,
        )
        .await
        .unwrap();
    assert_eq!(operations.len(), 1);
    let loaded = &operations[0];
    assert_eq!(loaded.id(), &operation_id);
    assert_eq!(loaded.description(), "箱体精铣");
    assert_eq!(loaded.setup_time(), 0.5);
    assert_eq!(loaded.labor_unit(), TimeUnit::HoursPerPiece);
    assert_eq!(loaded.labor_rate(), 60.0);
    assert_eq!(loaded.tools().len(), 1);
    assert_eq!(loaded.parameters().len(), 1);
    assert_eq!(loaded.parameters()[0].key(), "夹持方式");
    assert_eq!(loaded.attributes().len(), 1);
    assert_eq!(loaded.attributes()[0].min_value(), Some(0.8));
}

// ============================================================================
// 保根清理
// ============================================================================

#[sqlx::test]
#[ignore] // 需要 PostgreSQL 实例
async fn test_wipe_deletes_descendants_and_keeps_root(pool: PgPool) {
    let company = CompanyId::new();
    let top_item = seed_item(&pool, &company, "FG-100", "变速箱总成").await;
    let repo = PostgresMethodRepository::new(pool.clone());
    let tree = seed_item_tree(&repo, &pool, &company, &top_item).await;

    let mut plan = MethodWritePlan::new(MethodDomain::Item, top_item.0);
    plan.set_wipe_under(tree.root.clone());
    let stats = repo.execute(&plan).await.unwrap();
    assert_eq!(stats.deleted_methods, 1);
    assert_eq!(stats.methods, 0);

    // 根方法行保留，物料与子方法全部清掉
    let rows = repo
        .load_tree_rows(MethodDomain::Item, &tree.root, &company)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].method.id(), &tree.root);
    assert!(rows[0].materials.is_empty());
    let child = repo
        .find_method(MethodDomain::Item, &tree.child, &company)
        .await
        .unwrap();
    assert!(child.is_none());
}

// ============================================================================
// 作业域与公司隔离
// ============================================================================

#[sqlx::test]
#[ignore] // 需要 PostgreSQL 实例
async fn test_job_root_finder_respects_company(pool: PgPool) {
    let company = CompanyId::new();
    let item = seed_item(&pool, &company, "FG-100", "变速箱总成").await;
    let job_id = seed_job(&pool, &company, &item).await;
    let repo = PostgresMethodRepository::new(pool.clone());

    let root = MakeMethodId::new();
    let mut plan = MethodWritePlan::new(MethodDomain::Job, job_id.0);
    plan.push(WriteOp::InsertMethod(MakeMethod::new(
        root.clone(),
        company.clone(),
        item.clone(),
        MethodOwner::Job(job_id.clone()),
        None,
        1.0,
        None,
    )));
    repo.execute(&plan).await.unwrap();

    let found = repo
        .find_root_for_job(&job_id, &company)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id(), &root);
    assert_eq!(found.job_id(), Some(&job_id));

    // 别的公司看不到这棵树
    let other_company = CompanyId::new();
    let hidden = repo
        .find_root_for_job(&job_id, &other_company)
        .await
        .unwrap();
    assert!(hidden.is_none());

    // 物品域的根查找不会串到作业域
    let item_root = repo.find_root_for_item(&item, &company).await.unwrap();
    assert!(item_root.is_none());
}
