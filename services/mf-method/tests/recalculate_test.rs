//! 需求量重算处理器级测试
//!
//! 三层作业方法链上验证级联乘法：物料绝对需求量、子方法工序
//! 加工数量与追溯单元数量一次刷新，起算点上方的行保持不动。

mod support;

use anvil_mf_method::application::SyncMethodCommand;
use anvil_mf_method::domain::entities::{
    MakeMethod, MethodMaterial, MethodOperation, MethodOwner, TrackedEntity,
};
use anvil_mf_method::domain::enums::{
    ItemType, JobStatus, MethodDomain, MethodType, OperationKind, SyncOp, TrackingKind,
};
use anvil_mf_method::domain::value_objects::{
    ItemId, JobId, MakeMethodId, MaterialId, OperationId, ProcessId, TrackedEntityId,
};
use anvil_mf_method::domain::views::Job;
use common::types::{AuditInfo, CompanyId, UserId};
use errors::AppError;

use support::MemoryStore;

// ============================================================================
// 造数辅助
// ============================================================================

/// 作业方法链：根 --2x(批次)--> 子一 --3x(序列)--> 子二，
/// 根与两个子方法各挂一道工序，两个子方法各挂一个追溯单元。
struct JobChainFixture {
    company: CompanyId,
    job_id: JobId,
    child_one: MakeMethodId,
    material_one: MaterialId,
    material_two: MaterialId,
    root_op: OperationId,
    child_one_op: OperationId,
    child_two_op: OperationId,
    entity_one: TrackedEntityId,
    entity_two: TrackedEntityId,
}

fn chain_material(
    id: &MaterialId,
    company: &CompanyId,
    method_id: &MakeMethodId,
    item_id: &ItemId,
    quantity: f64,
    tracking: TrackingKind,
    description: &str,
) -> MethodMaterial {
    MethodMaterial::new(
        id.clone(),
        company.clone(),
        method_id.clone(),
        item_id.clone(),
        ItemType::Part,
        MethodType::Make,
        quantity,
        "EA",
        25.0,
        description,
        1.0,
        tracking,
        None,
    )
}

fn chain_operation(
    id: &OperationId,
    company: &CompanyId,
    method_id: &MakeMethodId,
    description: &str,
) -> MethodOperation {
    MethodOperation::new(
        id.clone(),
        company.clone(),
        method_id.clone(),
        ProcessId::new(),
        description,
        OperationKind::Inside,
        1.0,
        None,
    )
}

fn seed_job_chain(store: &MemoryStore, seeded_estimate: Option<f64>) -> JobChainFixture {
    let company = CompanyId::new();
    let top_item = ItemId::new();
    let mid_item = ItemId::new();
    let leaf_item = ItemId::new();

    let job_id = JobId::new();
    store.add_job(Job::from_parts(
        job_id.clone(),
        company.clone(),
        "J-2001".to_string(),
        top_item.clone(),
        10.0,
        JobStatus::InProgress,
        None,
    ));

    let root = MakeMethodId::new();
    let child_one = MakeMethodId::new();
    let child_two = MakeMethodId::new();
    let material_one = MaterialId::new();
    let material_two = MaterialId::new();

    store.add_method(
        MethodDomain::Job,
        MakeMethod::new(
            root.clone(),
            company.clone(),
            top_item.clone(),
            MethodOwner::Job(job_id.clone()),
            None,
            1.0,
            None,
        ),
    );
    let mut first = chain_material(
        &material_one,
        &company,
        &root,
        &mid_item,
        2.0,
        TrackingKind::Batch,
        "中间件",
    );
    if let Some(estimate) = seeded_estimate {
        first.set_estimated_quantity(estimate);
    }
    store.add_material(MethodDomain::Job, first);

    store.add_method(
        MethodDomain::Job,
        MakeMethod::new(
            child_one.clone(),
            company.clone(),
            mid_item.clone(),
            MethodOwner::Job(job_id.clone()),
            Some(material_one.clone()),
            2.0,
            None,
        ),
    );
    store.add_material(
        MethodDomain::Job,
        chain_material(
            &material_two,
            &company,
            &child_one,
            &leaf_item,
            3.0,
            TrackingKind::Serial,
            "序列件",
        ),
    );

    store.add_method(
        MethodDomain::Job,
        MakeMethod::new(
            child_two.clone(),
            company.clone(),
            leaf_item.clone(),
            MethodOwner::Job(job_id.clone()),
            Some(material_two.clone()),
            3.0,
            None,
        ),
    );

    let root_op = OperationId::new();
    let child_one_op = OperationId::new();
    let child_two_op = OperationId::new();
    store.add_operation(
        MethodDomain::Job,
        chain_operation(&root_op, &company, &root, "总装"),
    );
    store.add_operation(
        MethodDomain::Job,
        chain_operation(&child_one_op, &company, &child_one, "部装"),
    );
    store.add_operation(
        MethodDomain::Job,
        chain_operation(&child_two_op, &company, &child_two, "下料"),
    );

    let entity_one = TrackedEntityId::new();
    let entity_two = TrackedEntityId::new();
    store.add_tracked_entity(TrackedEntity::from_parts(
        entity_one.clone(),
        company.clone(),
        mid_item.clone(),
        Some(child_one.clone()),
        5.0,
        "Available".to_string(),
        AuditInfo::new(None),
    ));
    store.add_tracked_entity(TrackedEntity::from_parts(
        entity_two.clone(),
        company.clone(),
        leaf_item.clone(),
        Some(child_two.clone()),
        5.0,
        "Available".to_string(),
        AuditInfo::new(None),
    ));

    JobChainFixture {
        company,
        job_id,
        child_one,
        material_one,
        material_two,
        root_op,
        child_one_op,
        child_two_op,
        entity_one,
        entity_two,
    }
}

fn recalc_command(fx: &JobChainFixture, op: SyncOp, source_id: String) -> SyncMethodCommand {
    SyncMethodCommand {
        op,
        source_id,
        target_id: None,
        company_id: fx.company.clone(),
        user_id: UserId::new(),
        configuration: None,
    }
}

fn estimated(store: &MemoryStore, material_id: &MaterialId) -> Option<f64> {
    store
        .materials(MethodDomain::Job)
        .into_iter()
        .find(|material| material.id() == material_id)
        .and_then(|material| material.estimated_quantity())
}

fn operation_quantity(store: &MemoryStore, operation_id: &OperationId) -> Option<f64> {
    store
        .operations(MethodDomain::Job)
        .into_iter()
        .find(|operation| operation.id() == operation_id)
        .and_then(|operation| operation.operation_quantity())
}

fn entity_quantity(store: &MemoryStore, entity_id: &TrackedEntityId) -> f64 {
    store
        .tracked_entities()
        .into_iter()
        .find(|entity| entity.id() == entity_id)
        .map(|entity| entity.quantity())
        .unwrap()
}

// ============================================================================
// 整作业级联
// ============================================================================

#[tokio::test]
async fn test_job_requirements_cascade_whole_tree() {
    let store = MemoryStore::new();
    let fx = seed_job_chain(&store, None);

    let handler = support::handler(&store);
    let outcome = handler
        .sync_method(recalc_command(
            &fx,
            SyncOp::RecalculateJobRequirements,
            fx.job_id.to_string(),
        ))
        .await
        .unwrap();

    // 2 物料 + 2 子方法 + 2 工序 + 2 追溯单元
    assert_eq!(outcome.stats.updates, 8);
    assert_eq!(outcome.stats.methods, 0);

    // 绝对需求量逐层乘下去：10 -> 20 -> 60
    assert_eq!(estimated(&store, &fx.material_one), Some(20.0));
    assert_eq!(estimated(&store, &fx.material_two), Some(60.0));

    // 子方法工序跟着各自层级的数量
    assert_eq!(operation_quantity(&store, &fx.child_one_op), Some(20.0));
    assert_eq!(operation_quantity(&store, &fx.child_two_op), Some(60.0));
    // 根方法自身的工序不在刷新范围内
    assert_eq!(operation_quantity(&store, &fx.root_op), None);

    // 批次追溯跟需求量，序列追溯恒为 1
    assert_eq!(entity_quantity(&store, &fx.entity_one), 20.0);
    assert_eq!(entity_quantity(&store, &fx.entity_two), 1.0);
}

// ============================================================================
// 节点起算
// ============================================================================

#[tokio::test]
async fn test_method_requirements_start_mid_tree() {
    let store = MemoryStore::new();
    // 父物料已有绝对需求量 20，起算数量应取它而不是作业数量
    let fx = seed_job_chain(&store, Some(20.0));

    let handler = support::handler(&store);
    let outcome = handler
        .sync_method(recalc_command(
            &fx,
            SyncOp::RecalculateJobMakeMethodRequirements,
            fx.child_one.to_string(),
        ))
        .await
        .unwrap();

    // 只刷新子一以下：1 物料 + 1 子方法 + 1 工序 + 1 追溯单元
    assert_eq!(outcome.stats.updates, 4);
    assert_eq!(estimated(&store, &fx.material_two), Some(60.0));
    assert_eq!(operation_quantity(&store, &fx.child_two_op), Some(60.0));
    assert_eq!(entity_quantity(&store, &fx.entity_two), 1.0);

    // 起算点上方保持不动
    assert_eq!(estimated(&store, &fx.material_one), Some(20.0));
    assert_eq!(operation_quantity(&store, &fx.child_one_op), None);
    assert_eq!(entity_quantity(&store, &fx.entity_one), 5.0);
}

#[tokio::test]
async fn test_recalculate_job_without_tree_is_not_found() {
    let store = MemoryStore::new();
    let company = CompanyId::new();
    let job_id = JobId::new();
    store.add_job(Job::from_parts(
        job_id.clone(),
        company.clone(),
        "J-2002".to_string(),
        ItemId::new(),
        4.0,
        JobStatus::Draft,
        None,
    ));

    let handler = support::handler(&store);
    let err = handler
        .sync_method(SyncMethodCommand {
            op: SyncOp::RecalculateJobRequirements,
            source_id: job_id.to_string(),
            target_id: None,
            company_id: company,
            user_id: UserId::new(),
            configuration: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
