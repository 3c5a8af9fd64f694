//! 方法同步处理器
//!
//! 所有操作走同一条三段式流水线：先把源树、资源快照和配置
//! 规则并行装载进内存，然后由纯同步的规划器产出写计划，最后
//! 交给方法仓储在单个事务里执行。处理器本身不持有任何业务
//! 状态，只负责编排。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, warn};

use common::types::CompanyId;
use errors::{AppError, AppResult};

use crate::application::commands::{AnchorRef, SyncMethodCommand, SyncProcedureCommand};
use crate::application::planner::{ClonePlanner, ListOverrideStats, TargetAnchor, TargetSpec};
use crate::application::procedure::{plan_procedure_sync, ProcedureSyncSummary};
use crate::application::queries::{GetMethodTreeQuery, MethodTreeView};
use crate::application::recalculate::RequirementsPlanner;
use crate::domain::configuration::{ConfigurationResolver, OverrideStats};
use crate::domain::entities::{MakeMethod, MethodOperation, MethodOwner, TrackedEntity};
use crate::domain::enums::{MethodDomain, SyncOp};
use crate::domain::plan::{MethodWritePlan, WriteOp, WriteStats};
use crate::domain::rates::RateBook;
use crate::domain::repositories::{
    ConfigurationRuleRepository, ItemRepository, JobRepository, MethodRepository,
    ProcedureRepository, QuoteRepository, ResourceRepository,
};
use crate::domain::tree::MethodTree;
use crate::domain::value_objects::{ItemId, MakeMethodId, ProcedureId, QuoteId, QuoteLineId};
use crate::domain::views::{Item, Procedure};

/// 一次同步的结果
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    /// 整单复制产出的新报价单 ID
    pub new_quote_id: Option<QuoteId>,
    pub stats: WriteStats,
    pub overrides: OverrideStats,
    pub list_overrides: ListOverrideStats,
}

/// 方法同步处理器
pub struct MethodHandler {
    method_repo: Arc<dyn MethodRepository>,
    item_repo: Arc<dyn ItemRepository>,
    job_repo: Arc<dyn JobRepository>,
    quote_repo: Arc<dyn QuoteRepository>,
    resource_repo: Arc<dyn ResourceRepository>,
    procedure_repo: Arc<dyn ProcedureRepository>,
    rule_repo: Arc<dyn ConfigurationRuleRepository>,
}

impl MethodHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        method_repo: Arc<dyn MethodRepository>,
        item_repo: Arc<dyn ItemRepository>,
        job_repo: Arc<dyn JobRepository>,
        quote_repo: Arc<dyn QuoteRepository>,
        resource_repo: Arc<dyn ResourceRepository>,
        procedure_repo: Arc<dyn ProcedureRepository>,
        rule_repo: Arc<dyn ConfigurationRuleRepository>,
    ) -> Self {
        Self {
            method_repo,
            item_repo,
            job_repo,
            quote_repo,
            resource_repo,
            procedure_repo,
            rule_repo,
        }
    }

    /// 执行一次方法同步
    pub async fn sync_method(&self, cmd: SyncMethodCommand) -> AppResult<SyncOutcome> {
        // 1. 校验命令
        cmd.validate()?;
        info!(
            "Syncing method: {} for tenant: {}",
            cmd.op.as_str(),
            cmd.company_id
        );

        // 2. 按操作类型分派
        match cmd.op {
            SyncOp::QuoteToQuote => self.clone_quote(&cmd).await,
            SyncOp::RecalculateJobRequirements => self.recalculate_job(&cmd).await,
            SyncOp::RecalculateJobMakeMethodRequirements => self.recalculate_method(&cmd).await,
            _ => self.clone_pair(&cmd).await,
        }
    }

    /// 把指导书模板同步到已落库的工序上
    pub async fn sync_procedure(
        &self,
        cmd: SyncProcedureCommand,
    ) -> AppResult<ProcedureSyncSummary> {
        info!(
            "Syncing procedure: {} to operation: {} for tenant: {}",
            cmd.procedure_id, cmd.operation_id, cmd.company_id
        );

        // 1. 工序与指导书并行读出
        let (operation, procedure) = tokio::try_join!(
            self.method_repo
                .find_operation(cmd.domain, &cmd.operation_id, &cmd.company_id),
            self.procedure_repo
                .find_by_id(&cmd.procedure_id, &cmd.company_id),
        )?;
        let operation = operation.ok_or_else(|| AppError::not_found("工序不存在"))?;
        let procedure = procedure.ok_or_else(|| AppError::not_found("作业指导书不存在"))?;

        // 2. 差分并执行
        let mut plan = MethodWritePlan::new(cmd.domain, operation.make_method_id().0);
        let summary = plan_procedure_sync(&mut plan, &operation, &procedure);
        self.method_repo.execute(&plan).await?;
        info!(
            "Procedure synced: {} updated, {} inserted, {} deleted for tenant: {}",
            summary.attributes_updated,
            summary.attributes_inserted,
            summary.attributes_deleted,
            cmd.company_id
        );
        Ok(summary)
    }

    /// 查询一棵已物化的方法树（嵌套投影）
    pub async fn get_method_tree(&self, query: GetMethodTreeQuery) -> AppResult<MethodTreeView> {
        // 1. 平面行装树
        let rows = self
            .method_repo
            .load_tree_rows(query.domain, &query.method_id, &query.company_id)
            .await?;
        if rows.is_empty() {
            return Err(AppError::not_found("方法不存在"));
        }
        let tree = MethodTree::from_rows(rows);
        let method_ids = tree.source_method_ids();

        // 2. 工序按方法分组
        let operations = self
            .method_repo
            .load_operations(query.domain, &method_ids, &query.company_id)
            .await?;
        let mut grouped: HashMap<MakeMethodId, Vec<MethodOperation>> = HashMap::new();
        for operation in operations {
            grouped
                .entry(operation.make_method_id().clone())
                .or_default()
                .push(operation);
        }

        // 3. 从请求的根组装嵌套视图
        let root_idx = tree
            .find_by_key(&query.method_id)
            .ok_or_else(|| AppError::not_found("方法不存在"))?;
        MethodTreeView::assemble(&tree, root_idx, &grouped)
            .ok_or_else(|| AppError::not_found("方法不存在"))
    }

    // ========== 成对克隆 ==========

    async fn clone_pair(&self, cmd: &SyncMethodCommand) -> AppResult<SyncOutcome> {
        // 1. 解析两端锚点
        let source = cmd.source_anchor()?;
        let target = cmd
            .target_anchor()?
            .ok_or_else(|| AppError::validation("targetId 缺失"))?;
        let (source_domain, source_root) =
            self.resolve_source_root(&source, &cmd.company_id).await?;
        let spec = self.resolve_target(&target, &cmd.company_id).await?;

        // 2. 装载源树并换发目标标识
        let rows = self
            .method_repo
            .load_tree_rows(source_domain, source_root.id(), &cmd.company_id)
            .await?;
        if rows.is_empty() {
            return Err(AppError::not_found("源方法树不存在"));
        }
        let mut tree = MethodTree::from_rows(rows);
        tree.reidentify();
        let source_method_ids = tree.source_method_ids();

        // 3. 工序、资源与配置规则并行装载
        let rules_fut = async {
            if cmd.configuration.is_some() {
                self.rule_repo
                    .rules_for_item(source_root.item_id(), &cmd.company_id)
                    .await
            } else {
                Ok(Vec::new())
            }
        };
        let (operations, work_centers, supplier_processes, rules) = tokio::try_join!(
            self.method_repo
                .load_operations(source_domain, &source_method_ids, &cmd.company_id),
            self.resource_repo.work_centers(&cmd.company_id),
            self.resource_repo.supplier_processes(&cmd.company_id),
            rules_fut,
        )?;
        let resolver = match &cmd.configuration {
            Some(payload) => ConfigurationResolver::new(rules, Some(payload.clone())),
            None => ConfigurationResolver::empty(),
        };
        let rates = RateBook::new(work_centers, supplier_processes);

        // 4. 物品与指导书整批预载
        let override_items = resolver.item_override_ids();
        let items = self
            .load_items(&tree, override_items, &spec.item_id, &cmd.company_id)
            .await?;
        let procedures = self.load_procedures(&operations, &cmd.company_id).await?;

        // 5. 规划
        let (plan, overrides, list_overrides) = {
            let planner = ClonePlanner::new(
                &tree,
                &operations,
                &resolver,
                &rates,
                &items,
                &procedures,
                cmd.company_id.clone(),
                cmd.user_id.clone(),
            );
            let plan = planner.plan(&spec)?;
            (plan, resolver.stats(), planner.list_stats())
        };

        // 6. 单事务执行
        let stats = self.method_repo.execute(&plan).await?;
        info!(
            "Method sync written: {} rows for tenant: {}",
            stats.total_inserted(),
            cmd.company_id
        );
        Ok(SyncOutcome {
            new_quote_id: None,
            stats,
            overrides,
            list_overrides,
        })
    }

    /// 源锚点解析成（域, 源根方法）
    async fn resolve_source_root(
        &self,
        anchor: &AnchorRef,
        company_id: &CompanyId,
    ) -> AppResult<(MethodDomain, MakeMethod)> {
        match anchor {
            AnchorRef::Item(item_id) => {
                let root = self
                    .method_repo
                    .find_root_for_item(item_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("物品主数据方法不存在"))?;
                Ok((MethodDomain::Item, root))
            }
            AnchorRef::Job(job_id) => {
                let root = self
                    .method_repo
                    .find_root_for_job(job_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("作业方法不存在"))?;
                Ok((MethodDomain::Job, root))
            }
            AnchorRef::JobMakeMethod(method_id) => {
                let method = self
                    .method_repo
                    .find_method(MethodDomain::Job, method_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("作业方法节点不存在"))?;
                Ok((MethodDomain::Job, method))
            }
            AnchorRef::QuoteLine(quote_id, line_id) => {
                let root = self
                    .method_repo
                    .find_root_for_quote_line(quote_id, line_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("报价行方法不存在"))?;
                Ok((MethodDomain::Quote, root))
            }
            AnchorRef::QuoteMakeMethod(method_id) => {
                let method = self
                    .method_repo
                    .find_method(MethodDomain::Quote, method_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("报价方法节点不存在"))?;
                Ok((MethodDomain::Quote, method))
            }
            AnchorRef::Quote(_) => Err(AppError::internal("整单复制不走成对克隆路径")),
        }
    }

    /// 目标锚点解析成规划所需的目标描述
    ///
    /// 目标根已存在时走"保根重建"，不存在时新建；咨询锁键
    /// 取目标侧跨请求稳定的归属 ID。
    async fn resolve_target(
        &self,
        anchor: &AnchorRef,
        company_id: &CompanyId,
    ) -> AppResult<TargetSpec> {
        match anchor {
            AnchorRef::Item(item_id) => {
                let item = self
                    .item_repo
                    .find_by_id(item_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("目标物品不存在"))?;
                let anchor = match self
                    .method_repo
                    .find_root_for_item(item_id, company_id)
                    .await?
                {
                    Some(existing) => TargetAnchor::Existing(existing.id().clone()),
                    None => TargetAnchor::New(MakeMethodId::new()),
                };
                Ok(TargetSpec {
                    domain: MethodDomain::Item,
                    owner: MethodOwner::Item,
                    item_id: item.id().clone(),
                    anchor,
                    lock_id: item_id.0,
                })
            }
            AnchorRef::Job(job_id) => {
                let job = self
                    .job_repo
                    .find_by_id(job_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("目标作业不存在"))?;
                let anchor = match self
                    .method_repo
                    .find_root_for_job(job_id, company_id)
                    .await?
                {
                    Some(existing) => TargetAnchor::Existing(existing.id().clone()),
                    None => TargetAnchor::New(MakeMethodId::new()),
                };
                Ok(TargetSpec {
                    domain: MethodDomain::Job,
                    owner: MethodOwner::Job(job_id.clone()),
                    item_id: job.item_id().clone(),
                    anchor,
                    lock_id: job_id.0,
                })
            }
            AnchorRef::JobMakeMethod(method_id) => {
                let method = self
                    .method_repo
                    .find_method(MethodDomain::Job, method_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("目标作业方法节点不存在"))?;
                Ok(TargetSpec {
                    domain: MethodDomain::Job,
                    owner: method.owner(),
                    item_id: method.item_id().clone(),
                    anchor: TargetAnchor::Existing(method.id().clone()),
                    lock_id: method.id().0,
                })
            }
            AnchorRef::QuoteLine(quote_id, line_id) => {
                let line = self
                    .quote_repo
                    .find_line(quote_id, line_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("目标报价行不存在"))?;
                let anchor = match self
                    .method_repo
                    .find_root_for_quote_line(quote_id, line_id, company_id)
                    .await?
                {
                    Some(existing) => TargetAnchor::Existing(existing.id().clone()),
                    None => TargetAnchor::New(MakeMethodId::new()),
                };
                Ok(TargetSpec {
                    domain: MethodDomain::Quote,
                    owner: MethodOwner::QuoteLine(quote_id.clone(), line_id.clone()),
                    item_id: line.item_id().clone(),
                    anchor,
                    lock_id: line_id.0,
                })
            }
            AnchorRef::QuoteMakeMethod(method_id) => {
                let method = self
                    .method_repo
                    .find_method(MethodDomain::Quote, method_id, company_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("目标报价方法节点不存在"))?;
                Ok(TargetSpec {
                    domain: MethodDomain::Quote,
                    owner: method.owner(),
                    item_id: method.item_id().clone(),
                    anchor: TargetAnchor::Existing(method.id().clone()),
                    lock_id: method.id().0,
                })
            }
            AnchorRef::Quote(_) => Err(AppError::internal("整单复制不走成对克隆路径")),
        }
    }

    // ========== 整单复制 ==========

    /// quoteToQuote：复制成新修订，连同条款、阶梯价和各行方法树
    async fn clone_quote(&self, cmd: &SyncMethodCommand) -> AppResult<SyncOutcome> {
        let AnchorRef::Quote(source_quote_id) = cmd.source_anchor()? else {
            return Err(AppError::validation("quoteToQuote 的 sourceId 必须是报价单 ID"));
        };
        if cmd.configuration.is_some() {
            // 配置规则登记在物品上，整单复制按行原样重放
            warn!("configuration payload is ignored for quote duplication");
        }

        // 1. 读出整张源报价单
        let quote = self
            .quote_repo
            .find_quote(&source_quote_id, &cmd.company_id)
            .await?
            .ok_or_else(|| AppError::not_found("报价单不存在"))?;
        let (lines, payments, shipments, prices) = tokio::try_join!(
            self.quote_repo
                .lines_for_quote(&source_quote_id, &cmd.company_id),
            self.quote_repo
                .payments_for_quote(&source_quote_id, &cmd.company_id),
            self.quote_repo
                .shipments_for_quote(&source_quote_id, &cmd.company_id),
            self.quote_repo
                .prices_for_quote(&source_quote_id, &cmd.company_id),
        )?;

        // 2. 资源快照一次，行间共享；费率总是按当前快照重解析
        let (work_centers, supplier_processes) = tokio::try_join!(
            self.resource_repo.work_centers(&cmd.company_id),
            self.resource_repo.supplier_processes(&cmd.company_id),
        )?;
        let rates = RateBook::new(work_centers, supplier_processes);

        // 3. 逐行装载方法树（没有方法的行只复制行本身）
        let mut line_trees: Vec<Option<(MethodTree, Vec<MethodOperation>)>> =
            Vec::with_capacity(lines.len());
        for line in &lines {
            let Some(root) = self
                .method_repo
                .find_root_for_quote_line(quote.id(), line.id(), &cmd.company_id)
                .await?
            else {
                line_trees.push(None);
                continue;
            };
            let rows = self
                .method_repo
                .load_tree_rows(MethodDomain::Quote, root.id(), &cmd.company_id)
                .await?;
            let mut tree = MethodTree::from_rows(rows);
            tree.reidentify();
            let method_ids = tree.source_method_ids();
            let operations = self
                .method_repo
                .load_operations(MethodDomain::Quote, &method_ids, &cmd.company_id)
                .await?;
            line_trees.push(Some((tree, operations)));
        }

        // 4. 物品与指导书整批预载
        let mut item_ids: HashSet<ItemId> =
            lines.iter().map(|line| line.item_id().clone()).collect();
        let mut procedure_ids: HashSet<ProcedureId> = HashSet::new();
        for (tree, operations) in line_trees.iter().flatten() {
            for idx in 0..tree.len() {
                if let Some(data) = tree.data(idx) {
                    item_ids.insert(data.method.item_id().clone());
                    for material in &data.materials {
                        item_ids.insert(material.item_id().clone());
                    }
                }
            }
            for operation in operations {
                if let Some(procedure_id) = operation.procedure_id() {
                    procedure_ids.insert(procedure_id.clone());
                }
            }
        }
        let item_id_list: Vec<ItemId> = item_ids.into_iter().collect();
        let procedure_id_list: Vec<ProcedureId> = procedure_ids.into_iter().collect();
        let (item_rows, procedure_rows) = tokio::try_join!(
            self.item_repo.find_many(&item_id_list, &cmd.company_id),
            self.procedure_repo
                .find_many(&procedure_id_list, &cmd.company_id),
        )?;
        let items: HashMap<ItemId, Item> = item_rows
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        let procedures: HashMap<ProcedureId, Procedure> = procedure_rows
            .into_iter()
            .map(|procedure| (procedure.id().clone(), procedure))
            .collect();

        // 5. 组计划：新修订单头、条款、逐行复制再挂方法树
        let new_quote_id = QuoteId::new();
        let resolver = ConfigurationResolver::empty();
        let mut plan = MethodWritePlan::new(MethodDomain::Quote, new_quote_id.0);
        let mut list_overrides = ListOverrideStats::default();

        plan.push(WriteOp::InsertQuote(
            quote.next_revision(new_quote_id.clone(), Some(cmd.user_id.clone())),
        ));
        for payment in &payments {
            plan.push(WriteOp::InsertQuotePayment(
                payment.duplicate_for(new_quote_id.clone(), Some(cmd.user_id.clone())),
            ));
        }
        for shipment in &shipments {
            plan.push(WriteOp::InsertQuoteShipment(
                shipment.duplicate_for(new_quote_id.clone(), Some(cmd.user_id.clone())),
            ));
        }
        for (line, entry) in lines.iter().zip(&line_trees) {
            let new_line_id = QuoteLineId::new();
            plan.push(WriteOp::InsertQuoteLine(line.duplicate_for(
                new_line_id.clone(),
                new_quote_id.clone(),
                Some(cmd.user_id.clone()),
            )));
            for price in prices.iter().filter(|price| price.quote_line_id() == line.id()) {
                plan.push(WriteOp::InsertQuoteLinePrice(price.duplicate_for(
                    new_quote_id.clone(),
                    new_line_id.clone(),
                    Some(cmd.user_id.clone()),
                )));
            }

            let Some((tree, operations)) = entry else {
                continue;
            };
            let planner = ClonePlanner::new(
                tree,
                operations,
                &resolver,
                &rates,
                &items,
                &procedures,
                cmd.company_id.clone(),
                cmd.user_id.clone(),
            );
            let spec = TargetSpec {
                domain: MethodDomain::Quote,
                owner: MethodOwner::QuoteLine(new_quote_id.clone(), new_line_id.clone()),
                item_id: line.item_id().clone(),
                anchor: TargetAnchor::New(MakeMethodId::new()),
                lock_id: new_quote_id.0,
            };
            planner.plan_into(&mut plan, &spec)?;
            let stats = planner.list_stats();
            list_overrides.unmatched_entries += stats.unmatched_entries;
            list_overrides.dropped_rows += stats.dropped_rows;
        }

        // 6. 单事务执行
        let stats = self.method_repo.execute(&plan).await?;
        info!(
            "Quote duplicated: {} -> {} for tenant: {}",
            source_quote_id, new_quote_id, cmd.company_id
        );
        Ok(SyncOutcome {
            new_quote_id: Some(new_quote_id),
            stats,
            overrides: resolver.stats(),
            list_overrides,
        })
    }

    // ========== 需求量重算 ==========

    async fn recalculate_job(&self, cmd: &SyncMethodCommand) -> AppResult<SyncOutcome> {
        let AnchorRef::Job(job_id) = cmd.source_anchor()? else {
            return Err(AppError::validation(
                "recalculate:jobRequirements 的 sourceId 必须是作业 ID",
            ));
        };

        // 1. 作业与根方法
        let job = self
            .job_repo
            .find_by_id(&job_id, &cmd.company_id)
            .await?
            .ok_or_else(|| AppError::not_found("作业不存在"))?;
        let root = self
            .method_repo
            .find_root_for_job(&job_id, &cmd.company_id)
            .await?
            .ok_or_else(|| AppError::not_found("作业方法不存在"))?;

        // 2. 真实标识装树（重算不换发标识）
        let (tree, operations, tracked) = self
            .load_job_tree(root.id(), &cmd.company_id)
            .await?;

        // 3. 级联规划并执行
        let mut plan = MethodWritePlan::new(MethodDomain::Job, job_id.0);
        RequirementsPlanner::new(&tree, &operations, &tracked).plan(
            &mut plan,
            root.id(),
            job.production_quantity(),
        )?;
        let stats = self.method_repo.execute(&plan).await?;
        info!(
            "Job requirements recalculated: {} updates for tenant: {}",
            stats.updates, cmd.company_id
        );
        Ok(SyncOutcome {
            stats,
            ..Default::default()
        })
    }

    async fn recalculate_method(&self, cmd: &SyncMethodCommand) -> AppResult<SyncOutcome> {
        let AnchorRef::JobMakeMethod(method_id) = cmd.source_anchor()? else {
            return Err(AppError::validation(
                "recalculate:jobMakeMethodRequirements 的 sourceId 必须是方法 ID",
            ));
        };

        // 1. 方法节点与所属作业
        let method = self
            .method_repo
            .find_method(MethodDomain::Job, &method_id, &cmd.company_id)
            .await?
            .ok_or_else(|| AppError::not_found("作业方法节点不存在"))?;
        let job_id = method
            .job_id()
            .cloned()
            .ok_or_else(|| AppError::internal("作业方法缺少作业归属"))?;
        let job = self
            .job_repo
            .find_by_id(&job_id, &cmd.company_id)
            .await?
            .ok_or_else(|| AppError::not_found("作业不存在"))?;
        let root = self
            .method_repo
            .find_root_for_job(&job_id, &cmd.company_id)
            .await?
            .ok_or_else(|| AppError::not_found("作业方法不存在"))?;

        // 2. 整棵作业树（起算节点上方的父物料也要看）
        let (tree, operations, tracked) = self
            .load_job_tree(root.id(), &cmd.company_id)
            .await?;

        // 3. 起算数量：根用生产数量，中间节点用父物料的绝对需求量
        let root_quantity = if method.is_root() {
            job.production_quantity()
        } else {
            let node_idx = tree
                .find_by_key(method.id())
                .ok_or_else(|| AppError::not_found("方法不在作业方法树中"))?;
            let parent_material = tree
                .parent(node_idx)
                .and_then(|parent_idx| tree.data(parent_idx))
                .and_then(|data| {
                    data.materials
                        .iter()
                        .find(|material| Some(material.id()) == method.parent_material_id())
                });
            match parent_material {
                Some(material) => material.estimated_quantity().unwrap_or(material.quantity()),
                None => {
                    warn!("parent material missing for method, using job production quantity");
                    job.production_quantity()
                }
            }
        };

        // 4. 级联规划并执行
        let mut plan = MethodWritePlan::new(MethodDomain::Job, job_id.0);
        RequirementsPlanner::new(&tree, &operations, &tracked).plan(
            &mut plan,
            method.id(),
            root_quantity,
        )?;
        let stats = self.method_repo.execute(&plan).await?;
        info!(
            "Method requirements recalculated: {} updates for tenant: {}",
            stats.updates, cmd.company_id
        );
        Ok(SyncOutcome {
            stats,
            ..Default::default()
        })
    }

    // ========== 装载辅助 ==========

    async fn load_job_tree(
        &self,
        root_method_id: &MakeMethodId,
        company_id: &CompanyId,
    ) -> AppResult<(MethodTree, Vec<MethodOperation>, Vec<TrackedEntity>)> {
        let rows = self
            .method_repo
            .load_tree_rows(MethodDomain::Job, root_method_id, company_id)
            .await?;
        if rows.is_empty() {
            return Err(AppError::not_found("作业方法树不存在"));
        }
        let tree = MethodTree::from_rows(rows);
        let method_ids = tree.source_method_ids();
        let (operations, tracked) = tokio::try_join!(
            self.method_repo
                .load_operations(MethodDomain::Job, &method_ids, company_id),
            self.job_repo
                .tracked_entities_for_methods(&method_ids, company_id),
        )?;
        Ok((tree, operations, tracked))
    }

    async fn load_items(
        &self,
        tree: &MethodTree,
        override_items: Vec<ItemId>,
        target_item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<HashMap<ItemId, Item>> {
        let mut wanted: HashSet<ItemId> = HashSet::new();
        wanted.insert(target_item_id.clone());
        wanted.extend(override_items);
        for idx in 0..tree.len() {
            if let Some(data) = tree.data(idx) {
                wanted.insert(data.method.item_id().clone());
                for material in &data.materials {
                    wanted.insert(material.item_id().clone());
                }
            }
        }
        let ids: Vec<ItemId> = wanted.into_iter().collect();
        let items = self.item_repo.find_many(&ids, company_id).await?;
        Ok(items
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect())
    }

    async fn load_procedures(
        &self,
        operations: &[MethodOperation],
        company_id: &CompanyId,
    ) -> AppResult<HashMap<ProcedureId, Procedure>> {
        let mut wanted: HashSet<ProcedureId> = HashSet::new();
        for operation in operations {
            if let Some(procedure_id) = operation.procedure_id() {
                wanted.insert(procedure_id.clone());
            }
        }
        if wanted.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<ProcedureId> = wanted.into_iter().collect();
        let procedures = self.procedure_repo.find_many(&ids, company_id).await?;
        Ok(procedures
            .into_iter()
            .map(|procedure| (procedure.id().clone(), procedure))
            .collect())
    }
}
