//! 处理器级测试支撑
//!
//! 用一个内存结构同时实现全部七个仓储接口：写计划按序在
//! 内存表上回放，测试在不连数据库的情况下检视落库结果。
//! 三个域各有一套方法表，清理语义与真实实现保持一致：
//! 指定根的后代方法连同整棵树的物料/工序一并删除，根行保留。

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::types::CompanyId;
use domain_core::AggregateRoot;
use errors::AppResult;

use anvil_mf_method::application::MethodHandler;
use anvil_mf_method::domain::entities::{
    MakeMethod, MethodMaterial, MethodOperation, OperationAttribute, Quote, QuoteLine,
    QuoteLinePrice, QuotePayment, QuoteShipment, TrackedEntity,
};
use anvil_mf_method::domain::enums::MethodDomain;
use anvil_mf_method::domain::plan::{MethodWritePlan, WriteOp, WriteStats};
use anvil_mf_method::domain::repositories::{
    ConfigurationRuleRepository, ItemRepository, JobRepository, MethodRepository,
    ProcedureRepository, QuoteRepository, ResourceRepository,
};
use anvil_mf_method::domain::tree::MethodTreeRow;
use anvil_mf_method::domain::value_objects::{
    ItemId, JobId, MakeMethodId, MaterialId, OperationId, ProcedureId, QuoteId, QuoteLineId,
};
use anvil_mf_method::domain::views::{
    ConfigurationRule, Item, Job, Procedure, SupplierProcess, WorkCenter,
};

/// 单个域的三张方法表
#[derive(Debug, Default)]
struct DomainTables {
    methods: Vec<MakeMethod>,
    materials: Vec<MethodMaterial>,
    operations: Vec<MethodOperation>,
}

#[derive(Debug, Default)]
struct Inner {
    item: DomainTables,
    job: DomainTables,
    quote: DomainTables,
    items: Vec<Item>,
    jobs: Vec<Job>,
    quotes: Vec<Quote>,
    quote_lines: Vec<QuoteLine>,
    quote_payments: Vec<QuotePayment>,
    quote_shipments: Vec<QuoteShipment>,
    quote_line_prices: Vec<QuoteLinePrice>,
    procedures: Vec<Procedure>,
    work_centers: Vec<WorkCenter>,
    supplier_processes: Vec<SupplierProcess>,
    rules: Vec<ConfigurationRule>,
    tracked_entities: Vec<TrackedEntity>,
}

impl Inner {
    fn tables(&self, domain: MethodDomain) -> &DomainTables {
        match domain {
            MethodDomain::Item => &self.item,
            MethodDomain::Job => &self.job,
            MethodDomain::Quote => &self.quote,
        }
    }

    fn tables_mut(&mut self, domain: MethodDomain) -> &mut DomainTables {
        match domain {
            MethodDomain::Item => &mut self.item,
            MethodDomain::Job => &mut self.job,
            MethodDomain::Quote => &mut self.quote,
        }
    }
}

/// 沿"父物料 -> 子方法"链收集根之下整棵子树的方法 ID（含根）
fn subtree_method_ids(tables: &DomainTables, root: &MakeMethodId) -> Vec<MakeMethodId> {
    let mut ids = vec![root.clone()];
    let mut cursor = 0;
    while cursor < ids.len() {
        let current = ids[cursor].clone();
        cursor += 1;
        let material_ids: Vec<MaterialId> = tables
            .materials
            .iter()
            .filter(|material| material.make_method_id() == &current)
            .map(|material| material.id().clone())
            .collect();
        for method in &tables.methods {
            if let Some(parent) = method.parent_material_id() {
                if material_ids.contains(parent) {
                    ids.push(method.id().clone());
                }
            }
        }
    }
    ids
}

/// 内存仓储
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // ============ 造数 ============

    pub fn add_item(&self, item: Item) {
        self.inner.lock().unwrap().items.push(item);
    }

    pub fn add_job(&self, job: Job) {
        self.inner.lock().unwrap().jobs.push(job);
    }

    pub fn add_method(&self, domain: MethodDomain, method: MakeMethod) {
        self.inner
            .lock()
            .unwrap()
            .tables_mut(domain)
            .methods
            .push(method);
    }

    pub fn add_material(&self, domain: MethodDomain, material: MethodMaterial) {
        self.inner
            .lock()
            .unwrap()
            .tables_mut(domain)
            .materials
            .push(material);
    }

    pub fn add_operation(&self, domain: MethodDomain, operation: MethodOperation) {
        self.inner
            .lock()
            .unwrap()
            .tables_mut(domain)
            .operations
            .push(operation);
    }

    pub fn add_quote(&self, quote: Quote) {
        self.inner.lock().unwrap().quotes.push(quote);
    }

    pub fn add_quote_line(&self, line: QuoteLine) {
        self.inner.lock().unwrap().quote_lines.push(line);
    }

    pub fn add_quote_payment(&self, payment: QuotePayment) {
        self.inner.lock().unwrap().quote_payments.push(payment);
    }

    pub fn add_quote_shipment(&self, shipment: QuoteShipment) {
        self.inner.lock().unwrap().quote_shipments.push(shipment);
    }

    pub fn add_quote_line_price(&self, price: QuoteLinePrice) {
        self.inner.lock().unwrap().quote_line_prices.push(price);
    }

    pub fn add_procedure(&self, procedure: Procedure) {
        self.inner.lock().unwrap().procedures.push(procedure);
    }

    pub fn add_work_center(&self, work_center: WorkCenter) {
        self.inner.lock().unwrap().work_centers.push(work_center);
    }

    pub fn add_supplier_process(&self, supplier_process: SupplierProcess) {
        self.inner
            .lock()
            .unwrap()
            .supplier_processes
            .push(supplier_process);
    }

    pub fn add_rule(&self, rule: ConfigurationRule) {
        self.inner.lock().unwrap().rules.push(rule);
    }

    pub fn add_tracked_entity(&self, entity: TrackedEntity) {
        self.inner.lock().unwrap().tracked_entities.push(entity);
    }

    // ============ 检视 ============

    pub fn methods(&self, domain: MethodDomain) -> Vec<MakeMethod> {
        self.inner.lock().unwrap().tables(domain).methods.clone()
    }

    pub fn materials(&self, domain: MethodDomain) -> Vec<MethodMaterial> {
        self.inner.lock().unwrap().tables(domain).materials.clone()
    }

    pub fn operations(&self, domain: MethodDomain) -> Vec<MethodOperation> {
        self.inner.lock().unwrap().tables(domain).operations.clone()
    }

    pub fn quotes(&self) -> Vec<Quote> {
        self.inner.lock().unwrap().quotes.clone()
    }

    pub fn quote_lines(&self) -> Vec<QuoteLine> {
        self.inner.lock().unwrap().quote_lines.clone()
    }

    pub fn quote_payments(&self) -> Vec<QuotePayment> {
        self.inner.lock().unwrap().quote_payments.clone()
    }

    pub fn quote_shipments(&self) -> Vec<QuoteShipment> {
        self.inner.lock().unwrap().quote_shipments.clone()
    }

    pub fn quote_line_prices(&self) -> Vec<QuoteLinePrice> {
        self.inner.lock().unwrap().quote_line_prices.clone()
    }

    pub fn tracked_entities(&self) -> Vec<TrackedEntity> {
        self.inner.lock().unwrap().tracked_entities.clone()
    }
}

/// 七个仓储都指向同一个内存实例的处理器
pub fn handler(store: &Arc<MemoryStore>) -> MethodHandler {
    MethodHandler::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
}

// ============================================================================
// 仓储接口实现
// ============================================================================

#[async_trait]
impl MethodRepository for MemoryStore {
    async fn load_tree_rows(
        &self,
        domain: MethodDomain,
        root_method_id: &MakeMethodId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<MethodTreeRow>> {
        let inner = self.inner.lock().unwrap();
        let tables = inner.tables(domain);
        let mut rows = Vec::new();

        let Some(root) = tables
            .methods
            .iter()
            .find(|method| method.id() == root_method_id && method.company_id() == company_id)
        else {
            return Ok(rows);
        };

        let mut queue = vec![(None, root.clone())];
        let mut cursor = 0;
        while cursor < queue.len() {
            let (parent_method_id, method) = queue[cursor].clone();
            cursor += 1;

            let mut materials: Vec<MethodMaterial> = tables
                .materials
                .iter()
                .filter(|material| material.make_method_id() == method.id())
                .cloned()
                .collect();
            materials.sort_by(|a, b| a.order().total_cmp(&b.order()));

            for material in &materials {
                if let Some(child) = tables
                    .methods
                    .iter()
                    .find(|candidate| candidate.parent_material_id() == Some(material.id()))
                {
                    queue.push((Some(method.id().clone()), child.clone()));
                }
            }

            rows.push(MethodTreeRow {
                parent_method_id,
                method,
                materials,
            });
        }
        Ok(rows)
    }

    async fn load_operations(
        &self,
        domain: MethodDomain,
        method_ids: &[MakeMethodId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<MethodOperation>> {
        let inner = self.inner.lock().unwrap();
        let mut operations: Vec<MethodOperation> = inner
            .tables(domain)
            .operations
            .iter()
            .filter(|operation| {
                method_ids.contains(operation.make_method_id())
                    && operation.company_id() == company_id
            })
            .cloned()
            .collect();
        operations.sort_by(|a, b| {
            a.make_method_id()
                .0
                .cmp(&b.make_method_id().0)
                .then(a.order().total_cmp(&b.order()))
        });
        Ok(operations)
    }

    async fn find_method(
        &self,
        domain: MethodDomain,
        method_id: &MakeMethodId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tables(domain)
            .methods
            .iter()
            .find(|method| method.id() == method_id && method.company_id() == company_id)
            .cloned())
    }

    async fn find_root_for_item(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .item
            .methods
            .iter()
            .find(|method| {
                method.item_id() == item_id
                    && method.is_root()
                    && method.company_id() == company_id
            })
            .cloned())
    }

    async fn find_root_for_job(
        &self,
        job_id: &JobId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .job
            .methods
            .iter()
            .find(|method| {
                method.job_id() == Some(job_id)
                    && method.is_root()
                    && method.company_id() == company_id
            })
            .cloned())
    }

    async fn find_root_for_quote_line(
        &self,
        quote_id: &QuoteId,
        quote_line_id: &QuoteLineId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .quote
            .methods
            .iter()
            .find(|method| {
                method.quote_id() == Some(quote_id)
                    && method.quote_line_id() == Some(quote_line_id)
                    && method.is_root()
                    && method.company_id() == company_id
            })
            .cloned())
    }

    async fn find_operation(
        &self,
        domain: MethodDomain,
        operation_id: &OperationId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MethodOperation>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tables(domain)
            .operations
            .iter()
            .find(|operation| {
                operation.id() == operation_id && operation.company_id() == company_id
            })
            .cloned())
    }

    async fn execute(&self, plan: &MethodWritePlan) -> AppResult<WriteStats> {
        let mut inner = self.inner.lock().unwrap();
        let domain = plan.domain();
        let mut stats = WriteStats::default();

        if let Some(root) = plan.wipe_under() {
            let tables = inner.tables_mut(domain);
            let subtree = subtree_method_ids(tables, root);
            stats.deleted_methods = subtree.len().saturating_sub(1) as u64;
            tables
                .methods
                .retain(|method| method.id() == root || !subtree.contains(method.id()));
            tables
                .materials
                .retain(|material| !subtree.contains(material.make_method_id()));
            tables
                .operations
                .retain(|operation| !subtree.contains(operation.make_method_id()));
        }

        for op in plan.ops() {
            match op {
                WriteOp::InsertMethod(method) => {
                    inner.tables_mut(domain).methods.push(method.clone());
                    stats.methods += 1;
                }
                WriteOp::InsertMaterial(material) => {
                    inner.tables_mut(domain).materials.push(material.clone());
                    stats.materials += 1;
                }
                WriteOp::InsertOperation(operation) => {
                    stats.operations += 1;
                    stats.tools += operation.tools().len() as u64;
                    stats.parameters += operation.parameters().len() as u64;
                    stats.attributes += operation.attributes().len() as u64;
                    inner.tables_mut(domain).operations.push(operation.clone());
                }
                WriteOp::UpdateMethodQuantity {
                    method_id,
                    quantity_per_parent,
                } => {
                    let tables = inner.tables_mut(domain);
                    if let Some(method) =
                        tables.methods.iter_mut().find(|m| m.id() == method_id)
                    {
                        let rewritten = MakeMethod::from_parts(
                            method.id().clone(),
                            method.company_id().clone(),
                            method.item_id().clone(),
                            method.job_id().cloned(),
                            method.quote_id().cloned(),
                            method.quote_line_id().cloned(),
                            method.parent_material_id().cloned(),
                            *quantity_per_parent,
                            method.version(),
                            method.audit_info().clone(),
                        );
                        *method = rewritten;
                    }
                    stats.updates += 1;
                }
                WriteOp::UpdateMaterialEstimatedQuantity {
                    material_id,
                    estimated_quantity,
                } => {
                    let tables = inner.tables_mut(domain);
                    if let Some(material) =
                        tables.materials.iter_mut().find(|m| m.id() == material_id)
                    {
                        material.set_estimated_quantity(*estimated_quantity);
                    }
                    stats.updates += 1;
                }
                WriteOp::UpdateOperationQuantity {
                    operation_id,
                    operation_quantity,
                } => {
                    let tables = inner.tables_mut(domain);
                    if let Some(operation) = tables
                        .operations
                        .iter_mut()
                        .find(|o| o.id() == operation_id)
                    {
                        operation.set_operation_quantity(*operation_quantity);
                    }
                    stats.updates += 1;
                }
                WriteOp::UpdateTrackedEntityQuantity {
                    tracked_entity_id,
                    quantity,
                } => {
                    if let Some(entity) = inner
                        .tracked_entities
                        .iter_mut()
                        .find(|e| e.id() == tracked_entity_id)
                    {
                        entity.set_quantity(*quantity);
                    }
                    stats.updates += 1;
                }
                WriteOp::UpdateOperationInstruction {
                    operation_id,
                    procedure_id,
                    work_instruction,
                } => {
                    let tables = inner.tables_mut(domain);
                    if let Some(operation) = tables
                        .operations
                        .iter_mut()
                        .find(|o| o.id() == operation_id)
                    {
                        operation.set_procedure(procedure_id.clone());
                        operation.set_work_instruction(work_instruction.clone());
                    }
                    stats.updates += 1;
                }
                WriteOp::UpdateAttribute {
                    attribute_id,
                    min_value,
                    max_value,
                    description,
                } => {
                    let tables = inner.tables_mut(domain);
                    for operation in tables.operations.iter_mut() {
                        if !operation.attributes().iter().any(|a| a.id() == *attribute_id) {
                            continue;
                        }
                        let next = operation
                            .attributes()
                            .iter()
                            .map(|attribute| {
                                if attribute.id() == *attribute_id {
                                    OperationAttribute::from_parts(
                                        attribute.id(),
                                        attribute.name().to_string(),
                                        attribute.attribute_type().to_string(),
                                        *min_value,
                                        *max_value,
                                        description.clone(),
                                    )
                                } else {
                                    attribute.clone()
                                }
                            })
                            .collect();
                        operation.replace_attributes(next);
                    }
                    stats.updates += 1;
                }
                WriteOp::DeleteAttribute { attribute_id } => {
                    let tables = inner.tables_mut(domain);
                    for operation in tables.operations.iter_mut() {
                        if !operation.attributes().iter().any(|a| a.id() == *attribute_id) {
                            continue;
                        }
                        let next = operation
                            .attributes()
                            .iter()
                            .filter(|attribute| attribute.id() != *attribute_id)
                            .cloned()
                            .collect();
                        operation.replace_attributes(next);
                    }
                    stats.updates += 1;
                }
                WriteOp::InsertAttribute {
                    operation_id,
                    attribute,
                } => {
                    let tables = inner.tables_mut(domain);
                    if let Some(operation) = tables
                        .operations
                        .iter_mut()
                        .find(|o| o.id() == operation_id)
                    {
                        let mut next = operation.attributes().to_vec();
                        next.push(attribute.clone());
                        operation.replace_attributes(next);
                    }
                    stats.attributes += 1;
                }
                WriteOp::DeleteParameters { operation_id } => {
                    let tables = inner.tables_mut(domain);
                    if let Some(operation) = tables
                        .operations
                        .iter_mut()
                        .find(|o| o.id() == operation_id)
                    {
                        operation.replace_parameters(Vec::new());
                    }
                    stats.updates += 1;
                }
                WriteOp::InsertParameter {
                    operation_id,
                    parameter,
                } => {
                    let tables = inner.tables_mut(domain);
                    if let Some(operation) = tables
                        .operations
                        .iter_mut()
                        .find(|o| o.id() == operation_id)
                    {
                        let mut next = operation.parameters().to_vec();
                        next.push(parameter.clone());
                        operation.replace_parameters(next);
                    }
                    stats.parameters += 1;
                }
                WriteOp::InsertQuote(quote) => {
                    inner.quotes.push(quote.clone());
                    stats.sales_rows += 1;
                }
                WriteOp::InsertQuoteLine(line) => {
                    inner.quote_lines.push(line.clone());
                    stats.sales_rows += 1;
                }
                WriteOp::InsertQuotePayment(payment) => {
                    inner.quote_payments.push(payment.clone());
                    stats.sales_rows += 1;
                }
                WriteOp::InsertQuoteShipment(shipment) => {
                    inner.quote_shipments.push(shipment.clone());
                    stats.sales_rows += 1;
                }
                WriteOp::InsertQuoteLinePrice(price) => {
                    inner.quote_line_prices.push(price.clone());
                    stats.sales_rows += 1;
                }
            }
        }
        Ok(stats)
    }
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn find_by_id(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Item>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .items
            .iter()
            .find(|item| item.id() == item_id && item.company_id() == company_id)
            .cloned())
    }

    async fn find_many(
        &self,
        item_ids: &[ItemId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<Item>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .items
            .iter()
            .filter(|item| item_ids.contains(item.id()) && item.company_id() == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn find_by_id(&self, job_id: &JobId, company_id: &CompanyId) -> AppResult<Option<Job>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .jobs
            .iter()
            .find(|job| job.id() == job_id && job.company_id() == company_id)
            .cloned())
    }

    async fn tracked_entities_for_methods(
        &self,
        method_ids: &[MakeMethodId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<TrackedEntity>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tracked_entities
            .iter()
            .filter(|entity| {
                entity.company_id() == company_id
                    && entity
                        .job_make_method_id()
                        .is_some_and(|id| method_ids.contains(id))
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QuoteRepository for MemoryStore {
    async fn find_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Quote>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .quotes
            .iter()
            .find(|quote| quote.id() == quote_id && quote.company_id() == company_id)
            .cloned())
    }

    async fn find_line(
        &self,
        quote_id: &QuoteId,
        quote_line_id: &QuoteLineId,
        company_id: &CompanyId,
    ) -> AppResult<Option<QuoteLine>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .quote_lines
            .iter()
            .find(|line| {
                line.quote_id() == quote_id
                    && line.id() == quote_line_id
                    && line.company_id() == company_id
            })
            .cloned())
    }

    async fn lines_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteLine>> {
        let inner = self.inner.lock().unwrap();
        let mut lines: Vec<QuoteLine> = inner
            .quote_lines
            .iter()
            .filter(|line| line.quote_id() == quote_id && line.company_id() == company_id)
            .cloned()
            .collect();
        lines.sort_by(|a, b| a.order().total_cmp(&b.order()));
        Ok(lines)
    }

    async fn payments_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuotePayment>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .quote_payments
            .iter()
            .filter(|payment| {
                payment.quote_id() == quote_id && payment.company_id() == company_id
            })
            .cloned()
            .collect())
    }

    async fn shipments_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteShipment>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .quote_shipments
            .iter()
            .filter(|shipment| {
                shipment.quote_id() == quote_id && shipment.company_id() == company_id
            })
            .cloned()
            .collect())
    }

    async fn prices_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteLinePrice>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .quote_line_prices
            .iter()
            .filter(|price| price.quote_id() == quote_id && price.company_id() == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProcedureRepository for MemoryStore {
    async fn find_by_id(
        &self,
        procedure_id: &ProcedureId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Procedure>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .procedures
            .iter()
            .find(|procedure| {
                procedure.id() == procedure_id && procedure.company_id() == company_id
            })
            .cloned())
    }

    async fn find_many(
        &self,
        procedure_ids: &[ProcedureId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<Procedure>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .procedures
            .iter()
            .filter(|procedure| {
                procedure_ids.contains(procedure.id()) && procedure.company_id() == company_id
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ResourceRepository for MemoryStore {
    async fn work_centers(&self, company_id: &CompanyId) -> AppResult<Vec<WorkCenter>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .work_centers
            .iter()
            .filter(|work_center| work_center.company_id() == company_id)
            .cloned()
            .collect())
    }

    async fn supplier_processes(&self, company_id: &CompanyId) -> AppResult<Vec<SupplierProcess>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .supplier_processes
            .iter()
            .filter(|supplier_process| supplier_process.company_id() == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ConfigurationRuleRepository for MemoryStore {
    async fn rules_for_item(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<ConfigurationRule>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rules
            .iter()
            .filter(|rule| {
                rule.item_id() == item_id && rule.company_id() == company_id && rule.active()
            })
            .cloned()
            .collect())
    }
}
