//! 制造方法聚合
//!
//! 三个域（物品主数据 / 作业 / 报价）共用同一组实体，
//! 归属差异由 [`MethodOwner`] 表达，仓储按域落到不同表。

use common::types::{AuditInfo, CompanyId, UserId};
use domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::enums::{
    ItemType, MethodType, OperationKind, OperationOrder, TimeUnit, TrackingKind,
};
use crate::domain::value_objects::{
    ItemId, JobId, MakeMethodId, MaterialId, OperationId, ProcedureId, ProcessId, QuoteId,
    QuoteLineId, SupplierProcessId, ToolId, WorkCenterId,
};

/// 方法节点的归属
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodOwner {
    /// 物品主数据方法
    Item,
    /// 作业方法
    Job(JobId),
    /// 报价行方法
    QuoteLine(QuoteId, QuoteLineId),
}

/// 制造方法节点
///
/// BOM 树的一个节点。`parent_material_id` 为空表示根节点；
/// 子节点通过其父物料行反向挂接。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeMethod {
    /// 方法 ID
    id: MakeMethodId,
    /// 公司 ID
    company_id: CompanyId,
    /// 所属物品 ID
    item_id: ItemId,
    /// 所属作业 ID（作业域）
    job_id: Option<JobId>,
    /// 所属报价单 ID（报价域）
    quote_id: Option<QuoteId>,
    /// 所属报价行 ID（报价域）
    quote_line_id: Option<QuoteLineId>,
    /// 父物料行 ID，空为根
    parent_material_id: Option<MaterialId>,
    /// 相对父物料的单位用量
    quantity_per_parent: f64,
    /// 版本号
    version: i32,
    /// 审计信息
    audit_info: AuditInfo,
}

impl MakeMethod {
    /// 创建新方法节点
    pub fn new(
        id: MakeMethodId,
        company_id: CompanyId,
        item_id: ItemId,
        owner: MethodOwner,
        parent_material_id: Option<MaterialId>,
        quantity_per_parent: f64,
        user_id: Option<UserId>,
    ) -> Self {
        let (job_id, quote_id, quote_line_id) = match owner {
            MethodOwner::Item => (None, None, None),
            MethodOwner::Job(job_id) => (Some(job_id), None, None),
            MethodOwner::QuoteLine(quote_id, quote_line_id) => {
                (None, Some(quote_id), Some(quote_line_id))
            }
        };
        Self {
            id,
            company_id,
            item_id,
            job_id,
            quote_id,
            quote_line_id,
            parent_material_id,
            quantity_per_parent,
            version: 1,
            audit_info: AuditInfo::new(user_id),
        }
    }

    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: MakeMethodId,
        company_id: CompanyId,
        item_id: ItemId,
        job_id: Option<JobId>,
        quote_id: Option<QuoteId>,
        quote_line_id: Option<QuoteLineId>,
        parent_material_id: Option<MaterialId>,
        quantity_per_parent: f64,
        version: i32,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            item_id,
            job_id,
            quote_id,
            quote_line_id,
            parent_material_id,
            quantity_per_parent,
            version,
            audit_info,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &MakeMethodId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    pub fn quote_id(&self) -> Option<&QuoteId> {
        self.quote_id.as_ref()
    }

    pub fn quote_line_id(&self) -> Option<&QuoteLineId> {
        self.quote_line_id.as_ref()
    }

    pub fn parent_material_id(&self) -> Option<&MaterialId> {
        self.parent_material_id.as_ref()
    }

    pub fn quantity_per_parent(&self) -> f64 {
        self.quantity_per_parent
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn is_root(&self) -> bool {
        self.parent_material_id.is_none()
    }

    pub fn owner(&self) -> MethodOwner {
        match (&self.job_id, &self.quote_id, &self.quote_line_id) {
            (Some(job_id), _, _) => MethodOwner::Job(job_id.clone()),
            (_, Some(quote_id), Some(quote_line_id)) => {
                MethodOwner::QuoteLine(quote_id.clone(), quote_line_id.clone())
            }
            _ => MethodOwner::Item,
        }
    }
}

impl Entity for MakeMethod {
    type Id = MakeMethodId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for MakeMethod {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// 物料行
///
/// 方法节点下的一条 BOM 行。`Make` 型物料在树上有一个
/// 以本行为父的子方法节点。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodMaterial {
    /// 物料行 ID
    id: MaterialId,
    /// 公司 ID
    company_id: CompanyId,
    /// 所属方法 ID
    make_method_id: MakeMethodId,
    /// 物品 ID
    item_id: ItemId,
    /// 物品类型
    item_type: ItemType,
    /// 供应方式
    method_type: MethodType,
    /// 单位用量（相对父方法一件）
    quantity: f64,
    /// 绝对需求量（作业域，由级联重算写入）
    estimated_quantity: Option<f64>,
    /// 计量单位
    unit_of_measure_code: String,
    /// 单位成本
    unit_cost: f64,
    /// 描述
    description: String,
    /// 行序
    order: f64,
    /// 追溯方式
    tracking: TrackingKind,
    /// 审计信息
    audit_info: AuditInfo,
}

impl MethodMaterial {
    /// 创建新物料行
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: MaterialId,
        company_id: CompanyId,
        make_method_id: MakeMethodId,
        item_id: ItemId,
        item_type: ItemType,
        method_type: MethodType,
        quantity: f64,
        unit_of_measure_code: impl Into<String>,
        unit_cost: f64,
        description: impl Into<String>,
        order: f64,
        tracking: TrackingKind,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            id,
            company_id,
            make_method_id,
            item_id,
            item_type,
            method_type,
            quantity,
            estimated_quantity: None,
            unit_of_measure_code: unit_of_measure_code.into(),
            unit_cost,
            description: description.into(),
            order,
            tracking,
            audit_info: AuditInfo::new(user_id),
        }
    }

    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: MaterialId,
        company_id: CompanyId,
        make_method_id: MakeMethodId,
        item_id: ItemId,
        item_type: ItemType,
        method_type: MethodType,
        quantity: f64,
        estimated_quantity: Option<f64>,
        unit_of_measure_code: String,
        unit_cost: f64,
        description: String,
        order: f64,
        tracking: TrackingKind,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            make_method_id,
            item_id,
            item_type,
            method_type,
            quantity,
            estimated_quantity,
            unit_of_measure_code,
            unit_cost,
            description,
            order,
            tracking,
            audit_info,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &MaterialId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn make_method_id(&self) -> &MakeMethodId {
        &self.make_method_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn method_type(&self) -> MethodType {
        self.method_type
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn estimated_quantity(&self) -> Option<f64> {
        self.estimated_quantity
    }

    pub fn unit_of_measure_code(&self) -> &str {
        &self.unit_of_measure_code
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn order(&self) -> f64 {
        self.order
    }

    pub fn tracking(&self) -> TrackingKind {
        self.tracking
    }

    // ========== Mutators ==========

    pub fn set_order(&mut self, order: f64) {
        self.order = order;
    }

    pub fn set_estimated_quantity(&mut self, quantity: f64) {
        self.estimated_quantity = Some(quantity);
    }
}

impl Entity for MethodMaterial {
    type Id = MaterialId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for MethodMaterial {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// 工序下挂的工装行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationTool {
    id: Uuid,
    tool_id: ToolId,
    quantity: f64,
}

impl OperationTool {
    pub fn new(tool_id: ToolId, quantity: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            tool_id,
            quantity,
        }
    }

    pub fn from_parts(id: Uuid, tool_id: ToolId, quantity: f64) -> Self {
        Self {
            id,
            tool_id,
            quantity,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tool_id(&self) -> &ToolId {
        &self.tool_id
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }
}

/// 工序参数（键值对）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationParameter {
    id: Uuid,
    key: String,
    value: String,
}

impl OperationParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn from_parts(id: Uuid, key: String, value: String) -> Self {
        Self { id, key, value }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// 工序属性
///
/// 同步作业指导书时按 `(name, attribute_type)` 作为匹配键做差分。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationAttribute {
    id: Uuid,
    name: String,
    attribute_type: String,
    min_value: Option<f64>,
    max_value: Option<f64>,
    description: Option<String>,
}

impl OperationAttribute {
    pub fn new(
        name: impl Into<String>,
        attribute_type: impl Into<String>,
        min_value: Option<f64>,
        max_value: Option<f64>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            attribute_type: attribute_type.into(),
            min_value,
            max_value,
            description,
        }
    }

    pub fn from_parts(
        id: Uuid,
        name: String,
        attribute_type: String,
        min_value: Option<f64>,
        max_value: Option<f64>,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            attribute_type,
            min_value,
            max_value,
            description,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_type(&self) -> &str {
        &self.attribute_type
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// 差分匹配键
    pub fn match_key(&self) -> (&str, &str) {
        (&self.name, &self.attribute_type)
    }
}

/// 工序
///
/// 挂在方法节点下的一道加工步骤。`procedure_id` 非空时，
/// 参数与属性由作业指导书同步流程提供，克隆时不直接复制。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodOperation {
    /// 工序 ID
    id: OperationId,
    /// 公司 ID
    company_id: CompanyId,
    /// 所属方法 ID
    make_method_id: MakeMethodId,
    /// 工艺过程 ID
    process_id: ProcessId,
    /// 作业指导书 ID
    procedure_id: Option<ProcedureId>,
    /// 工作中心 ID
    work_center_id: Option<WorkCenterId>,
    /// 描述
    description: String,
    /// 准备工时
    setup_time: f64,
    /// 准备工时单位
    setup_unit: TimeUnit,
    /// 人工工时
    labor_time: f64,
    /// 人工工时单位
    labor_unit: TimeUnit,
    /// 机器工时
    machine_time: f64,
    /// 机器工时单位
    machine_unit: TimeUnit,
    /// 人工费率
    labor_rate: f64,
    /// 机器费率
    machine_rate: f64,
    /// 制造费用率
    overhead_rate: f64,
    /// 工序类别（厂内/外协）
    kind: OperationKind,
    /// 工序衔接方式
    operation_order: OperationOrder,
    /// 行序
    order: f64,
    /// 工序加工数量（作业域，由级联重算写入）
    operation_quantity: Option<f64>,
    /// 外协最低费用
    operation_minimum_cost: f64,
    /// 外协交付周期
    operation_lead_time: f64,
    /// 外协工艺 ID
    supplier_process_id: Option<SupplierProcessId>,
    /// 作业指导内容
    work_instruction: Option<serde_json::Value>,
    /// 工装
    tools: Vec<OperationTool>,
    /// 参数
    parameters: Vec<OperationParameter>,
    /// 属性
    attributes: Vec<OperationAttribute>,
    /// 审计信息
    audit_info: AuditInfo,
}

impl MethodOperation {
    /// 创建新工序
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OperationId,
        company_id: CompanyId,
        make_method_id: MakeMethodId,
        process_id: ProcessId,
        description: impl Into<String>,
        kind: OperationKind,
        order: f64,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            id,
            company_id,
            make_method_id,
            process_id,
            procedure_id: None,
            work_center_id: None,
            description: description.into(),
            setup_time: 0.0,
            setup_unit: TimeUnit::default(),
            labor_time: 0.0,
            labor_unit: TimeUnit::default(),
            machine_time: 0.0,
            machine_unit: TimeUnit::default(),
            labor_rate: 0.0,
            machine_rate: 0.0,
            overhead_rate: 0.0,
            kind,
            operation_order: OperationOrder::default(),
            order,
            operation_quantity: None,
            operation_minimum_cost: 0.0,
            operation_lead_time: 0.0,
            supplier_process_id: None,
            work_instruction: None,
            tools: Vec::new(),
            parameters: Vec::new(),
            attributes: Vec::new(),
            audit_info: AuditInfo::new(user_id),
        }
    }

    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: OperationId,
        company_id: CompanyId,
        make_method_id: MakeMethodId,
        process_id: ProcessId,
        procedure_id: Option<ProcedureId>,
        work_center_id: Option<WorkCenterId>,
        description: String,
        setup_time: f64,
        setup_unit: TimeUnit,
        labor_time: f64,
        labor_unit: TimeUnit,
        machine_time: f64,
        machine_unit: TimeUnit,
        labor_rate: f64,
        machine_rate: f64,
        overhead_rate: f64,
        kind: OperationKind,
        operation_order: OperationOrder,
        order: f64,
        operation_quantity: Option<f64>,
        operation_minimum_cost: f64,
        operation_lead_time: f64,
        supplier_process_id: Option<SupplierProcessId>,
        work_instruction: Option<serde_json::Value>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            make_method_id,
            process_id,
            procedure_id,
            work_center_id,
            description,
            setup_time,
            setup_unit,
            labor_time,
            labor_unit,
            machine_time,
            machine_unit,
            labor_rate,
            machine_rate,
            overhead_rate,
            kind,
            operation_order,
            order,
            operation_quantity,
            operation_minimum_cost,
            operation_lead_time,
            supplier_process_id,
            work_instruction,
            tools: Vec::new(),
            parameters: Vec::new(),
            attributes: Vec::new(),
            audit_info,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &OperationId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn make_method_id(&self) -> &MakeMethodId {
        &self.make_method_id
    }

    pub fn process_id(&self) -> &ProcessId {
        &self.process_id
    }

    pub fn procedure_id(&self) -> Option<&ProcedureId> {
        self.procedure_id.as_ref()
    }

    pub fn work_center_id(&self) -> Option<&WorkCenterId> {
        self.work_center_id.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn setup_time(&self) -> f64 {
        self.setup_time
    }

    pub fn setup_unit(&self) -> TimeUnit {
        self.setup_unit
    }

    pub fn labor_time(&self) -> f64 {
        self.labor_time
    }

    pub fn labor_unit(&self) -> TimeUnit {
        self.labor_unit
    }

    pub fn machine_time(&self) -> f64 {
        self.machine_time
    }

    pub fn machine_unit(&self) -> TimeUnit {
        self.machine_unit
    }

    pub fn labor_rate(&self) -> f64 {
        self.labor_rate
    }

    pub fn machine_rate(&self) -> f64 {
        self.machine_rate
    }

    pub fn overhead_rate(&self) -> f64 {
        self.overhead_rate
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn operation_order(&self) -> OperationOrder {
        self.operation_order
    }

    pub fn order(&self) -> f64 {
        self.order
    }

    pub fn operation_quantity(&self) -> Option<f64> {
        self.operation_quantity
    }

    pub fn operation_minimum_cost(&self) -> f64 {
        self.operation_minimum_cost
    }

    pub fn operation_lead_time(&self) -> f64 {
        self.operation_lead_time
    }

    pub fn supplier_process_id(&self) -> Option<&SupplierProcessId> {
        self.supplier_process_id.as_ref()
    }

    pub fn work_instruction(&self) -> Option<&serde_json::Value> {
        self.work_instruction.as_ref()
    }

    pub fn tools(&self) -> &[OperationTool] {
        &self.tools
    }

    pub fn parameters(&self) -> &[OperationParameter] {
        &self.parameters
    }

    pub fn attributes(&self) -> &[OperationAttribute] {
        &self.attributes
    }

    pub fn has_procedure(&self) -> bool {
        self.procedure_id.is_some()
    }

    // ========== Mutators ==========

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_work_center(&mut self, work_center_id: Option<WorkCenterId>) {
        self.work_center_id = work_center_id;
    }

    pub fn set_timing(
        &mut self,
        setup_time: f64,
        setup_unit: TimeUnit,
        labor_time: f64,
        labor_unit: TimeUnit,
        machine_time: f64,
        machine_unit: TimeUnit,
    ) {
        self.setup_time = setup_time;
        self.setup_unit = setup_unit;
        self.labor_time = labor_time;
        self.labor_unit = labor_unit;
        self.machine_time = machine_time;
        self.machine_unit = machine_unit;
    }

    pub fn set_rates(&mut self, labor_rate: f64, machine_rate: f64, overhead_rate: f64) {
        self.labor_rate = labor_rate;
        self.machine_rate = machine_rate;
        self.overhead_rate = overhead_rate;
    }

    pub fn set_outside_process(
        &mut self,
        supplier_process_id: Option<SupplierProcessId>,
        minimum_cost: f64,
        lead_time: f64,
    ) {
        self.supplier_process_id = supplier_process_id;
        self.operation_minimum_cost = minimum_cost;
        self.operation_lead_time = lead_time;
    }

    pub fn set_operation_order(&mut self, operation_order: OperationOrder) {
        self.operation_order = operation_order;
    }

    pub fn set_order(&mut self, order: f64) {
        self.order = order;
    }

    pub fn set_operation_quantity(&mut self, quantity: f64) {
        self.operation_quantity = Some(quantity);
    }

    pub fn set_procedure(&mut self, procedure_id: ProcedureId) {
        self.procedure_id = Some(procedure_id);
    }

    pub fn set_work_instruction(&mut self, work_instruction: Option<serde_json::Value>) {
        self.work_instruction = work_instruction;
    }

    pub fn replace_tools(&mut self, tools: Vec<OperationTool>) {
        self.tools = tools;
    }

    pub fn replace_parameters(&mut self, parameters: Vec<OperationParameter>) {
        self.parameters = parameters;
    }

    pub fn replace_attributes(&mut self, attributes: Vec<OperationAttribute>) {
        self.attributes = attributes;
    }
}

impl Entity for MethodOperation {
    type Id = OperationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for MethodOperation {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
