//! 方法写计划
//!
//! 规划阶段产出的有序变更脚本。执行器在单个事务里按序
//! 回放：先对目标根加咨询锁，再清理旧子树，然后逐条写入。
//! 父行总是先于子行出现在脚本里，顺序是硬性依赖。

use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{
    MakeMethod, MethodMaterial, MethodOperation, OperationAttribute, OperationParameter, Quote,
    QuoteLine, QuoteLinePrice, QuotePayment, QuoteShipment,
};
use crate::domain::enums::MethodDomain;
use crate::domain::value_objects::{
    MakeMethodId, MaterialId, OperationId, ProcedureId, TrackedEntityId,
};

/// 单条写操作
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// 插入方法节点
    InsertMethod(MakeMethod),
    /// 插入物料行
    InsertMaterial(MethodMaterial),
    /// 插入工序（连同工装/参数/属性子行）
    InsertOperation(MethodOperation),
    /// 回写方法的单位用量
    UpdateMethodQuantity {
        method_id: MakeMethodId,
        quantity_per_parent: f64,
    },
    /// 回写物料行的绝对需求量
    UpdateMaterialEstimatedQuantity {
        material_id: MaterialId,
        estimated_quantity: f64,
    },
    /// 回写工序的加工数量
    UpdateOperationQuantity {
        operation_id: OperationId,
        operation_quantity: f64,
    },
    /// 回写追溯单元数量
    UpdateTrackedEntityQuantity {
        tracked_entity_id: TrackedEntityId,
        quantity: f64,
    },
    /// 覆盖工序的指导内容并挂接指导书
    UpdateOperationInstruction {
        operation_id: OperationId,
        procedure_id: ProcedureId,
        work_instruction: Option<Value>,
    },
    /// 按差分结果更新已有属性
    UpdateAttribute {
        attribute_id: Uuid,
        min_value: Option<f64>,
        max_value: Option<f64>,
        description: Option<String>,
    },
    /// 删除差分未命中的属性
    DeleteAttribute { attribute_id: Uuid },
    /// 插入模板新增的属性
    InsertAttribute {
        operation_id: OperationId,
        attribute: OperationAttribute,
    },
    /// 清空工序参数（整体替换的前半步）
    DeleteParameters { operation_id: OperationId },
    /// 插入模板参数
    InsertParameter {
        operation_id: OperationId,
        parameter: OperationParameter,
    },
    /// 插入报价单头（整单复制）
    InsertQuote(Quote),
    /// 插入报价行
    InsertQuoteLine(QuoteLine),
    /// 插入付款条款
    InsertQuotePayment(QuotePayment),
    /// 插入发运条款
    InsertQuoteShipment(QuoteShipment),
    /// 插入阶梯价格
    InsertQuoteLinePrice(QuoteLinePrice),
}

/// 方法写计划
///
/// `wipe_under` 指定时，执行器先删除该根之下的整棵旧子树
/// （后代方法节点加全部物料与工序行，根方法行本身保留），
/// 随后才回放写操作。这是先删后建一致性模型的删除半步。
#[derive(Debug, Clone)]
pub struct MethodWritePlan {
    domain: MethodDomain,
    lock_id: Uuid,
    wipe_under: Option<MakeMethodId>,
    ops: Vec<WriteOp>,
}

impl MethodWritePlan {
    pub fn new(domain: MethodDomain, lock_id: Uuid) -> Self {
        Self {
            domain,
            lock_id,
            wipe_under: None,
            ops: Vec::new(),
        }
    }

    pub fn set_wipe_under(&mut self, root_method_id: MakeMethodId) {
        self.wipe_under = Some(root_method_id);
    }

    pub fn push(&mut self, op: WriteOp) {
        self.ops.push(op);
    }

    // ========== Getters ==========

    pub fn domain(&self) -> MethodDomain {
        self.domain
    }

    /// 咨询锁键的来源 ID（目标根锚点，跨请求稳定）
    pub fn lock_id(&self) -> Uuid {
        self.lock_id
    }

    pub fn wipe_under(&self) -> Option<&MakeMethodId> {
        self.wipe_under.as_ref()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// 执行统计，按表计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub methods: u64,
    pub materials: u64,
    pub operations: u64,
    pub tools: u64,
    pub parameters: u64,
    pub attributes: u64,
    pub sales_rows: u64,
    pub updates: u64,
    pub deleted_methods: u64,
}

impl WriteStats {
    pub fn total_inserted(&self) -> u64 {
        self.methods
            + self.materials
            + self.operations
            + self.tools
            + self.parameters
            + self.attributes
            + self.sales_rows
    }
}
