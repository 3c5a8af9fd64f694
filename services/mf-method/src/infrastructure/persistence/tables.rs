//! 方法族表名参数化
//!
//! 三个域的方法树表形状一致、表名不同。仓储按域取一份
//! [`MethodTables`]，由它生成带正确表名和列差异的 SQL：
//! 归属列（job_id / quote_id + quote_line_id）与作业域
//! 独有的数量列（estimated_quantity / operation_quantity）
//! 在查询侧统一用 `NULL` 投影补齐，行映射因此只需一套结构。

use crate::domain::enums::MethodDomain;

/// 一个方法域的全部表名与列差异
#[derive(Debug)]
pub struct MethodTables {
    pub methods: &'static str,
    pub materials: &'static str,
    pub operations: &'static str,
    pub tools: &'static str,
    pub parameters: &'static str,
    pub attributes: &'static str,
    /// 方法表带 job_id 归属列
    pub has_job_owner: bool,
    /// 方法表带 quote_id + quote_line_id 归属列
    pub has_quote_owner: bool,
    /// 物料带 estimated_quantity、工序带 operation_quantity
    pub has_estimates: bool,
}

const ITEM_TABLES: MethodTables = MethodTables {
    methods: "make_methods",
    materials: "method_materials",
    operations: "method_operations",
    tools: "method_operation_tools",
    parameters: "method_operation_parameters",
    attributes: "method_operation_attributes",
    has_job_owner: false,
    has_quote_owner: false,
    has_estimates: false,
};

const JOB_TABLES: MethodTables = MethodTables {
    methods: "job_make_methods",
    materials: "job_materials",
    operations: "job_operations",
    tools: "job_operation_tools",
    parameters: "job_operation_parameters",
    attributes: "job_operation_attributes",
    has_job_owner: true,
    has_quote_owner: false,
    has_estimates: true,
};

const QUOTE_TABLES: MethodTables = MethodTables {
    methods: "quote_make_methods",
    materials: "quote_materials",
    operations: "quote_operations",
    tools: "quote_operation_tools",
    parameters: "quote_operation_parameters",
    attributes: "quote_operation_attributes",
    has_job_owner: false,
    has_quote_owner: true,
    has_estimates: false,
};

impl MethodTables {
    pub fn for_domain(domain: MethodDomain) -> &'static MethodTables {
        match domain {
            MethodDomain::Item => &ITEM_TABLES,
            MethodDomain::Job => &JOB_TABLES,
            MethodDomain::Quote => &QUOTE_TABLES,
        }
    }

    /// 归属列投影，缺失的列用 `NULL::uuid` 补齐对齐行结构
    fn owner_projection(&self, alias: &str) -> String {
        let prefix = if alias.is_empty() {
            String::new()
        } else {
            format!("{}.", alias)
        };
        let job = if self.has_job_owner {
            format!("{}job_id", prefix)
        } else {
            "NULL::uuid AS job_id".to_string()
        };
        let quote = if self.has_quote_owner {
            format!("{p}quote_id, {p}quote_line_id", p = prefix)
        } else {
            "NULL::uuid AS quote_id, NULL::uuid AS quote_line_id".to_string()
        };
        format!("{}, {}", job, quote)
    }

    fn estimated_quantity_projection(&self) -> &'static str {
        if self.has_estimates {
            "estimated_quantity"
        } else {
            "NULL::double precision AS estimated_quantity"
        }
    }

    fn operation_quantity_projection(&self) -> &'static str {
        if self.has_estimates {
            "operation_quantity"
        } else {
            "NULL::double precision AS operation_quantity"
        }
    }

    // ========== 查询 ==========

    /// 方法节点查询前缀（无 WHERE），列结构与行映射一一对应
    pub fn method_select(&self) -> String {
        format!(
            "SELECT id, company_id, item_id, {owner}, parent_material_id, \
             quantity_per_parent, version, \
             created_at, created_by, updated_at, updated_by \
             FROM {methods}",
            owner = self.owner_projection(""),
            methods = self.methods,
        )
    }

    /// 整棵子树的递归查询
    ///
    /// 递归项沿「父物料行 -> 所属方法」反向连接：子方法的
    /// parent_material_id 指向某条物料行，该物料行的
    /// make_method_id 即父方法。输出每行附带反查出的父方法 ID，
    /// 根行为 NULL。绑定：$1 根方法 ID，$2 公司 ID。
    pub fn tree_sql(&self) -> String {
        format!(
            "WITH RECURSIVE method_tree AS ( \
                 SELECT m.id, m.company_id, m.item_id, {root_owner}, \
                        m.parent_material_id, m.quantity_per_parent, m.version, \
                        m.created_at, m.created_by, m.updated_at, m.updated_by, \
                        NULL::uuid AS parent_method_id \
                 FROM {methods} m \
                 WHERE m.id = $1 AND m.company_id = $2 \
                 UNION ALL \
                 SELECT c.id, c.company_id, c.item_id, {child_owner}, \
                        c.parent_material_id, c.quantity_per_parent, c.version, \
                        c.created_at, c.created_by, c.updated_at, c.updated_by, \
                        link.make_method_id AS parent_method_id \
                 FROM {methods} c \
                 JOIN {materials} link ON c.parent_material_id = link.id \
                 JOIN method_tree parent ON link.make_method_id = parent.id \
             ) \
             SELECT id, company_id, item_id, job_id, quote_id, quote_line_id, \
                    parent_material_id, quantity_per_parent, version, \
                    created_at, created_by, updated_at, updated_by, parent_method_id \
             FROM method_tree",
            root_owner = self.owner_projection("m"),
            child_owner = self.owner_projection("c"),
            methods = self.methods,
            materials = self.materials,
        )
    }

    /// 子树方法数统计（清理前取删除统计）。绑定：$1 根方法 ID。
    pub fn subtree_count_sql(&self) -> String {
        format!(
            "WITH RECURSIVE subtree AS ( \
                 SELECT id FROM {methods} WHERE id = $1 \
                 UNION ALL \
                 SELECT c.id FROM {methods} c \
                 JOIN {materials} link ON c.parent_material_id = link.id \
                 JOIN subtree parent ON link.make_method_id = parent.id \
             ) \
             SELECT count(*) FROM subtree",
            methods = self.methods,
            materials = self.materials,
        )
    }

    /// 一组方法节点下的物料行。绑定：$1 方法 ID 数组，$2 公司 ID。
    pub fn materials_sql(&self) -> String {
        format!(
            "SELECT id, company_id, make_method_id, item_id, item_type, method_type, \
             quantity, {estimated}, unit_of_measure_code, unit_cost, description, \
             sort_order, tracking, \
             created_at, created_by, updated_at, updated_by \
             FROM {materials} \
             WHERE make_method_id = ANY($1) AND company_id = $2 \
             ORDER BY make_method_id, sort_order",
            estimated = self.estimated_quantity_projection(),
            materials = self.materials,
        )
    }

    fn operation_columns(&self) -> String {
        format!(
            "id, company_id, make_method_id, process_id, procedure_id, work_center_id, \
             description, setup_time, setup_unit, labor_time, labor_unit, \
             machine_time, machine_unit, labor_rate, machine_rate, overhead_rate, \
             operation_type, operation_order, sort_order, {opqty}, \
             operation_minimum_cost, operation_lead_time, supplier_process_id, \
             work_instruction, \
             created_at, created_by, updated_at, updated_by",
            opqty = self.operation_quantity_projection(),
        )
    }

    /// 一组方法节点下的工序。绑定：$1 方法 ID 数组，$2 公司 ID。
    pub fn operations_sql(&self) -> String {
        format!(
            "SELECT {columns} FROM {operations} \
             WHERE make_method_id = ANY($1) AND company_id = $2 \
             ORDER BY make_method_id, sort_order",
            columns = self.operation_columns(),
            operations = self.operations,
        )
    }

    /// 单条工序。绑定：$1 工序 ID，$2 公司 ID。
    pub fn operation_by_id_sql(&self) -> String {
        format!(
            "SELECT {columns} FROM {operations} WHERE id = $1 AND company_id = $2",
            columns = self.operation_columns(),
            operations = self.operations,
        )
    }

    /// 一组工序的工装子行。绑定：$1 工序 ID 数组。
    pub fn tools_sql(&self) -> String {
        format!(
            "SELECT id, operation_id, tool_id, quantity FROM {tools} \
             WHERE operation_id = ANY($1) ORDER BY id",
            tools = self.tools,
        )
    }

    /// 一组工序的参数子行。绑定：$1 工序 ID 数组。
    pub fn parameters_sql(&self) -> String {
        format!(
            "SELECT id, operation_id, key, value FROM {parameters} \
             WHERE operation_id = ANY($1) ORDER BY id",
            parameters = self.parameters,
        )
    }

    /// 一组工序的属性子行。绑定：$1 工序 ID 数组。
    pub fn attributes_sql(&self) -> String {
        format!(
            "SELECT id, operation_id, name, attribute_type, min_value, max_value, \
             description FROM {attributes} \
             WHERE operation_id = ANY($1) ORDER BY id",
            attributes = self.attributes,
        )
    }

    // ========== 写入 ==========

    /// 插入方法节点，列序与 [`super::postgres`] 的绑定顺序一致
    pub fn insert_method_sql(&self) -> String {
        let mut columns = vec!["id", "company_id", "item_id"];
        if self.has_job_owner {
            columns.push("job_id");
        }
        if self.has_quote_owner {
            columns.push("quote_id");
            columns.push("quote_line_id");
        }
        columns.extend([
            "parent_material_id",
            "quantity_per_parent",
            "version",
            "created_at",
            "created_by",
            "updated_at",
            "updated_by",
        ]);
        build_insert(self.methods, &columns)
    }

    pub fn insert_material_sql(&self) -> String {
        let mut columns = vec![
            "id",
            "company_id",
            "make_method_id",
            "item_id",
            "item_type",
            "method_type",
            "quantity",
        ];
        if self.has_estimates {
            columns.push("estimated_quantity");
        }
        columns.extend([
            "unit_of_measure_code",
            "unit_cost",
            "description",
            "sort_order",
            "tracking",
            "created_at",
            "created_by",
            "updated_at",
            "updated_by",
        ]);
        build_insert(self.materials, &columns)
    }

    pub fn insert_operation_sql(&self) -> String {
        let mut columns = vec![
            "id",
            "company_id",
            "make_method_id",
            "process_id",
            "procedure_id",
            "work_center_id",
            "description",
            "setup_time",
            "setup_unit",
            "labor_time",
            "labor_unit",
            "machine_time",
            "machine_unit",
            "labor_rate",
            "machine_rate",
            "overhead_rate",
            "operation_type",
            "operation_order",
            "sort_order",
        ];
        if self.has_estimates {
            columns.push("operation_quantity");
        }
        columns.extend([
            "operation_minimum_cost",
            "operation_lead_time",
            "supplier_process_id",
            "work_instruction",
            "created_at",
            "created_by",
            "updated_at",
            "updated_by",
        ]);
        build_insert(self.operations, &columns)
    }

    pub fn insert_tool_sql(&self) -> String {
        build_insert(
            self.tools,
            &[
                "id",
                "company_id",
                "operation_id",
                "tool_id",
                "quantity",
                "created_at",
                "created_by",
                "updated_at",
                "updated_by",
            ],
        )
    }

    pub fn insert_parameter_sql(&self) -> String {
        build_insert(
            self.parameters,
            &[
                "id",
                "company_id",
                "operation_id",
                "key",
                "value",
                "created_at",
                "created_by",
                "updated_at",
                "updated_by",
            ],
        )
    }

    pub fn insert_attribute_sql(&self) -> String {
        build_insert(
            self.attributes,
            &[
                "id",
                "company_id",
                "operation_id",
                "name",
                "attribute_type",
                "min_value",
                "max_value",
                "description",
                "created_at",
                "created_by",
                "updated_at",
                "updated_by",
            ],
        )
    }

    /// 指导书同步插入参数：公司 ID 从所属工序行继承
    ///
    /// 绑定：$1 工序 ID，$2 参数 ID，$3 key，$4 value。
    pub fn insert_parameter_from_operation_sql(&self) -> String {
        format!(
            "INSERT INTO {parameters} \
             (id, company_id, operation_id, key, value, created_at, updated_at) \
             SELECT $2, o.company_id, o.id, $3, $4, now(), now() \
             FROM {operations} o WHERE o.id = $1",
            parameters = self.parameters,
            operations = self.operations,
        )
    }

    /// 指导书同步插入属性，公司 ID 同样从工序行继承
    ///
    /// 绑定：$1 工序 ID，$2 属性 ID，$3 name，$4 attribute_type，
    /// $5 min，$6 max，$7 description。
    pub fn insert_attribute_from_operation_sql(&self) -> String {
        format!(
            "INSERT INTO {attributes} \
             (id, company_id, operation_id, name, attribute_type, \
              min_value, max_value, description, created_at, updated_at) \
             SELECT $2, o.company_id, o.id, $3, $4, $5, $6, $7, now(), now() \
             FROM {operations} o WHERE o.id = $1",
            attributes = self.attributes,
            operations = self.operations,
        )
    }

    // ========== 清理与回写 ==========

    /// 删除根节点的物料行，外键级联一并清掉整棵后代子树
    pub fn wipe_materials_sql(&self) -> String {
        format!(
            "DELETE FROM {materials} WHERE make_method_id = $1",
            materials = self.materials,
        )
    }

    /// 删除根节点自身的工序行（子行随级联删除）
    pub fn wipe_operations_sql(&self) -> String {
        format!(
            "DELETE FROM {operations} WHERE make_method_id = $1",
            operations = self.operations,
        )
    }

    pub fn update_method_quantity_sql(&self) -> String {
        format!(
            "UPDATE {methods} SET quantity_per_parent = $2, updated_at = now() WHERE id = $1",
            methods = self.methods,
        )
    }

    pub fn update_material_estimate_sql(&self) -> String {
        format!(
            "UPDATE {materials} SET estimated_quantity = $2, updated_at = now() WHERE id = $1",
            materials = self.materials,
        )
    }

    pub fn update_operation_quantity_sql(&self) -> String {
        format!(
            "UPDATE {operations} SET operation_quantity = $2, updated_at = now() WHERE id = $1",
            operations = self.operations,
        )
    }

    pub fn update_operation_instruction_sql(&self) -> String {
        format!(
            "UPDATE {operations} SET procedure_id = $2, work_instruction = $3, \
             updated_at = now() WHERE id = $1",
            operations = self.operations,
        )
    }

    pub fn update_attribute_sql(&self) -> String {
        format!(
            "UPDATE {attributes} SET min_value = $2, max_value = $3, description = $4, \
             updated_at = now() WHERE id = $1",
            attributes = self.attributes,
        )
    }

    pub fn delete_attribute_sql(&self) -> String {
        format!(
            "DELETE FROM {attributes} WHERE id = $1",
            attributes = self.attributes,
        )
    }

    pub fn delete_parameters_sql(&self) -> String {
        format!(
            "DELETE FROM {parameters} WHERE operation_id = $1",
            parameters = self.parameters,
        )
    }
}

fn build_insert(table: &str, columns: &[&str]) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}
