//! DDL root nodes and their column-level building blocks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeNode {
    pub data_type: String,
}

impl DataTypeNode {
    pub fn create(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnModifyAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl OnModifyAction {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            OnModifyAction::NoAction => "no action",
            OnModifyAction::Restrict => "restrict",
            OnModifyAction::Cascade => "cascade",
            OnModifyAction::SetNull => "set null",
            OnModifyAction::SetDefault => "set default",
        }
    }
}

/// Foreign key target: `REFERENCES table (col, ...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencesNode {
    pub table: Arc<TableNode>,
    #[serde(default)]
    pub columns: Vec<Arc<ColumnNode>>,
    #[serde(default)]
    pub on_delete: Option<OnModifyAction>,
}

impl ReferencesNode {
    pub fn create(table: TableNode, columns: &[&str]) -> Self {
        Self {
            table: Arc::new(table),
            columns: columns.iter().map(|c| Arc::new(ColumnNode::create(*c))).collect(),
            on_delete: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinitionNode {
    pub column: Arc<ColumnNode>,
    pub data_type: Arc<DataTypeNode>,
    #[serde(default)]
    pub references: Option<Arc<ReferencesNode>>,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub default_to: Option<OperationNode>,
}

impl ColumnDefinitionNode {
    pub fn create(column: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column: Arc::new(ColumnNode::create(column)),
            data_type: Arc::new(DataTypeNode::create(data_type)),
            references: None,
            primary_key: false,
            not_null: false,
            unique: false,
            default_to: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn references(mut self, references: ReferencesNode) -> Self {
        self.references = Some(Arc::new(references));
        self
    }

    pub fn default_to(mut self, value: impl Into<OperationNode>) -> Self {
        self.default_to = Some(value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddColumnNode {
    pub column: Arc<ColumnDefinitionNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropColumnNode {
    pub column: Arc<ColumnNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameColumnNode {
    pub column: Arc<ColumnNode>,
    pub rename_to: Arc<ColumnNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterTableNode {
    pub table: Arc<TableNode>,
    #[serde(default)]
    pub rename_to: Option<Arc<TableNode>>,
    #[serde(default)]
    pub set_schema: Option<Arc<IdentifierNode>>,
    /// `AddColumn`, `DropColumn` and `RenameColumn` nodes.
    #[serde(default)]
    pub column_alterations: Vec<OperationNode>,
}

impl AlterTableNode {
    pub fn create(table: TableNode) -> Self {
        Self {
            table: Arc::new(table),
            rename_to: None,
            set_schema: None,
            column_alterations: vec![],
        }
    }

    pub fn with_rename_to(mut self, table: TableNode) -> Self {
        self.rename_to = Some(Arc::new(table));
        self
    }

    pub fn with_set_schema(mut self, schema: impl Into<String>) -> Self {
        self.set_schema = Some(Arc::new(IdentifierNode::create(schema)));
        self
    }

    pub fn with_add_column(mut self, column: ColumnDefinitionNode) -> Self {
        self.column_alterations.push(
            AddColumnNode {
                column: Arc::new(column),
            }
            .into(),
        );
        self
    }

    pub fn with_drop_column(mut self, column: impl Into<String>) -> Self {
        self.column_alterations.push(
            DropColumnNode {
                column: Arc::new(ColumnNode::create(column)),
            }
            .into(),
        );
        self
    }

    pub fn with_rename_column(mut self, column: impl Into<String>, rename_to: impl Into<String>) -> Self {
        self.column_alterations.push(
            RenameColumnNode {
                column: Arc::new(ColumnNode::create(column)),
                rename_to: Arc::new(ColumnNode::create(rename_to)),
            }
            .into(),
        );
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableNode {
    pub table: Arc<TableNode>,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    #[serde(default)]
    pub columns: Vec<Arc<ColumnDefinitionNode>>,
}

impl CreateTableNode {
    pub fn create(table: TableNode) -> Self {
        Self {
            table: Arc::new(table),
            temporary: false,
            if_not_exists: false,
            columns: vec![],
        }
    }

    pub fn with_column(mut self, column: ColumnDefinitionNode) -> Self {
        self.columns.push(Arc::new(column));
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateViewNode {
    pub name: Arc<SchemableIdentifierNode>,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub materialized: bool,
    #[serde(default)]
    pub or_replace: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    #[serde(default)]
    pub columns: Vec<Arc<ColumnNode>>,
    /// The view body, normally a select query.
    #[serde(default)]
    pub as_query: Option<OperationNode>,
}

impl CreateViewNode {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: Arc::new(SchemableIdentifierNode::create(name)),
            temporary: false,
            materialized: false,
            or_replace: false,
            if_not_exists: false,
            columns: vec![],
            as_query: None,
        }
    }

    pub fn with_as(mut self, query: impl Into<OperationNode>) -> Self {
        self.as_query = Some(query.into());
        self
    }

    pub fn or_replace(mut self) -> Self {
        self.or_replace = true;
        self
    }

    pub fn materialized(mut self) -> Self {
        self.materialized = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexNode {
    pub name: Arc<IdentifierNode>,
    #[serde(default)]
    pub table: Option<Arc<TableNode>>,
    /// Indexed columns or expressions.
    #[serde(default)]
    pub columns: Vec<OperationNode>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    #[serde(default)]
    pub using: Option<String>,
    #[serde(default)]
    pub filter: Option<Arc<WhereNode>>,
}

impl CreateIndexNode {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: Arc::new(IdentifierNode::create(name)),
            table: None,
            columns: vec![],
            unique: false,
            if_not_exists: false,
            using: None,
            filter: None,
        }
    }

    pub fn on(mut self, table: TableNode, columns: &[&str]) -> Self {
        self.table = Some(Arc::new(table));
        self.columns = columns.iter().map(|c| ColumnNode::create(*c).into()).collect();
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_where(mut self, filter: impl Into<OperationNode>) -> Self {
        self.filter = Some(Arc::new(WhereNode::create(filter)));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSchemaNode {
    pub schema: Arc<IdentifierNode>,
    #[serde(default)]
    pub if_not_exists: bool,
}

impl CreateSchemaNode {
    pub fn create(schema: impl Into<String>) -> Self {
        Self {
            schema: Arc::new(IdentifierNode::create(schema)),
            if_not_exists: false,
        }
    }
}

/// `CREATE TYPE name AS ENUM (...)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTypeNode {
    pub name: Arc<SchemableIdentifierNode>,
    #[serde(default)]
    pub enum_values: Option<Arc<ValueListNode>>,
}

impl CreateTypeNode {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: Arc::new(SchemableIdentifierNode::create(name)),
            enum_values: None,
        }
    }

    pub fn as_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = Some(Arc::new(ValueListNode::create(
            values.iter().map(|v| ValueNode::create(*v).into()).collect(),
        )));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTableNode {
    pub table: Arc<TableNode>,
    #[serde(default)]
    pub if_exists: bool,
    #[serde(default)]
    pub cascade: bool,
}

impl DropTableNode {
    pub fn create(table: TableNode) -> Self {
        Self {
            table: Arc::new(table),
            if_exists: false,
            cascade: false,
        }
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropViewNode {
    pub name: Arc<SchemableIdentifierNode>,
    #[serde(default)]
    pub materialized: bool,
    #[serde(default)]
    pub if_exists: bool,
    #[serde(default)]
    pub cascade: bool,
}

impl DropViewNode {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: Arc::new(SchemableIdentifierNode::create(name)),
            materialized: false,
            if_exists: false,
            cascade: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropIndexNode {
    pub name: Arc<SchemableIdentifierNode>,
    #[serde(default)]
    pub table: Option<Arc<TableNode>>,
    #[serde(default)]
    pub if_exists: bool,
    #[serde(default)]
    pub cascade: bool,
}

impl DropIndexNode {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: Arc::new(SchemableIdentifierNode::create(name)),
            table: None,
            if_exists: false,
            cascade: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropSchemaNode {
    pub schema: Arc<IdentifierNode>,
    #[serde(default)]
    pub if_exists: bool,
    #[serde(default)]
    pub cascade: bool,
}

impl DropSchemaNode {
    pub fn create(schema: impl Into<String>) -> Self {
        Self {
            schema: Arc::new(IdentifierNode::create(schema)),
            if_exists: false,
            cascade: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTypeNode {
    pub name: Arc<SchemableIdentifierNode>,
    #[serde(default)]
    pub if_exists: bool,
}

impl DropTypeNode {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: Arc::new(SchemableIdentifierNode::create(name)),
            if_exists: false,
        }
    }
}
