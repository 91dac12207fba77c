//! Clause nodes shared by the query kinds.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ColumnNode, OperationNode, TableNode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionNode {
    pub selection: OperationNode,
}

impl SelectionNode {
    pub fn create(selection: impl Into<OperationNode>) -> Self {
        Self {
            selection: selection.into(),
        }
    }
}

/// `FROM a, b AS x, (SELECT ..) AS sub`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromNode {
    pub froms: Vec<OperationNode>,
}

impl FromNode {
    pub fn create(froms: Vec<OperationNode>) -> Self {
        Self { froms }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Lateral,
}

impl JoinType {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            JoinType::Inner => "inner join",
            JoinType::Left => "left join",
            JoinType::Right => "right join",
            JoinType::Full => "full join",
            JoinType::Cross => "cross join",
            JoinType::Lateral => "left join lateral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinNode {
    pub join_type: JoinType,
    pub table: OperationNode,
    #[serde(default)]
    pub on: Option<Arc<OnNode>>,
}

impl JoinNode {
    pub fn create(join_type: JoinType, table: impl Into<OperationNode>) -> Self {
        Self {
            join_type,
            table: table.into(),
            on: None,
        }
    }

    pub fn create_with_on(
        join_type: JoinType,
        table: impl Into<OperationNode>,
        on: impl Into<OperationNode>,
    ) -> Self {
        Self {
            join_type,
            table: table.into(),
            on: Some(Arc::new(OnNode { on: on.into() })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnNode {
    pub on: OperationNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereNode {
    pub filter: OperationNode,
}

impl WhereNode {
    pub fn create(filter: impl Into<OperationNode>) -> Self {
        Self {
            filter: filter.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupByNode {
    pub items: Vec<OperationNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HavingNode {
    pub having: OperationNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByNode {
    pub items: Vec<Arc<OrderByItemNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByItemNode {
    pub order_by: OperationNode,
    #[serde(default)]
    pub direction: Option<OrderDirection>,
}

impl OrderByItemNode {
    pub fn create(order_by: impl Into<OperationNode>, direction: Option<OrderDirection>) -> Self {
        Self {
            order_by: order_by.into(),
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitNode {
    pub limit: OperationNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetNode {
    pub offset: OperationNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturningNode {
    pub selections: Vec<Arc<SelectionNode>>,
}

/// `column = value` inside UPDATE ... SET.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnUpdateNode {
    pub column: Arc<ColumnNode>,
    pub value: OperationNode,
}

impl ColumnUpdateNode {
    pub fn create(column: impl Into<String>, value: impl Into<OperationNode>) -> Self {
        Self {
            column: Arc::new(ColumnNode::create(column)),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

/// `UNION [ALL] <expression>` appended to a select query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperationNode {
    pub operator: SetOperator,
    pub expression: OperationNode,
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithNode {
    #[serde(default)]
    pub recursive: bool,
    pub expressions: Vec<Arc<CommonTableExpressionNode>>,
}

impl WithNode {
    pub fn create(expressions: Vec<CommonTableExpressionNode>) -> Self {
        Self {
            recursive: false,
            expressions: expressions.into_iter().map(Arc::new).collect(),
        }
    }
}

/// `name [(col, ...)] AS (expression)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonTableExpressionNode {
    pub name: Arc<CommonTableExpressionNameNode>,
    pub expression: OperationNode,
}

impl CommonTableExpressionNode {
    pub fn create(name: impl Into<String>, expression: impl Into<OperationNode>) -> Self {
        Self {
            name: Arc::new(CommonTableExpressionNameNode {
                table: Arc::new(TableNode::create(name)),
                columns: vec![],
            }),
            expression: expression.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonTableExpressionNameNode {
    pub table: Arc<TableNode>,
    #[serde(default)]
    pub columns: Vec<Arc<ColumnNode>>,
}

impl CommonTableExpressionNameNode {
    pub fn name(&self) -> &str {
        self.table.table.name()
    }
}

