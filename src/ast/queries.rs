//! DML root nodes: SELECT, INSERT, UPDATE, DELETE.
//!
//! Each node is assembled by value with the consuming `with_*` methods and
//! frozen once it is wrapped into an [`OperationNode`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectQueryNode {
    #[serde(default)]
    pub with: Option<Arc<WithNode>>,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub selections: Vec<Arc<SelectionNode>>,
    #[serde(default)]
    pub from: Option<Arc<FromNode>>,
    #[serde(default)]
    pub joins: Vec<Arc<JoinNode>>,
    #[serde(default)]
    pub filter: Option<Arc<WhereNode>>,
    #[serde(default)]
    pub group_by: Option<Arc<GroupByNode>>,
    #[serde(default)]
    pub having: Option<Arc<HavingNode>>,
    #[serde(default)]
    pub order_by: Option<Arc<OrderByNode>>,
    #[serde(default)]
    pub limit: Option<Arc<LimitNode>>,
    #[serde(default)]
    pub offset: Option<Arc<OffsetNode>>,
    #[serde(default)]
    pub set_operations: Vec<Arc<SetOperationNode>>,
}

impl SelectQueryNode {
    pub fn create(froms: Vec<OperationNode>) -> Self {
        Self {
            from: Some(Arc::new(FromNode::create(froms))),
            ..Default::default()
        }
    }

    pub fn with_selections(mut self, selections: Vec<OperationNode>) -> Self {
        self.selections
            .extend(selections.into_iter().map(|s| Arc::new(SelectionNode::create(s))));
        self
    }

    pub fn with_join(mut self, join: JoinNode) -> Self {
        self.joins.push(Arc::new(join));
        self
    }

    pub fn with_where(mut self, filter: impl Into<OperationNode>) -> Self {
        self.filter = Some(Arc::new(combine_filter(self.filter.take(), filter.into())));
        self
    }

    pub fn with_cte(mut self, with: WithNode) -> Self {
        self.with = Some(Arc::new(with));
        self
    }

    pub fn with_group_by(mut self, items: Vec<OperationNode>) -> Self {
        self.group_by = Some(Arc::new(GroupByNode { items }));
        self
    }

    pub fn with_having(mut self, having: impl Into<OperationNode>) -> Self {
        self.having = Some(Arc::new(HavingNode {
            having: having.into(),
        }));
        self
    }

    pub fn with_order_by(mut self, item: OrderByItemNode) -> Self {
        let mut items = self.order_by.take().map(|o| o.items.clone()).unwrap_or_default();
        items.push(Arc::new(item));
        self.order_by = Some(Arc::new(OrderByNode { items }));
        self
    }

    pub fn with_limit(mut self, limit: impl Into<OperationNode>) -> Self {
        self.limit = Some(Arc::new(LimitNode {
            limit: limit.into(),
        }));
        self
    }

    pub fn with_offset(mut self, offset: impl Into<OperationNode>) -> Self {
        self.offset = Some(Arc::new(OffsetNode {
            offset: offset.into(),
        }));
        self
    }

    pub fn with_set_operation(
        mut self,
        operator: SetOperator,
        expression: impl Into<OperationNode>,
        all: bool,
    ) -> Self {
        self.set_operations.push(Arc::new(SetOperationNode {
            operator,
            expression: expression.into(),
            all,
        }));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

/// Successive filters are combined with AND.
fn combine_filter(existing: Option<Arc<WhereNode>>, filter: OperationNode) -> WhereNode {
    match existing {
        Some(existing) => WhereNode::create(AndNode::create(existing.filter.clone(), filter)),
        None => WhereNode::create(filter),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertQueryNode {
    #[serde(default)]
    pub with: Option<Arc<WithNode>>,
    pub into: Arc<TableNode>,
    #[serde(default)]
    pub columns: Vec<Arc<ColumnNode>>,
    /// A `Values` node or a select query.
    #[serde(default)]
    pub values: Option<OperationNode>,
    #[serde(default)]
    pub returning: Option<Arc<ReturningNode>>,
}

impl InsertQueryNode {
    pub fn create(into: TableNode) -> Self {
        Self {
            with: None,
            into: Arc::new(into),
            columns: vec![],
            values: None,
            returning: None,
        }
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| Arc::new(ColumnNode::create(*c))).collect();
        self
    }

    pub fn with_values(mut self, values: impl Into<OperationNode>) -> Self {
        self.values = Some(values.into());
        self
    }

    pub fn with_returning(mut self, selections: Vec<OperationNode>) -> Self {
        self.returning = Some(Arc::new(returning(selections)));
        self
    }

    pub fn with_cte(mut self, with: WithNode) -> Self {
        self.with = Some(Arc::new(with));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateQueryNode {
    #[serde(default)]
    pub with: Option<Arc<WithNode>>,
    /// A `Table` node, optionally wrapped in an `Alias`.
    pub table: OperationNode,
    #[serde(default)]
    pub updates: Vec<Arc<ColumnUpdateNode>>,
    #[serde(default)]
    pub from: Option<Arc<FromNode>>,
    #[serde(default)]
    pub joins: Vec<Arc<JoinNode>>,
    #[serde(default)]
    pub filter: Option<Arc<WhereNode>>,
    #[serde(default)]
    pub returning: Option<Arc<ReturningNode>>,
}

impl UpdateQueryNode {
    pub fn create(table: impl Into<OperationNode>) -> Self {
        Self {
            with: None,
            table: table.into(),
            updates: vec![],
            from: None,
            joins: vec![],
            filter: None,
            returning: None,
        }
    }

    pub fn with_update(mut self, update: ColumnUpdateNode) -> Self {
        self.updates.push(Arc::new(update));
        self
    }

    pub fn with_from(mut self, froms: Vec<OperationNode>) -> Self {
        self.from = Some(Arc::new(FromNode::create(froms)));
        self
    }

    pub fn with_join(mut self, join: JoinNode) -> Self {
        self.joins.push(Arc::new(join));
        self
    }

    pub fn with_where(mut self, filter: impl Into<OperationNode>) -> Self {
        self.filter = Some(Arc::new(combine_filter(self.filter.take(), filter.into())));
        self
    }

    pub fn with_returning(mut self, selections: Vec<OperationNode>) -> Self {
        self.returning = Some(Arc::new(returning(selections)));
        self
    }

    pub fn with_cte(mut self, with: WithNode) -> Self {
        self.with = Some(Arc::new(with));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteQueryNode {
    #[serde(default)]
    pub with: Option<Arc<WithNode>>,
    pub from: Arc<FromNode>,
    #[serde(default)]
    pub using: Option<Arc<FromNode>>,
    #[serde(default)]
    pub joins: Vec<Arc<JoinNode>>,
    #[serde(default)]
    pub filter: Option<Arc<WhereNode>>,
    #[serde(default)]
    pub returning: Option<Arc<ReturningNode>>,
}

impl DeleteQueryNode {
    pub fn create(froms: Vec<OperationNode>) -> Self {
        Self {
            with: None,
            from: Arc::new(FromNode::create(froms)),
            using: None,
            joins: vec![],
            filter: None,
            returning: None,
        }
    }

    pub fn with_using(mut self, tables: Vec<OperationNode>) -> Self {
        self.using = Some(Arc::new(FromNode::create(tables)));
        self
    }

    pub fn with_join(mut self, join: JoinNode) -> Self {
        self.joins.push(Arc::new(join));
        self
    }

    pub fn with_where(mut self, filter: impl Into<OperationNode>) -> Self {
        self.filter = Some(Arc::new(combine_filter(self.filter.take(), filter.into())));
        self
    }

    pub fn with_returning(mut self, selections: Vec<OperationNode>) -> Self {
        self.returning = Some(Arc::new(returning(selections)));
        self
    }

    pub fn with_cte(mut self, with: WithNode) -> Self {
        self.with = Some(Arc::new(with));
        self
    }
}

fn returning(selections: Vec<OperationNode>) -> ReturningNode {
    ReturningNode {
        selections: selections
            .into_iter()
            .map(|s| Arc::new(SelectionNode::create(s)))
            .collect(),
    }
}
