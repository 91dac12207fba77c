//! Default structural recursion for every node kind.
//!
//! Every `walk_*` function transforms each child through the transformer,
//! then returns the input `Arc` untouched if every child came back
//! reference-identical. Only otherwise is a new node allocated.

use std::sync::Arc;

use crate::ast::*;

use super::traits::OperationNodeTransformer;

trait SameNode {
    fn same(&self, other: &Self) -> bool;
}

impl<N> SameNode for Arc<N> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl SameNode for OperationNode {
    fn same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// Tracks whether any child of the node being walked changed.
#[derive(Default)]
struct Rebuild {
    changed: bool,
}

impl Rebuild {
    fn one<N: SameNode>(&mut self, old: &N, new: N) -> N {
        if !old.same(&new) {
            self.changed = true;
        }
        new
    }

    fn opt<N: SameNode>(&mut self, old: &Option<N>, f: impl FnOnce(&N) -> N) -> Option<N> {
        old.as_ref().map(|n| {
            let new = f(n);
            self.one(n, new)
        })
    }

    fn list<N: SameNode>(&mut self, old: &[N], mut f: impl FnMut(&N) -> N) -> Vec<N> {
        old.iter()
            .map(|n| {
                let new = f(n);
                self.one(n, new)
            })
            .collect()
    }

    /// The original node if nothing changed, else the rebuilt one.
    fn finish<N>(self, node: &Arc<N>, rebuild: impl FnOnce() -> N) -> Arc<N> {
        if self.changed {
            Arc::new(rebuild())
        } else {
            Arc::clone(node)
        }
    }
}

/// Dispatch on the node's kind to the matching `transform_*` method.
pub fn walk_node<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &OperationNode) -> OperationNode {
    match node {
        OperationNode::Identifier(n) => OperationNode::Identifier(t.transform_identifier(n)),
        OperationNode::SchemableIdentifier(n) => OperationNode::SchemableIdentifier(t.transform_schemable_identifier(n)),
        OperationNode::Table(n) => OperationNode::Table(t.transform_table(n)),
        OperationNode::Column(n) => OperationNode::Column(t.transform_column(n)),
        OperationNode::Reference(n) => OperationNode::Reference(t.transform_reference(n)),
        OperationNode::SelectAll(n) => OperationNode::SelectAll(t.transform_select_all(n)),
        OperationNode::Alias(n) => OperationNode::Alias(t.transform_alias(n)),
        OperationNode::Raw(n) => OperationNode::Raw(t.transform_raw(n)),
        OperationNode::Value(n) => OperationNode::Value(t.transform_value(n)),
        OperationNode::ValueList(n) => OperationNode::ValueList(t.transform_value_list(n)),
        OperationNode::Values(n) => OperationNode::Values(t.transform_values(n)),
        OperationNode::Operator(n) => OperationNode::Operator(t.transform_operator(n)),
        OperationNode::BinaryOperation(n) => OperationNode::BinaryOperation(t.transform_binary_operation(n)),
        OperationNode::UnaryOperation(n) => OperationNode::UnaryOperation(t.transform_unary_operation(n)),
        OperationNode::And(n) => OperationNode::And(t.transform_and(n)),
        OperationNode::Or(n) => OperationNode::Or(t.transform_or(n)),
        OperationNode::Parens(n) => OperationNode::Parens(t.transform_parens(n)),
        OperationNode::Function(n) => OperationNode::Function(t.transform_function(n)),
        OperationNode::Selection(n) => OperationNode::Selection(t.transform_selection(n)),
        OperationNode::From(n) => OperationNode::From(t.transform_from(n)),
        OperationNode::Join(n) => OperationNode::Join(t.transform_join(n)),
        OperationNode::On(n) => OperationNode::On(t.transform_on(n)),
        OperationNode::Where(n) => OperationNode::Where(t.transform_where(n)),
        OperationNode::GroupBy(n) => OperationNode::GroupBy(t.transform_group_by(n)),
        OperationNode::Having(n) => OperationNode::Having(t.transform_having(n)),
        OperationNode::OrderBy(n) => OperationNode::OrderBy(t.transform_order_by(n)),
        OperationNode::OrderByItem(n) => OperationNode::OrderByItem(t.transform_order_by_item(n)),
        OperationNode::Limit(n) => OperationNode::Limit(t.transform_limit(n)),
        OperationNode::Offset(n) => OperationNode::Offset(t.transform_offset(n)),
        OperationNode::Returning(n) => OperationNode::Returning(t.transform_returning(n)),
        OperationNode::ColumnUpdate(n) => OperationNode::ColumnUpdate(t.transform_column_update(n)),
        OperationNode::SetOperation(n) => OperationNode::SetOperation(t.transform_set_operation(n)),
        OperationNode::With(n) => OperationNode::With(t.transform_with(n)),
        OperationNode::CommonTableExpression(n) => OperationNode::CommonTableExpression(t.transform_common_table_expression(n)),
        OperationNode::CommonTableExpressionName(n) => OperationNode::CommonTableExpressionName(t.transform_common_table_expression_name(n)),
        OperationNode::SelectQuery(n) => OperationNode::SelectQuery(t.transform_select_query(n)),
        OperationNode::InsertQuery(n) => OperationNode::InsertQuery(t.transform_insert_query(n)),
        OperationNode::UpdateQuery(n) => OperationNode::UpdateQuery(t.transform_update_query(n)),
        OperationNode::DeleteQuery(n) => OperationNode::DeleteQuery(t.transform_delete_query(n)),
        OperationNode::DataType(n) => OperationNode::DataType(t.transform_data_type(n)),
        OperationNode::ColumnDefinition(n) => OperationNode::ColumnDefinition(t.transform_column_definition(n)),
        OperationNode::References(n) => OperationNode::References(t.transform_references(n)),
        OperationNode::AddColumn(n) => OperationNode::AddColumn(t.transform_add_column(n)),
        OperationNode::DropColumn(n) => OperationNode::DropColumn(t.transform_drop_column(n)),
        OperationNode::RenameColumn(n) => OperationNode::RenameColumn(t.transform_rename_column(n)),
        OperationNode::AlterTable(n) => OperationNode::AlterTable(t.transform_alter_table(n)),
        OperationNode::CreateTable(n) => OperationNode::CreateTable(t.transform_create_table(n)),
        OperationNode::CreateView(n) => OperationNode::CreateView(t.transform_create_view(n)),
        OperationNode::CreateIndex(n) => OperationNode::CreateIndex(t.transform_create_index(n)),
        OperationNode::CreateSchema(n) => OperationNode::CreateSchema(t.transform_create_schema(n)),
        OperationNode::CreateType(n) => OperationNode::CreateType(t.transform_create_type(n)),
        OperationNode::DropTable(n) => OperationNode::DropTable(t.transform_drop_table(n)),
        OperationNode::DropView(n) => OperationNode::DropView(t.transform_drop_view(n)),
        OperationNode::DropIndex(n) => OperationNode::DropIndex(t.transform_drop_index(n)),
        OperationNode::DropSchema(n) => OperationNode::DropSchema(t.transform_drop_schema(n)),
        OperationNode::DropType(n) => OperationNode::DropType(t.transform_drop_type(n)),
    }
}

// Leaves

pub fn walk_identifier<T: OperationNodeTransformer + ?Sized>(_t: &mut T, node: &Arc<IdentifierNode>) -> Arc<IdentifierNode> {
    Arc::clone(node)
}

pub fn walk_select_all<T: OperationNodeTransformer + ?Sized>(_t: &mut T, node: &Arc<SelectAllNode>) -> Arc<SelectAllNode> {
    Arc::clone(node)
}

pub fn walk_value<T: OperationNodeTransformer + ?Sized>(_t: &mut T, node: &Arc<ValueNode>) -> Arc<ValueNode> {
    Arc::clone(node)
}

pub fn walk_operator<T: OperationNodeTransformer + ?Sized>(_t: &mut T, node: &Arc<OperatorNode>) -> Arc<OperatorNode> {
    Arc::clone(node)
}

pub fn walk_data_type<T: OperationNodeTransformer + ?Sized>(_t: &mut T, node: &Arc<DataTypeNode>) -> Arc<DataTypeNode> {
    Arc::clone(node)
}

// Identifiers and references

pub fn walk_schemable_identifier<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<SchemableIdentifierNode>,
) -> Arc<SchemableIdentifierNode> {
    let mut r = Rebuild::default();
    let schema = r.opt(&node.schema, |n| t.transform_identifier(n));
    let identifier = r.one(&node.identifier, t.transform_identifier(&node.identifier));
    r.finish(node, || SchemableIdentifierNode { schema, identifier })
}

pub fn walk_table<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<TableNode>) -> Arc<TableNode> {
    let mut r = Rebuild::default();
    let table = r.one(&node.table, t.transform_schemable_identifier(&node.table));
    r.finish(node, || TableNode { table })
}

pub fn walk_column<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<ColumnNode>) -> Arc<ColumnNode> {
    let mut r = Rebuild::default();
    let column = r.one(&node.column, t.transform_identifier(&node.column));
    r.finish(node, || ColumnNode { column })
}

pub fn walk_reference<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<ReferenceNode>) -> Arc<ReferenceNode> {
    let mut r = Rebuild::default();
    let table = r.opt(&node.table, |n| t.transform_table(n));
    let column = r.one(&node.column, t.transform_node(&node.column));
    r.finish(node, || ReferenceNode { table, column })
}

pub fn walk_alias<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<AliasNode>) -> Arc<AliasNode> {
    let mut r = Rebuild::default();
    let inner = r.one(&node.node, t.transform_node(&node.node));
    let alias = r.one(&node.alias, t.transform_identifier(&node.alias));
    r.finish(node, || AliasNode { node: inner, alias })
}

pub fn walk_raw<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<RawNode>) -> Arc<RawNode> {
    let mut r = Rebuild::default();
    let parameters = r.list(&node.parameters, |n| t.transform_node(n));
    r.finish(node, || RawNode {
        sql_fragments: node.sql_fragments.clone(),
        parameters,
    })
}

// Values

pub fn walk_value_list<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<ValueListNode>) -> Arc<ValueListNode> {
    let mut r = Rebuild::default();
    let values = r.list(&node.values, |n| t.transform_node(n));
    r.finish(node, || ValueListNode { values })
}

pub fn walk_values<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<ValuesNode>) -> Arc<ValuesNode> {
    let mut r = Rebuild::default();
    let values = r.list(&node.values, |n| t.transform_value_list(n));
    r.finish(node, || ValuesNode { values })
}

// Expressions

pub fn walk_binary_operation<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<BinaryOperationNode>,
) -> Arc<BinaryOperationNode> {
    let mut r = Rebuild::default();
    let left_operand = r.one(&node.left_operand, t.transform_node(&node.left_operand));
    let operator = r.one(&node.operator, t.transform_operator(&node.operator));
    let right_operand = r.one(&node.right_operand, t.transform_node(&node.right_operand));
    r.finish(node, || BinaryOperationNode {
        left_operand,
        operator,
        right_operand,
    })
}

pub fn walk_unary_operation<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<UnaryOperationNode>,
) -> Arc<UnaryOperationNode> {
    let mut r = Rebuild::default();
    let operator = r.one(&node.operator, t.transform_operator(&node.operator));
    let operand = r.one(&node.operand, t.transform_node(&node.operand));
    r.finish(node, || UnaryOperationNode { operator, operand })
}

pub fn walk_and<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<AndNode>) -> Arc<AndNode> {
    let mut r = Rebuild::default();
    let left = r.one(&node.left, t.transform_node(&node.left));
    let right = r.one(&node.right, t.transform_node(&node.right));
    r.finish(node, || AndNode { left, right })
}

pub fn walk_or<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<OrNode>) -> Arc<OrNode> {
    let mut r = Rebuild::default();
    let left = r.one(&node.left, t.transform_node(&node.left));
    let right = r.one(&node.right, t.transform_node(&node.right));
    r.finish(node, || OrNode { left, right })
}

pub fn walk_parens<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<ParensNode>) -> Arc<ParensNode> {
    let mut r = Rebuild::default();
    let inner = r.one(&node.node, t.transform_node(&node.node));
    r.finish(node, || ParensNode { node: inner })
}

pub fn walk_function<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<FunctionNode>) -> Arc<FunctionNode> {
    let mut r = Rebuild::default();
    let arguments = r.list(&node.arguments, |n| t.transform_node(n));
    r.finish(node, || FunctionNode {
        func: node.func.clone(),
        arguments,
        distinct: node.distinct,
    })
}

// Clauses

pub fn walk_selection<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<SelectionNode>) -> Arc<SelectionNode> {
    let mut r = Rebuild::default();
    let selection = r.one(&node.selection, t.transform_node(&node.selection));
    r.finish(node, || SelectionNode { selection })
}

pub fn walk_from<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<FromNode>) -> Arc<FromNode> {
    let mut r = Rebuild::default();
    let froms = r.list(&node.froms, |n| t.transform_node(n));
    r.finish(node, || FromNode { froms })
}

pub fn walk_join<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<JoinNode>) -> Arc<JoinNode> {
    let mut r = Rebuild::default();
    let table = r.one(&node.table, t.transform_node(&node.table));
    let on = r.opt(&node.on, |n| t.transform_on(n));
    r.finish(node, || JoinNode {
        join_type: node.join_type,
        table,
        on,
    })
}

pub fn walk_on<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<OnNode>) -> Arc<OnNode> {
    let mut r = Rebuild::default();
    let on = r.one(&node.on, t.transform_node(&node.on));
    r.finish(node, || OnNode { on })
}

pub fn walk_where<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<WhereNode>) -> Arc<WhereNode> {
    let mut r = Rebuild::default();
    let filter = r.one(&node.filter, t.transform_node(&node.filter));
    r.finish(node, || WhereNode { filter })
}

pub fn walk_group_by<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<GroupByNode>) -> Arc<GroupByNode> {
    let mut r = Rebuild::default();
    let items = r.list(&node.items, |n| t.transform_node(n));
    r.finish(node, || GroupByNode { items })
}

pub fn walk_having<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<HavingNode>) -> Arc<HavingNode> {
    let mut r = Rebuild::default();
    let having = r.one(&node.having, t.transform_node(&node.having));
    r.finish(node, || HavingNode { having })
}

pub fn walk_order_by<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<OrderByNode>) -> Arc<OrderByNode> {
    let mut r = Rebuild::default();
    let items = r.list(&node.items, |n| t.transform_order_by_item(n));
    r.finish(node, || OrderByNode { items })
}

pub fn walk_order_by_item<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<OrderByItemNode>,
) -> Arc<OrderByItemNode> {
    let mut r = Rebuild::default();
    let order_by = r.one(&node.order_by, t.transform_node(&node.order_by));
    r.finish(node, || OrderByItemNode {
        order_by,
        direction: node.direction,
    })
}

pub fn walk_limit<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<LimitNode>) -> Arc<LimitNode> {
    let mut r = Rebuild::default();
    let limit = r.one(&node.limit, t.transform_node(&node.limit));
    r.finish(node, || LimitNode { limit })
}

pub fn walk_offset<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<OffsetNode>) -> Arc<OffsetNode> {
    let mut r = Rebuild::default();
    let offset = r.one(&node.offset, t.transform_node(&node.offset));
    r.finish(node, || OffsetNode { offset })
}

pub fn walk_returning<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<ReturningNode>) -> Arc<ReturningNode> {
    let mut r = Rebuild::default();
    let selections = r.list(&node.selections, |n| t.transform_selection(n));
    r.finish(node, || ReturningNode { selections })
}

pub fn walk_column_update<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<ColumnUpdateNode>,
) -> Arc<ColumnUpdateNode> {
    let mut r = Rebuild::default();
    let column = r.one(&node.column, t.transform_column(&node.column));
    let value = r.one(&node.value, t.transform_node(&node.value));
    r.finish(node, || ColumnUpdateNode { column, value })
}

pub fn walk_set_operation<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<SetOperationNode>,
) -> Arc<SetOperationNode> {
    let mut r = Rebuild::default();
    let expression = r.one(&node.expression, t.transform_node(&node.expression));
    r.finish(node, || SetOperationNode {
        operator: node.operator,
        expression,
        all: node.all,
    })
}

pub fn walk_with<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<WithNode>) -> Arc<WithNode> {
    let mut r = Rebuild::default();
    let expressions = r.list(&node.expressions, |n| t.transform_common_table_expression(n));
    r.finish(node, || WithNode {
        recursive: node.recursive,
        expressions,
    })
}

pub fn walk_common_table_expression<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<CommonTableExpressionNode>,
) -> Arc<CommonTableExpressionNode> {
    let mut r = Rebuild::default();
    let name = r.one(&node.name, t.transform_common_table_expression_name(&node.name));
    let expression = r.one(&node.expression, t.transform_node(&node.expression));
    r.finish(node, || CommonTableExpressionNode { name, expression })
}

pub fn walk_common_table_expression_name<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<CommonTableExpressionNameNode>,
) -> Arc<CommonTableExpressionNameNode> {
    let mut r = Rebuild::default();
    let table = r.one(&node.table, t.transform_table(&node.table));
    let columns = r.list(&node.columns, |n| t.transform_column(n));
    r.finish(node, || CommonTableExpressionNameNode { table, columns })
}

// DML

pub fn walk_select_query<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<SelectQueryNode>,
) -> Arc<SelectQueryNode> {
    let mut r = Rebuild::default();
    let with = r.opt(&node.with, |n| t.transform_with(n));
    let selections = r.list(&node.selections, |n| t.transform_selection(n));
    let from = r.opt(&node.from, |n| t.transform_from(n));
    let joins = r.list(&node.joins, |n| t.transform_join(n));
    let filter = r.opt(&node.filter, |n| t.transform_where(n));
    let group_by = r.opt(&node.group_by, |n| t.transform_group_by(n));
    let having = r.opt(&node.having, |n| t.transform_having(n));
    let order_by = r.opt(&node.order_by, |n| t.transform_order_by(n));
    let limit = r.opt(&node.limit, |n| t.transform_limit(n));
    let offset = r.opt(&node.offset, |n| t.transform_offset(n));
    let set_operations = r.list(&node.set_operations, |n| t.transform_set_operation(n));
    r.finish(node, || SelectQueryNode {
        with,
        distinct: node.distinct,
        selections,
        from,
        joins,
        filter,
        group_by,
        having,
        order_by,
        limit,
        offset,
        set_operations,
    })
}

pub fn walk_insert_query<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<InsertQueryNode>,
) -> Arc<InsertQueryNode> {
    let mut r = Rebuild::default();
    let with = r.opt(&node.with, |n| t.transform_with(n));
    let into = r.one(&node.into, t.transform_table(&node.into));
    let columns = r.list(&node.columns, |n| t.transform_column(n));
    let values = r.opt(&node.values, |n| t.transform_node(n));
    let returning = r.opt(&node.returning, |n| t.transform_returning(n));
    r.finish(node, || InsertQueryNode {
        with,
        into,
        columns,
        values,
        returning,
    })
}

pub fn walk_update_query<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<UpdateQueryNode>,
) -> Arc<UpdateQueryNode> {
    let mut r = Rebuild::default();
    let with = r.opt(&node.with, |n| t.transform_with(n));
    let table = r.one(&node.table, t.transform_node(&node.table));
    let updates = r.list(&node.updates, |n| t.transform_column_update(n));
    let from = r.opt(&node.from, |n| t.transform_from(n));
    let joins = r.list(&node.joins, |n| t.transform_join(n));
    let filter = r.opt(&node.filter, |n| t.transform_where(n));
    let returning = r.opt(&node.returning, |n| t.transform_returning(n));
    r.finish(node, || UpdateQueryNode {
        with,
        table,
        updates,
        from,
        joins,
        filter,
        returning,
    })
}

pub fn walk_delete_query<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<DeleteQueryNode>,
) -> Arc<DeleteQueryNode> {
    let mut r = Rebuild::default();
    let with = r.opt(&node.with, |n| t.transform_with(n));
    let from = r.one(&node.from, t.transform_from(&node.from));
    let using = r.opt(&node.using, |n| t.transform_from(n));
    let joins = r.list(&node.joins, |n| t.transform_join(n));
    let filter = r.opt(&node.filter, |n| t.transform_where(n));
    let returning = r.opt(&node.returning, |n| t.transform_returning(n));
    r.finish(node, || DeleteQueryNode {
        with,
        from,
        using,
        joins,
        filter,
        returning,
    })
}

// DDL

pub fn walk_column_definition<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<ColumnDefinitionNode>,
) -> Arc<ColumnDefinitionNode> {
    let mut r = Rebuild::default();
    let column = r.one(&node.column, t.transform_column(&node.column));
    let data_type = r.one(&node.data_type, t.transform_data_type(&node.data_type));
    let references = r.opt(&node.references, |n| t.transform_references(n));
    let default_to = r.opt(&node.default_to, |n| t.transform_node(n));
    r.finish(node, || ColumnDefinitionNode {
        column,
        data_type,
        references,
        primary_key: node.primary_key,
        not_null: node.not_null,
        unique: node.unique,
        default_to,
    })
}

pub fn walk_references<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<ReferencesNode>) -> Arc<ReferencesNode> {
    let mut r = Rebuild::default();
    let table = r.one(&node.table, t.transform_table(&node.table));
    let columns = r.list(&node.columns, |n| t.transform_column(n));
    r.finish(node, || ReferencesNode {
        table,
        columns,
        on_delete: node.on_delete,
    })
}

pub fn walk_add_column<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<AddColumnNode>) -> Arc<AddColumnNode> {
    let mut r = Rebuild::default();
    let column = r.one(&node.column, t.transform_column_definition(&node.column));
    r.finish(node, || AddColumnNode { column })
}

pub fn walk_drop_column<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<DropColumnNode>) -> Arc<DropColumnNode> {
    let mut r = Rebuild::default();
    let column = r.one(&node.column, t.transform_column(&node.column));
    r.finish(node, || DropColumnNode { column })
}

pub fn walk_rename_column<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<RenameColumnNode>,
) -> Arc<RenameColumnNode> {
    let mut r = Rebuild::default();
    let column = r.one(&node.column, t.transform_column(&node.column));
    let rename_to = r.one(&node.rename_to, t.transform_column(&node.rename_to));
    r.finish(node, || RenameColumnNode { column, rename_to })
}

pub fn walk_alter_table<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<AlterTableNode>) -> Arc<AlterTableNode> {
    let mut r = Rebuild::default();
    let table = r.one(&node.table, t.transform_table(&node.table));
    let rename_to = r.opt(&node.rename_to, |n| t.transform_table(n));
    let set_schema = r.opt(&node.set_schema, |n| t.transform_identifier(n));
    let column_alterations = r.list(&node.column_alterations, |n| t.transform_node(n));
    r.finish(node, || AlterTableNode {
        table,
        rename_to,
        set_schema,
        column_alterations,
    })
}

pub fn walk_create_table<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<CreateTableNode>,
) -> Arc<CreateTableNode> {
    let mut r = Rebuild::default();
    let table = r.one(&node.table, t.transform_table(&node.table));
    let columns = r.list(&node.columns, |n| t.transform_column_definition(n));
    r.finish(node, || CreateTableNode {
        table,
        temporary: node.temporary,
        if_not_exists: node.if_not_exists,
        columns,
    })
}

pub fn walk_create_view<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<CreateViewNode>) -> Arc<CreateViewNode> {
    let mut r = Rebuild::default();
    let name = r.one(&node.name, t.transform_schemable_identifier(&node.name));
    let columns = r.list(&node.columns, |n| t.transform_column(n));
    let as_query = r.opt(&node.as_query, |n| t.transform_node(n));
    r.finish(node, || CreateViewNode {
        name,
        temporary: node.temporary,
        materialized: node.materialized,
        or_replace: node.or_replace,
        if_not_exists: node.if_not_exists,
        columns,
        as_query,
    })
}

pub fn walk_create_index<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<CreateIndexNode>,
) -> Arc<CreateIndexNode> {
    let mut r = Rebuild::default();
    let name = r.one(&node.name, t.transform_identifier(&node.name));
    let table = r.opt(&node.table, |n| t.transform_table(n));
    let columns = r.list(&node.columns, |n| t.transform_node(n));
    let filter = r.opt(&node.filter, |n| t.transform_where(n));
    r.finish(node, || CreateIndexNode {
        name,
        table,
        columns,
        unique: node.unique,
        if_not_exists: node.if_not_exists,
        using: node.using.clone(),
        filter,
    })
}

pub fn walk_create_schema<T: OperationNodeTransformer + ?Sized>(
    t: &mut T,
    node: &Arc<CreateSchemaNode>,
) -> Arc<CreateSchemaNode> {
    let mut r = Rebuild::default();
    let schema = r.one(&node.schema, t.transform_identifier(&node.schema));
    r.finish(node, || CreateSchemaNode {
        schema,
        if_not_exists: node.if_not_exists,
    })
}

pub fn walk_create_type<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<CreateTypeNode>) -> Arc<CreateTypeNode> {
    let mut r = Rebuild::default();
    let name = r.one(&node.name, t.transform_schemable_identifier(&node.name));
    let enum_values = r.opt(&node.enum_values, |n| t.transform_value_list(n));
    r.finish(node, || CreateTypeNode { name, enum_values })
}

pub fn walk_drop_table<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<DropTableNode>) -> Arc<DropTableNode> {
    let mut r = Rebuild::default();
    let table = r.one(&node.table, t.transform_table(&node.table));
    r.finish(node, || DropTableNode {
        table,
        if_exists: node.if_exists,
        cascade: node.cascade,
    })
}

pub fn walk_drop_view<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<DropViewNode>) -> Arc<DropViewNode> {
    let mut r = Rebuild::default();
    let name = r.one(&node.name, t.transform_schemable_identifier(&node.name));
    r.finish(node, || DropViewNode {
        name,
        materialized: node.materialized,
        if_exists: node.if_exists,
        cascade: node.cascade,
    })
}

pub fn walk_drop_index<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<DropIndexNode>) -> Arc<DropIndexNode> {
    let mut r = Rebuild::default();
    let name = r.one(&node.name, t.transform_schemable_identifier(&node.name));
    let table = r.opt(&node.table, |n| t.transform_table(n));
    r.finish(node, || DropIndexNode {
        name,
        table,
        if_exists: node.if_exists,
        cascade: node.cascade,
    })
}

pub fn walk_drop_schema<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<DropSchemaNode>) -> Arc<DropSchemaNode> {
    let mut r = Rebuild::default();
    let schema = r.one(&node.schema, t.transform_identifier(&node.schema));
    r.finish(node, || DropSchemaNode {
        schema,
        if_exists: node.if_exists,
        cascade: node.cascade,
    })
}

pub fn walk_drop_type<T: OperationNodeTransformer + ?Sized>(t: &mut T, node: &Arc<DropTypeNode>) -> Arc<DropTypeNode> {
    let mut r = Rebuild::default();
    let name = r.one(&node.name, t.transform_schemable_identifier(&node.name));
    r.finish(node, || DropTypeNode {
        name,
        if_exists: node.if_exists,
    })
}
