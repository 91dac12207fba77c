//! The transformer trait.
//!
//! One `transform_*` method per node kind. Each receives a node of that kind
//! and returns a node of the same kind; the default delegates to the matching
//! `walk_*` function, which recurses into the children and rebuilds the node
//! only when a child came back as a different allocation.
//!
//! [`OperationNodeTransformer::transform_node`] is the any-node hook: it is
//! called for every child held in a polymorphic [`OperationNode`] position,
//! which includes every place a statement can nest inside another
//! (subqueries, CTE bodies, view bodies, INSERT sources, set operations).
//! Override it to bracket arbitrary subtrees; call [`walk_node`] to continue.

use std::sync::Arc;

use crate::ast::*;
use crate::error::{NodeError, NodeResult};

use super::walk::*;

pub trait OperationNodeTransformer {
    /// Transform a complete statement.
    ///
    /// Fails with [`NodeError::KindChanged`] if an override broke the
    /// same-kind contract at the root.
    fn transform_query(&mut self, root: &RootOperationNode) -> NodeResult<RootOperationNode> {
        let transformed = self.transform_node(&root.to_operation_node());
        if transformed.kind() != root.kind() {
            return Err(NodeError::KindChanged {
                from: root.kind(),
                to: transformed.kind(),
            });
        }
        RootOperationNode::try_from(transformed)
    }

    fn transform_node(&mut self, node: &OperationNode) -> OperationNode {
        walk_node(self, node)
    }

    fn transform_identifier(&mut self, node: &Arc<IdentifierNode>) -> Arc<IdentifierNode> {
        walk_identifier(self, node)
    }

    fn transform_schemable_identifier(&mut self, node: &Arc<SchemableIdentifierNode>) -> Arc<SchemableIdentifierNode> {
        walk_schemable_identifier(self, node)
    }

    fn transform_table(&mut self, node: &Arc<TableNode>) -> Arc<TableNode> {
        walk_table(self, node)
    }

    fn transform_column(&mut self, node: &Arc<ColumnNode>) -> Arc<ColumnNode> {
        walk_column(self, node)
    }

    fn transform_reference(&mut self, node: &Arc<ReferenceNode>) -> Arc<ReferenceNode> {
        walk_reference(self, node)
    }

    fn transform_select_all(&mut self, node: &Arc<SelectAllNode>) -> Arc<SelectAllNode> {
        walk_select_all(self, node)
    }

    fn transform_alias(&mut self, node: &Arc<AliasNode>) -> Arc<AliasNode> {
        walk_alias(self, node)
    }

    fn transform_raw(&mut self, node: &Arc<RawNode>) -> Arc<RawNode> {
        walk_raw(self, node)
    }

    fn transform_value(&mut self, node: &Arc<ValueNode>) -> Arc<ValueNode> {
        walk_value(self, node)
    }

    fn transform_value_list(&mut self, node: &Arc<ValueListNode>) -> Arc<ValueListNode> {
        walk_value_list(self, node)
    }

    fn transform_values(&mut self, node: &Arc<ValuesNode>) -> Arc<ValuesNode> {
        walk_values(self, node)
    }

    fn transform_operator(&mut self, node: &Arc<OperatorNode>) -> Arc<OperatorNode> {
        walk_operator(self, node)
    }

    fn transform_binary_operation(&mut self, node: &Arc<BinaryOperationNode>) -> Arc<BinaryOperationNode> {
        walk_binary_operation(self, node)
    }

    fn transform_unary_operation(&mut self, node: &Arc<UnaryOperationNode>) -> Arc<UnaryOperationNode> {
        walk_unary_operation(self, node)
    }

    fn transform_and(&mut self, node: &Arc<AndNode>) -> Arc<AndNode> {
        walk_and(self, node)
    }

    fn transform_or(&mut self, node: &Arc<OrNode>) -> Arc<OrNode> {
        walk_or(self, node)
    }

    fn transform_parens(&mut self, node: &Arc<ParensNode>) -> Arc<ParensNode> {
        walk_parens(self, node)
    }

    fn transform_function(&mut self, node: &Arc<FunctionNode>) -> Arc<FunctionNode> {
        walk_function(self, node)
    }

    fn transform_selection(&mut self, node: &Arc<SelectionNode>) -> Arc<SelectionNode> {
        walk_selection(self, node)
    }

    fn transform_from(&mut self, node: &Arc<FromNode>) -> Arc<FromNode> {
        walk_from(self, node)
    }

    fn transform_join(&mut self, node: &Arc<JoinNode>) -> Arc<JoinNode> {
        walk_join(self, node)
    }

    fn transform_on(&mut self, node: &Arc<OnNode>) -> Arc<OnNode> {
        walk_on(self, node)
    }

    fn transform_where(&mut self, node: &Arc<WhereNode>) -> Arc<WhereNode> {
        walk_where(self, node)
    }

    fn transform_group_by(&mut self, node: &Arc<GroupByNode>) -> Arc<GroupByNode> {
        walk_group_by(self, node)
    }

    fn transform_having(&mut self, node: &Arc<HavingNode>) -> Arc<HavingNode> {
        walk_having(self, node)
    }

    fn transform_order_by(&mut self, node: &Arc<OrderByNode>) -> Arc<OrderByNode> {
        walk_order_by(self, node)
    }

    fn transform_order_by_item(&mut self, node: &Arc<OrderByItemNode>) -> Arc<OrderByItemNode> {
        walk_order_by_item(self, node)
    }

    fn transform_limit(&mut self, node: &Arc<LimitNode>) -> Arc<LimitNode> {
        walk_limit(self, node)
    }

    fn transform_offset(&mut self, node: &Arc<OffsetNode>) -> Arc<OffsetNode> {
        walk_offset(self, node)
    }

    fn transform_returning(&mut self, node: &Arc<ReturningNode>) -> Arc<ReturningNode> {
        walk_returning(self, node)
    }

    fn transform_column_update(&mut self, node: &Arc<ColumnUpdateNode>) -> Arc<ColumnUpdateNode> {
        walk_column_update(self, node)
    }

    fn transform_set_operation(&mut self, node: &Arc<SetOperationNode>) -> Arc<SetOperationNode> {
        walk_set_operation(self, node)
    }

    fn transform_with(&mut self, node: &Arc<WithNode>) -> Arc<WithNode> {
        walk_with(self, node)
    }

    fn transform_common_table_expression(&mut self, node: &Arc<CommonTableExpressionNode>) -> Arc<CommonTableExpressionNode> {
        walk_common_table_expression(self, node)
    }

    fn transform_common_table_expression_name(&mut self, node: &Arc<CommonTableExpressionNameNode>) -> Arc<CommonTableExpressionNameNode> {
        walk_common_table_expression_name(self, node)
    }

    fn transform_select_query(&mut self, node: &Arc<SelectQueryNode>) -> Arc<SelectQueryNode> {
        walk_select_query(self, node)
    }

    fn transform_insert_query(&mut self, node: &Arc<InsertQueryNode>) -> Arc<InsertQueryNode> {
        walk_insert_query(self, node)
    }

    fn transform_update_query(&mut self, node: &Arc<UpdateQueryNode>) -> Arc<UpdateQueryNode> {
        walk_update_query(self, node)
    }

    fn transform_delete_query(&mut self, node: &Arc<DeleteQueryNode>) -> Arc<DeleteQueryNode> {
        walk_delete_query(self, node)
    }

    fn transform_data_type(&mut self, node: &Arc<DataTypeNode>) -> Arc<DataTypeNode> {
        walk_data_type(self, node)
    }

    fn transform_column_definition(&mut self, node: &Arc<ColumnDefinitionNode>) -> Arc<ColumnDefinitionNode> {
        walk_column_definition(self, node)
    }

    fn transform_references(&mut self, node: &Arc<ReferencesNode>) -> Arc<ReferencesNode> {
        walk_references(self, node)
    }

    fn transform_add_column(&mut self, node: &Arc<AddColumnNode>) -> Arc<AddColumnNode> {
        walk_add_column(self, node)
    }

    fn transform_drop_column(&mut self, node: &Arc<DropColumnNode>) -> Arc<DropColumnNode> {
        walk_drop_column(self, node)
    }

    fn transform_rename_column(&mut self, node: &Arc<RenameColumnNode>) -> Arc<RenameColumnNode> {
        walk_rename_column(self, node)
    }

    fn transform_alter_table(&mut self, node: &Arc<AlterTableNode>) -> Arc<AlterTableNode> {
        walk_alter_table(self, node)
    }

    fn transform_create_table(&mut self, node: &Arc<CreateTableNode>) -> Arc<CreateTableNode> {
        walk_create_table(self, node)
    }

    fn transform_create_view(&mut self, node: &Arc<CreateViewNode>) -> Arc<CreateViewNode> {
        walk_create_view(self, node)
    }

    fn transform_create_index(&mut self, node: &Arc<CreateIndexNode>) -> Arc<CreateIndexNode> {
        walk_create_index(self, node)
    }

    fn transform_create_schema(&mut self, node: &Arc<CreateSchemaNode>) -> Arc<CreateSchemaNode> {
        walk_create_schema(self, node)
    }

    fn transform_create_type(&mut self, node: &Arc<CreateTypeNode>) -> Arc<CreateTypeNode> {
        walk_create_type(self, node)
    }

    fn transform_drop_table(&mut self, node: &Arc<DropTableNode>) -> Arc<DropTableNode> {
        walk_drop_table(self, node)
    }

    fn transform_drop_view(&mut self, node: &Arc<DropViewNode>) -> Arc<DropViewNode> {
        walk_drop_view(self, node)
    }

    fn transform_drop_index(&mut self, node: &Arc<DropIndexNode>) -> Arc<DropIndexNode> {
        walk_drop_index(self, node)
    }

    fn transform_drop_schema(&mut self, node: &Arc<DropSchemaNode>) -> Arc<DropSchemaNode> {
        walk_drop_schema(self, node)
    }

    fn transform_drop_type(&mut self, node: &Arc<DropTypeNode>) -> Arc<DropTypeNode> {
        walk_drop_type(self, node)
    }
}

/// A transformer that overrides nothing. Returns every tree unchanged, by reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransformer;

impl OperationNodeTransformer for IdentityTransformer {}
