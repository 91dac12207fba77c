//! Schema qualification.
//!
//! Rewrites bare table identifiers that denote one of a statement's own real
//! tables into `schema.table`. Names are scoped per statement: each root node
//! (top-level or nested as a subquery) collects the tables it introduces
//! through its name, FROM, INTO, TABLE and JOIN targets and holds them in
//! scope only while its subtree is walked. Names bound by a WITH clause stay
//! unqualified everywhere inside the statement that declares them, nested
//! statements and the CTE declarations included.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use crate::ast::*;

use super::traits::OperationNodeTransformer;
use super::walk::{walk_node, walk_references, walk_schemable_identifier};

#[derive(Debug)]
pub struct WithSchemaTransformer {
    schema: String,
    /// Table names bound by the statements currently being walked.
    schemable_ids: HashSet<String>,
    /// CTE names in scope, innermost last.
    ctes: Vec<String>,
}

impl WithSchemaTransformer {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            schemable_ids: HashSet::new(),
            ctes: Vec::new(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Names this statement brings into scope that are not in scope already.
    fn collect_schemable_ids(&self, root: &RootOperationNode) -> HashSet<String> {
        let mut ids = HashSet::new();

        // No wildcard: a new root kind must decide here what it binds.
        match root {
            RootOperationNode::SelectQuery(node) => {
                self.collect_from(node.from.as_deref(), &mut ids);
                self.collect_joins(&node.joins, &mut ids);
            }
            RootOperationNode::InsertQuery(node) => self.collect_table(&node.into, &mut ids),
            RootOperationNode::UpdateQuery(node) => {
                self.collect_table_expression(&node.table, &mut ids);
                self.collect_from(node.from.as_deref(), &mut ids);
                self.collect_joins(&node.joins, &mut ids);
            }
            RootOperationNode::DeleteQuery(node) => {
                self.collect_from(Some(node.from.as_ref()), &mut ids);
                self.collect_from(node.using.as_deref(), &mut ids);
                self.collect_joins(&node.joins, &mut ids);
            }
            RootOperationNode::AlterTable(node) => self.collect_table(&node.table, &mut ids),
            RootOperationNode::CreateTable(node) => self.collect_table(&node.table, &mut ids),
            RootOperationNode::DropTable(node) => self.collect_table(&node.table, &mut ids),
            RootOperationNode::CreateIndex(node) => {
                if let Some(table) = &node.table {
                    self.collect_table(table, &mut ids);
                }
            }
            RootOperationNode::DropIndex(node) => {
                self.collect_id(&node.name, &mut ids);
                if let Some(table) = &node.table {
                    self.collect_table(table, &mut ids);
                }
            }
            RootOperationNode::CreateView(node) => self.collect_id(&node.name, &mut ids),
            RootOperationNode::DropView(node) => self.collect_id(&node.name, &mut ids),
            RootOperationNode::CreateType(node) => self.collect_id(&node.name, &mut ids),
            RootOperationNode::DropType(node) => self.collect_id(&node.name, &mut ids),
            RootOperationNode::CreateSchema(_)
            | RootOperationNode::DropSchema(_)
            | RootOperationNode::Raw(_) => {}
        }

        ids
    }

    fn collect_from(&self, from: Option<&FromNode>, ids: &mut HashSet<String>) {
        for table in from.into_iter().flat_map(|f| &f.froms) {
            self.collect_table_expression(table, ids);
        }
    }

    fn collect_joins(&self, joins: &[Arc<JoinNode>], ids: &mut HashSet<String>) {
        for join in joins {
            self.collect_table_expression(&join.table, ids);
        }
    }

    /// A table, or a table behind an alias. Anything else (subqueries,
    /// functions) binds no schema object.
    fn collect_table_expression(&self, node: &OperationNode, ids: &mut HashSet<String>) {
        match node {
            OperationNode::Table(table) => self.collect_table(table, ids),
            OperationNode::Alias(alias) => {
                if let OperationNode::Table(table) = &alias.node {
                    self.collect_table(table, ids);
                }
            }
            _ => {}
        }
    }

    fn collect_table(&self, table: &TableNode, ids: &mut HashSet<String>) {
        self.collect_id(&table.table, ids);
    }

    fn collect_id(&self, id: &SchemableIdentifierNode, ids: &mut HashSet<String>) {
        if !self.schemable_ids.contains(id.name()) && !self.is_cte(id.name()) {
            ids.insert(id.name().to_string());
        }
    }

    fn is_cte(&self, name: &str) -> bool {
        self.ctes.iter().any(|cte| cte == name)
    }

    fn schema_identifier(&self) -> Arc<IdentifierNode> {
        Arc::new(IdentifierNode::create(&self.schema))
    }
}

fn common_table_expression_names(root: &RootOperationNode) -> Vec<String> {
    let with = match root {
        RootOperationNode::SelectQuery(node) => node.with.as_deref(),
        RootOperationNode::InsertQuery(node) => node.with.as_deref(),
        RootOperationNode::UpdateQuery(node) => node.with.as_deref(),
        RootOperationNode::DeleteQuery(node) => node.with.as_deref(),
        _ => None,
    };
    with.into_iter()
        .flat_map(|w| &w.expressions)
        .map(|cte| cte.name.name().to_string())
        .collect()
}

impl OperationNodeTransformer for WithSchemaTransformer {
    fn transform_node(&mut self, node: &OperationNode) -> OperationNode {
        let Some(root) = node.as_root() else {
            return walk_node(self, node);
        };

        let outer_ctes = self.ctes.len();
        self.ctes.extend(common_table_expression_names(&root));
        let tables = self.collect_schemable_ids(&root);
        trace!(kind = %root.kind(), ?tables, ctes = ?&self.ctes[outer_ctes..], "entering statement scope");
        self.schemable_ids.extend(tables.iter().cloned());

        let transformed = walk_node(self, node);

        for table in &tables {
            self.schemable_ids.remove(table);
        }
        self.ctes.truncate(outer_ctes);
        trace!(kind = %root.kind(), "leaving statement scope");

        transformed
    }

    fn transform_schemable_identifier(
        &mut self,
        node: &Arc<SchemableIdentifierNode>,
    ) -> Arc<SchemableIdentifierNode> {
        let transformed = walk_schemable_identifier(self, node);

        if transformed.schema.is_some()
            || self.is_cte(transformed.name())
            || !self.schemable_ids.contains(transformed.name())
        {
            return transformed;
        }

        Arc::new(SchemableIdentifierNode {
            schema: Some(self.schema_identifier()),
            identifier: Arc::clone(&transformed.identifier),
        })
    }

    /// A CTE declares a name; it never refers to a schema object.
    fn transform_common_table_expression_name(
        &mut self,
        node: &Arc<CommonTableExpressionNameNode>,
    ) -> Arc<CommonTableExpressionNameNode> {
        Arc::clone(node)
    }

    /// Foreign key targets always name real tables, even though the statement
    /// does not bring them into scope.
    fn transform_references(&mut self, node: &Arc<ReferencesNode>) -> Arc<ReferencesNode> {
        let transformed = walk_references(self, node);

        if transformed.table.table.schema.is_some() {
            return transformed;
        }

        Arc::new(ReferencesNode {
            table: Arc::new(TableNode::create_with_schema(
                self.schema.clone(),
                transformed.table.table.name(),
            )),
            columns: transformed.columns.clone(),
            on_delete: transformed.on_delete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qualify(schema: &str, root: impl Into<RootOperationNode>) -> RootOperationNode {
        WithSchemaTransformer::new(schema)
            .transform_query(&root.into())
            .unwrap()
    }

    fn select(root: &RootOperationNode) -> &SelectQueryNode {
        match root {
            RootOperationNode::SelectQuery(node) => node,
            other => panic!("expected select, got {}", other.kind()),
        }
    }

    fn table_of(node: &OperationNode) -> &TableNode {
        match node {
            OperationNode::Table(table) => table,
            OperationNode::Alias(alias) => table_of(&alias.node),
            other => panic!("expected table, got {}", other.kind()),
        }
    }

    fn schema_of(table: &TableNode) -> Option<&str> {
        table.table.schema.as_ref().map(|s| s.name.as_str())
    }

    #[test]
    fn test_qualifies_from_tables() {
        let root = qualify("s", SelectQueryNode::create(vec![TableNode::create("person").into()]));
        let from = &select(&root).from.as_ref().unwrap().froms;
        assert_eq!(schema_of(table_of(&from[0])), Some("s"));
    }

    #[test]
    fn test_existing_schema_is_kept() {
        let root = qualify(
            "s",
            SelectQueryNode::create(vec![TableNode::create_with_schema("other", "person").into()]),
        );
        let from = &select(&root).from.as_ref().unwrap().froms;
        assert_eq!(schema_of(table_of(&from[0])), Some("other"));
    }

    #[test]
    fn test_aliased_table_is_qualified_but_alias_is_not() {
        let query = SelectQueryNode::create(vec![AliasNode::create(TableNode::create("person"), "p").into()])
            .with_selections(vec![ReferenceNode::parse("p.id")]);
        let root = qualify("s", query);
        let node = select(&root);

        assert_eq!(schema_of(table_of(&node.from.as_ref().unwrap().froms[0])), Some("s"));
        match &node.selections[0].selection {
            OperationNode::Reference(reference) => {
                assert_eq!(schema_of(reference.table.as_ref().unwrap()), None);
            }
            other => panic!("unexpected selection {}", other.kind()),
        }
    }

    #[test]
    fn test_scope_is_empty_after_transform() {
        let mut transformer = WithSchemaTransformer::new("s");
        let query: RootOperationNode = SelectQueryNode::create(vec![TableNode::create("a").into()])
            .with_join(JoinNode::create(JoinType::Inner, TableNode::create("b")))
            .into();
        transformer.transform_query(&query).unwrap();
        assert!(transformer.schemable_ids.is_empty());

        let query: RootOperationNode = SelectQueryNode::create(vec![TableNode::create("recent").into()])
            .with_cte(WithNode::create(vec![CommonTableExpressionNode::create(
                "recent",
                SelectQueryNode::create(vec![TableNode::create("orders").into()]),
            )]))
            .into();
        transformer.transform_query(&query).unwrap();
        assert!(transformer.schemable_ids.is_empty());
        assert!(transformer.ctes.is_empty());
    }

    #[test]
    fn test_unrelated_tree_is_returned_by_reference() {
        let query: RootOperationNode = CreateSchemaNode::create("s").into();
        let out = qualify("s", query.clone());
        assert!(out.ptr_eq(&query));
    }

    #[test]
    fn test_foreign_key_targets_are_qualified() {
        let create = CreateTableNode::create(TableNode::create("pet")).with_column(
            ColumnDefinitionNode::create("owner_id", "integer")
                .references(ReferencesNode::create(TableNode::create("person"), &["id"])),
        );
        let root = qualify("s", create);
        let RootOperationNode::CreateTable(node) = &root else {
            panic!("expected create table");
        };
        assert_eq!(schema_of(&node.table), Some("s"));
        let references = node.columns[0].references.as_ref().unwrap();
        assert_eq!(schema_of(&references.table), Some("s"));
    }

    #[test]
    fn test_drop_index_name_is_qualified() {
        let root = qualify("s", DropIndexNode::create("person_name_idx"));
        let RootOperationNode::DropIndex(node) = &root else {
            panic!("expected drop index");
        };
        assert_eq!(node.name.schema.as_ref().map(|s| s.name.as_str()), Some("s"));
    }
}
