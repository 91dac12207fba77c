use std::sync::Arc;

use pretty_assertions::assert_eq;
use sqlnode::prelude::*;
use sqlnode::transformer::{walk_column, walk_node};

/// A statement touching most clause kinds.
fn complex_query() -> RootOperationNode {
    let eb = ExpressionBuilder::new();
    let recent = SelectQueryNode::create(vec![TableNode::create("orders").into()])
        .with_selections(vec![ReferenceNode::parse("customer_id")])
        .with_where(eb.cmp(&eb.ref_::<i64>("total"), Operator::Gt, &eb.val(100)).to_operation_node());

    let tiers: OperationNode = ValueListNode::create(vec![
        ValueNode::create("gold").into(),
        ValueNode::create("silver").into(),
    ])
    .into();
    let blocklist = OperationNode::from(eb.select_from("blocklist"));

    SelectQueryNode::create(vec![AliasNode::create(TableNode::create("customer"), "c").into()])
        .with_cte(WithNode::create(vec![CommonTableExpressionNode::create("recent", recent)]))
        .distinct()
        .with_selections(vec![
            ReferenceNode::parse("c.name"),
            eb.fn_::<i64>("count", &[&eb.ref_::<()>("*")]).as_("n").to_operation_node(),
        ])
        .with_join(JoinNode::create_with_on(
            JoinType::Inner,
            TableNode::create("recent"),
            eb.cmp(&eb.ref_::<i64>("recent.customer_id"), Operator::Eq, &eb.ref_::<i64>("c.id"))
                .to_operation_node(),
        ))
        .with_where(
            eb.or(&[
                &eb.cmp(&eb.ref_::<String>("c.tier"), Operator::In, &tiers),
                &eb.not(&eb.exists(&blocklist)),
            ])
            .to_operation_node(),
        )
        .with_group_by(vec![ReferenceNode::parse("c.name")])
        .with_having(eb.cmp(&eb.fn_::<i64>("count", &[&eb.ref_::<()>("*")]), Operator::Gt, &eb.val(1)).to_operation_node())
        .with_order_by(OrderByItemNode::create(ReferenceNode::parse("n"), Some(OrderDirection::Desc)))
        .with_limit(ValueNode::create(10))
        .with_offset(ValueNode::create(20))
        .with_set_operation(SetOperator::Union, SelectQueryNode::create(vec![TableNode::create("archive").into()]), true)
        .into()
}

#[test]
fn test_identity_transformer_returns_input() {
    let query = complex_query();
    let out = IdentityTransformer.transform_query(&query).unwrap();
    assert!(out.ptr_eq(&query));

    let ddl: RootOperationNode = CreateTableNode::create(TableNode::create("pet"))
        .with_column(
            ColumnDefinitionNode::create("owner_id", "integer")
                .not_null()
                .references(ReferencesNode::create(TableNode::create("person"), &["id"])),
        )
        .into();
    assert!(IdentityTransformer.transform_query(&ddl).unwrap().ptr_eq(&ddl));
}

struct RenameColumn {
    from: &'static str,
    to: &'static str,
}

impl OperationNodeTransformer for RenameColumn {
    fn transform_column(&mut self, node: &Arc<ColumnNode>) -> Arc<ColumnNode> {
        if node.column.name == self.from {
            return Arc::new(ColumnNode::create(self.to));
        }
        walk_column(self, node)
    }
}

#[test]
fn test_unchanged_siblings_are_shared() {
    let query: RootOperationNode = SelectQueryNode::create(vec![TableNode::create("person").into()])
        .with_selections(vec![ReferenceNode::parse("first_name")])
        .with_where(BinaryOperationNode::create(
            ReferenceNode::parse("id"),
            Operator::Eq,
            ValueNode::create(1),
        ))
        .into();

    let out = RenameColumn {
        from: "first_name",
        to: "given_name",
    }
    .transform_query(&query)
    .unwrap();

    let (RootOperationNode::SelectQuery(before), RootOperationNode::SelectQuery(after)) = (&query, &out) else {
        panic!("expected select queries");
    };
    assert!(!Arc::ptr_eq(before, after));
    assert!(!Arc::ptr_eq(&before.selections[0], &after.selections[0]));
    assert!(Arc::ptr_eq(before.from.as_ref().unwrap(), after.from.as_ref().unwrap()));
    assert!(Arc::ptr_eq(before.filter.as_ref().unwrap(), after.filter.as_ref().unwrap()));

    let compiled = DefaultQueryCompiler::new(PostgresDialect).compile_query(&out);
    assert_eq!(compiled.sql, "select given_name from person where id = $1");
}

struct ReplaceSelects;

impl OperationNodeTransformer for ReplaceSelects {
    fn transform_node(&mut self, node: &OperationNode) -> OperationNode {
        if node.kind() == NodeKind::SelectQuery {
            return RawNode::create_with_sql("select 1").into();
        }
        walk_node(self, node)
    }
}

#[test]
fn test_root_kind_change_is_rejected() {
    let query: RootOperationNode = SelectQueryNode::create(vec![TableNode::create("person").into()]).into();
    let err = ReplaceSelects.transform_query(&query).unwrap_err();
    assert!(matches!(
        err,
        NodeError::KindChanged {
            from: NodeKind::SelectQuery,
            to: NodeKind::Raw
        }
    ));
}

#[test]
fn test_tree_survives_json_boundary() {
    let query = complex_query();
    let json = query.to_operation_node().to_json().unwrap();
    let loaded = OperationNode::from_json(&json).unwrap();

    assert_eq!(loaded, query.to_operation_node());
    assert_eq!(loaded.as_root().map(|r| r.kind()), Some(NodeKind::SelectQuery));
}

#[test]
fn test_unknown_kind_from_newer_producer() {
    let json = r#"{ "kind": "MergeQuery", "into": { "table": { "identifier": { "name": "t" } } } }"#;
    match OperationNode::from_json(json) {
        Err(NodeError::UnknownNodeKind(kind)) => assert_eq!(kind, "MergeQuery"),
        other => panic!("expected unknown node kind, got {:?}", other),
    }
}
