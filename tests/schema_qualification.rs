//! Schema qualification over complete statements, checked through the
//! compiled SQL.

use pretty_assertions::assert_eq;
use sqlnode::prelude::*;

fn qualify(schema: &str, query: impl Into<RootOperationNode>) -> RootOperationNode {
    WithSchemaTransformer::new(schema)
        .transform_query(&query.into())
        .unwrap()
}

fn sql(query: &RootOperationNode) -> String {
    DefaultQueryCompiler::new(PostgresDialect).compile_query(query).sql
}

fn table(name: &str) -> OperationNode {
    TableNode::create(name).into()
}

#[test]
fn test_cte_names_are_never_qualified() {
    let query = SelectQueryNode::create(vec![table("foo")])
        .with_selections(vec![ReferenceNode::parse("foo.id")])
        .with_cte(WithNode::create(vec![CommonTableExpressionNode::create(
            "foo",
            SelectQueryNode::create(vec![table("bar")]),
        )]));

    let root = qualify("s", query);
    assert_eq!(
        sql(&root),
        "with foo as (select * from s.bar) select foo.id from foo"
    );
}

#[test]
fn test_subquery_and_outer_tables_are_scoped_independently() {
    let sub = SelectQueryNode::create(vec![table("t")]);
    let query = SelectQueryNode::create(vec![AliasNode::create(sub, "sub").into(), table("t2")]);
    assert_eq!(
        sql(&qualify("s", query)),
        "select * from (select * from s.t) as sub, s.t2"
    );

    // Same outer result when the subquery also names t2.
    let sub = SelectQueryNode::create(vec![table("t2")]);
    let query = SelectQueryNode::create(vec![AliasNode::create(sub, "sub").into(), table("t2")]);
    assert_eq!(
        sql(&qualify("s", query)),
        "select * from (select * from s.t2) as sub, s.t2"
    );
}

#[test]
fn test_join_targets_are_qualified() {
    let query = SelectQueryNode::create(vec![table("a")]).with_join(JoinNode::create_with_on(
        JoinType::Inner,
        TableNode::create("b"),
        BinaryOperationNode::create(ReferenceNode::parse("a.x"), Operator::Eq, ReferenceNode::parse("b.y")),
    ));

    let root = qualify("s", query);
    assert_eq!(sql(&root), "select * from s.a inner join s.b on s.a.x = s.b.y");

    // Column identifiers stay bare.
    let RootOperationNode::SelectQuery(select) = &root else {
        panic!("expected select");
    };
    let on = &select.joins[0].on.as_ref().unwrap().on;
    let OperationNode::BinaryOperation(op) = on else {
        panic!("expected binary operation");
    };
    let OperationNode::Reference(left) = &op.left_operand else {
        panic!("expected reference");
    };
    assert_eq!(left.column, OperationNode::from(ColumnNode::create("x")));
}

#[test]
fn test_qualification_is_idempotent() {
    let query = SelectQueryNode::create(vec![AliasNode::create(TableNode::create("person"), "p").into()])
        .with_join(JoinNode::create_with_on(
            JoinType::Left,
            TableNode::create("pet"),
            BinaryOperationNode::create(
                ReferenceNode::parse("pet.owner_id"),
                Operator::Eq,
                ReferenceNode::parse("p.id"),
            ),
        ))
        .with_where(UnaryOperationNode::create(
            Operator::Exists,
            ParensNode::create(SelectQueryNode::create(vec![table("toy")])),
        ));

    let once = qualify("s", query);
    let twice = qualify("s", once.clone());

    assert_eq!(once, twice);
    assert!(twice.ptr_eq(&once));
    assert_eq!(
        sql(&twice),
        "select * from s.person as p left join s.pet on s.pet.owner_id = p.id \
         where exists (select * from s.toy)"
    );
}

#[test]
fn test_existing_schema_wins() {
    let query = SelectQueryNode::create(vec![TableNode::parse("audit.log").into(), table("person")]);
    assert_eq!(sql(&qualify("s", query)), "select * from audit.log, s.person");
}

#[test]
fn test_dml_targets() {
    let insert = InsertQueryNode::create(TableNode::create("person"))
        .with_columns(&["name"])
        .with_values(
            SelectQueryNode::create(vec![table("staging")]).with_selections(vec![ReferenceNode::parse("name")]),
        );
    assert_eq!(
        sql(&qualify("s", insert)),
        "insert into s.person (name) select name from s.staging"
    );

    let update = UpdateQueryNode::create(TableNode::create("person"))
        .with_update(ColumnUpdateNode::create("active", ValueNode::create(false)))
        .with_from(vec![table("ban")])
        .with_where(BinaryOperationNode::create(
            ReferenceNode::parse("ban.person_id"),
            Operator::Eq,
            ReferenceNode::parse("person.id"),
        ));
    assert_eq!(
        sql(&qualify("s", update)),
        "update s.person set active = $1 from s.ban where s.ban.person_id = s.person.id"
    );

    let delete = DeleteQueryNode::create(vec![table("person")]).with_using(vec![table("ban")]);
    assert_eq!(sql(&qualify("s", delete)), "delete from s.person using s.ban");
}

#[test]
fn test_ddl_names_and_foreign_keys() {
    let create = CreateTableNode::create(TableNode::create("pet"))
        .with_column(ColumnDefinitionNode::create("id", "serial").primary_key())
        .with_column(
            ColumnDefinitionNode::create("owner_id", "integer")
                .references(ReferencesNode::create(TableNode::create("person"), &["id"])),
        );
    assert_eq!(
        sql(&qualify("s", create)),
        "create table s.pet (id serial primary key, owner_id integer references s.person (id))"
    );

    let view = CreateViewNode::create("adults").with_as(
        SelectQueryNode::create(vec![table("person")]).with_where(BinaryOperationNode::create(
            ReferenceNode::parse("age"),
            Operator::Gte,
            ValueNode::create(18),
        )),
    );
    assert_eq!(
        sql(&qualify("s", view)),
        "create view s.adults as select * from s.person where age >= 18"
    );

    let index = CreateIndexNode::create("pet_owner_idx").on(TableNode::create("pet"), &["owner_id"]);
    assert_eq!(
        sql(&qualify("s", index)),
        "create index pet_owner_idx on s.pet (owner_id)"
    );

    assert_eq!(sql(&qualify("s", DropTypeNode::create("mood"))), "drop type s.mood");
}

#[test]
fn test_transformer_is_reusable() {
    let mut transformer = WithSchemaTransformer::new("s");
    let a: RootOperationNode = SelectQueryNode::create(vec![table("a")]).into();
    let b: RootOperationNode = SelectQueryNode::create(vec![table("b")])
        .with_selections(vec![ReferenceNode::parse("a.id")])
        .into();

    assert_eq!(sql(&transformer.transform_query(&a).unwrap()), "select * from s.a");
    // Nothing from the first statement leaks into the second.
    assert_eq!(sql(&transformer.transform_query(&b).unwrap()), "select a.id from s.b");
}

#[test]
fn test_chained_ctes_stay_unqualified() {
    let query = SelectQueryNode::create(vec![table("b")]).with_cte(WithNode::create(vec![
        CommonTableExpressionNode::create("a", SelectQueryNode::create(vec![table("t")])),
        CommonTableExpressionNode::create("b", SelectQueryNode::create(vec![table("a")])),
    ]));

    assert_eq!(
        sql(&qualify("s", query)),
        "with a as (select * from s.t), b as (select * from a) select * from b"
    );
}

#[test]
fn test_cte_read_from_a_subquery_stays_unqualified() {
    let sub = SelectQueryNode::create(vec![table("foo")]);
    let query = SelectQueryNode::create(vec![AliasNode::create(sub, "x").into()]).with_cte(WithNode::create(vec![
        CommonTableExpressionNode::create("foo", SelectQueryNode::create(vec![table("bar")])),
    ]));

    assert_eq!(
        sql(&qualify("s", query)),
        "with foo as (select * from s.bar) select * from (select * from foo) as x"
    );
}

#[test]
fn test_inner_cte_shadows_outer_table() {
    let eb = ExpressionBuilder::new();
    let inner = OperationNode::from(SelectQueryNode::create(vec![table("foo")]).with_cte(WithNode::create(vec![
        CommonTableExpressionNode::create("foo", SelectQueryNode::create(vec![table("bar")])),
    ])));
    let query = SelectQueryNode::create(vec![table("foo")])
        .with_where(eb.exists(&inner).to_operation_node())
        .with_selections(vec![ReferenceNode::parse("foo.id")]);

    assert_eq!(
        sql(&qualify("s", query)),
        "select s.foo.id from s.foo where exists (with foo as (select * from s.bar) select * from foo)"
    );
}
