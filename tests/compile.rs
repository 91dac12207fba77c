use pretty_assertions::assert_eq;
use serde_json::json;
use sqlnode::prelude::*;

fn person_query() -> RootOperationNode {
    let eb = ExpressionBuilder::new();
    let filter = parse_expression(ExpressionInput::factory(|eb: &ExpressionBuilder| {
        eb.and(&[
            &eb.cmp(&eb.ref_::<i64>("person.age"), Operator::Gte, &eb.val(18)),
            &eb.cmp(&eb.ref_::<String>("person.name"), Operator::Like, &eb.val("J%")),
        ])
    }))
    .unwrap();

    eb.select_from("person")
        .with_selections(vec![
            ReferenceNode::parse("person.id"),
            parse_aliased_expression(ExpressionInput::Expression(
                eb.fn_::<String>("upper", &[&eb.ref_::<String>("person.name")]).as_("shout"),
            ))
            .unwrap(),
        ])
        .with_where(filter)
        .with_order_by(OrderByItemNode::create(ReferenceNode::parse("person.id"), None))
        .into()
}

#[test]
fn test_compiled_artifact_is_deterministic() {
    let mut pipeline = QueryPipeline::new(Dialect::Postgres).with_plugin(WithSchemaPlugin::new("app"));
    let query = person_query();

    let first = pipeline.compile(&query).unwrap();
    let second = pipeline.compile(&query).unwrap();

    assert_eq!(
        first.sql,
        "select app.person.id, upper(app.person.name) as shout from app.person \
         where (app.person.age >= $1 and app.person.name like $2) order by app.person.id"
    );
    assert_eq!(first.sql, second.sql);
    assert_eq!(first.parameters, second.parameters);
    assert_eq!(first.parameters, vec![Value::Int(18), Value::String("J%".into())]);
    assert_ne!(first.query_id, second.query_id);
    assert_eq!(first.query, second.query);
}

#[test]
fn test_sqlite_pipeline() {
    let config = PipelineConfig::from_toml("dialect = \"sqlite\"").unwrap();
    let mut pipeline = QueryPipeline::from_config(&config);

    let query: RootOperationNode = SelectQueryNode::create(vec![TableNode::create("person").into()])
        .with_where(BinaryOperationNode::create(
            ReferenceNode::parse("active"),
            Operator::Eq,
            ValueNode::create(true),
        ))
        .into();

    let compiled = pipeline.compile(&query).unwrap();
    assert_eq!(compiled.sql, "select * from \"person\" where \"active\" = ?");
    assert_eq!(compiled.parameters, vec![Value::Bool(true)]);
}

#[test]
fn test_raw_query_artifact() {
    let compiled = CompiledQuery::raw("select now()");
    assert_eq!(compiled.sql, "select now()");
    assert!(compiled.parameters.is_empty());
    assert_eq!(compiled.query.kind(), NodeKind::Raw);

    // Compiling the synthetic root reproduces the same text.
    let recompiled = DefaultQueryCompiler::new(PostgresDialect).compile_query(&compiled.query);
    assert_eq!(recompiled.sql, compiled.sql);
}

#[test]
fn test_compile_from_json_tree() {
    let tree = json!({
        "kind": "DeleteQuery",
        "from": { "froms": [ { "kind": "Table", "table": { "identifier": { "name": "session" } } } ] },
        "filter": {
            "filter": {
                "kind": "BinaryOperation",
                "left_operand": { "kind": "Column", "column": { "name": "expires_at" } },
                "operator": { "operator": "Lt" },
                "right_operand": { "kind": "Raw", "sql_fragments": ["now()"] }
            }
        }
    });

    let node = OperationNode::from_json(&tree.to_string()).unwrap();
    let root = RootOperationNode::try_from(node).unwrap();

    let config = PipelineConfig::builder().schema("auth").build();
    let compiled = QueryPipeline::from_config(&config).compile(&root).unwrap();
    assert_eq!(compiled.sql, "delete from auth.session where expires_at < now()");
    assert!(compiled.parameters.is_empty());
}

#[test]
fn test_artifact_serializes_for_clients() {
    let compiled = DefaultQueryCompiler::new(PostgresDialect).compile_query(&person_query());
    let value = serde_json::to_value(&compiled).unwrap();

    assert_eq!(value["sql"], json!(compiled.sql));
    assert_eq!(value["query"]["kind"], json!("SelectQuery"));
    assert_eq!(value["query_id"], json!(compiled.query_id.to_string()));
    assert_eq!(value["parameters"][0], json!({ "Int": 18 }));
}

#[test]
fn test_non_root_is_rejected() {
    let node: OperationNode = TableNode::create("person").into();
    assert!(matches!(
        RootOperationNode::try_from(node),
        Err(NodeError::NotARootNode(NodeKind::Table))
    ));
}
