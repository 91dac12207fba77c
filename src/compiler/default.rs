//! Deterministic SQL renderer over every node kind.

use std::sync::Arc;

use tracing::debug;

use crate::ast::*;

use super::{CompiledQuery, Dialect, QueryCompiler, QueryId, SqlDialect};

/// Renders lowercase-keyword SQL for the configured dialect.
///
/// DML statements and raw roots bind every `Value` node as a positional
/// parameter. DDL statements cannot take parameters, so their values are
/// inlined as literals.
#[derive(Debug, Clone, Default)]
pub struct DefaultQueryCompiler<D = Dialect> {
    dialect: D,
}

impl<D: SqlDialect> DefaultQueryCompiler<D> {
    pub fn new(dialect: D) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }
}

impl<D: SqlDialect> QueryCompiler for DefaultQueryCompiler<D> {
    fn compile_query(&self, query: &RootOperationNode) -> CompiledQuery {
        let inline_values = !matches!(
            query,
            RootOperationNode::SelectQuery(_)
                | RootOperationNode::InsertQuery(_)
                | RootOperationNode::UpdateQuery(_)
                | RootOperationNode::DeleteQuery(_)
                | RootOperationNode::Raw(_)
        );
        let mut writer = SqlWriter::new(&self.dialect, inline_values);
        writer.visit_node(&query.to_operation_node());

        let query_id = QueryId::new();
        debug!(%query_id, kind = %query.kind(), parameters = writer.parameters.len(), "compiled query");

        CompiledQuery {
            query: query.clone(),
            query_id,
            sql: writer.sql,
            parameters: writer.parameters,
        }
    }
}

struct SqlWriter<'a, D: ?Sized> {
    dialect: &'a D,
    sql: String,
    parameters: Vec<Value>,
    inline_values: bool,
    /// Set while a statement is being rendered; nested statements get parens.
    nested: bool,
}

impl<'a, D: SqlDialect + ?Sized> SqlWriter<'a, D> {
    fn new(dialect: &'a D, inline_values: bool) -> Self {
        Self {
            dialect,
            sql: String::new(),
            parameters: vec![],
            inline_values,
            nested: false,
        }
    }

    fn push(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    fn ident(&mut self, name: &str) {
        let quoted = self.dialect.quote_identifier(name);
        self.push(&quoted);
    }

    fn list<T>(&mut self, items: &[T], mut f: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            f(self, item);
        }
    }

    fn nodes(&mut self, nodes: &[OperationNode]) {
        self.list(nodes, |w, n| w.visit_node(n));
    }

    /// Render a statement in a position that supplies its own delimiters.
    fn bare(&mut self, node: &OperationNode) {
        let nested = std::mem::replace(&mut self.nested, false);
        self.visit_node(node);
        self.nested = nested;
    }

    fn statement(&mut self, f: impl FnOnce(&mut Self)) {
        let wrap = std::mem::replace(&mut self.nested, true);
        if wrap {
            self.push("(");
        }
        f(self);
        if wrap {
            self.push(")");
        }
        self.nested = wrap;
    }

    fn visit_node(&mut self, node: &OperationNode) {
        match node {
            OperationNode::Identifier(n) => self.ident(&n.name),
            OperationNode::SchemableIdentifier(n) => self.visit_schemable_identifier(n),
            OperationNode::Table(n) => self.visit_table(n),
            OperationNode::Column(n) => self.ident(&n.column.name),
            OperationNode::Reference(n) => self.visit_reference(n),
            OperationNode::SelectAll(_) => self.push("*"),
            OperationNode::Alias(n) => self.visit_alias(n),
            OperationNode::Raw(n) => self.visit_raw(n),
            OperationNode::Value(n) => self.visit_value(n),
            OperationNode::ValueList(n) => self.visit_value_list(n),
            OperationNode::Values(n) => self.visit_values(n),
            OperationNode::Operator(n) => self.push(n.operator.sql_symbol()),
            OperationNode::BinaryOperation(n) => self.visit_binary_operation(n),
            OperationNode::UnaryOperation(n) => self.visit_unary_operation(n),
            OperationNode::And(n) => self.visit_logical(&n.left, "and", &n.right),
            OperationNode::Or(n) => self.visit_logical(&n.left, "or", &n.right),
            OperationNode::Parens(n) => {
                self.push("(");
                self.bare(&n.node);
                self.push(")");
            }
            OperationNode::Function(n) => self.visit_function(n),
            OperationNode::Selection(n) => self.visit_node(&n.selection),
            OperationNode::From(n) => self.visit_from(n),
            OperationNode::Join(n) => self.visit_join(n),
            OperationNode::On(n) => self.visit_on(n),
            OperationNode::Where(n) => self.visit_where(n),
            OperationNode::GroupBy(n) => {
                self.push("group by ");
                self.nodes(&n.items);
            }
            OperationNode::Having(n) => {
                self.push("having ");
                self.visit_node(&n.having);
            }
            OperationNode::OrderBy(n) => self.visit_order_by(n),
            OperationNode::OrderByItem(n) => self.visit_order_by_item(n),
            OperationNode::Limit(n) => {
                self.push("limit ");
                self.visit_node(&n.limit);
            }
            OperationNode::Offset(n) => {
                self.push("offset ");
                self.visit_node(&n.offset);
            }
            OperationNode::Returning(n) => self.visit_returning(n),
            OperationNode::ColumnUpdate(n) => self.visit_column_update(n),
            OperationNode::SetOperation(n) => self.visit_set_operation(n),
            OperationNode::With(n) => self.visit_with(n),
            OperationNode::CommonTableExpression(n) => self.visit_common_table_expression(n),
            OperationNode::CommonTableExpressionName(n) => self.visit_common_table_expression_name(n),
            OperationNode::SelectQuery(n) => self.statement(|w| w.visit_select_query(n)),
            OperationNode::InsertQuery(n) => self.statement(|w| w.visit_insert_query(n)),
            OperationNode::UpdateQuery(n) => self.statement(|w| w.visit_update_query(n)),
            OperationNode::DeleteQuery(n) => self.statement(|w| w.visit_delete_query(n)),
            OperationNode::DataType(n) => self.push(&n.data_type),
            OperationNode::ColumnDefinition(n) => self.visit_column_definition(n),
            OperationNode::References(n) => self.visit_references(n),
            OperationNode::AddColumn(n) => {
                self.push("add column ");
                self.visit_column_definition(&n.column);
            }
            OperationNode::DropColumn(n) => {
                self.push("drop column ");
                self.ident(&n.column.column.name);
            }
            OperationNode::RenameColumn(n) => {
                self.push("rename column ");
                self.ident(&n.column.column.name);
                self.push(" to ");
                self.ident(&n.rename_to.column.name);
            }
            OperationNode::AlterTable(n) => self.visit_alter_table(n),
            OperationNode::CreateTable(n) => self.visit_create_table(n),
            OperationNode::CreateView(n) => self.visit_create_view(n),
            OperationNode::CreateIndex(n) => self.visit_create_index(n),
            OperationNode::CreateSchema(n) => {
                self.push("create schema ");
                if n.if_not_exists {
                    self.push("if not exists ");
                }
                self.ident(&n.schema.name);
            }
            OperationNode::CreateType(n) => self.visit_create_type(n),
            OperationNode::DropTable(n) => {
                self.push("drop table ");
                self.if_exists(n.if_exists);
                self.visit_table(&n.table);
                self.cascade(n.cascade);
            }
            OperationNode::DropView(n) => {
                self.push(if n.materialized { "drop materialized view " } else { "drop view " });
                self.if_exists(n.if_exists);
                self.visit_schemable_identifier(&n.name);
                self.cascade(n.cascade);
            }
            OperationNode::DropIndex(n) => {
                self.push("drop index ");
                self.if_exists(n.if_exists);
                self.visit_schemable_identifier(&n.name);
                if let Some(table) = &n.table {
                    self.push(" on ");
                    self.visit_table(table);
                }
                self.cascade(n.cascade);
            }
            OperationNode::DropSchema(n) => {
                self.push("drop schema ");
                self.if_exists(n.if_exists);
                self.ident(&n.schema.name);
                self.cascade(n.cascade);
            }
            OperationNode::DropType(n) => {
                self.push("drop type ");
                self.if_exists(n.if_exists);
                self.visit_schemable_identifier(&n.name);
            }
        }
    }

    fn if_exists(&mut self, if_exists: bool) {
        if if_exists {
            self.push("if exists ");
        }
    }

    fn cascade(&mut self, cascade: bool) {
        if cascade {
            self.push(" cascade");
        }
    }

    fn visit_schemable_identifier(&mut self, node: &SchemableIdentifierNode) {
        if let Some(schema) = &node.schema {
            self.ident(&schema.name);
            self.push(".");
        }
        self.ident(&node.identifier.name);
    }

    fn visit_table(&mut self, node: &TableNode) {
        self.visit_schemable_identifier(&node.table);
    }

    fn visit_reference(&mut self, node: &ReferenceNode) {
        if let Some(table) = &node.table {
            self.visit_table(table);
            self.push(".");
        }
        self.visit_node(&node.column);
    }

    fn visit_alias(&mut self, node: &AliasNode) {
        self.visit_node(&node.node);
        self.push(" as ");
        self.ident(&node.alias.name);
    }

    /// Raw text never delimits a statement, so parameters render as nested.
    fn visit_raw(&mut self, node: &RawNode) {
        let nested = std::mem::replace(&mut self.nested, true);
        for (i, fragment) in node.sql_fragments.iter().enumerate() {
            self.push(fragment);
            if let Some(parameter) = node.parameters.get(i) {
                self.visit_node(parameter);
            }
        }
        self.nested = nested;
    }

    fn visit_value(&mut self, node: &ValueNode) {
        if self.inline_values {
            let literal = match &node.value {
                Value::Bool(b) => self.dialect.bool_literal(*b),
                other => other.to_string(),
            };
            self.push(&literal);
        } else {
            self.parameters.push(node.value.clone());
            let placeholder = self.dialect.placeholder(self.parameters.len());
            self.push(&placeholder);
        }
    }

    fn visit_value_list(&mut self, node: &ValueListNode) {
        self.push("(");
        self.nodes(&node.values);
        self.push(")");
    }

    fn visit_values(&mut self, node: &ValuesNode) {
        self.push("values ");
        self.list(&node.values, |w, row| w.visit_value_list(row));
    }

    fn visit_binary_operation(&mut self, node: &BinaryOperationNode) {
        self.visit_node(&node.left_operand);
        self.push(" ");
        self.push(node.operator.operator.sql_symbol());
        self.push(" ");
        self.visit_node(&node.right_operand);
    }

    fn visit_unary_operation(&mut self, node: &UnaryOperationNode) {
        let operator = node.operator.operator;
        self.push(operator.sql_symbol());
        if operator.is_keyword() {
            self.push(" ");
        }
        self.visit_node(&node.operand);
    }

    fn visit_logical(&mut self, left: &OperationNode, keyword: &str, right: &OperationNode) {
        self.visit_node(left);
        self.push(" ");
        self.push(keyword);
        self.push(" ");
        self.visit_node(right);
    }

    fn visit_function(&mut self, node: &FunctionNode) {
        self.push(&node.func);
        self.push("(");
        if node.distinct {
            self.push("distinct ");
        }
        self.nodes(&node.arguments);
        self.push(")");
    }

    fn visit_from(&mut self, node: &FromNode) {
        self.push("from ");
        self.nodes(&node.froms);
    }

    fn visit_join(&mut self, node: &JoinNode) {
        self.push(node.join_type.sql_keyword());
        self.push(" ");
        self.visit_node(&node.table);
        if let Some(on) = &node.on {
            self.push(" ");
            self.visit_on(on);
        }
    }

    fn visit_on(&mut self, node: &OnNode) {
        self.push("on ");
        self.visit_node(&node.on);
    }

    fn visit_where(&mut self, node: &WhereNode) {
        self.push("where ");
        self.visit_node(&node.filter);
    }

    fn visit_order_by(&mut self, node: &OrderByNode) {
        self.push("order by ");
        self.list(&node.items, |w, item| w.visit_order_by_item(item));
    }

    fn visit_order_by_item(&mut self, node: &OrderByItemNode) {
        self.visit_node(&node.order_by);
        match node.direction {
            Some(OrderDirection::Asc) => self.push(" asc"),
            Some(OrderDirection::Desc) => self.push(" desc"),
            None => {}
        }
    }

    fn visit_returning(&mut self, node: &ReturningNode) {
        self.push("returning ");
        self.list(&node.selections, |w, s| w.visit_node(&s.selection));
    }

    fn visit_column_update(&mut self, node: &ColumnUpdateNode) {
        self.ident(&node.column.column.name);
        self.push(" = ");
        self.visit_node(&node.value);
    }

    fn visit_set_operation(&mut self, node: &SetOperationNode) {
        self.push(match node.operator {
            SetOperator::Union => "union ",
            SetOperator::Intersect => "intersect ",
            SetOperator::Except => "except ",
        });
        if node.all {
            self.push("all ");
        }
        self.bare(&node.expression);
    }

    fn visit_with(&mut self, node: &WithNode) {
        self.push(if node.recursive { "with recursive " } else { "with " });
        self.list(&node.expressions, |w, cte| w.visit_common_table_expression(cte));
    }

    fn visit_common_table_expression(&mut self, node: &CommonTableExpressionNode) {
        self.visit_common_table_expression_name(&node.name);
        self.push(" as (");
        self.bare(&node.expression);
        self.push(")");
    }

    fn visit_common_table_expression_name(&mut self, node: &CommonTableExpressionNameNode) {
        self.visit_table(&node.table);
        if !node.columns.is_empty() {
            self.push("(");
            self.list(&node.columns, |w, c| w.ident(&c.column.name));
            self.push(")");
        }
    }

    fn with_prefix(&mut self, with: &Option<Arc<WithNode>>) {
        if let Some(with) = with {
            self.visit_with(with);
            self.push(" ");
        }
    }

    fn joins(&mut self, joins: &[Arc<JoinNode>]) {
        for join in joins {
            self.push(" ");
            self.visit_join(join);
        }
    }

    fn filter(&mut self, filter: &Option<Arc<WhereNode>>) {
        if let Some(filter) = filter {
            self.push(" ");
            self.visit_where(filter);
        }
    }

    fn returning(&mut self, returning: &Option<Arc<ReturningNode>>) {
        if let Some(returning) = returning {
            self.push(" ");
            self.visit_returning(returning);
        }
    }

    fn visit_select_query(&mut self, node: &SelectQueryNode) {
        self.with_prefix(&node.with);
        self.push("select ");
        if node.distinct {
            self.push("distinct ");
        }
        if node.selections.is_empty() {
            self.push("*");
        } else {
            self.list(&node.selections, |w, s| w.visit_node(&s.selection));
        }
        if let Some(from) = &node.from {
            self.push(" ");
            self.visit_from(from);
        }
        self.joins(&node.joins);
        self.filter(&node.filter);
        if let Some(group_by) = &node.group_by {
            self.push(" group by ");
            self.nodes(&group_by.items);
        }
        if let Some(having) = &node.having {
            self.push(" having ");
            self.visit_node(&having.having);
        }
        if let Some(order_by) = &node.order_by {
            self.push(" ");
            self.visit_order_by(order_by);
        }
        if let Some(limit) = &node.limit {
            self.push(" limit ");
            self.visit_node(&limit.limit);
        }
        if let Some(offset) = &node.offset {
            self.push(" offset ");
            self.visit_node(&offset.offset);
        }
        for set_operation in &node.set_operations {
            self.push(" ");
            self.visit_set_operation(set_operation);
        }
    }

    fn visit_insert_query(&mut self, node: &InsertQueryNode) {
        self.with_prefix(&node.with);
        self.push("insert into ");
        self.visit_table(&node.into);
        if !node.columns.is_empty() {
            self.push(" (");
            self.list(&node.columns, |w, c| w.ident(&c.column.name));
            self.push(")");
        }
        match &node.values {
            Some(values) => {
                self.push(" ");
                self.bare(values);
            }
            None => self.push(" default values"),
        }
        self.returning(&node.returning);
    }

    fn visit_update_query(&mut self, node: &UpdateQueryNode) {
        self.with_prefix(&node.with);
        self.push("update ");
        self.visit_node(&node.table);
        if !node.updates.is_empty() {
            self.push(" set ");
            self.list(&node.updates, |w, u| w.visit_column_update(u));
        }
        if let Some(from) = &node.from {
            self.push(" ");
            self.visit_from(from);
        }
        self.joins(&node.joins);
        self.filter(&node.filter);
        self.returning(&node.returning);
    }

    fn visit_delete_query(&mut self, node: &DeleteQueryNode) {
        self.with_prefix(&node.with);
        self.push("delete ");
        self.visit_from(&node.from);
        if let Some(using) = &node.using {
            self.push(" using ");
            self.nodes(&using.froms);
        }
        self.joins(&node.joins);
        self.filter(&node.filter);
        self.returning(&node.returning);
    }

    fn visit_column_definition(&mut self, node: &ColumnDefinitionNode) {
        self.ident(&node.column.column.name);
        self.push(" ");
        self.push(&node.data_type.data_type);
        if node.primary_key {
            self.push(" primary key");
        }
        if node.not_null {
            self.push(" not null");
        }
        if node.unique {
            self.push(" unique");
        }
        if let Some(default_to) = &node.default_to {
            self.push(" default ");
            self.visit_node(default_to);
        }
        if let Some(references) = &node.references {
            self.push(" ");
            self.visit_references(references);
        }
    }

    fn visit_references(&mut self, node: &ReferencesNode) {
        self.push("references ");
        self.visit_table(&node.table);
        if !node.columns.is_empty() {
            self.push(" (");
            self.list(&node.columns, |w, c| w.ident(&c.column.name));
            self.push(")");
        }
        if let Some(on_delete) = node.on_delete {
            self.push(" on delete ");
            self.push(on_delete.sql_keyword());
        }
    }

    fn visit_alter_table(&mut self, node: &AlterTableNode) {
        self.push("alter table ");
        self.visit_table(&node.table);
        if let Some(rename_to) = &node.rename_to {
            self.push(" rename to ");
            self.ident(rename_to.table.name());
        }
        if let Some(schema) = &node.set_schema {
            self.push(" set schema ");
            self.ident(&schema.name);
        }
        if !node.column_alterations.is_empty() {
            self.push(" ");
            self.nodes(&node.column_alterations);
        }
    }

    fn visit_create_table(&mut self, node: &CreateTableNode) {
        self.push(if node.temporary { "create temporary table " } else { "create table " });
        if node.if_not_exists {
            self.push("if not exists ");
        }
        self.visit_table(&node.table);
        self.push(" (");
        self.list(&node.columns, |w, c| w.visit_column_definition(c));
        self.push(")");
    }

    fn visit_create_view(&mut self, node: &CreateViewNode) {
        self.push("create ");
        if node.or_replace {
            self.push("or replace ");
        }
        if node.temporary {
            self.push("temporary ");
        }
        if node.materialized {
            self.push("materialized ");
        }
        self.push("view ");
        if node.if_not_exists {
            self.push("if not exists ");
        }
        self.visit_schemable_identifier(&node.name);
        if !node.columns.is_empty() {
            self.push(" (");
            self.list(&node.columns, |w, c| w.ident(&c.column.name));
            self.push(")");
        }
        if let Some(query) = &node.as_query {
            self.push(" as ");
            self.bare(query);
        }
    }

    fn visit_create_index(&mut self, node: &CreateIndexNode) {
        self.push(if node.unique { "create unique index " } else { "create index " });
        if node.if_not_exists {
            self.push("if not exists ");
        }
        self.ident(&node.name.name);
        if let Some(table) = &node.table {
            self.push(" on ");
            self.visit_table(table);
        }
        if let Some(using) = &node.using {
            self.push(" using ");
            self.push(using);
        }
        if !node.columns.is_empty() {
            self.push(" (");
            self.nodes(&node.columns);
            self.push(")");
        }
        self.filter(&node.filter);
    }

    fn visit_create_type(&mut self, node: &CreateTypeNode) {
        self.push("create type ");
        self.visit_schemable_identifier(&node.name);
        if let Some(values) = &node.enum_values {
            self.push(" as enum ");
            self.visit_value_list(values);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::compiler::{PostgresDialect, SqliteDialect};

    fn compile(query: impl Into<RootOperationNode>) -> CompiledQuery {
        DefaultQueryCompiler::new(PostgresDialect).compile_query(&query.into())
    }

    fn person_by_id() -> SelectQueryNode {
        SelectQueryNode::create(vec![TableNode::create("person").into()])
            .with_selections(vec![ReferenceNode::parse("first_name")])
            .with_where(BinaryOperationNode::create(
                ReferenceNode::parse("id"),
                Operator::Eq,
                ValueNode::create(1),
            ))
    }

    #[test]
    fn test_select_with_parameter() {
        let compiled = compile(person_by_id());
        assert_eq!(compiled.sql, "select first_name from person where id = $1");
        assert_eq!(compiled.parameters, vec![Value::Int(1)]);
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let query: RootOperationNode = person_by_id().into();
        let compiler = DefaultQueryCompiler::new(PostgresDialect);
        let a = compiler.compile_query(&query);
        let b = compiler.compile_query(&query);

        assert_eq!(a.sql, b.sql);
        assert_eq!(a.parameters, b.parameters);
        assert_ne!(a.query_id, b.query_id);
        assert!(a.query.ptr_eq(&query));
    }

    #[test]
    fn test_parameters_in_left_to_right_order() {
        let query = SelectQueryNode::create(vec![TableNode::create("pet").into()])
            .with_where(BinaryOperationNode::create(
                ReferenceNode::parse("species"),
                Operator::Eq,
                ValueNode::create("cat"),
            ))
            .with_where(BinaryOperationNode::create(
                ReferenceNode::parse("age"),
                Operator::Gt,
                ValueNode::create(3),
            ))
            .with_limit(ValueNode::create(10));

        let compiled = compile(query);
        assert_eq!(
            compiled.sql,
            "select * from pet where species = $1 and age > $2 limit $3"
        );
        assert_eq!(
            compiled.parameters,
            vec![Value::String("cat".into()), Value::Int(3), Value::Int(10)]
        );
    }

    #[test]
    fn test_sqlite_placeholders_and_quoting() {
        let compiled = DefaultQueryCompiler::new(SqliteDialect).compile_query(&person_by_id().into());
        assert_eq!(
            compiled.sql,
            "select \"first_name\" from \"person\" where \"id\" = ?"
        );
    }

    #[test]
    fn test_nested_select_gets_parens() {
        let inner = SelectQueryNode::create(vec![TableNode::create("pet").into()])
            .with_selections(vec![ReferenceNode::parse("id")]);
        let outer = SelectQueryNode::create(vec![AliasNode::create(inner, "p").into()]);
        assert_eq!(compile(outer).sql, "select * from (select id from pet) as p");
    }

    #[test]
    fn test_common_table_expression() {
        let query = SelectQueryNode::create(vec![TableNode::create("foo").into()]).with_cte(
            WithNode::create(vec![CommonTableExpressionNode::create(
                "foo",
                SelectQueryNode::create(vec![TableNode::create("bar").into()]),
            )]),
        );
        assert_eq!(
            compile(query).sql,
            "with foo as (select * from bar) select * from foo"
        );
    }

    #[test]
    fn test_insert_values_returning() {
        let query = InsertQueryNode::create(TableNode::create_with_schema("app", "person"))
            .with_columns(&["first_name", "age"])
            .with_values(ValuesNode::create(vec![ValueListNode::create(vec![
                ValueNode::create("Jennifer").into(),
                ValueNode::create(40).into(),
            ])]))
            .with_returning(vec![ReferenceNode::parse("id")]);

        let compiled = compile(query);
        assert_eq!(
            compiled.sql,
            "insert into app.person (first_name, age) values ($1, $2) returning id"
        );
        assert_eq!(compiled.parameters.len(), 2);
    }

    #[test]
    fn test_update_and_delete() {
        let update = UpdateQueryNode::create(TableNode::create("person"))
            .with_update(ColumnUpdateNode::create("first_name", ValueNode::create("Jen")))
            .with_where(BinaryOperationNode::create(
                ReferenceNode::parse("id"),
                Operator::Eq,
                ValueNode::create(1),
            ));
        assert_eq!(
            compile(update).sql,
            "update person set first_name = $1 where id = $2"
        );

        let delete = DeleteQueryNode::create(vec![TableNode::create("person").into()])
            .with_where(BinaryOperationNode::create(
                ReferenceNode::parse("id"),
                Operator::In,
                ValueListNode::create(vec![ValueNode::create(1).into(), ValueNode::create(2).into()]),
            ));
        assert_eq!(compile(delete).sql, "delete from person where id in ($1, $2)");
    }

    #[test]
    fn test_reserved_identifiers_are_quoted() {
        let query = SelectQueryNode::create(vec![TableNode::create("user").into()])
            .with_selections(vec![ReferenceNode::parse("user.order")]);
        assert_eq!(compile(query).sql, "select \"user\".\"order\" from \"user\"");
    }

    #[test]
    fn test_raw_root_with_values() {
        let raw = RawNode::with_values(
            "select * from person where age > ? and name = ?",
            vec![ValueNode::create(18), ValueNode::create("x")],
        )
        .unwrap();
        let compiled = compile(raw);
        assert_eq!(
            compiled.sql,
            "select * from person where age > $1 and name = $2"
        );
        assert_eq!(compiled.parameters, vec![Value::Int(18), Value::String("x".into())]);
    }

    #[test]
    fn test_statement_inside_raw_root_is_parenthesized() {
        let inner = SelectQueryNode::create(vec![TableNode::create("t").into()])
            .with_where(BinaryOperationNode::create(ReferenceNode::parse("id"), Operator::Eq, ValueNode::create(7)));
        let raw = RawNode::create(
            vec!["select exists ".to_string(), " as found".to_string()],
            vec![inner.into()],
        )
        .unwrap();

        let compiled = compile(raw);
        assert_eq!(compiled.sql, "select exists (select * from t where id = $1) as found");
        assert_eq!(compiled.parameters, vec![Value::Int(7)]);
    }

    #[test]
    fn test_create_table_inlines_values() {
        let mut owner_ref = ReferencesNode::create(TableNode::create_with_schema("org", "owner"), &["id"]);
        owner_ref.on_delete = Some(OnModifyAction::Cascade);

        let query = CreateTableNode::create(TableNode::create("person"))
            .if_not_exists()
            .with_column(ColumnDefinitionNode::create("id", "integer").primary_key())
            .with_column(
                ColumnDefinitionNode::create("owner_id", "integer")
                    .not_null()
                    .references(owner_ref),
            )
            .with_column(ColumnDefinitionNode::create("active", "boolean").default_to(ValueNode::create(true)));

        let compiled = compile(query);
        assert_eq!(
            compiled.sql,
            "create table if not exists person (id integer primary key, \
             owner_id integer not null references org.owner (id) on delete cascade, \
             active boolean default true)"
        );
        assert!(compiled.parameters.is_empty());
    }

    #[test]
    fn test_create_type_and_drops() {
        let create = CreateTypeNode::create("mood").as_enum(&["happy", "sad"]);
        assert_eq!(compile(create).sql, "create type mood as enum ('happy', 'sad')");

        let mut drop = DropTableNode::create(TableNode::create("person")).if_exists();
        drop.cascade = true;
        assert_eq!(compile(drop).sql, "drop table if exists person cascade");

        let alter = AlterTableNode::create(TableNode::create("person"))
            .with_add_column(ColumnDefinitionNode::create("age", "integer"))
            .with_drop_column("nickname");
        assert_eq!(
            compile(alter).sql,
            "alter table person add column age integer, drop column nickname"
        );
    }
}
