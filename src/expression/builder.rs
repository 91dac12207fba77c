//! The contextual handle passed to expression factories.

use crate::ast::*;

use super::{Expression, OperationNodeSource};

/// Minimal expression constructors handed to factory closures.
///
/// ```ignore
/// let node = parse_expression(ExpressionInput::factory(|eb| {
///     eb.cmp(&eb.ref_::<i64>("person.age"), Operator::Gt, &eb.val(18))
/// }))?;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionBuilder {
    _private: (),
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A column reference: `"column"`, `"table.column"`, `"schema.table.column"` or `"*"`.
    pub fn ref_<T>(&self, reference: &str) -> Expression<T> {
        Expression::new(ReferenceNode::parse(reference))
    }

    /// A runtime value, compiled as a parameter.
    pub fn val<T: Into<Value>>(&self, value: T) -> Expression<T> {
        Expression::new(ValueNode::create(value))
    }

    /// Raw SQL inserted verbatim.
    pub fn raw<T>(&self, sql: &str) -> Expression<T> {
        Expression::new(RawNode::create_with_sql(sql))
    }

    pub fn cmp(
        &self,
        lhs: &dyn OperationNodeSource,
        op: Operator,
        rhs: &dyn OperationNodeSource,
    ) -> Expression<bool> {
        Expression::new(BinaryOperationNode::create(
            lhs.to_operation_node(),
            op,
            rhs.to_operation_node(),
        ))
    }

    /// `a AND b AND ...`. An empty list is `true`.
    pub fn and(&self, exprs: &[&dyn OperationNodeSource]) -> Expression<bool> {
        self.chain(exprs, "true", |l, r| AndNode::create(l, r).into())
    }

    /// `a OR b OR ...`. An empty list is `false`.
    pub fn or(&self, exprs: &[&dyn OperationNodeSource]) -> Expression<bool> {
        self.chain(exprs, "false", |l, r| OrNode::create(l, r).into())
    }

    pub fn not(&self, expr: &dyn OperationNodeSource) -> Expression<bool> {
        Expression::new(UnaryOperationNode::create(Operator::Not, expr.to_operation_node()))
    }

    pub fn exists(&self, subquery: &dyn OperationNodeSource) -> Expression<bool> {
        Expression::new(UnaryOperationNode::create(
            Operator::Exists,
            ParensNode::create(subquery.to_operation_node()),
        ))
    }

    pub fn parens<T>(&self, expr: &Expression<T>) -> Expression<T> {
        Expression::new(ParensNode::create(expr.to_operation_node()))
    }

    pub fn fn_<T>(&self, name: &str, args: &[&dyn OperationNodeSource]) -> Expression<T> {
        Expression::new(FunctionNode::create(
            name,
            args.iter().map(|a| a.to_operation_node()).collect(),
        ))
    }

    /// A bare select over one table, to be refined with the node's `with_*` methods.
    pub fn select_from(&self, table: &str) -> SelectQueryNode {
        SelectQueryNode::create(vec![TableNode::parse(table).into()])
    }

    fn chain(
        &self,
        exprs: &[&dyn OperationNodeSource],
        empty: &str,
        combine: impl Fn(OperationNode, OperationNode) -> OperationNode,
    ) -> Expression<bool> {
        let mut nodes = exprs.iter().map(|e| e.to_operation_node());
        let Some(first) = nodes.next() else {
            return self.raw(empty);
        };
        let combined = nodes.fold(first, |acc, next| combine(acc, next));
        // Multi-term chains are parenthesized so they nest safely.
        if exprs.len() > 1 {
            Expression::new(ParensNode::create(combined))
        } else {
            Expression::new(combined)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_parsing() {
        let eb = ExpressionBuilder::new();
        match eb.ref_::<i64>("person.age").to_operation_node() {
            OperationNode::Reference(reference) => {
                let table = reference.table.as_ref().unwrap();
                assert_eq!(table.table.name(), "person");
                assert_eq!(reference.column.kind(), NodeKind::Column);
            }
            other => panic!("expected reference, got {}", other.kind()),
        }
        assert_eq!(eb.ref_::<()>("*").to_operation_node().kind(), NodeKind::SelectAll);
    }

    #[test]
    fn test_and_chain() {
        let eb = ExpressionBuilder::new();
        let a = eb.cmp(&eb.ref_::<i64>("a"), Operator::Eq, &eb.val(1));
        let b = eb.cmp(&eb.ref_::<i64>("b"), Operator::Eq, &eb.val(2));

        let node = eb.and(&[&a, &b]).to_operation_node();
        let OperationNode::Parens(parens) = node else {
            panic!("expected parens");
        };
        assert_eq!(parens.node.kind(), NodeKind::And);

        assert_eq!(eb.and(&[]).to_operation_node().kind(), NodeKind::Raw);
        assert_eq!(eb.or(&[&a]).to_operation_node().kind(), NodeKind::BinaryOperation);
    }
}
