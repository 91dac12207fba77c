//! Operators and expression nodes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::OperationNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Is,
    IsNot,
    Like,
    NotLike,
    ILike,
    NotILike,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Concat,
    Not,
    Exists,
    NotExists,
    Minus,
}

impl Operator {
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Is => "is",
            Operator::IsNot => "is not",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::ILike => "ilike",
            Operator::NotILike => "not ilike",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Concat => "||",
            Operator::Not => "not",
            Operator::Exists => "exists",
            Operator::NotExists => "not exists",
            Operator::Minus => "-",
        }
    }

    /// Keyword operators are separated from their operand by a space.
    pub fn is_keyword(&self) -> bool {
        matches!(self, Operator::Not | Operator::Exists | Operator::NotExists)
    }
}

impl std::str::FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.to_lowercase().as_str() {
            "=" => Operator::Eq,
            "<>" | "!=" => Operator::Ne,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            "in" => Operator::In,
            "not in" => Operator::NotIn,
            "is" => Operator::Is,
            "is not" => Operator::IsNot,
            "like" => Operator::Like,
            "not like" => Operator::NotLike,
            "ilike" => Operator::ILike,
            "not ilike" => Operator::NotILike,
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" => Operator::Div,
            "%" => Operator::Mod,
            "||" => Operator::Concat,
            "not" => Operator::Not,
            "exists" => Operator::Exists,
            "not exists" => Operator::NotExists,
            other => return Err(format!("Invalid operator: '{}'", other)),
        };
        Ok(op)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorNode {
    pub operator: Operator,
}

impl OperatorNode {
    pub fn create(operator: Operator) -> Self {
        Self { operator }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOperationNode {
    pub left_operand: OperationNode,
    pub operator: Arc<OperatorNode>,
    pub right_operand: OperationNode,
}

impl BinaryOperationNode {
    pub fn create(
        left_operand: impl Into<OperationNode>,
        operator: Operator,
        right_operand: impl Into<OperationNode>,
    ) -> Self {
        Self {
            left_operand: left_operand.into(),
            operator: Arc::new(OperatorNode::create(operator)),
            right_operand: right_operand.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryOperationNode {
    pub operator: Arc<OperatorNode>,
    pub operand: OperationNode,
}

impl UnaryOperationNode {
    pub fn create(operator: Operator, operand: impl Into<OperationNode>) -> Self {
        Self {
            operator: Arc::new(OperatorNode::create(operator)),
            operand: operand.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndNode {
    pub left: OperationNode,
    pub right: OperationNode,
}

impl AndNode {
    pub fn create(left: impl Into<OperationNode>, right: impl Into<OperationNode>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrNode {
    pub left: OperationNode,
    pub right: OperationNode,
}

impl OrNode {
    pub fn create(left: impl Into<OperationNode>, right: impl Into<OperationNode>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParensNode {
    pub node: OperationNode,
}

impl ParensNode {
    pub fn create(node: impl Into<OperationNode>) -> Self {
        Self { node: node.into() }
    }
}

/// Function call: `name(arg, ...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionNode {
    pub func: String,
    #[serde(default)]
    pub arguments: Vec<OperationNode>,
    #[serde(default)]
    pub distinct: bool,
}

impl FunctionNode {
    pub fn create(func: impl Into<String>, arguments: Vec<OperationNode>) -> Self {
        Self {
            func: func.into(),
            arguments,
            distinct: false,
        }
    }
}
