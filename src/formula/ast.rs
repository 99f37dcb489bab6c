use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||"
        }
    }
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>
    },
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>
    },
    /// The argument list length is the call's arity.
    Call { name: String, args: Vec<Expr> }
}

impl Expr {
    pub fn depth(&self) -> usize {
        1 + match self {
            Expr::Number(_) | Expr::Variable(_) => 0,
            Expr::Unary { operand, .. } => operand.depth(),
            Expr::Binary { left, right, .. } => left.depth().max(right.depth()),
            Expr::Conditional {
                condition,
                then_branch,
                else_branch
            } => condition.depth().max(then_branch.depth()).max(else_branch.depth()),
            Expr::Call { args, .. } => args.iter().map(Expr::depth).max().unwrap_or(0)
        }
    }

    pub fn node_count(&self) -> usize {
        1 + match self {
            Expr::Number(_) | Expr::Variable(_) => 0,
            Expr::Unary { operand, .. } => operand.node_count(),
            Expr::Binary { left, right, .. } => left.node_count() + right.node_count(),
            Expr::Conditional {
                condition,
                then_branch,
                else_branch
            } => condition.node_count() + then_branch.node_count() + else_branch.node_count(),
            Expr::Call { args, .. } => args.iter().map(Expr::node_count).sum()
        }
    }
}

/// Fully parenthesized rendering, mainly for debugging and error reports.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Unary { op, operand } => write!(f, "({}{})", op.symbol(), operand),
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Conditional {
                condition,
                then_branch,
                else_branch
            } => write!(f, "({} ? {} : {})", condition, then_branch, else_branch),
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A parsed formula. Built once per formula string and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub root: Expr
}

impl Ast {
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
