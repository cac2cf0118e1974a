//! Expression and statement trees
//!
//! Both unions are closed: the code generator matches exhaustively, so a
//! new variant cannot be added without the compiler pointing at every
//! place that must handle it.

/// A value-producing expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, lexeme kept verbatim
    Number(String),
    /// Variable or dotted reference
    Ident(String),
    /// String literal
    Str(String),
    /// Boolean literal
    Bool(bool),
    /// None literal
    NoneLit,
    /// Unary operation
    Unary { op: UnOp, operand: Box<Expr> },
    /// Binary operation
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// Function call (name + ordered arguments)
    Call { name: String, args: Vec<Expr> },
    /// Indexing (target[index])
    Index { target: Box<Expr>, index: Box<Expr> },
    /// List literal
    List(Vec<Expr>),
    /// Dict literal (ordered key/value pairs)
    Dict(Vec<(Expr, Expr)>),
    /// Interpolated string: ordered literal-text and expression segments
    FString(Vec<Segment>),
}

/// One piece of an interpolated string
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Expr(Expr),
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinOp {
    /// Python spelling
    pub fn py(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }

    /// Binding power, mirroring the token-level Pratt table
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 10,
            BinOp::And => 20,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 30,
            BinOp::Add | BinOp::Sub => 40,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 50,
            BinOp::Pow => 60,
        }
    }

    /// Arithmetic and comparison operators exercise the math concept
    pub fn is_math(self) -> bool {
        !matches!(self, BinOp::And | BinOp::Or)
    }
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// -
    Neg,
    /// +
    Pos,
    /// not
    Not,
}

/// A whole-line statement.
///
/// Built exactly once per input line or clause by the statement rules and
/// consumed exactly once by the code generator; bodies are ordered
/// sub-statement sequences, so nesting is arbitrary but acyclic.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// name = value
    Assign { name: String, value: Expr },
    /// name op= value
    AugAssign {
        name: String,
        op: BinOp,
        value: Expr,
    },
    /// print(value)
    Print(Expr),
    /// Conditional with optional elif chain and else body
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        elif_branches: Vec<(Expr, Vec<Stmt>)>,
        else_body: Option<Vec<Stmt>>,
    },
    /// Bounded-count loop over `range(count)`
    ForRange {
        var: String,
        count: Expr,
        body: Vec<Stmt>,
    },
    /// Conditional loop
    While { cond: Expr, body: Vec<Stmt> },
    /// def name(params):
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// return [value]
    Return(Option<Expr>),
    /// Bare expression statement
    ExprStmt(Expr),
    /// name = [items]
    ListCreate { name: String, items: Vec<Expr> },
    /// name = {pairs}
    DictCreate {
        name: String,
        pairs: Vec<(Expr, Expr)>,
    },
    /// name.sort()
    Sort { name: String },
    /// name.append(value)
    Append { name: String, value: Expr },
    /// name.remove(value)
    Remove { name: String, value: Expr },
    /// import module
    Import { module: String },
    /// name = input(prompt)
    Input { name: String, prompt: String },
    /// Passthrough comment
    Comment(String),
    /// pass
    Pass,
    /// Input understood as ambiguous; carries follow-up questions instead
    /// of a direct translation
    Clarify {
        original: String,
        explanation: String,
        questions: Vec<String>,
    },
}
