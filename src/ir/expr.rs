//! Elaborated expressions, names and local contexts
//!
//! These are deliberately shallow. The query engine only ever asks two things
//! of an expression: "is this a constant, and which one?" and "is this a
//! placeholder sorry inserted by the elaborator?". Everything else goes to the
//! `MetaService` untouched.

use std::fmt;
use std::sync::Arc;

use super::persistent_seq::PersistentSequence;

/// Hierarchical declaration name such as `Nat.add`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(name: impl AsRef<str>) -> Self {
        Name(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Components split on `.`
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for Name {
    /// The anonymous name
    fn default() -> Self {
        Name(Arc::from(""))
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Name::new(name)
    }
}

/// Metavariable (goal) identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MVarId(pub Name);

impl fmt::Display for MVarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Nat(u64),
    Str(Arc<str>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Const(Name),
    /// Free (local) variable
    FVar(Name),
    MVar(MVarId),
    Sort(u32),
    App(Arc<Expr>, Arc<Expr>),
    Lam {
        binder: Name,
        ty: Arc<Expr>,
        body: Arc<Expr>,
    },
    Lit(Literal),
    /// `sorry`; `synthetic` marks placeholders the elaborator inserted after an error
    Sorry { synthetic: bool },
}

impl Expr {
    pub fn constant(name: impl AsRef<str>) -> Self {
        Expr::Const(Name::new(name))
    }

    pub fn app(f: Expr, arg: Expr) -> Self {
        Expr::App(Arc::new(f), Arc::new(arg))
    }

    /// Name of the referenced declaration, only for a bare constant
    pub fn const_name(&self) -> Option<&Name> {
        match self {
            Expr::Const(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_synthetic_sorry(&self) -> bool {
        matches!(self, Expr::Sorry { synthetic: true })
    }
}

/// Plain structural rendering, used for logs and by simple service implementations
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(name) | Expr::FVar(name) => write!(f, "{}", name),
            Expr::MVar(id) => write!(f, "{}", id),
            Expr::Sort(0) => write!(f, "Prop"),
            Expr::Sort(1) => write!(f, "Type"),
            Expr::Sort(level) => write!(f, "Type {}", level - 1),
            Expr::App(fun, arg) => match &**arg {
                Expr::App(..) | Expr::Lam { .. } => write!(f, "{} ({})", fun, arg),
                _ => write!(f, "{} {}", fun, arg),
            },
            Expr::Lam { binder, ty, body } => write!(f, "fun ({} : {}) => {}", binder, ty, body),
            Expr::Lit(Literal::Nat(n)) => write!(f, "{}", n),
            Expr::Lit(Literal::Str(s)) => write!(f, "{:?}", s),
            Expr::Sorry { .. } => write!(f, "sorry"),
        }
    }
}

/// A local hypothesis `name : ty`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDecl {
    pub name: Name,
    pub ty: Expr,
}

/// Local variables in scope at an info node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalContext {
    decls: PersistentSequence<LocalDecl>,
}

impl LocalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a context extended with one more declaration, sharing the rest
    #[must_use]
    pub fn with_decl(&self, name: impl AsRef<str>, ty: Expr) -> Self {
        Self {
            decls: self.decls.push_back(LocalDecl {
                name: Name::new(name),
                ty,
            }),
        }
    }

    /// Innermost declaration with this name (later declarations shadow earlier ones)
    pub fn find(&self, name: &Name) -> Option<&LocalDecl> {
        self.decls.iter().filter(|decl| &decl.name == name).last()
    }

    pub fn decls(&self) -> &PersistentSequence<LocalDecl> {
        &self.decls
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
