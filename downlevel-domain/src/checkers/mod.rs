use downlevel_tree::{Alias, ExprContext, NodeRef, Stmt};

mod async_await;
mod open_mode;
mod overrides;
mod star_imports;

pub use async_await::NoAsyncAwaitChecker;
pub use open_mode::NoOpenWithEncodingChecker;
pub use overrides::{NoOverriddenBuiltinsChecker, NoOverriddenStdlibImportsChecker};
pub use star_imports::NoStarImportsChecker;

/// How an import alias binds a name in scope.
#[derive(Clone, Copy)]
enum AliasBinding {
    /// Only an explicit `as name` counts.
    AsNameOnly,
    /// `as name`, otherwise the imported name itself.
    Effective,
}

/// Name `node` binds in its scope, if it binds one.
///
/// Function and class definitions, store targets, import aliases and
/// parameters bind names.
fn bound_name<'a>(node: NodeRef<'a>, aliases: AliasBinding) -> Option<&'a str> {
    match node {
        NodeRef::Stmt(Stmt::FunctionDef(f) | Stmt::AsyncFunctionDef(f)) => Some(f.name.as_str()),
        NodeRef::Stmt(Stmt::ClassDef(c)) => Some(c.name.as_str()),
        NodeRef::Expr(downlevel_tree::Expr::Name {
            id,
            ctx: ExprContext::Store,
        }) => Some(id.as_str()),
        NodeRef::Alias(Alias { name, asname }) => match aliases {
            AliasBinding::AsNameOnly => asname.as_deref(),
            AliasBinding::Effective => Some(asname.as_deref().unwrap_or(name.as_str())),
        },
        NodeRef::Arg(a) => Some(a.arg.as_str()),
        _ => None,
    }
}
