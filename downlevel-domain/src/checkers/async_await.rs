use downlevel_pass_api::{CheckViolation, Checker};
use downlevel_pass_catalog::{CheckerMeta, NO_ASYNC_AWAIT};
use downlevel_tree::{Expr, Module, NodeRef, Stmt, walk};
use downlevel_types::BuildConfig;

#[derive(Debug, Default)]
pub struct NoAsyncAwaitChecker;

fn is_async_construct(node: NodeRef<'_>) -> bool {
    match node {
        NodeRef::Stmt(s) => matches!(
            s,
            Stmt::AsyncFunctionDef(_) | Stmt::AsyncFor(_) | Stmt::AsyncWith(_)
        ),
        NodeRef::Expr(e) => matches!(e, Expr::Await { .. }),
        NodeRef::Comprehension(c) => c.is_async,
        _ => false,
    }
}

impl Checker for NoAsyncAwaitChecker {
    fn meta(&self) -> &'static CheckerMeta {
        &NO_ASYNC_AWAIT
    }

    fn check(&self, _config: &BuildConfig, module: &Module) -> Result<(), CheckViolation> {
        match walk(module).find(|n| is_async_construct(*n)) {
            Some(node) => Err(CheckViolation::new(
                self.meta().key,
                format!("prohibited use of async/await ({})", node.kind()),
            )
            .at_ref(node)),
            None => Ok(()),
        }
    }
}
