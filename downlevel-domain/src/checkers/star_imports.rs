use downlevel_pass_api::{CheckViolation, Checker};
use downlevel_pass_catalog::{CheckerMeta, NO_STAR_IMPORTS};
use downlevel_tree::{Module, NodeRef, Stmt, walk};
use downlevel_types::BuildConfig;

#[derive(Debug, Default)]
pub struct NoStarImportsChecker;

impl Checker for NoStarImportsChecker {
    fn meta(&self) -> &'static CheckerMeta {
        &NO_STAR_IMPORTS
    }

    fn check(&self, _config: &BuildConfig, module: &Module) -> Result<(), CheckViolation> {
        for node in walk(module) {
            let NodeRef::Stmt(stmt @ Stmt::ImportFrom { module: from, names, level }) = node else {
                continue;
            };
            if names.iter().any(|a| a.name == "*") {
                let dots = ".".repeat(*level as usize);
                let from = from.as_deref().unwrap_or_default();
                return Err(CheckViolation::new(
                    self.meta().key,
                    format!("prohibited `from {dots}{from} import *`"),
                )
                .at(stmt.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use downlevel_tree::Alias;

    fn import_from(module: &str, level: u32, name: &str) -> Stmt {
        Stmt::ImportFrom {
            module: Some(module.to_string()),
            names: vec![Alias::new(name)],
            level,
        }
    }

    #[test]
    fn rejects_star_import() {
        let module = Module::new(vec![import_from("pkg", 1, "*")]);
        let err = NoStarImportsChecker
            .check(&BuildConfig::default(), &module)
            .unwrap_err();
        assert_eq!(err.message, "prohibited `from .pkg import *`");
        assert_eq!(err.node.map(|n| n.kind()), Some("ImportFrom"));
    }

    #[test]
    fn accepts_named_imports() {
        let module = Module::new(vec![import_from("os", 0, "path")]);
        assert!(NoStarImportsChecker
            .check(&BuildConfig::default(), &module)
            .is_ok());
    }
}
