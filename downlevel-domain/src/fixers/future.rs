use downlevel_pass_api::{FixResult, Fixer};
use downlevel_pass_catalog::{self as catalog, FixerMeta};
use downlevel_tree::Module;
use downlevel_types::{BuildConfig, EffectSet, ImportDecl};

/// Requires one `from __future__ import <feature>`; leaves the tree alone.
#[derive(Debug)]
pub struct FutureImportFixer {
    meta: &'static FixerMeta,
    feature: &'static str,
    effects: EffectSet,
}

impl FutureImportFixer {
    fn new(meta: &'static FixerMeta, feature: &'static str) -> Self {
        Self {
            meta,
            feature,
            effects: EffectSet::new(),
        }
    }

    pub fn annotations() -> Self {
        Self::new(&catalog::ANNOTATIONS_FUTURE, "annotations")
    }

    pub fn generator_stop() -> Self {
        Self::new(&catalog::GENERATOR_STOP_FUTURE, "generator_stop")
    }

    pub fn unicode_literals() -> Self {
        Self::new(&catalog::UNICODE_LITERALS_FUTURE, "unicode_literals")
    }

    pub fn print_function() -> Self {
        Self::new(&catalog::PRINT_FUNCTION_FUTURE, "print_function")
    }

    pub fn with_statement() -> Self {
        Self::new(&catalog::WITH_STATEMENT_FUTURE, "with_statement")
    }

    pub fn absolute_import() -> Self {
        Self::new(&catalog::ABSOLUTE_IMPORT_FUTURE, "absolute_import")
    }

    pub fn division() -> Self {
        Self::new(&catalog::DIVISION_FUTURE, "division")
    }

    pub fn generators() -> Self {
        Self::new(&catalog::GENERATORS_FUTURE, "generators")
    }

    pub fn nested_scopes() -> Self {
        Self::new(&catalog::NESTED_SCOPES_FUTURE, "nested_scopes")
    }

    pub fn feature(&self) -> &'static str {
        self.feature
    }
}

impl Fixer for FutureImportFixer {
    fn meta(&self) -> &'static FixerMeta {
        self.meta
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        self.effects
            .require_import(ImportDecl::member("__future__", self.feature));
        Ok(module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use downlevel_tree::Stmt;

    #[test]
    fn requires_future_import_and_keeps_tree() {
        let module = Module::new(vec![Stmt::Pass]);
        let mut fixer = FutureImportFixer::print_function();
        let out = fixer.fix(&BuildConfig::default(), module.clone()).unwrap();
        assert_eq!(out, module);
        assert!(fixer
            .effects()
            .required_imports
            .contains(&ImportDecl::member("__future__", "print_function")));
        assert!(fixer.effects().module_declarations.is_empty());
    }

    #[test]
    fn meta_key_matches_feature() {
        for fixer in [
            FutureImportFixer::annotations(),
            FutureImportFixer::generator_stop(),
            FutureImportFixer::division(),
            FutureImportFixer::nested_scopes(),
        ] {
            assert_eq!(fixer.meta().key, format!("{}_future", fixer.feature()));
        }
    }
}
