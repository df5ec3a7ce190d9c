//! The builtin `open` of Python 2 only agrees with Python 3's in binary mode.

use downlevel_pass_api::{CheckViolation, Checker};
use downlevel_pass_catalog::{CheckerMeta, NO_OPEN_WITH_ENCODING};
use downlevel_tree::{Constant, Expr, Module, NodeRef, walk};
use downlevel_types::BuildConfig;

/// Keyword arguments Python 2's `open` does not accept.
const PROHIBITED_KEYWORDS: &[&str] = &["encoding", "errors", "newline", "closefd", "opener"];

#[derive(Debug, Default)]
pub struct NoOpenWithEncodingChecker;

impl NoOpenWithEncodingChecker {
    fn violation(&self, message: String, call: &Expr) -> CheckViolation {
        CheckViolation::new(self.meta().key, message).at(call.clone())
    }

    fn check_call(&self, call: &Expr) -> Result<(), CheckViolation> {
        let Expr::Call { args, keywords, .. } = call else {
            return Ok(());
        };

        let mut mode = "r";
        if let Some(mode_arg) = args.get(1) {
            mode = literal_mode(mode_arg).ok_or_else(|| {
                self.violation(
                    format!(
                        "prohibited value for argument 'mode' of builtin open: expected a string literal, got {}",
                        mode_arg.kind()
                    ),
                    call,
                )
            })?;
        }

        if args.len() > 3 {
            return Err(self.violation(
                "prohibited positional arguments to builtin open".to_string(),
                call,
            ));
        }

        for kw in keywords {
            let Some(arg) = kw.arg.as_deref() else {
                continue;
            };
            if PROHIBITED_KEYWORDS.contains(&arg) {
                return Err(self.violation(
                    format!("prohibited keyword argument '{arg}' to builtin open"),
                    call,
                ));
            }
            if arg == "mode" {
                mode = literal_mode(&kw.value).ok_or_else(|| {
                    self.violation(
                        format!(
                            "prohibited value for argument 'mode' of builtin open: expected a string literal, got {}",
                            kw.value.kind()
                        ),
                        call,
                    )
                })?;
            }
        }

        if !mode.contains('b') {
            return Err(self.violation(
                format!(
                    "prohibited mode '{mode}' for builtin open: only binary modes are allowed, use io.open instead"
                ),
                call,
            ));
        }
        Ok(())
    }
}

fn literal_mode(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Constant {
            value: Constant::Str(s),
        } => Some(s.as_str()),
        _ => None,
    }
}

impl Checker for NoOpenWithEncodingChecker {
    fn meta(&self) -> &'static CheckerMeta {
        &NO_OPEN_WITH_ENCODING
    }

    fn check(&self, _config: &BuildConfig, module: &Module) -> Result<(), CheckViolation> {
        for node in walk(module) {
            if let NodeRef::Expr(call @ Expr::Call { func, .. }) = node
                && func.is_load_of("open")
            {
                self.check_call(call)?;
            }
        }
        Ok(())
    }
}
