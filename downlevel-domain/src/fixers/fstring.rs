use downlevel_pass_api::{FixResult, Fixer, FixerError, Transformer, walk_expr, walk_module};
use downlevel_pass_catalog::{FSTRING_TO_STR_FORMAT, FixerMeta};
use downlevel_tree::{Constant, Expr, Module};
use downlevel_types::{BuildConfig, EffectSet};

/// `f"a{x!r:>{w}}"` becomes `"a{0!r:>{1}}".format(x, w)`.
///
/// Replacement fields are numbered explicitly; Python 2.6 has no automatic
/// field numbering.
#[derive(Debug, Default)]
pub struct FStringToStrFormatFixer {
    effects: EffectSet,
}

impl FStringToStrFormatFixer {
    fn joined_str(&mut self, values: Vec<Expr>, args: &mut Vec<Expr>) -> FixResult<String> {
        let mut fmt = String::new();
        for value in values {
            match value {
                Expr::Constant {
                    value: Constant::Str(s),
                } => escape_braces(&s, &mut fmt),
                Expr::FormattedValue {
                    value,
                    conversion,
                    format_spec,
                } => {
                    let index = args.len();
                    args.push(self.visit_expr(*value)?);
                    fmt.push('{');
                    fmt.push_str(&index.to_string());
                    if let Some(c) = conversion {
                        fmt.push('!');
                        fmt.push(c);
                    }
                    match format_spec.map(|b| *b) {
                        None => {}
                        Some(Expr::JoinedStr { values }) => {
                            fmt.push(':');
                            let spec = self.joined_str(values, args)?;
                            fmt.push_str(&spec);
                        }
                        Some(other) => {
                            return Err(FixerError::unsupported(
                                format!("unexpected {} as f-string format spec", other.kind()),
                                other,
                            ));
                        }
                    }
                    fmt.push('}');
                }
                other => {
                    return Err(FixerError::unsupported(
                        format!("unexpected {} inside an f-string", other.kind()),
                        other,
                    ));
                }
            }
        }
        Ok(fmt)
    }
}

fn escape_braces(s: &str, out: &mut String) {
    for c in s.chars() {
        if matches!(c, '{' | '}') {
            out.push(c);
        }
        out.push(c);
    }
}

impl Transformer for FStringToStrFormatFixer {
    fn visit_expr(&mut self, expr: Expr) -> FixResult<Expr> {
        match expr {
            // Handled before descent: the format spec is itself a JoinedStr
            // and must not be rewritten on its own.
            Expr::JoinedStr { values } => {
                let mut args = Vec::new();
                let fmt = self.joined_str(values, &mut args)?;
                Ok(Expr::call(Expr::attr(Expr::str(fmt), "format"), args))
            }
            other => walk_expr(self, other),
        }
    }
}

impl Fixer for FStringToStrFormatFixer {
    fn meta(&self) -> &'static FixerMeta {
        &FSTRING_TO_STR_FORMAT
    }

    fn fix(&mut self, _config: &BuildConfig, module: Module) -> FixResult<Module> {
        walk_module(self, module)
    }

    fn effects(&self) -> &EffectSet {
        &self.effects
    }
}
