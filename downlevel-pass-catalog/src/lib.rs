//! Canonical metadata for every built-in pass.
//!
//! The order of [`CHECKERS`] and [`FIXERS`] is the execution order of the
//! pipeline. It is part of the public contract: append new passes, do not
//! reorder existing ones.

use downlevel_types::{ProhibitionWindow, Version, VersionWindow};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    Checker,
    Fixer,
}

impl PassKind {
    /// Optional trailing word a user may append to a pass name.
    pub fn suffix(self) -> &'static str {
        match self {
            PassKind::Checker => "checker",
            PassKind::Fixer => "fixer",
        }
    }
}

impl std::fmt::Display for PassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckerMeta {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub window: ProhibitionWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixerMeta {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub window: VersionWindow,
}

const fn v(major: u16, minor: u16) -> Version {
    Version::new(major, minor)
}

// ---------------------------------------------------------------------------
// Checkers
// ---------------------------------------------------------------------------

pub const NO_STAR_IMPORTS: CheckerMeta = CheckerMeta {
    key: "no_star_imports",
    title: "No star imports",
    description: "Rejects `from module import *`; fixers cannot see which names such an import binds.",
    window: ProhibitionWindow::always(),
};

pub const NO_OVERRIDDEN_STDLIB_IMPORTS: CheckerMeta = CheckerMeta {
    key: "no_overridden_stdlib_imports",
    title: "No overridden stdlib imports",
    description: "Rejects rebinding `itertools`, `six` or `builtins`, which fixer declarations reference.",
    window: ProhibitionWindow::always(),
};

pub const NO_OVERRIDDEN_BUILTINS: CheckerMeta = CheckerMeta {
    key: "no_overridden_builtins",
    title: "No overridden builtins",
    description: "Rejects rebinding builtin names (Python 2 and 3) as functions, classes, targets, aliases or parameters.",
    window: ProhibitionWindow::always(),
};

pub const NO_OPEN_WITH_ENCODING: CheckerMeta = CheckerMeta {
    key: "no_open_with_encoding",
    title: "No text-mode open",
    description: "Rejects builtin `open` in text mode or with Python 3 only keyword arguments; use `io.open` instead.",
    window: ProhibitionWindow::until(v(2, 7)),
};

pub const NO_ASYNC_AWAIT: CheckerMeta = CheckerMeta {
    key: "no_async_await",
    title: "No async/await",
    description: "Rejects `async def`, `async for`, `async with` and `await`.",
    window: ProhibitionWindow::until(v(3, 4)),
};

pub static CHECKERS: &[CheckerMeta] = &[
    NO_STAR_IMPORTS,
    NO_OVERRIDDEN_STDLIB_IMPORTS,
    NO_OVERRIDDEN_BUILTINS,
    NO_OPEN_WITH_ENCODING,
    NO_ASYNC_AWAIT,
];

// ---------------------------------------------------------------------------
// Fixers
// ---------------------------------------------------------------------------

const fn future(key: &'static str, title: &'static str, since: Version, until: Version) -> FixerMeta {
    FixerMeta {
        key,
        title,
        description: "Adds the matching `from __future__ import ...` to the module.",
        window: VersionWindow::new(since, until),
    }
}

pub const ANNOTATIONS_FUTURE: FixerMeta =
    future("annotations_future", "from __future__ import annotations", v(3, 7), v(3, 9));
pub const GENERATOR_STOP_FUTURE: FixerMeta =
    future("generator_stop_future", "from __future__ import generator_stop", v(3, 5), v(3, 6));
pub const UNICODE_LITERALS_FUTURE: FixerMeta =
    future("unicode_literals_future", "from __future__ import unicode_literals", v(2, 6), v(2, 7));
pub const PRINT_FUNCTION_FUTURE: FixerMeta =
    future("print_function_future", "from __future__ import print_function", v(2, 6), v(2, 7));
pub const WITH_STATEMENT_FUTURE: FixerMeta =
    future("with_statement_future", "from __future__ import with_statement", v(2, 5), v(2, 5));
pub const ABSOLUTE_IMPORT_FUTURE: FixerMeta =
    future("absolute_import_future", "from __future__ import absolute_import", v(2, 5), v(2, 7));
pub const DIVISION_FUTURE: FixerMeta =
    future("division_future", "from __future__ import division", v(2, 2), v(2, 7));
pub const GENERATORS_FUTURE: FixerMeta =
    future("generators_future", "from __future__ import generators", v(2, 2), v(2, 2));
pub const NESTED_SCOPES_FUTURE: FixerMeta =
    future("nested_scopes_future", "from __future__ import nested_scopes", v(2, 1), v(2, 1));

const fn builtin_rename(key: &'static str, title: &'static str) -> FixerMeta {
    FixerMeta {
        key,
        title,
        description: "Rebinds the Python 3 builtin to its Python 2 counterpart with a module-level `getattr(__builtins__, ...)` declaration.",
        window: VersionWindow::new(v(1, 0), v(2, 7)).works_until(v(3, 7)),
    }
}

pub const XRANGE_TO_RANGE: FixerMeta = builtin_rename("xrange_to_range", "range -> xrange");
pub const UNICODE_TO_STR: FixerMeta = builtin_rename("unicode_to_str", "str -> unicode");
pub const UNICHR_TO_CHR: FixerMeta = builtin_rename("unichr_to_chr", "chr -> unichr");
pub const RAW_INPUT_TO_INPUT: FixerMeta = builtin_rename("raw_input_to_input", "input -> raw_input");

pub const REMOVE_FUNCTION_DEF_ANNOTATIONS: FixerMeta = FixerMeta {
    key: "remove_function_def_annotations",
    title: "Remove function annotations",
    description: "Strips parameter and return annotations from function definitions.",
    window: VersionWindow::new(v(1, 0), v(2, 7)),
};

pub const REMOVE_ANN_ASSIGN: FixerMeta = FixerMeta {
    key: "remove_ann_assign",
    title: "Remove annotated assignments",
    description: "Turns `x: T = v` into `x = v` and a bare `x: T` into `x = None`.",
    window: VersionWindow::new(v(1, 0), v(3, 5)),
};

pub const SHORT_TO_LONG_FORM_SUPER: FixerMeta = FixerMeta {
    key: "short_to_long_form_super",
    title: "Long-form super()",
    description: "Rewrites argument-less `super()` inside methods to `super(Class, self)`.",
    window: VersionWindow::new(v(2, 2), v(2, 7)),
};

pub const INLINE_KW_ONLY_ARGS: FixerMeta = FixerMeta {
    key: "inline_kw_only_args",
    title: "Inline keyword-only arguments",
    description: "Moves keyword-only parameters into `**kwargs` lookups at the top of the function body. Only literal defaults are supported.",
    window: VersionWindow::new(v(1, 0), v(3, 5)),
};

pub const FSTRING_TO_STR_FORMAT: FixerMeta = FixerMeta {
    key: "fstring_to_str_format",
    title: "f-strings to str.format",
    description: "Rewrites f-strings into explicit `\"...\".format(...)` calls with positional indexes.",
    window: VersionWindow::new(v(2, 6), v(3, 5)),
};

pub const NEW_STYLE_CLASSES: FixerMeta = FixerMeta {
    key: "new_style_classes",
    title: "New-style classes",
    description: "Adds `object` as the base of classes declared without bases.",
    window: VersionWindow::new(v(2, 0), v(2, 7)),
};

pub const ITERTOOLS_BUILTINS: FixerMeta = FixerMeta {
    key: "itertools_builtins",
    title: "Lazy map/zip/filter",
    description: "Rebinds `map`, `zip` and `filter` to their lazy `itertools` counterparts where those exist.",
    window: VersionWindow::new(v(2, 3), v(2, 7)).works_until(v(3, 7)),
};

pub const UNPACKING_GENERALIZATIONS: FixerMeta = FixerMeta {
    key: "unpacking_generalizations",
    title: "Unpacking generalizations",
    description: "Normalizes calls and displays with several or interleaved `*`/`**` spreads into a single trailing spread.",
    window: VersionWindow::new(v(2, 0), v(3, 4)),
};

pub const NAMED_TUPLE_CLASS_TO_ASSIGN: FixerMeta = FixerMeta {
    key: "named_tuple_class_to_assign",
    title: "NamedTuple classes to calls",
    description: "Rewrites `class P(NamedTuple)` with annotated fields into `P = NamedTuple('P', [...])`.",
    window: VersionWindow::new(v(2, 6), v(3, 4)),
};

/// `NamedTupleClassToAssign` runs before `RemoveAnnAssign`: it reads the
/// annotated fields that the latter turns into plain assignments.
pub static FIXERS: &[FixerMeta] = &[
    ANNOTATIONS_FUTURE,
    GENERATOR_STOP_FUTURE,
    UNICODE_LITERALS_FUTURE,
    PRINT_FUNCTION_FUTURE,
    WITH_STATEMENT_FUTURE,
    ABSOLUTE_IMPORT_FUTURE,
    DIVISION_FUTURE,
    GENERATORS_FUTURE,
    NESTED_SCOPES_FUTURE,
    XRANGE_TO_RANGE,
    UNICODE_TO_STR,
    UNICHR_TO_CHR,
    RAW_INPUT_TO_INPUT,
    REMOVE_FUNCTION_DEF_ANNOTATIONS,
    NAMED_TUPLE_CLASS_TO_ASSIGN,
    REMOVE_ANN_ASSIGN,
    SHORT_TO_LONG_FORM_SUPER,
    INLINE_KW_ONLY_ARGS,
    FSTRING_TO_STR_FORMAT,
    NEW_STYLE_CLASSES,
    ITERTOOLS_BUILTINS,
    UNPACKING_GENERALIZATIONS,
];

/// Canonical lookup form of a pass name.
///
/// Lowercases, drops `_`, `-` and whitespace, then strips a trailing
/// `checker`/`fixer` matching `kind`. `NoStarImportsChecker`,
/// `no-star-imports` and `no_star_imports` all normalize to `nostarimports`.
pub fn normalize_name(name: &str, kind: PassKind) -> String {
    let mut out: String = name
        .chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    let suffix = kind.suffix();
    if out.len() > suffix.len() && out.ends_with(suffix) {
        out.truncate(out.len() - suffix.len());
    }
    out
}

pub fn find_checker(name: &str) -> Option<&'static CheckerMeta> {
    let wanted = normalize_name(name, PassKind::Checker);
    CHECKERS
        .iter()
        .find(|m| normalize_name(m.key, PassKind::Checker) == wanted)
}

pub fn find_fixer(name: &str) -> Option<&'static FixerMeta> {
    let wanted = normalize_name(name, PassKind::Fixer);
    FIXERS
        .iter()
        .find(|m| normalize_name(m.key, PassKind::Fixer) == wanted)
}
