//! Pass explanations for the `downlevel explain` and `downlevel list-passes`
//! commands.

use downlevel_pass_api::{PassKind, PassMeta, all_passes, find_pass};
use downlevel_types::Version;
use std::fmt::Write as _;

const RULE: &str =
    "================================================================================";
const SUB_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Look up a pass by any accepted spelling of its name.
pub fn lookup_pass(query: &str) -> Option<PassMeta> {
    find_pass(query)
}

/// List all pass keys, checkers first.
pub fn list_pass_keys() -> Vec<&'static str> {
    all_passes().map(|p| p.key()).collect()
}

fn kind_heading(kind: PassKind) -> &'static str {
    match kind {
        PassKind::Checker => "CHECKER",
        PassKind::Fixer => "FIXER",
    }
}

/// Whether the pass would take part in a run from `source` to `target`.
pub fn runs_for(pass: &PassMeta, source: Version, target: Version) -> bool {
    match pass {
        PassMeta::Checker(m) => m.window.is_prohibited(target),
        PassMeta::Fixer(m) => m.window.is_applicable(source, target),
    }
}

/// Full text for `downlevel explain`.
pub fn render_explanation(pass: &PassMeta, source: Version, target: Version) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}: {}", kind_heading(pass.kind()), pass.title());
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Key:     {}", pass.key());
    let _ = writeln!(out, "Window:  {}", pass.window_summary());
    let verdict = if runs_for(pass, source, target) {
        "runs"
    } else {
        "skipped"
    };
    let _ = writeln!(out, "Status:  {verdict} for {source} -> {target}");
    let _ = writeln!(out);
    let _ = writeln!(out, "DESCRIPTION");
    let _ = writeln!(out, "{SUB_RULE}");
    let _ = writeln!(out, "{}", pass.description());
    out
}

/// Table for `downlevel list-passes`.
pub fn render_pass_table() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Available passes:\n");
    let _ = writeln!(out, "  {:<32} {:<8} WINDOW", "KEY", "KIND");
    let _ = writeln!(out, "  {:<32} {:<8} ------", "---", "----");
    for pass in all_passes() {
        let _ = writeln!(
            out,
            "  {:<32} {:<8} {}",
            pass.key(),
            pass.kind().suffix(),
            pass.window_summary()
        );
    }
    out
}
