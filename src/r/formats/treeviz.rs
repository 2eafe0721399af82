//! Treeviz formatter for syntax trees
//!
//! Treeviz prints one node per line, nesting shown with box-drawing connectors, so a tree
//! can be scanned quickly and diffed in tests.
//!
//! So the format is :
//! <prefix><connector> <icon> <label> (truncated to 30 characters by default)
//!
//! Example, for `a + 1`:
//!
//!   ⧉ 1 statement
//!   └─ ¶ a + 1
//!     └─ ← +
//!       ├─ ◦ a
//!       ├─ ◦ +
//!       └─ ◦ 1
//!
//! Icons
//!     Scopes:
//!         Root: ⧉
//!         Scope: §
//!         SimpleScope: ⊤
//!         Statement: ¶
//!     Expressions:
//!         Operator: ←
//!         Group: ( )
//!         Call: ƒ
//!         Index: ⌷
//!         ArgumentList: ☰
//!         Argument: •
//!         FunctionDefinition: λ
//!     Control flow:
//!         If: ⑂
//!         For, While, Repeat: ↻
//!         Break, Next: ↵
//!     Leaves:
//!         Token: ◦

use crate::r::ast::{snapshot_from_root, AstRoot, AstSnapshot, SourceLocation};
use std::collections::HashMap;

const DEFAULT_LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Root" => "⧉",
        "Scope" => "§",
        "SimpleScope" => "⊤",
        "Statement" => "¶",
        "Operator" => "←",
        "Group" => "( )",
        "Call" => "ƒ",
        "Index" => "⌷",
        "ArgumentList" => "☰",
        "Argument" => "•",
        "FunctionDefinition" => "λ",
        "If" => "⑂",
        "For" | "While" | "Repeat" => "↻",
        "Break" | "Next" => "↵",
        "Token" => "◦",
        _ => "○",
    }
}

struct Options<'a> {
    location: Option<&'a SourceLocation>,
    label_width: usize,
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    options: &Options<'_>,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(&snapshot.node_type);
    let truncated_label = truncate(&snapshot.label, options.label_width);

    let linum_prefix = match options.location {
        Some(location) => format!(
            "{:02} ",
            location.byte_to_position(snapshot.range.start).line + 1
        ),
        None => String::new(),
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix, prefix, connector, icon, truncated_label
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(
            child,
            &child_prefix,
            i,
            child_count,
            options,
        ));
    }

    output
}

fn format_root_snapshot(snapshot: &AstSnapshot, options: &Options<'_>) -> String {
    let icon = get_icon(&snapshot.node_type);
    let mut output = format!(
        "{} {}\n",
        icon,
        truncate(&snapshot.label, options.label_width)
    );

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count, options));
    }

    output
}

pub fn to_treeviz_str(ast: &AstRoot) -> String {
    to_treeviz_str_with_params(ast, &HashMap::new())
}

/// Render with parameters
///
/// - `show-linum`: prefix every node line with its 1-based line number (default false)
/// - `label-width`: characters kept of each label before `...` (default 30)
pub fn to_treeviz_str_with_params(ast: &AstRoot, params: &HashMap<String, String>) -> String {
    let show_linum = params
        .get("show-linum")
        .map(|v| v != "false")
        .unwrap_or(false);
    let label_width = params
        .get("label-width")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_LABEL_WIDTH);

    let location = show_linum.then(|| SourceLocation::new(ast.text()));
    let options = Options {
        location: location.as_ref(),
        label_width,
    };

    let snapshot = snapshot_from_root(ast);
    format_root_snapshot(&snapshot, &options)
}
