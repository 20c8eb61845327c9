/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Grey out empty/placeholder cells ("--" or blank), leave real values alone.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Color for a 0/1 flag cell: searches and arrests stand out in the listing.
pub fn color_for_flag(set: bool) -> &'static str {
    if set { RED } else { GREY }
}

/// Color used for the audit-log operation column.
pub fn color_for_operation(op: &str) -> &'static str {
    match op {
        "stop_added" => GREEN,
        "report" => CYAN,
        "export" => YELLOW,
        "backup" => BLUE,
        "migration_applied" => MAGENTA,
        "init" => YELLOW,
        _ => RESET,
    }
}
