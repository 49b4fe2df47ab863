//! Shell escaping and quoting utilities.

/// Escape a value for use inside single quotes.
/// Replaces `'` with `'\''` (end quote, escaped quote, start quote).
pub fn escape_single_quote_content(value: &str) -> String {
    value.replace('\'', "'\\''")
}

/// Quote a single argument for shell execution.
/// - Empty strings become `''`
/// - Strings with shell metacharacters are wrapped in single quotes
/// - Embedded single quotes are escaped
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    // Characters that require quoting
    const SHELL_META: &[char] = &[
        ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}',
        '<', '>', '|', '&', ';', '#', '~',
    ];

    if !arg.contains(SHELL_META) {
        return arg.to_string();
    }

    format!("'{}'", escape_single_quote_content(arg))
}

/// Escape an entire command string for sh -c execution.
/// Use this when passing a complete command (with operators) to sh -c.
/// Wraps entire command in single quotes and escapes embedded quotes.
pub fn escape_command_for_shell(command: &str) -> String {
    format!("'{}'", escape_single_quote_content(command))
}

/// Wrap a command line in a shell prefix such as `/bin/bash -l -c`.
pub fn wrap_in_shell(shell: &str, command: &str) -> String {
    format!("{} {}", shell.trim(), escape_command_for_shell(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_arg_simple() {
        assert_eq!(quote_arg("happyman"), "happyman");
        assert_eq!(quote_arg("/srv/app"), "/srv/app");
    }

    #[test]
    fn quote_arg_with_spaces() {
        assert_eq!(quote_arg("hello world"), "'hello world'");
    }

    #[test]
    fn quote_arg_with_single_quote() {
        assert_eq!(quote_arg("it's"), "'it'\\''s'");
    }

    #[test]
    fn quote_arg_empty() {
        assert_eq!(quote_arg(""), "''");
    }

    #[test]
    fn escape_command_keeps_operators_inside_quotes() {
        assert_eq!(
            escape_command_for_shell("cd happyman && git pull"),
            "'cd happyman && git pull'"
        );
    }

    #[test]
    fn wrap_in_login_shell() {
        assert_eq!(
            wrap_in_shell("/bin/bash -l -c", "svc -t ~/service/happyman"),
            "/bin/bash -l -c 'svc -t ~/service/happyman'"
        );
    }

    #[test]
    fn wrap_escapes_embedded_quotes() {
        assert_eq!(
            wrap_in_shell("sh -c ", "echo 'hi'"),
            "sh -c 'echo '\\''hi'\\'''"
        );
    }
}
