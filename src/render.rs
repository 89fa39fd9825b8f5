//! Dual-mode output rendering.
//!
//! In interactive mode lines are for a human. In sourced mode stdout is
//! evaluated by the wrapping shell function, so everything meant to be
//! *read* is wrapped as an `echo` with metacharacters escaped, and only the
//! lines meant to be *executed* (a `cd`, the sqlite3 invocation) go out
//! raw. Every outcome and every diagnostic routes through here; no call
//! site branches on the mode itself.

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Interactive,
    Sourced,
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    mode: OutputMode,
}

impl Renderer {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn sourced(sourced: bool) -> Self {
        Self::new(if sourced {
            OutputMode::Sourced
        } else {
            OutputMode::Interactive
        })
    }

    pub fn is_sourced(&self) -> bool {
        self.mode == OutputMode::Sourced
    }

    /// Informational line: plain stdout, or echo-wrapped when sourced.
    pub fn info(&self, msg: &str) {
        match self.mode {
            OutputMode::Interactive => println!("{}", msg),
            OutputMode::Sourced => println!("{}", echo_line(msg)),
        }
    }

    /// Diagnostic line (recoverable outcome or fatal error). Interactive
    /// diagnostics go to stderr; sourced ones must travel through the
    /// evaluated stdout like everything else.
    pub fn diag(&self, msg: &str) {
        match self.mode {
            OutputMode::Interactive => eprintln!("{}: {}", "error".red().bold(), msg),
            OutputMode::Sourced => println!("{}", echo_line(msg)),
        }
    }

    /// Actionable shell line. Never escaped: this is the one kind of output
    /// the parent shell is supposed to execute, in both modes.
    pub fn command(&self, cmd: &str) {
        println!("{}", cmd);
    }
}

/// Wrap `msg` as an `echo` statement safe to evaluate.
fn echo_line(msg: &str) -> String {
    format!("echo {}", escape_for_shell(msg))
}

/// Backslash-escape the metacharacters that would let an echoed message be
/// reinterpreted as shell syntax.
pub fn escape_for_shell(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '"' | '\'' | '`' | '&' | '|' | '<' | '>' | ';' | '(' | ')' | '$' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("a \"quoted\" word", "a \\\"quoted\\\" word")]
    #[case("it's", "it\\'s")]
    #[case("`whoami`", "\\`whoami\\`")]
    #[case("a && b || c", "a \\&\\& b \\|\\| c")]
    #[case("x > y < z", "x \\> y \\< z")]
    #[case("end; (sub) $VAR", "end\\; \\(sub\\) \\$VAR")]
    fn given_metacharacters_when_escaped_then_neutralized(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(escape_for_shell(input), expected);
    }

    #[test]
    fn given_message_when_echo_wrapped_then_prefixed_and_escaped() {
        assert_eq!(echo_line("rm -rf $HOME; true"), "echo rm -rf \\$HOME\\; true");
    }
}
