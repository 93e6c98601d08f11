//! Extraction of the structured answer from raw process output.

/// Find the candidate JSON line in a process's stdout.
///
/// Lines are scanned from the end; the first line that, after trimming,
/// both starts with `{` and ends with `}` is the candidate. This tolerates
/// banner or diagnostic text the script may print on stdout before its
/// final structured answer.
pub fn extract_json_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('{') && line.ends_with('}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_trailing_json_after_banner() {
        let out = "DEBUG banner\n{\"suggestion\":\"Use wind.\"}\n";
        assert_eq!(extract_json_line(out), Some("{\"suggestion\":\"Use wind.\"}"));
    }

    #[test]
    fn prefers_the_last_brace_line() {
        let out = "{\"old\":1}\nsome log\n{\"new\":2}";
        assert_eq!(extract_json_line(out), Some("{\"new\":2}"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let out = "banner\n   {\"a\":1}   \n";
        assert_eq!(extract_json_line(out), Some("{\"a\":1}"));
    }

    #[test]
    fn none_when_no_brace_line() {
        assert_eq!(extract_json_line("just text\nmore text\n"), None);
        assert_eq!(extract_json_line(""), None);
    }

    #[test]
    fn partial_braces_do_not_match() {
        assert_eq!(extract_json_line("{unterminated\nclosing}\n"), None);
    }
}
