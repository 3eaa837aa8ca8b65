//! Line-ending conversion between stored content and the native edit control

/// LF (or stray CR) to CRLF, the only break the EDIT control renders
pub fn to_control_text(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + content.len() / 16);
    for (line, has_break) in split_lines(content) {
        out.push_str(line);
        if has_break {
            out.push_str("\r\n");
        }
    }
    out
}

/// CRLF and lone CR to LF
pub fn from_control_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (line, has_break) in split_lines(text) {
        out.push_str(line);
        if has_break {
            out.push('\n');
        }
    }
    out
}

/// Split on CRLF, LF or CR; yields each line and whether a break followed it
fn split_lines(text: &str) -> impl Iterator<Item = (&str, bool)> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let s = rest?;
        match s.find(|c: char| c == '\r' || c == '\n') {
            Some(i) => {
                let skip = if s[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&s[i + skip..]);
                Some((&s[..i], true))
            }
            None => {
                rest = None;
                if s.is_empty() {
                    None
                } else {
                    Some((s, false))
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_control_text() {
        assert_eq!(to_control_text("a\nb"), "a\r\nb");
        assert_eq!(to_control_text("a\r\nb\n"), "a\r\nb\r\n");
        assert_eq!(to_control_text("\n\n"), "\r\n\r\n");
        assert_eq!(to_control_text(""), "");
    }

    #[test]
    fn test_from_control_text() {
        assert_eq!(from_control_text("a\r\nb"), "a\nb");
        assert_eq!(from_control_text("a\rb\r\n"), "a\nb\n");
        assert_eq!(from_control_text("plain"), "plain");
        assert_eq!(from_control_text("多行\r\n文本"), "多行\n文本");
    }

    #[test]
    fn test_content_survives_the_control() {
        let content = "line one\n\nline three\n";
        assert_eq!(from_control_text(&to_control_text(content)), content);
    }
}
