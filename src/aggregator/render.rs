// Textual rendering of a parameter's value list
//
// The value-length metric is the character length of the list written as
// `['a', 'b']`, with each item quoted and escaped the way a Python `repr`
// prints it. Reports produced by earlier tooling use that measure.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Render a value list as `['v1', 'v2']`
pub fn render_value_list(values: &[String]) -> String {
    let mut out = String::from("[");
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        push_quoted(&mut out, value);
    }
    out.push(']');
    out
}

/// Character length of [`render_value_list`]
pub fn value_list_length(values: &[String]) -> usize {
    render_value_list(values).chars().count()
}

fn push_quoted(out: &mut String, value: &str) {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_printable(c) => out.push(c),
            c => {
                let code = c as u32;
                if code <= 0xff {
                    out.push_str(&format!("\\x{:02x}", code));
                } else if code <= 0xffff {
                    out.push_str(&format!("\\u{:04x}", code));
                } else {
                    out.push_str(&format!("\\U{:08x}", code));
                }
            }
        }
    }
    out.push(quote);
}

// Everything in the Other (control, format, private-use, unassigned) and
// Separator categories is escaped, except the plain space.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}
