//! Escapes outside quoted fields.
//!
//! The `csv` reader only honors the escape byte inside quotes, while dumps
//! often escape delimiters in bare fields as well (`bob\,jr`). Such fields
//! are rewritten as quoted fields before parsing so both spellings load the
//! same value.

use std::borrow::Cow;

/// Rewrites every bare field that contains `escape` as an equivalent quoted
/// field. Input without any escape byte is returned untouched.
///
/// Inside a bare field the escape byte takes the next byte literally, so
/// `\,`, `\"`, `\\` and an escaped line break all end up as plain content.
/// An escape byte at the very end of the input is kept as is.
pub(crate) fn quote_escaped_fields(
    input: &[u8],
    delimiter: u8,
    quote: u8,
    escape: Option<u8>,
) -> Cow<'_, [u8]> {
    let Some(escape) = escape else {
        return Cow::Borrowed(input);
    };
    if !input.contains(&escape) {
        return Cow::Borrowed(input);
    }

    let syntax = Syntax {
        delimiter,
        quote,
        escape,
    };
    let mut out = Vec::with_capacity(input.len() + input.len() / 16);
    let mut pos = 0;
    while pos < input.len() {
        // `pos` is always at the start of a field here
        pos = if input[pos] == quote {
            syntax.copy_quoted(input, pos, &mut out)
        } else {
            syntax.rewrite_bare(input, pos, &mut out)
        };
        // delimiter or line break that ended the field
        if let Some(&byte) = input.get(pos) {
            out.push(byte);
            pos += 1;
        }
    }
    Cow::Owned(out)
}

struct Syntax {
    delimiter: u8,
    quote: u8,
    escape: u8,
}

impl Syntax {
    fn ends_field(&self, byte: u8) -> bool {
        byte == self.delimiter || byte == b'\n' || byte == b'\r'
    }

    /// Copies a quoted field verbatim, plus anything trailing its closing
    /// quote. Returns the position of the byte that ended the field.
    fn copy_quoted(&self, input: &[u8], start: usize, out: &mut Vec<u8>) -> usize {
        out.push(input[start]);
        let mut pos = start + 1;
        while pos < input.len() {
            let byte = input[pos];
            if byte == self.escape && pos + 1 < input.len() {
                out.extend_from_slice(&input[pos..pos + 2]);
                pos += 2;
                continue;
            }
            out.push(byte);
            pos += 1;
            if byte == self.quote {
                if input.get(pos) == Some(&self.quote) {
                    out.push(self.quote);
                    pos += 1;
                } else {
                    break;
                }
            }
        }
        while pos < input.len() && !self.ends_field(input[pos]) {
            out.push(input[pos]);
            pos += 1;
        }
        pos
    }

    /// Copies a bare field, quoting it when it used the escape byte.
    /// Returns the position of the byte that ended the field.
    fn rewrite_bare(&self, input: &[u8], start: usize, out: &mut Vec<u8>) -> usize {
        let mut value = Vec::new();
        let mut escaped = false;
        let mut pos = start;
        while pos < input.len() && !self.ends_field(input[pos]) {
            let byte = input[pos];
            if byte == self.escape && pos + 1 < input.len() {
                value.push(input[pos + 1]);
                escaped = true;
                pos += 2;
            } else {
                value.push(byte);
                pos += 1;
            }
        }

        if !escaped {
            out.extend_from_slice(&input[start..pos]);
            return pos;
        }
        out.push(self.quote);
        for byte in value {
            if byte == self.quote || byte == self.escape {
                out.push(self.escape);
            }
            out.push(byte);
        }
        out.push(self.quote);
        pos
    }
}

#[cfg(test)]
#[path = "unescape_tests.rs"]
mod tests;
