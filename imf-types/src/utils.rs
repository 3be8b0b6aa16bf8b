use std::borrow::Cow;

// Character classes of RFC 5322 and RFC 5234 (ABNF core rules).
pub mod indicators {
    /// `ALPHA = %x41-5A / %x61-7A`
    pub fn is_alpha(byte: u8) -> bool {
        byte.is_ascii_alphabetic()
    }

    /// `DIGIT = %x30-39`
    pub fn is_digit(byte: u8) -> bool {
        byte.is_ascii_digit()
    }

    /// `WSP = SP / HTAB`
    pub fn is_wsp(byte: u8) -> bool {
        byte == b' ' || byte == b'\t'
    }

    /// Visible (printing) characters
    ///
    /// `VCHAR = %x21-7E`
    pub fn is_vchar(byte: u8) -> bool {
        matches!(byte, 0x21..=0x7e)
    }

    /// Controls
    ///
    /// `CTL = %x00-1F / %x7F`
    pub fn is_ctl(byte: u8) -> bool {
        matches!(byte, 0x00..=0x1f | 0x7f)
    }

    /// Printable US-ASCII characters not including specials.
    ///
    /// ```abnf
    /// atext = ALPHA / DIGIT /
    ///         "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" /
    ///         "/" / "=" / "?" / "^" / "_" / "`" / "{" / "|" / "}" / "~"
    /// ```
    pub fn is_atext(byte: u8) -> bool {
        is_alpha(byte) || is_digit(byte) || b"!#$%&'*+-/=?^_`{|}~".contains(&byte)
    }

    /// Field name characters.
    ///
    /// `ftext = %d33-57 / %d59-126` (printable US-ASCII except ":")
    pub fn is_ftext(byte: u8) -> bool {
        is_vchar(byte) && byte != b':'
    }

    /// Unstructured field body characters after unfolding.
    ///
    /// `VCHAR / WSP`
    pub fn is_utext(byte: u8) -> bool {
        is_vchar(byte) || is_wsp(byte)
    }

    /// `quoted-specials = DQUOTE / "\"`
    pub fn is_quoted_specials(byte: u8) -> bool {
        byte == b'"' || byte == b'\\'
    }

    /// Letter, digit, or hyphen, i.e., the characters of a host name label (RFC 1123).
    pub fn is_ldh(byte: u8) -> bool {
        byte.is_ascii_alphanumeric() || byte == b'-'
    }
}

pub fn escape_quoted(unescaped: &str) -> Cow<'_, str> {
    let mut escaped = Cow::Borrowed(unescaped);

    if escaped.contains('\\') {
        escaped = Cow::Owned(escaped.replace('\\', "\\\\"));
    }

    if escaped.contains('\"') {
        escaped = Cow::Owned(escaped.replace('"', "\\\""));
    }

    escaped
}

/// Reverse [`escape_quoted`].
///
/// Works left to right, so `\\"` is a backslash followed by a bare quote.
pub fn unescape_quoted(escaped: &str) -> Cow<'_, str> {
    if !escaped.contains('\\') {
        return Cow::Borrowed(escaped);
    }

    let mut unescaped = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => unescaped.push(next),
                None => unescaped.push('\\'),
            },
            c => unescaped.push(c),
        }
    }

    Cow::Owned(unescaped)
}

/// Render arbitrary bytes for diagnostics, escaping everything but printable ASCII.
pub fn escape_byte_string<B>(bytes: B) -> String
where
    B: AsRef<[u8]>,
{
    let bytes = bytes.as_ref();

    bytes
        .iter()
        .map(|byte| match byte {
            0x00..=0x08 => format!("\\x{byte:02x}"),
            0x09 => String::from("\\t"),
            0x0A => String::from("\\n"),
            0x0B => format!("\\x{byte:02x}"),
            0x0C => format!("\\x{byte:02x}"),
            0x0D => String::from("\\r"),
            0x0e..=0x1f => format!("\\x{byte:02x}"),
            0x20..=0x21 => format!("{}", *byte as char),
            0x22 => String::from("\\\""),
            0x23..=0x5B => format!("{}", *byte as char),
            0x5C => String::from("\\\\"),
            0x5D..=0x7E => format!("{}", *byte as char),
            0x7f => format!("\\x{byte:02x}"),
            0x80..=0xff => format!("\\x{byte:02x}"),
        })
        .collect::<Vec<String>>()
        .join("")
}
