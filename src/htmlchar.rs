/// Byte classes of the lenient HTML tokenizer. All delimiters are ASCII, so splitting the input
/// at any of them always lands on a char boundary.
pub trait HtmlByte {
    fn is_html_whitespace(&self) -> bool;

    fn is_tag_name_start(&self) -> bool;

    fn is_tag_name_byte(&self) -> bool;

    fn is_attribute_name_byte(&self) -> bool;

    fn is_unquoted_value_byte(&self) -> bool;

    fn is_html_quote(&self) -> bool;
}

impl HtmlByte for u8 {
    /// space, tab, line feed, form feed, carriage return
    fn is_html_whitespace(&self) -> bool {
        matches!(self, b' ' | b'\t' | b'\n' | b'\x0C' | b'\r')
    }

    fn is_tag_name_start(&self) -> bool {
        self.is_ascii_alphabetic()
    }

    /// Anything up to whitespace, `/` or `>`, non-ASCII included
    fn is_tag_name_byte(&self) -> bool {
        !self.is_html_whitespace() && !matches!(self, b'/' | b'>' | b'\0')
    }

    fn is_attribute_name_byte(&self) -> bool {
        !self.is_html_whitespace() && !matches!(self, b'/' | b'>' | b'=')
    }

    fn is_unquoted_value_byte(&self) -> bool {
        !self.is_html_whitespace() && *self != b'>'
    }

    fn is_html_quote(&self) -> bool {
        matches!(self, b'"' | b'\'')
    }
}
