use log::trace;

use crate::chariter::CharIter;
use crate::event::{Attribute, MarkupEvent};
use crate::htmlchar::HtmlByte;

/// Elements whose content is text up to the matching end tag
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// What a markup construct starting with `<` turned into
enum Markup {
    Start { name: String, attrs: Vec<Attribute>, self_closing: bool },
    End { name: String },
    /// Comments, declarations, processing instructions and bogus end tags
    Ignored,
}

/// Incremental, lenient tokenizer for HTML-ish markup.
///
/// Input is pushed in chunks with [feed](HtmlTokenizer::feed). Anything that cannot be decided yet
/// (a text run without a following tag, a tag without its `>`) stays buffered until the next chunk
/// or [close](HtmlTokenizer::close), so the produced events do not depend on how input was split.
#[derive(Debug, Default)]
pub struct HtmlTokenizer {
    buffer: String,
    /// Set while inside `<script>` or `<style>`
    raw_text_element: Option<String>,
    /// Offset into `buffer` before which the last scan found nothing to decide on
    resume_scan: usize,
}

impl HtmlTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize a complete document in one go
    pub fn tokenize(html: &str) -> Vec<MarkupEvent> {
        let mut tokenizer = HtmlTokenizer::new();
        let mut events = tokenizer.feed(html);
        events.append(&mut tokenizer.close());
        events
    }

    pub fn feed(&mut self, chunk: &str) -> Vec<MarkupEvent> {
        self.buffer.push_str(chunk);
        self.drain(false)
    }

    /// Flush everything still buffered. Unterminated markup is returned as text.
    pub fn close(&mut self) -> Vec<MarkupEvent> {
        let events = self.drain(true);
        self.raw_text_element = None;
        self.resume_scan = 0;
        events
    }

    /// Bytes received but not tokenized yet
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    fn drain(&mut self, at_eof: bool) -> Vec<MarkupEvent> {
        let mut events = vec![];
        let mut scan_from = self.resume_scan;
        let (consumed, resume) = {
            let mut cs = CharIter::new(&self.buffer);
            let mut resume = None;
            while cs.has_next() {
                let from = scan_from.max(cs.pos());
                let step = match self.raw_text_element.take() {
                    Some(element) => {
                        let step = Self::tokenize_raw_text(&mut cs, from, &element, at_eof, &mut events);
                        if step.is_err() {
                            self.raw_text_element = Some(element);
                        }
                        step
                    }
                    None => match Self::tokenize_text_and_markup(&mut cs, from, at_eof, &mut events) {
                        Ok(raw_text) => {
                            self.raw_text_element = raw_text;
                            Ok(())
                        }
                        Err(resume_at) => Err(resume_at),
                    },
                };
                match step {
                    Ok(()) => scan_from = 0,
                    Err(resume_at) => {
                        resume = Some(resume_at);
                        break;
                    }
                }
            }
            (cs.pos(), resume)
        };
        self.buffer.replace_range(..consumed, "");
        self.resume_scan = resume.map_or(0, |resume_at| resume_at - consumed);
        for event in &events {
            trace!(target: "tagsieve.tokenize", "emit {:?}", event);
        }
        events
    }

    /// Tokenize one text run and the markup construct following it. Both are consumed together or
    /// not at all. The search for markup starts at `from`, everything between the cursor and `from`
    /// is known to be text. Returns the raw text element that was just opened, if any, or the
    /// offset to resume searching at once more input has arrived.
    fn tokenize_text_and_markup(cs: &mut CharIter, from: usize, at_eof: bool, events: &mut Vec<MarkupEvent>) -> Result<Option<String>, usize> {
        let start = cs.pos();
        let markup_start = match Self::find_markup_start(cs, from) {
            Ok(markup_start) => markup_start,
            Err(_) if at_eof => {
                events.push(MarkupEvent::text(cs.rest()));
                cs.advance_n(cs.rest().len());
                return Ok(None);
            }
            Err(resume_at) => return Err(resume_at),
        };

        cs.pos = markup_start;
        let markup = match Self::tokenize_markup(cs) {
            Some(markup) => markup,
            // TODO: an unfinished comment or quoted value is tokenized again from its `<` on every feed
            None if at_eof => {
                cs.pos = start;
                events.push(MarkupEvent::text(cs.rest()));
                cs.advance_n(cs.rest().len());
                return Ok(None);
            }
            None => {
                cs.pos = start;
                return Err(markup_start);
            }
        };

        if markup_start > start {
            events.push(MarkupEvent::text(cs.slice(start..markup_start)));
        }
        let mut raw_text = None;
        match markup {
            Markup::Start { name, attrs, self_closing: true } => {
                events.push(MarkupEvent::start(name.clone(), attrs));
                events.push(MarkupEvent::end(name));
            }
            Markup::Start { name, attrs, self_closing: false } => {
                if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    raw_text = Some(name.clone());
                }
                events.push(MarkupEvent::start(name, attrs));
            }
            Markup::End { name } => events.push(MarkupEvent::end(name)),
            Markup::Ignored => {}
        }
        Ok(raw_text)
    }

    /// Position of the next `<` that opens a tag, comment, declaration or processing instruction.
    /// A `<` followed by anything else is plain text. A `<` at the very end is undecided.
    /// Without a decision, returns where the next search has to start.
    fn find_markup_start(cs: &CharIter, mut from: usize) -> Result<usize, usize> {
        loop {
            let candidate = cs.find_from(from, b"<").ok_or(cs.text.len())?;
            let next = cs.byte_at(candidate + 1).ok_or(candidate)?;
            if next.is_tag_name_start() || matches!(next, b'/' | b'!' | b'?') {
                return Ok(candidate);
            }
            from = candidate + 1;
        }
    }

    /// Tokenize the construct at the current `<`, or `None` if it is not complete yet.
    fn tokenize_markup(cs: &mut CharIter) -> Option<Markup> {
        if cs.test(b"<!--") {
            Self::tokenize_comment(cs)
        } else if cs.could_become(b"<!--") {
            None
        } else if cs.test(b"<!") || cs.test(b"<?") {
            cs.consume_until(b">")?;
            Some(Markup::Ignored)
        } else if cs.test(b"</") {
            Self::tokenize_end_tag(cs)
        } else {
            Self::tokenize_start_tag(cs)
        }
    }

    /// `<!-- ... -->`
    fn tokenize_comment(cs: &mut CharIter) -> Option<Markup> {
        cs.advance_n(4);
        cs.consume_until(b"-->")?;
        Some(Markup::Ignored)
    }

    /// `</name ...>`, anything after the name is ignored
    fn tokenize_end_tag(cs: &mut CharIter) -> Option<Markup> {
        cs.advance_n(2);
        if !cs.peek_byte()?.is_tag_name_start() {
            cs.consume_until(b">")?;
            return Some(Markup::Ignored);
        }
        let name = cs.consume_while(u8::is_tag_name_byte)?.to_ascii_lowercase();
        cs.consume_until(b">")?;
        Some(Markup::End { name })
    }

    /// `<name attr attr=value attr='value' attr="value">` or `<name ... />`
    fn tokenize_start_tag(cs: &mut CharIter) -> Option<Markup> {
        cs.advance_n(1);
        let name = cs.consume_while(u8::is_tag_name_byte)?.to_ascii_lowercase();
        let mut attrs = vec![];
        loop {
            cs.skip_spaces()?;
            if cs.test(b">") {
                cs.advance_n(1);
                return Some(Markup::Start { name, attrs, self_closing: false });
            }
            if cs.test(b"/>") {
                cs.advance_n(2);
                return Some(Markup::Start { name, attrs, self_closing: true });
            }
            if cs.test(b"/") || cs.test(b"=") {
                // a stray `/` before more attributes, or `=` without a name
                if cs.byte_at(cs.pos() + 1).is_none() {
                    return None;
                }
                cs.advance_n(1);
                continue;
            }
            attrs.push(Self::tokenize_attribute(cs)?);
        }
    }

    fn tokenize_attribute(cs: &mut CharIter) -> Option<Attribute> {
        let name = cs.consume_while(u8::is_attribute_name_byte)?.to_ascii_lowercase();
        let after_name = cs.pos();
        cs.skip_spaces()?;
        if !cs.test(b"=") {
            cs.pos = after_name;
            return Some(Attribute::flag(name));
        }
        cs.advance_n(1);
        cs.skip_spaces()?;
        let quote = cs.peek_byte()?;
        let value = if quote.is_html_quote() {
            cs.advance_n(1);
            cs.consume_until(&[quote])?
        } else {
            cs.consume_while(u8::is_unquoted_value_byte)?
        };
        Some(Attribute::new(name, value))
    }

    /// Content of `<script>`/`<style>` up to the matching end tag, which is left for the next step.
    /// Fails with the offset to resume searching at if the end tag has not arrived yet.
    fn tokenize_raw_text(cs: &mut CharIter, from: usize, element: &str, at_eof: bool, events: &mut Vec<MarkupEvent>) -> Result<(), usize> {
        match Self::find_raw_text_end(cs, from, element) {
            Ok(end) => {
                if end > cs.pos() {
                    events.push(MarkupEvent::text(cs.slice(cs.pos()..end)));
                }
                cs.pos = end;
                Ok(())
            }
            Err(_) if at_eof => {
                events.push(MarkupEvent::text(cs.rest()));
                cs.advance_n(cs.rest().len());
                Ok(())
            }
            Err(resume_at) => Err(resume_at),
        }
    }

    /// Position of `</element` (any case) followed by whitespace, `/` or `>`
    fn find_raw_text_end(cs: &CharIter, mut from: usize, element: &str) -> Result<usize, usize> {
        loop {
            // a trailing `<` may still become `</`
            let candidate = cs.find_from(from, b"</").ok_or(cs.text.len().saturating_sub(1).max(from))?;
            let name_start = candidate + 2;
            let name_end = name_start + element.len();
            let name = cs.text.as_bytes().get(name_start..name_end).ok_or(candidate)?;
            if name.eq_ignore_ascii_case(element.as_bytes()) {
                let terminator = cs.byte_at(name_end).ok_or(candidate)?;
                if terminator.is_html_whitespace() || matches!(terminator, b'/' | b'>') {
                    return Ok(candidate);
                }
            }
            from = candidate + 1;
        }
    }
}
