use quick_xml::{events::Event, Reader};

use super::tree::Element;
use crate::error::ParseError;

/// Deepest element nesting accepted by [`normalize`]. The tree is walked recursively
/// when rendered and dropped, so it must stay well within the stack.
pub const MAX_DEPTH: usize = 256;

/// Drop the namespace prefix of a qualified name, e.g. `gml:Point` becomes `Point`.
///
/// Everything up to the first colon after the first character is removed, so a leading
/// colon is never taken as the separator on its own.
pub fn strip_namespace_prefix(name: &str) -> &str {
    match name.char_indices().skip(1).find(|(_, c)| *c == ':') {
        Some((index, _)) => &name[index + 1..],
        None => name,
    }
}

/// Accumulates elements while the reader walks the document.
struct TreeBuilder {
    root: Element,
    open: Vec<(String, Element)>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            root: Element::new(),
            open: Vec::new(),
        }
    }

    fn open(&mut self, name: String, position: usize) -> Result<(), ParseError> {
        if self.open.is_empty() && !self.root.is_empty() {
            return Err(ParseError::MultipleRootElements { name, position });
        }
        if self.open.len() >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                position,
                max_depth: MAX_DEPTH,
            });
        }
        self.open.push((name, Element::new()));
        Ok(())
    }

    // quick-xml rejects closing tags without a matching opening tag before they get here.
    fn close(&mut self) {
        if let Some((name, element)) = self.open.pop() {
            match self.open.last_mut() {
                Some((_, parent)) => parent.push_child(name, element),
                None => self.root.push_child(name, element),
            }
        }
    }

    fn empty(&mut self, name: String, position: usize) -> Result<(), ParseError> {
        self.open(name, position)?;
        self.close();
        Ok(())
    }

    fn text(&mut self, text: &str, position: usize) -> Result<(), ParseError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        match self.open.last_mut() {
            Some((_, element)) => {
                element.append_text(text);
                Ok(())
            }
            None => Err(ParseError::TextOutsideRoot { position }),
        }
    }

    fn finish(mut self) -> Result<Element, ParseError> {
        if let Some((name, _)) = self.open.pop() {
            return Err(ParseError::UnclosedElement { name });
        }
        if self.root.is_empty() {
            return Err(ParseError::NoRootElement);
        }
        Ok(self.root)
    }
}

/// Parse XML text into a tree keyed by local element names.
///
/// The returned element is a synthetic root holding the document element as its only child,
/// so a WFS response is addressed as `root.get("FeatureCollection")`. Attributes, comments,
/// processing instructions and the XML declaration are dropped. Whitespace-only text is
/// ignored, CDATA sections are treated as text.
pub fn normalize(xml: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::new();

    loop {
        let position = reader.buffer_position();
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => {
                return Err(ParseError::Xml {
                    position: reader.buffer_position(),
                    source,
                })
            }
        };
        let xml_error = |source| ParseError::Xml { position, source };

        match event {
            Event::Start(start) => {
                let name = reader
                    .decoder()
                    .decode(start.name().into_inner())
                    .map_err(xml_error)?;
                builder.open(strip_namespace_prefix(&name).to_string(), position)?;
            }
            Event::End(_) => builder.close(),
            Event::Empty(empty) => {
                let name = reader
                    .decoder()
                    .decode(empty.name().into_inner())
                    .map_err(xml_error)?;
                builder.empty(strip_namespace_prefix(&name).to_string(), position)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(xml_error)?;
                builder.text(&text, position)?;
            }
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                let text = reader.decoder().decode(&bytes).map_err(xml_error)?;
                builder.text(&text, position)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}
