// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog parser.
//!
//! The expected structure is:
//!
//! ```text
//! <TS version="2.1" language="de" sourcelanguage="en">
//!   <context>
//!     <name>CClientDlg</name>
//!     <message>
//!       <location filename="../clientdlg.cpp" line="42"/>
//!       <source>Hello %1</source>
//!       <translation type="unfinished">Hallo %1</translation>
//!     </message>
//!   </context>
//! </TS>
//! ```
//!
//! Only `message` elements that are children of a `context` child of the root are
//! read; a missing `source` or `translation` is read as an empty string.

use std::{borrow::Cow, fmt::Display, path::Path};

use encoding_rs::{Encoding, UTF_8};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::ts::{
    catalog::{Catalog, CatalogError, language_from_filename},
    lines::LineLocator,
    unit::{Status, Unit},
};

const ROOT_ELEMENT: &[u8] = b"TS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Root,
    Context,
    ContextName,
    Message,
    Source,
    Translation,
    NumerusForm,
    Other,
}

impl Node {
    /// Return the kind of an element according to its parent and name.
    fn classify(parent: Node, name: &[u8]) -> Node {
        match (parent, name) {
            (Node::Root, b"context") => Node::Context,
            (Node::Context, b"name") => Node::ContextName,
            (Node::Context, b"message") => Node::Message,
            (Node::Message, b"source") => Node::Source,
            (Node::Message, b"translation") => Node::Translation,
            (Node::Translation, b"numerusform") => Node::NumerusForm,
            _ => Node::Other,
        }
    }
}

/// Decode raw data to a string, honoring a byte order mark (UTF-8 by default).
///
/// Invalid sequences are replaced by U+FFFD.
fn decode(data: &[u8]) -> Cow<'_, str> {
    let (encoding, bom_len) = Encoding::for_bom(data).unwrap_or((UTF_8, 0));
    let (text, _) = encoding.decode_without_bom_handling(&data[bom_len..]);
    text
}

struct CatalogReader<'d> {
    reader: Reader<&'d [u8]>,
    locator: LineLocator<'d>,
    catalog: Catalog,
    stack: Vec<Node>,
    context_name: String,
    unit: Option<Unit>,
    root_seen: bool,
}

impl<'d> CatalogReader<'d> {
    fn new(path: &Path, text: &'d str) -> Self {
        Self {
            reader: Reader::from_str(text),
            locator: LineLocator::new(text.as_bytes()),
            catalog: Catalog {
                path: path.to_path_buf(),
                file_language: language_from_filename(path),
                ..Default::default()
            },
            stack: Vec::new(),
            context_name: String::new(),
            unit: None,
            root_seen: false,
        }
    }

    fn error<E: Display>(&self, err: &E) -> CatalogError {
        CatalogError::Xml {
            position: self.reader.buffer_position(),
            message: err.to_string(),
        }
    }

    /// Get the unescaped value of an attribute.
    fn attribute(&self, elem: &BytesStart, name: &str) -> Result<Option<String>, CatalogError> {
        match elem.try_get_attribute(name) {
            Ok(Some(attr)) => attr
                .unescape_value()
                .map(|value| Some(value.into_owned()))
                .map_err(|err| self.error(&err)),
            Ok(None) => Ok(None),
            Err(err) => Err(self.error(&err)),
        }
    }

    /// Handle the start of an element and return its kind.
    fn start_element(&mut self, elem: &BytesStart) -> Result<Node, CatalogError> {
        let name = elem.name();
        let node = match self.stack.last() {
            Some(parent) => Node::classify(*parent, name.as_ref()),
            None if self.root_seen => {
                return Err(self.error(&"extra content after the root element"));
            }
            None if name.as_ref() == ROOT_ELEMENT => Node::Root,
            None => {
                return Err(CatalogError::NotTs(
                    String::from_utf8_lossy(name.as_ref()).into_owned(),
                ));
            }
        };
        // Every message element moves the line cursor, even the ones that are
        // not read, so that the next messages stay aligned.
        let line_number = if name.as_ref() == b"message" {
            self.locator.next_message_line()
        } else {
            0
        };
        match node {
            Node::Root => {
                self.root_seen = true;
                self.catalog.language = self.attribute(elem, "language")?.unwrap_or_default();
                self.catalog.source_language = self.attribute(elem, "sourcelanguage")?;
            }
            Node::Context => self.context_name.clear(),
            Node::Message => {
                let mut unit = Unit::new(line_number);
                unit.context.clone_from(&self.context_name);
                self.unit = Some(unit);
            }
            Node::Translation => {
                let status = Status::from_type(self.attribute(elem, "type")?.as_deref());
                if let Some(unit) = self.unit.as_mut() {
                    unit.status = status;
                }
            }
            Node::NumerusForm => {
                if let Some(unit) = self.unit.as_mut() {
                    unit.numerus_forms.push(String::new());
                }
            }
            Node::ContextName | Node::Source | Node::Other => {}
        }
        Ok(node)
    }

    /// Handle the end of an element.
    fn end_element(&mut self, node: Node) {
        if node == Node::Message {
            if let Some(unit) = self.unit.take() {
                self.catalog.units.push(unit);
            }
        }
    }

    /// Append text to the element being read.
    fn add_text(&mut self, text: &str) {
        let Some(node) = self.stack.last() else {
            return;
        };
        match node {
            Node::ContextName => self.context_name.push_str(text),
            Node::Source => {
                if let Some(unit) = self.unit.as_mut() {
                    unit.source.push_str(text);
                }
            }
            Node::Translation => {
                if let Some(unit) = self.unit.as_mut() {
                    unit.translation.push_str(text);
                }
            }
            Node::NumerusForm => {
                if let Some(form) = self
                    .unit
                    .as_mut()
                    .and_then(|unit| unit.numerus_forms.last_mut())
                {
                    form.push_str(text);
                }
            }
            _ => {}
        }
    }

    fn read(mut self) -> Result<Catalog, CatalogError> {
        loop {
            let event = self.reader.read_event().map_err(|err| self.error(&err))?;
            match event {
                Event::Start(elem) => {
                    let node = self.start_element(&elem)?;
                    self.stack.push(node);
                }
                Event::Empty(elem) => {
                    let node = self.start_element(&elem)?;
                    self.end_element(node);
                }
                Event::End(_) => {
                    if let Some(node) = self.stack.pop() {
                        self.end_element(node);
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|err| self.error(&err))?;
                    if self.stack.is_empty() && !text.trim().is_empty() {
                        return Err(self.error(&"text outside the root element"));
                    }
                    self.add_text(&text);
                }
                Event::CData(cdata) => {
                    let text = cdata.decode().map_err(|err| self.error(&err))?;
                    self.add_text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if !self.stack.is_empty() {
            return Err(self.error(&"unexpected end of document"));
        }
        if !self.root_seen {
            return Err(self.error(&"no root element"));
        }
        Ok(self.catalog)
    }
}

/// Parse the content of a catalog.
pub fn parse_catalog(path: &Path, data: &[u8]) -> Result<Catalog, CatalogError> {
    let text = decode(data);
    CatalogReader::new(path, &text).read()
}
