use super::element::{Attribute, Element, XML_NAMESPACE};
use crate::error::{Error, NO_ROOT_ELEMENT, Result, TRAILING_ELEMENT, UNCLOSED_ELEMENT};
use quick_xml::events::BytesStart;
use std::str;

const XMLNS: &str = "xmlns";

//
// stack: [
//            definitions,    <- root, finished last
//            process,
//            userTask,       <- receives text and children until its end tag
//        ]
// scopes: one frame of prefix bindings per open element
//

#[derive(Default)]
pub(super) struct TreeBuilder {
    root: Option<Element>,
    stack: Vec<Element>,
    scopes: Vec<Vec<(String, String)>>,
}

impl TreeBuilder {
    pub(super) fn start(&mut self, e: &BytesStart<'_>) -> Result<()> {
        if self.root.is_some() {
            return Err(Error::MalformedDocument(TRAILING_ELEMENT.into()));
        }

        let mut bindings = Vec::new();
        let mut raw = Vec::new();
        for attribute in e.attributes() {
            let attribute = attribute?;
            let key = utf8(attribute.key.as_ref())?.to_string();
            let value = attribute.unescape_value()?.into_owned();
            match key.split_once(':') {
                Some((XMLNS, prefix)) => bindings.push((prefix.to_string(), value)),
                None if key == XMLNS => bindings.push((String::new(), value)),
                _ => raw.push((key, value)),
            }
        }
        self.scopes.push(bindings);

        let (namespace, name) = self.resolve(utf8(e.name().as_ref())?, true)?;
        let attributes = raw
            .into_iter()
            .map(|(key, value)| {
                let (namespace, name) = self.resolve(&key, false)?;
                Ok(Attribute {
                    namespace,
                    name,
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.stack.push(Element {
            namespace,
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        });
        Ok(())
    }

    pub(super) fn empty(&mut self, e: &BytesStart<'_>) -> Result<()> {
        self.start(e)?;
        self.end()
    }

    pub(super) fn add_text(&mut self, value: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(element) => element.text.push_str(value),
            None if value.trim().is_empty() => {}
            None => return Err(Error::MalformedDocument(TRAILING_ELEMENT.into())),
        }
        Ok(())
    }

    pub(super) fn end(&mut self) -> Result<()> {
        let Some(element) = self.stack.pop() else {
            return Err(Error::MalformedDocument(NO_ROOT_ELEMENT.into()));
        };
        self.scopes.pop();
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.root = Some(element),
        }
        Ok(())
    }

    pub(super) fn finish(self) -> Result<Element> {
        if let Some(open) = self.stack.last() {
            return Err(Error::MalformedDocument(format!(
                "{UNCLOSED_ELEMENT} {}",
                open.name
            )));
        }
        self.root
            .ok_or_else(|| Error::MalformedDocument(NO_ROOT_ELEMENT.into()))
    }

    // Unprefixed elements take the default namespace, unprefixed attributes take none.
    fn resolve(&self, qname: &str, is_element: bool) -> Result<(Option<String>, String)> {
        let (prefix, local) = match qname.split_once(':') {
            Some((prefix, local)) => (prefix, local),
            None if is_element => ("", qname),
            None => return Ok((None, qname.to_string())),
        };
        if prefix == "xml" {
            return Ok((Some(XML_NAMESPACE.into()), local.to_string()));
        }
        let bound = self
            .scopes
            .iter()
            .rev()
            .flatten()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.clone());
        match bound {
            Some(uri) if uri.is_empty() => Ok((None, local.to_string())),
            Some(uri) => Ok((Some(uri), local.to_string())),
            None if prefix.is_empty() => Ok((None, local.to_string())),
            None => Err(Error::MalformedDocument(format!(
                "unbound namespace prefix {prefix} in {qname}"
            ))),
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    str::from_utf8(bytes).map_err(|e| Error::MalformedDocument(e.to_string()))
}
