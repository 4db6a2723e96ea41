mod builder;
mod element;
mod extension;

pub(crate) use element::Element;
pub(crate) use extension::{Extension, decode_code, parse_number};
pub use extension::{Flag, boolean_from_string};

use crate::error::{Error, Result};
use builder::TreeBuilder;
use log::debug;
use quick_xml::{Reader, escape::resolve_predefined_entity, events::Event};

/// Read the whole document into a namespace-resolved element tree.
pub(crate) fn load(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => builder.start(&e)?,
            Event::Empty(e) => builder.empty(&e)?,
            Event::End(_) => builder.end()?,
            Event::Text(e) => builder.add_text(&e.decode()?)?,
            Event::CData(e) => builder.add_text(&e.decode()?)?,
            Event::GeneralRef(e) => {
                let text = match e.resolve_char_ref()? {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = e.decode()?;
                        resolve_predefined_entity(&name)
                            .ok_or_else(|| {
                                Error::MalformedDocument(format!("unknown entity &{name};"))
                            })?
                            .to_string()
                    }
                };
                builder.add_text(&text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    let root = builder.finish()?;
    debug!("loaded document root {root}");
    Ok(root)
}
