use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::{GoodreadsError, Result};

/// Parse an XML response body into a nested [`Value`] tree.
///
/// Normalization rules:
/// - element attributes are merged into the same map as child elements;
///   on a name collision the attribute value wins
/// - a single child element collapses to a scalar/object instead of a
///   one-element list; repeated same-named children become an array
/// - an element with only text content becomes a plain string, an empty
///   element becomes the empty string
/// - text alongside attributes or children is stored under the `"_"` key
/// - all leaf values are strings; nothing is coerced to numbers or booleans
pub fn parse_xml(text: &str) -> Result<Value> {
    let mut reader = Reader::from_str(text);
    let mut root = Map::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let name = element_name(&start);
                let value = parse_element(&mut reader, &start)?;
                insert_child(&mut root, name, value);
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let value = empty_element(&start)?;
                insert_child(&mut root, name, value);
            }
            Event::Eof => break,
            // Prolog, comments and stray whitespace around the root
            _ => {}
        }
    }

    if root.is_empty() {
        return Err(GoodreadsError::Xml(
            "document has no root element".to_string(),
        ));
    }
    Ok(Value::Object(root))
}

fn parse_element(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Value> {
    let attrs = attributes(start)?;
    let mut children: Map<String, Value> = Map::new();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(child) => {
                let name = element_name(&child);
                let value = parse_element(reader, &child)?;
                insert_child(&mut children, name, value);
            }
            Event::Empty(child) => {
                let name = element_name(&child);
                let value = empty_element(&child)?;
                insert_child(&mut children, name, value);
            }
            Event::Text(t) => {
                let unescaped = t.unescape()?;
                let trimmed = unescaped.trim();
                if !trimmed.is_empty() {
                    text.push_str(trimmed);
                }
            }
            Event::CData(c) => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(GoodreadsError::Xml(
                    "unexpected end of document".to_string(),
                ))
            }
            _ => {}
        }
    }

    Ok(finish_element(attrs, children, text))
}

fn finish_element(
    attrs: Vec<(String, String)>,
    children: Map<String, Value>,
    text: String,
) -> Value {
    if attrs.is_empty() && children.is_empty() {
        return Value::String(text);
    }

    let mut map = children;
    if !text.is_empty() {
        map.insert("_".to_string(), Value::String(text));
    }
    // Attribute wins when it collides with a child element name
    for (key, value) in attrs {
        map.insert(key, Value::String(value));
    }
    Value::Object(map)
}

fn empty_element(start: &BytesStart<'_>) -> Result<Value> {
    let attrs = attributes(start)?;
    Ok(finish_element(attrs, Map::new(), String::new()))
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        out.push((key, value));
    }
    Ok(out)
}

/// Repeated same-named children turn into an array on the second occurrence
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => {
            let existing = slot.get_mut();
            if let Value::Array(items) = existing {
                items.push(value);
            } else {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
}
