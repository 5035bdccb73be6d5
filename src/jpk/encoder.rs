//! Field-map to XML serialization using quick-xml.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use super::fields::{ATTRIBUTE_PREFIX, FieldMap, FieldValue, TEXT_KEY};
use crate::core::JpkError;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Options passed to a [`DocumentSerializer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderOptions {
    /// Encoding label written into the XML declaration. Output is always UTF-8.
    pub encoding: String,
    /// Indent nested elements by two spaces.
    pub format_output: bool,
    /// Omit elements whose value is empty text, an empty map or an empty list.
    pub remove_empty_tags: bool,
    /// Name of the root element wrapping the top-level map.
    pub root_node_name: String,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            encoding: "UTF-8".into(),
            format_output: true,
            remove_empty_tags: true,
            root_node_name: super::PLACEHOLDER_ROOT.into(),
        }
    }
}

/// Turns an ordered field mapping into document text.
pub trait DocumentSerializer {
    fn serialize(&self, root: &FieldMap, options: &EncoderOptions) -> Result<String, JpkError>;
}

impl<S: DocumentSerializer + ?Sized> DocumentSerializer for &S {
    fn serialize(&self, root: &FieldMap, options: &EncoderOptions) -> Result<String, JpkError> {
        (**self).serialize(root, options)
    }
}

/// The default [`DocumentSerializer`], backed by quick-xml.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEncoder;

impl DocumentSerializer for XmlEncoder {
    fn serialize(&self, root: &FieldMap, options: &EncoderOptions) -> Result<String, JpkError> {
        let mut writer = if options.format_output {
            Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2)
        } else {
            Writer::new(Cursor::new(Vec::new()))
        };

        writer
            .write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some(options.encoding.as_str()),
                None,
            )))
            .map_err(xml_err)?;

        // The root is always written out in full, even when empty.
        write_map(&mut writer, &options.root_node_name, root, options, true)?;

        let buf = writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| JpkError::Xml(format!("UTF-8 error: {e}")))
    }
}

fn write_value(
    writer: &mut XmlWriter,
    name: &str,
    value: &FieldValue,
    options: &EncoderOptions,
) -> Result<(), JpkError> {
    match value {
        FieldValue::Text(text) => {
            if text.is_empty() {
                if !options.remove_empty_tags {
                    writer
                        .write_event(Event::Empty(BytesStart::new(name)))
                        .map_err(xml_err)?;
                }
                return Ok(());
            }
            write_text_element(writer, name, text)
        }
        FieldValue::Map(map) => write_map(writer, name, map, options, false),
        FieldValue::List(items) => {
            for item in items {
                write_value(writer, name, item, options)?;
            }
            Ok(())
        }
    }
}

fn write_map(
    writer: &mut XmlWriter,
    name: &str,
    map: &FieldMap,
    options: &EncoderOptions,
    force: bool,
) -> Result<(), JpkError> {
    if map.is_empty() && options.remove_empty_tags && !force {
        return Ok(());
    }

    let mut start = BytesStart::new(name);
    let mut text = None;
    let mut children = Vec::new();
    for (key, value) in map.iter() {
        if let Some(attr) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            let v = value.as_text().ok_or_else(|| {
                JpkError::Xml(format!("attribute '{attr}' on <{name}> must be text"))
            })?;
            start.push_attribute((attr, v));
        } else if key == TEXT_KEY {
            text = value.as_text();
        } else {
            children.push((key, value));
        }
    }

    let text = text.filter(|t| !t.is_empty());
    if text.is_none() && children.is_empty() && !force {
        writer.write_event(Event::Empty(start)).map_err(xml_err)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_err)?;
    if let Some(t) = text {
        writer
            .write_event(Event::Text(BytesText::new(t)))
            .map_err(xml_err)?;
    }
    for (key, value) in children {
        write_value(writer, key, value, options)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}

fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), JpkError> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_err)?;
    Ok(())
}

fn xml_err(e: std::io::Error) -> JpkError {
    JpkError::Xml(format!("XML write error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(root: &str) -> EncoderOptions {
        EncoderOptions {
            format_output: false,
            root_node_name: root.into(),
            ..Default::default()
        }
    }

    #[test]
    fn attributes_and_text_key() {
        let map = FieldMap::new().with(
            "Code",
            FieldMap::new()
                .with("@system", "X (1)")
                .with("@version", "1-1")
                .with("#", "X"),
        );
        let xml = XmlEncoder.serialize(&map, &compact("Root")).unwrap();
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?><Root><Code system="X (1)" version="1-1">X</Code></Root>"#
        );
    }

    #[test]
    fn lists_expand_to_siblings() {
        let rows = vec![
            FieldMap::new().with("N", "1"),
            FieldMap::new().with("N", "2"),
        ];
        let map = FieldMap::new().with("Row", rows).with("Count", 2usize);
        let xml = XmlEncoder.serialize(&map, &compact("R")).unwrap();
        assert!(xml.ends_with("<R><Row><N>1</N></Row><Row><N>2</N></Row><Count>2</Count></R>"));
    }

    #[test]
    fn empty_tags_removed_when_requested() {
        let map = FieldMap::new()
            .with("A", "")
            .with("B", FieldMap::new())
            .with("C", FieldValue::List(vec![]))
            .with("D", "x");
        let xml = XmlEncoder.serialize(&map, &compact("R")).unwrap();
        assert!(xml.ends_with("<R><D>x</D></R>"));
    }

    #[test]
    fn empty_tags_kept_otherwise() {
        let map = FieldMap::new().with("A", "").with("D", "x");
        let opts = EncoderOptions {
            remove_empty_tags: false,
            ..compact("R")
        };
        let xml = XmlEncoder.serialize(&map, &opts).unwrap();
        assert!(xml.ends_with("<R><A/><D>x</D></R>"));
    }

    #[test]
    fn empty_root_is_still_written() {
        let xml = XmlEncoder.serialize(&FieldMap::new(), &compact("R")).unwrap();
        assert!(xml.ends_with("<R></R>"));
    }

    #[test]
    fn text_is_escaped() {
        let map = FieldMap::new().with("Name", "A & B <JPK>");
        let xml = XmlEncoder.serialize(&map, &compact("JPK")).unwrap();
        assert!(xml.contains("<Name>A &amp; B &lt;JPK&gt;</Name>"));
        assert_eq!(xml.matches("<JPK>").count(), 1);
    }

    #[test]
    fn non_text_attribute_is_an_error() {
        let map = FieldMap::new().with("E", FieldMap::new().with("@a", FieldMap::new()));
        let err = XmlEncoder.serialize(&map, &compact("R")).unwrap_err();
        assert!(matches!(err, JpkError::Xml(_)));
    }

    #[test]
    fn pretty_output_indents_by_two() {
        let map = FieldMap::new().with("Outer", FieldMap::new().with("Inner", "v"));
        let xml = XmlEncoder
            .serialize(
                &map,
                &EncoderOptions {
                    root_node_name: "R".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<R>\n  <Outer>\n    <Inner>v</Inner>\n  </Outer>\n</R>"
        );
    }
}
