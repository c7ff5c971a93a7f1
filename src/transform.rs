//! # Interface Document Rewrite
//!
//! Turns one upstream interface definition document into the fragment that
//! gets pretty-printed and emitted:
//!
//! - every `annotation` element is dropped, at any nesting depth;
//! - every top-level `interface` whose `name` attribute is in the exclusion
//!   set is dropped, subtree and all;
//! - the surviving interfaces are re-parented, in document order, under a
//!   fresh bare `<node>` element, so nothing from the original root (its
//!   attributes, text, comments, or non-interface children) carries over.
//!
//! The rewrite is a pure function from source text to output text. Instead
//! of mutating a parsed tree while walking it, the streaming reader copies
//! the events worth keeping into a writer and skips over the subtrees that
//! are not, which sidesteps iterator-invalidation questions entirely.

use std::collections::BTreeSet;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};

const INTERFACE_TAG: &[u8] = b"interface";
const ANNOTATION_TAG: &[u8] = b"annotation";
const NAME_ATTR: &[u8] = b"name";

/// Rewrite one interface definition document into a serialized `<node>`
/// fragment containing only the retained, annotation-free interfaces.
///
/// The output carries no XML declaration and no DOCTYPE; the caller is
/// responsible for prepending the introspection DOCTYPE header after
/// formatting.
pub fn rewrite_document(source: &str, excluded: &BTreeSet<String>) -> Result<String> {
    let mut reader = Reader::from_str(source);
    let mut writer = Writer::new(Vec::new());

    // Skip the prolog (declaration, DOCTYPE, comments, whitespace) up to
    // the document element. `None` means the root is self-closing and has
    // no children at all.
    let root_has_children = loop {
        match reader.read_event()? {
            Event::Start(_) => break true,
            Event::Empty(_) => break false,
            Event::Eof => {
                return Err(Error::Document {
                    message: "no root element".to_string(),
                })
            }
            _ => {}
        }
    };

    writer.write_event(Event::Start(BytesStart::new("node")))?;

    if root_has_children {
        loop {
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == INTERFACE_TAG => {
                    if is_excluded(&e, excluded)? {
                        reader.read_to_end(e.name())?;
                    } else {
                        copy_interface(&mut reader, &mut writer, e)?;
                    }
                }
                Event::Empty(e) if e.name().as_ref() == INTERFACE_TAG => {
                    if !is_excluded(&e, excluded)? {
                        writer.write_event(Event::Empty(e))?;
                    }
                }
                // Non-interface children of the root are not part of the
                // output document.
                Event::Start(e) => {
                    reader.read_to_end(e.name())?;
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(Error::Document {
                        message: "unexpected end of document before root was closed".to_string(),
                    })
                }
                _ => {}
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new("node")))?;

    // Drain the epilog so trailing syntax errors still fail the file.
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            _ => {}
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Document {
        message: format!("rewritten document is not valid UTF-8: {e}"),
    })
}

/// Copy one interface subtree into the writer, dropping every `annotation`
/// element encountered along the way. Attribute order and all other content
/// (text, CDATA, comments) pass through untouched.
fn copy_interface<'a>(
    reader: &mut Reader<&'a [u8]>,
    writer: &mut Writer<Vec<u8>>,
    start: BytesStart<'a>,
) -> Result<()> {
    writer.write_event(Event::Start(start))?;

    let mut depth = 1usize;
    while depth > 0 {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == ANNOTATION_TAG => {
                reader.read_to_end(e.name())?;
            }
            Event::Empty(e) if e.name().as_ref() == ANNOTATION_TAG => {}
            Event::Start(e) => {
                depth += 1;
                writer.write_event(Event::Start(e))?;
            }
            Event::End(e) => {
                depth -= 1;
                writer.write_event(Event::End(e))?;
            }
            Event::Eof => {
                return Err(Error::Document {
                    message: "unexpected end of document inside an interface".to_string(),
                })
            }
            event => {
                writer.write_event(event)?;
            }
        }
    }

    Ok(())
}

fn is_excluded(element: &BytesStart<'_>, excluded: &BTreeSet<String>) -> Result<bool> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        if attribute.key.as_ref() == NAME_ATTR {
            let name = attribute.unescape_value()?;
            return Ok(excluded.contains(name.as_ref()));
        }
    }
    // An interface without a name attribute cannot match any exclusion.
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer_only() -> BTreeSet<String> {
        ["org.freedesktop.DBus.Peer".to_string()].into()
    }

    fn count_occurrences(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_drops_peer_interface_and_annotations() {
        let source = r#"<node name="/org/freedesktop/portal/desktop">
  <interface name="com.example.Foo">
    <method name="Bar"/>
  </interface>
  <interface name="org.freedesktop.DBus.Peer">
    <annotation name="org.example.Hidden" value="yes"/>
    <method name="Ping"/>
  </interface>
</node>"#;

        let output = rewrite_document(source, &peer_only()).unwrap();

        assert_eq!(count_occurrences(&output, "<interface"), 1);
        assert!(output.contains(r#"<interface name="com.example.Foo">"#));
        assert!(!output.contains("org.freedesktop.DBus.Peer"));
        assert!(!output.contains("annotation"));
    }

    #[test]
    fn test_exclusion_is_exact_match_only() {
        let source = r#"<node>
  <interface name="org.freedesktop.DBus.Peering"><method name="M"/></interface>
  <interface name="Peer"><method name="M"/></interface>
  <interface name="org.freedesktop.DBus.Peer"><method name="Ping"/></interface>
</node>"#;

        let output = rewrite_document(source, &peer_only()).unwrap();

        assert_eq!(count_occurrences(&output, "<interface"), 2);
        assert!(output.contains("org.freedesktop.DBus.Peering"));
        assert!(output.contains(r#"<interface name="Peer">"#));
        assert!(!output.contains(r#"name="org.freedesktop.DBus.Peer">"#));
    }

    #[test]
    fn test_annotations_removed_at_any_depth() {
        let source = r#"<node>
  <interface name="com.example.Foo">
    <annotation name="a.b.C" value="1"/>
    <method name="M">
      <annotation name="a.b.D" value="2"/>
      <arg type="s" name="text" direction="in"/>
    </method>
    <signal name="S">
      <annotation name="a.b.E" value="3">
        <annotation name="a.b.Nested" value="4"/>
      </annotation>
    </signal>
    <property name="P" type="b" access="read">
      <annotation name="a.b.F" value="5"/>
    </property>
  </interface>
</node>"#;

        let output = rewrite_document(source, &peer_only()).unwrap();

        assert!(!output.contains("annotation"));
        assert!(output.contains(r#"<arg type="s" name="text" direction="in"/>"#));
        assert!(output.contains(r#"<signal name="S">"#));
        assert!(output.contains(r#"<property name="P" type="b" access="read">"#));
    }

    #[test]
    fn test_interface_order_preserved() {
        let source = r#"<node>
  <interface name="b.Second"/>
  <interface name="a.First"/>
  <interface name="c.Third"/>
</node>"#;

        let output = rewrite_document(source, &peer_only()).unwrap();

        let b = output.find("b.Second").unwrap();
        let a = output.find("a.First").unwrap();
        let c = output.find("c.Third").unwrap();
        assert!(b < a && a < c);
    }

    #[test]
    fn test_fresh_root_drops_original_root_attributes_and_text() {
        let source = r#"<node name="/org/freedesktop/portal/desktop" xmlns:doc="http://example.com">
  stray text
  <doc:summary>not an interface</doc:summary>
  <interface name="com.example.Foo"/>
</node>"#;

        let output = rewrite_document(source, &peer_only()).unwrap();

        assert!(output.starts_with("<node>"));
        assert!(output.ends_with("</node>"));
        assert!(!output.contains("/org/freedesktop/portal/desktop"));
        assert!(!output.contains("stray text"));
        assert!(!output.contains("summary"));
        assert!(output.contains(r#"<interface name="com.example.Foo"/>"#));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let source = r#"<node><interface name="com.example.Foo">
  <arg direction="out" type="s" name="result"/>
</interface></node>"#;

        let output = rewrite_document(source, &peer_only()).unwrap();
        assert!(output.contains(r#"<arg direction="out" type="s" name="result"/>"#));
    }

    #[test]
    fn test_empty_root_produces_empty_node() {
        let output = rewrite_document("<node/>", &peer_only()).unwrap();
        assert_eq!(output, "<node></node>");
    }

    #[test]
    fn test_only_excluded_interface_produces_empty_node() {
        let source = r#"<node><interface name="org.freedesktop.DBus.Peer"><method name="Ping"/></interface></node>"#;
        let output = rewrite_document(source, &peer_only()).unwrap();
        assert_eq!(output, "<node></node>");
    }

    #[test]
    fn test_prolog_is_ignored() {
        let source = "<?xml version=\"1.0\"?>\n<!DOCTYPE node PUBLIC \"-//freedesktop//DTD D-BUS Object Introspection 1.0//EN\"\n \"http://www.freedesktop.org/standards/dbus/1.0/introspect.dtd\">\n<!-- comment -->\n<node><interface name=\"com.example.Foo\"/></node>";

        let output = rewrite_document(source, &peer_only()).unwrap();
        assert!(output.starts_with("<node>"));
        assert!(!output.contains("DOCTYPE"));
        assert!(!output.contains("comment"));
        assert!(output.contains("com.example.Foo"));
    }

    #[test]
    fn test_non_xml_input_is_an_error() {
        let result = rewrite_document("this is not xml at all", &peer_only());
        assert!(matches!(result, Err(Error::Document { .. })));
    }

    #[test]
    fn test_truncated_document_is_an_error() {
        let result = rewrite_document(
            r#"<node><interface name="com.example.Foo"><method name="M">"#,
            &peer_only(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unclosed_comment_is_an_error() {
        let result = rewrite_document(
            r#"<node><interface name="com.example.Foo"/><!-- broken"#,
            &peer_only(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_exclusion_set_keeps_everything() {
        let source = r#"<node>
  <interface name="org.freedesktop.DBus.Peer"><method name="Ping"/></interface>
  <interface name="com.example.Foo"/>
</node>"#;

        let output = rewrite_document(source, &BTreeSet::new()).unwrap();
        assert_eq!(count_occurrences(&output, "<interface"), 2);
    }

    #[test]
    fn test_escaped_attribute_values_pass_through() {
        let source = r#"<node><interface name="com.example.Foo">
  <method name="M"><arg name="a&amp;b" type="s"/></method>
</interface></node>"#;

        let output = rewrite_document(source, &peer_only()).unwrap();
        assert!(output.contains("a&amp;b"));
    }
}
