//! The namespace model and the GIR parser producing it.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Error;
use crate::span::{FileId, Span};

/// A named, versioned collection of types, plus the namespaces it depends on.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Namespace {
    /// The name of the namespace, such as `Gtk`.
    pub name: String,

    /// The version of the namespace, such as `3.0`.  Only ever compared for
    /// equality, never interpreted.
    pub version: String,

    /// The namespaces this one requires at link time, in document order.
    pub includes: Vec<Include>,
}

/// A reference to another namespace required at link time.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Include {
    /// The name of the required namespace.
    pub name: String,

    /// The version of the required namespace.
    pub version: String,
}

/// A source of namespace models.
///
/// The generator only needs "given a path, produce a [Namespace]"; keeping
/// this behind a trait lets tests supply a canned model without touching XML.
pub trait ParseNamespace {
    /// Parses the namespace description at the given path.
    fn parse(&self, path: &Path) -> Result<Namespace, Error>;
}

/// Parses GIR introspection XML.
///
/// Only the `<namespace>` and `<include>` elements are consulted; the rest of
/// the document (types, functions, documentation) is skipped without
/// validation.  The prefixed `<c:include>` elements name C headers, not
/// namespaces, and are ignored.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct GirParser;

impl GirParser {
    /// Parses a GIR document held in memory.
    ///
    /// Spans in errors are byte offsets into `src`, attributed to `file_id`.
    pub fn parse_str(&self, path: &Path, file_id: FileId, src: &str) -> Result<Namespace, Error> {
        let mut reader = Reader::from_str(src);
        let mut namespace: Option<Namespace> = None;
        let mut includes = Vec::new();
        let mut depth = 0usize;

        loop {
            let start = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let at = reader.error_position() as usize;
                    return Err(Error::MalformedXml {
                        span: Span::new(file_id, at, at + 1),
                        message: err.to_string(),
                    });
                }
            };
            let span = Span::new(file_id, start, reader.buffer_position() as usize);

            match event {
                Event::Start(ref element) | Event::Empty(ref element) => {
                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                    }

                    // Qualified names, so that `<c:include>` stays excluded.
                    match element.name().as_ref() {
                        b"namespace" if namespace.is_none() => {
                            namespace = Some(Namespace {
                                name: required_attribute(element, "namespace", "name", span)?,
                                version: required_attribute(
                                    element,
                                    "namespace",
                                    "version",
                                    span,
                                )?,
                                includes: Vec::new(),
                            });
                        }
                        b"include" => includes.push(Include {
                            name: required_attribute(element, "include", "name", span)?,
                            version: required_attribute(element, "include", "version", span)?,
                        }),
                        _ => {}
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                // quick-xml does not flag unclosed elements at the end of
                // input on its own.
                Event::Eof if depth > 0 => {
                    let at = src.len();
                    return Err(Error::MalformedXml {
                        span: Span::new(file_id, at, at + 1),
                        message: "unexpected end of document inside an open element".to_owned(),
                    });
                }
                Event::Eof => break,
                _ => {}
            }
        }

        match namespace {
            Some(mut namespace) => {
                namespace.includes = includes;
                Ok(namespace)
            }
            None => Err(Error::MissingNamespace {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl ParseNamespace for GirParser {
    fn parse(&self, path: &Path) -> Result<Namespace, Error> {
        let src = fs::read_to_string(path).map_err(|err| Error::ReadInput {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        self.parse_str(path, FileId::default(), &src)
    }
}

/// Extracts a required, non-empty attribute from an element.
fn required_attribute(
    element: &BytesStart,
    element_name: &str,
    attribute: &'static str,
    span: Span,
) -> Result<String, Error> {
    for attr in element.attributes() {
        let attr = attr.map_err(|err| Error::MalformedXml {
            span,
            message: err.to_string(),
        })?;

        if attr.key.as_ref() == attribute.as_bytes() {
            let value = String::from_utf8_lossy(&attr.value).into_owned();
            if !value.is_empty() {
                return Ok(value);
            }

            break;
        }
    }

    Err(Error::MissingAttribute {
        span,
        element: element_name.to_owned(),
        attribute,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Namespace, Error> {
        GirParser.parse_str(Path::new("test.gir"), FileId::default(), src)
    }

    #[test]
    fn parses_namespace_and_includes() {
        let namespace = parse(
            r#"<?xml version="1.0"?>
            <repository version="1.2"
                        xmlns="http://www.gtk.org/introspection/core/1.0"
                        xmlns:c="http://www.gtk.org/introspection/c/1.0">
              <include name="GLib" version="2.0"/>
              <include name="GObject" version="2.0"/>
              <package name="gtk+-3.0"/>
              <c:include name="gtk/gtk.h"/>
              <namespace name="Gtk" version="3.0" shared-library="libgtk-3.so.0">
                <class name="Widget"/>
              </namespace>
            </repository>"#,
        )
        .unwrap();

        assert_eq!(namespace.name, "Gtk");
        assert_eq!(namespace.version, "3.0");
        assert_eq!(
            namespace.includes,
            vec![
                Include {
                    name: "GLib".to_owned(),
                    version: "2.0".to_owned(),
                },
                Include {
                    name: "GObject".to_owned(),
                    version: "2.0".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn namespace_without_includes_is_valid() {
        let namespace = parse(
            r#"<repository><namespace name="GLib" version="2.0"/></repository>"#,
        )
        .unwrap();

        assert_eq!(namespace.name, "GLib");
        assert!(namespace.includes.is_empty());
    }

    #[test]
    fn header_includes_are_not_namespace_includes() {
        let namespace = parse(
            r#"<repository xmlns:c="http://www.gtk.org/introspection/c/1.0">
              <c:include name="glib.h"/>
              <namespace name="GLib" version="2.0"/>
            </repository>"#,
        )
        .unwrap();

        assert!(namespace.includes.is_empty());
    }

    #[test]
    fn missing_namespace_element_fails() {
        assert_eq!(
            parse(r#"<repository version="1.2"/>"#),
            Err(Error::MissingNamespace {
                path: Path::new("test.gir").to_path_buf(),
            })
        );
    }

    #[test]
    fn include_without_version_fails() {
        let err = parse(
            r#"<repository>
              <include name="GLib"/>
              <namespace name="Gtk" version="3.0"/>
            </repository>"#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::MissingAttribute {
                attribute: "version",
                ..
            }
        ));
    }

    #[test]
    fn empty_namespace_name_fails() {
        let err = parse(r#"<repository><namespace name="" version="2.0"/></repository>"#)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::MissingAttribute {
                attribute: "name",
                ..
            }
        ));
    }

    #[test]
    fn truncated_document_fails() {
        let err = parse(r#"<repository><namespace name="Gtk" version="3.0">"#).unwrap_err();

        assert!(matches!(err, Error::MalformedXml { .. }));
    }

    #[test]
    fn unclosed_root_element_fails() {
        let err = parse(r#"<repository><namespace name="Gtk" version="3.0"/>"#).unwrap_err();

        assert!(matches!(err, Error::MalformedXml { .. }));
    }

    #[test]
    fn unquoted_attribute_value_fails() {
        let err = parse(r#"<repository><namespace name="Gtk" version=3.0/></repository>"#)
            .unwrap_err();

        assert!(matches!(err, Error::MalformedXml { .. }));
    }

    #[test]
    fn unbalanced_markup_fails() {
        let err = parse(r#"<repository><namespace name="Gtk" version="3.0"></repository>"#)
            .unwrap_err();

        assert!(matches!(err, Error::MalformedXml { .. }));
    }
}
