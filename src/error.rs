use std::path::PathBuf;

use codespan_reporting::diagnostic::{Diagnostic, Severity};

use crate::span::Span;

/// An error that occurred while generating a declaration file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
#[repr(u32)]
pub enum Error {
    /// The input GIR file could not be read.
    ReadInput {
        /// The path of the input file.
        path: PathBuf,

        /// The operating system's description of the failure.
        message: String,
    } = 1,

    /// The input document is not well-formed XML.
    MalformedXml {
        /// The location of the offending markup.
        span: Span,

        /// The XML reader's description of the failure.
        message: String,
    } = 2,

    /// The input document contains no `<namespace>` element.
    MissingNamespace {
        /// The path of the input file.
        path: PathBuf,
    } = 3,

    /// A `<namespace>` or `<include>` element lacks a required attribute, or
    /// the attribute is empty.
    MissingAttribute {
        /// The location of the offending element.
        span: Span,

        /// The name of the element.
        element: String,

        /// The name of the missing attribute.
        attribute: &'static str,
    } = 4,

    /// The parsed namespace has no usable name or version.
    IncompleteNamespace {
        /// The namespace name, possibly empty.
        name: String,

        /// The namespace version, possibly empty.
        version: String,
    } = 5,

    /// The output file could not be created.
    CreateOutput {
        /// The path of the output file.
        path: PathBuf,

        /// The operating system's description of the failure.
        message: String,
    } = 6,

    /// Writing the generated declarations failed partway through.
    WriteOutput {
        /// The path of the output file.
        path: PathBuf,

        /// The operating system's description of the failure.
        message: String,
    } = 7,
}

impl Error {
    /// Returns the error code for this error.
    #[inline]
    pub fn error_code(&self) -> u32 {
        unsafe { *(self as *const Self as *const u32) }
    }

    /// Returns a [Diagnostic] for this error.
    pub fn as_diagnostic(&self) -> Diagnostic<usize> {
        let mut diagnostic =
            Diagnostic::new(Severity::Error).with_code(format!("E{:0>4}", self.error_code()));

        match self {
            Self::ReadInput { path, message } => {
                diagnostic.message = format!("Cannot read '{}'", path.display());
                diagnostic.notes.push(message.clone());
            }
            Self::MalformedXml { span, message } => {
                diagnostic.message = "Malformed GIR document".to_owned();
                diagnostic.labels.push(span.primary().with_message(message.clone()));
            }
            Self::MissingNamespace { path } => {
                diagnostic.message =
                    format!("No namespace declared in '{}'", path.display());
            }
            Self::MissingAttribute {
                span,
                element,
                attribute,
            } => {
                diagnostic.message = format!(
                    "The <{}> element requires a non-empty '{}' attribute",
                    element, attribute
                );
                diagnostic.labels.push(span.primary());
            }
            Self::IncompleteNamespace { name, version } => {
                diagnostic.message = "The namespace is missing its name or version".to_owned();
                diagnostic
                    .notes
                    .push(format!("name: {:?}, version: {:?}", name, version));
            }
            Self::CreateOutput { path, message } => {
                diagnostic.message = format!("Cannot create '{}'", path.display());
                diagnostic.notes.push(message.clone());
            }
            Self::WriteOutput { path, message } => {
                diagnostic.message = format!("Failed writing '{}'", path.display());
                diagnostic.notes.push(message.clone());
                diagnostic
                    .notes
                    .push("The file may be left with partial content".to_owned());
            }
        }

        diagnostic
    }
}
