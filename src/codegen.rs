//! Generation of crate linkage declarations for a namespace.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use uuid::Uuid;

use crate::error::Error;
use crate::gir::{GirParser, Namespace, ParseNamespace};

/// The link-name prefix shared by every generated binding crate.
pub const LINK_PREFIX: &str = "grust-";

/// The name of the runtime support crate every generated crate links against.
pub const RUNTIME_NAME: &str = "grust";

/// The version of the runtime support crate.
// TODO: substitute from the build configuration once there is one.
pub const RUNTIME_VERSION: &str = "0.1";

/// A source of fresh crate identifiers.
pub trait UuidProvider {
    /// Mints an identifier for one generated crate.
    fn fresh_uuid(&self) -> String;
}

/// Mints a random version 4 UUID per call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomUuid;

impl UuidProvider for RandomUuid {
    fn fresh_uuid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Generates the linkage declaration file for one namespace.
pub struct Codegen<P = GirParser, U = RandomUuid> {
    /// The path of the namespace description to process.
    pub input: PathBuf,

    /// The path of the generated file, replaced wholesale.
    pub output: PathBuf,

    /// A pinned crate identifier.  A fresh one is minted when absent.
    pub uuid: Option<String>,

    /// The version of the runtime crate to declare.
    pub runtime_version: String,

    /// The parser producing the namespace model.
    pub parser: P,

    /// The identifier source consulted when no identifier is pinned.
    pub uuids: U,
}

impl Codegen {
    /// Creates a new [Codegen] with the default parser and identifier source.
    pub fn new(input: PathBuf, output: PathBuf, uuid: Option<String>) -> Self {
        Self {
            input,
            output,
            uuid,
            runtime_version: RUNTIME_VERSION.to_owned(),
            parser: GirParser,
            uuids: RandomUuid,
        }
    }
}

impl<P: ParseNamespace, U: UuidProvider> Codegen<P, U> {
    /// Generates the declaration file for the namespace at the input path.
    ///
    /// The output file is created (or truncated) only once the input has
    /// parsed successfully, and is closed on every exit path.  A failed write
    /// can still leave partial content behind.
    pub fn generate(&self) -> Result<(), Error> {
        let namespace = self.parser.parse(&self.input)?;
        if namespace.name.is_empty() || namespace.version.is_empty() {
            return Err(Error::IncompleteNamespace {
                name: namespace.name,
                version: namespace.version,
            });
        }

        let file = File::create(&self.output).map_err(|err| Error::CreateOutput {
            path: self.output.clone(),
            message: err.to_string(),
        })?;

        let mut out = BufWriter::new(file);
        self.write_declarations(&mut out, &namespace)
            .and_then(|_| out.flush())
            .map_err(|err| Error::WriteOutput {
                path: self.output.clone(),
                message: err.to_string(),
            })
    }

    /// Writes the complete declaration text for `namespace` to `out`.
    fn write_declarations(&self, out: &mut impl Write, namespace: &Namespace) -> io::Result<()> {
        let uuid = match &self.uuid {
            Some(uuid) => uuid.clone(),
            None => self.uuids.fresh_uuid(),
        };

        writeln!(out, "// This is a generated file. Do not edit.")?;
        writeln!(out)?;
        writeln!(
            out,
            "#[link(name=\"{}\", vers=\"{}\", uuid=\"{}\")];",
            link_name(&namespace.name),
            namespace.version,
            uuid
        )?;
        writeln!(out)?;

        write_extern_mod(out, RUNTIME_NAME, &self.runtime_version, RUNTIME_NAME)?;
        for include in &namespace.includes {
            // TODO: follow includes transitively to import all extern modules?
            write_extern_mod(out, &include.name, &include.version, &link_name(&include.name))?;
        }

        Ok(())
    }
}

/// Derives the crate link name for a namespace name.
///
/// Applies to the namespace itself and to every include, but not to the
/// runtime crate, whose link name is [RUNTIME_NAME] verbatim.
pub fn link_name(name: &str) -> String {
    format!("{}{}", LINK_PREFIX, name)
}

/// Writes one `extern mod` declaration.
///
/// The local reference name is the lower-cased namespace name; the crate
/// link name and the version are emitted untouched.
fn write_extern_mod(
    out: &mut impl Write,
    name: &str,
    version: &str,
    crate_name: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "extern mod {} (name=\"{}\", vers=\"{}\");",
        name.to_lowercase(),
        crate_name,
        version
    )
}
