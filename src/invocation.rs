//! Command-line invocation
//!
//! Grammar (program name excluded):
//!
//!   macrosub [-D<NAME>[=<VALUE>]]... [--] <file>...
//!
//! `-D<NAME>` maps NAME to a deletion, `-D<NAME>=<VALUE>` to VALUE (split on
//! the first `=`). Definitions and files may interleave. A literal `--` ends
//! option parsing: everything after it is a file, even when it starts with
//! `-`. Before `--`, any other argument starting with `-` is rejected.
//!
//! Files are kept as OS strings, so a path that is not valid UTF-8 is
//! accepted. A definition must be UTF-8 since it ends up in source text.

use crate::mapping::{MappingTable, Replacement};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

pub const USAGE: &str = "usage: macrosub [-D<NAME>[=<VALUE>]]... [--] <file>...";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mappings: MappingTable,
    pub files: Vec<PathBuf>,
}

/// Errors that can occur while parsing the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// An option other than `-D` before `--`
    IllegalArgument(String),
    /// `-D` or `-D=VALUE` with no name
    EmptyMappingName(String),
    /// A `-D` definition that is not valid UTF-8
    NonUtf8Mapping(String),
    /// No file to process
    NoFiles,
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::IllegalArgument(arg) => write!(f, "illegal argument: {}", arg),
            ArgError::EmptyMappingName(arg) => write!(f, "illegal empty mapping: {}", arg),
            ArgError::NonUtf8Mapping(arg) => write!(f, "mapping is not valid UTF-8: {}", arg),
            ArgError::NoFiles => write!(f, "no files given"),
        }
    }
}

impl std::error::Error for ArgError {}

impl Invocation {
    /// Parse arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut mappings = MappingTable::new();
        let mut files = Vec::new();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg == "--" {
                files.extend(args.by_ref().map(PathBuf::from));
                break;
            }
            let bytes = arg.as_encoded_bytes();
            if bytes.starts_with(b"-D") {
                let arg = arg
                    .into_string()
                    .map_err(|arg| ArgError::NonUtf8Mapping(arg.to_string_lossy().into_owned()))?;
                let (name, replacement) = parse_definition(&arg[2..]);
                if name.is_empty() {
                    return Err(ArgError::EmptyMappingName(arg));
                }
                if let Some(previous) = mappings.define(name, replacement) {
                    tracing::debug!(name, %previous, "mapping redefined");
                }
            } else if bytes.starts_with(b"-") {
                return Err(ArgError::IllegalArgument(arg.to_string_lossy().into_owned()));
            } else {
                files.push(PathBuf::from(arg));
            }
        }

        if files.is_empty() {
            return Err(ArgError::NoFiles);
        }
        Ok(Invocation { mappings, files })
    }
}

fn parse_definition(definition: &str) -> (&str, Replacement) {
    match definition.split_once('=') {
        Some((name, value)) => (name, Replacement::Text(value.to_string())),
        None => (definition, Replacement::Delete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_definitions_and_files() {
        let invocation =
            Invocation::parse(["-Dq=p", "-Dfoo", "a.c", "-DX=a=b", "b.c"]).unwrap();
        assert_eq!(
            invocation.mappings,
            MappingTable::new()
                .with_text("q", "p")
                .with_delete("foo")
                .with_text("X", "a=b")
        );
        assert_eq!(
            invocation.files,
            vec![PathBuf::from("a.c"), PathBuf::from("b.c")]
        );
    }

    #[test]
    fn test_empty_value_is_text() {
        let invocation = Invocation::parse(["-DX=", "a.c"]).unwrap();
        assert_eq!(
            invocation.mappings.lookup("X"),
            Some(&Replacement::Text(String::new()))
        );
    }

    #[test]
    fn test_double_dash_ends_options() {
        let invocation = Invocation::parse(["-DX", "--", "-Dy.c", "--", "-z.c"]).unwrap();
        assert_eq!(invocation.mappings.len(), 1);
        assert_eq!(
            invocation.files,
            vec![
                PathBuf::from("-Dy.c"),
                PathBuf::from("--"),
                PathBuf::from("-z.c")
            ]
        );
    }

    #[rstest]
    #[case(&["-D", "a.c"], ArgError::EmptyMappingName("-D".into()))]
    #[case(&["-D=1", "a.c"], ArgError::EmptyMappingName("-D=1".into()))]
    #[case(&["-x", "a.c"], ArgError::IllegalArgument("-x".into()))]
    #[case(&["a.c", "--help"], ArgError::IllegalArgument("--help".into()))]
    #[case(&["-", "a.c"], ArgError::IllegalArgument("-".into()))]
    #[case(&[], ArgError::NoFiles)]
    #[case(&["-DX=1"], ArgError::NoFiles)]
    #[case(&["-DX", "--"], ArgError::NoFiles)]
    fn test_errors(#[case] args: &[&str], #[case] expected: ArgError) {
        assert_eq!(Invocation::parse(args.iter().copied()), Err(expected));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_arguments() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let file = OsStr::from_bytes(b"caf\xe9.c");
        let invocation = Invocation::parse([OsStr::new("-DX=Y"), file]).unwrap();
        assert_eq!(invocation.files, vec![PathBuf::from(file)]);

        let definition = OsStr::from_bytes(b"-DX=caf\xe9");
        assert_eq!(
            Invocation::parse([definition, OsStr::new("a.c")]),
            Err(ArgError::NonUtf8Mapping("-DX=caf\u{fffd}".into()))
        );

        let option = OsStr::from_bytes(b"-\xff");
        assert!(matches!(
            Invocation::parse([option, OsStr::new("a.c")]),
            Err(ArgError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ArgError::EmptyMappingName("-D".into()).to_string(),
            "illegal empty mapping: -D"
        );
        assert_eq!(ArgError::NoFiles.to_string(), "no files given");
    }
}
