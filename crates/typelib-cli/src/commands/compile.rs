use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use typelib_compiler::c_source;
use typelib_compiler::{Artifact, CompileError, CompileOptions, compile_namespace};
use typelib_core::parse_namespace;

use super::{CommandError, exit_on_error};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Binary,
    CSource,
}

pub struct CompileArgs {
    pub forest_path: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub options: CompileOptions,
}

pub fn run(args: CompileArgs) {
    exit_on_error(execute(&args));
}

pub(super) fn execute(args: &CompileArgs) -> Result<(), CommandError> {
    let json = fs::read_to_string(&args.forest_path).map_err(|source| CommandError::Read {
        path: args.forest_path.clone(),
        source,
    })?;
    let artifact = compile_artifact(&json, &args.options)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CommandError::Write {
                path: path.clone(),
                source,
            })?;
            write_output(&artifact, args.format, BufWriter::new(file), path)
        }
        None => write_output(
            &artifact,
            args.format,
            io::stdout().lock(),
            Path::new("<stdout>"),
        ),
    }
}

/// Write the artifact to `out` in the requested format.
pub(super) fn write_output(
    artifact: &Artifact,
    format: OutputFormat,
    mut out: impl Write,
    path: &Path,
) -> Result<(), CommandError> {
    let written = match format {
        OutputFormat::Binary => artifact.write_to(out),
        OutputFormat::CSource => out
            .write_all(c_source::render(artifact).as_bytes())
            .and_then(|()| out.flush())
            .map_err(CompileError::Io),
    };
    written.map_err(|e| match e {
        CompileError::Io(source) => CommandError::Write {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

fn compile_artifact(json: &str, options: &CompileOptions) -> Result<Artifact, CommandError> {
    let namespace = parse_namespace(json)?;
    tracing::info!(
        "compiling `{}` ({} nodes)",
        namespace.name,
        namespace.nodes.len()
    );
    Ok(compile_namespace(&namespace, options)?)
}

/// Compile a namespace document to the requested output format.
pub fn compile_source(
    json: &str,
    format: OutputFormat,
    options: &CompileOptions,
) -> Result<Vec<u8>, CommandError> {
    let artifact = compile_artifact(json, options)?;
    let mut out = Vec::new();
    write_output(&artifact, format, &mut out, Path::new("<memory>"))?;
    Ok(out)
}
