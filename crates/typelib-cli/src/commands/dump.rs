use std::path::PathBuf;

use typelib_core::Colors;
use typelib_format::{ByteStorage, Typelib, dump};

use super::{CommandError, exit_on_error};

pub struct DumpArgs {
    pub typelib_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    exit_on_error(execute(&args));
}

pub(super) fn execute(args: &DumpArgs) -> Result<(), CommandError> {
    let storage =
        ByteStorage::from_file(&args.typelib_path).map_err(|source| CommandError::Read {
            path: args.typelib_path.clone(),
            source,
        })?;
    print!("{}", dump_bytes(storage.into_vec(), args.color)?);
    Ok(())
}

/// Validate and render a typelib.
pub fn dump_bytes(bytes: Vec<u8>, color: bool) -> Result<String, CommandError> {
    let lib = Typelib::from_bytes(bytes)?;
    Ok(dump(&lib, Colors::new(color))?)
}
