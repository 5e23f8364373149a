//! Top-level compile driver and final assembly.

use typelib_core::{Namespace, Node};
use typelib_format::{DirEntry, HEADER_SIZE, Header, align_blob};

use super::CompileError;
use super::context::CompileContext;
use super::directory::{EntryId, SlotTarget};
use super::options::CompileOptions;
use super::section::Target;
use crate::artifact::Artifact;

/// Compile one namespace worth of nodes into a typelib.
pub fn compile(
    namespace: &str,
    nodes: &[Node],
    shared_library: Option<&str>,
    options: &CompileOptions,
) -> Result<Artifact, CompileError> {
    let mut ctx = CompileContext::new(namespace, shared_library, options);
    build(&mut ctx, nodes)?;
    let bytes = assemble(ctx)?;
    Ok(Artifact::new(namespace, bytes))
}

/// Compile a parsed namespace document.
pub fn compile_namespace(
    namespace: &Namespace,
    options: &CompileOptions,
) -> Result<Artifact, CompileError> {
    compile(
        &namespace.name,
        &namespace.nodes,
        namespace.shared_library.as_deref(),
        options,
    )
}

/// Register every node, then write each entry and drain what it queued.
pub fn build<'a>(ctx: &mut CompileContext<'a>, nodes: &'a [Node]) -> Result<(), CompileError> {
    ctx.register_all(nodes)?;
    for node in nodes {
        ctx.write_entry(node)?;
        ctx.drain()?;
    }
    Ok(())
}

/// Lay out header, directory, string pool and bodies, resolving every
/// relocation.
pub fn assemble(ctx: CompileContext<'_>) -> Result<Vec<u8>, CompileError> {
    if !ctx.queues.is_empty() {
        return Err(CompileError::Internal(format!(
            "{} deferred bodies left at assembly",
            ctx.queues.pending()
        )));
    }
    if ctx.body.entry_count() != ctx.directory.allocated() {
        return Err(CompileError::Internal(format!(
            "{} bodies written for {} allocated entries",
            ctx.body.entry_count(),
            ctx.directory.allocated()
        )));
    }
    ctx.pool.validate()?;

    let n_entries = u16::try_from(ctx.directory.len())
        .map_err(|_| CompileError::TooManyEntries(ctx.directory.len()))?;
    let n_local_entries = ctx.directory.local_count() as u16;

    let strings_base = HEADER_SIZE + ctx.directory.len() * DirEntry::SIZE;
    let blobs_base = align_blob(strings_base + ctx.pool.byte_len());
    let total_size = align_blob(blobs_base + ctx.body.len());
    let total = u32::try_from(total_size).map_err(|_| CompileError::TooLarge(total_size))?;

    let str_at = |offset: u32| (strings_base as u32) + offset;
    let (mut body, relocs, starts) = ctx.body.into_parts();
    let entry_at = |id: EntryId| {
        starts
            .get(&id)
            .map(|&start| (blobs_base + start) as u32)
            .ok_or_else(|| CompileError::Internal(format!("dangling reference to {id}")))
    };

    for reloc in &relocs {
        let value = match reloc.target {
            Target::Str(offset) => str_at(offset),
            Target::Entry(id) => entry_at(id)?,
        };
        body[reloc.at..reloc.at + 4].copy_from_slice(&value.to_le_bytes());
    }

    let mut output = vec![0u8; HEADER_SIZE]; // header written last

    for slot in ctx.directory.slots() {
        let entry = match slot.target {
            SlotTarget::Local(id) => DirEntry {
                blob_type: slot.blob_type as u16,
                local: true,
                name: str_at(slot.name),
                offset: entry_at(id)?,
            },
            SlotTarget::External { namespace } => DirEntry {
                blob_type: slot.blob_type as u16,
                local: false,
                name: str_at(slot.name),
                offset: str_at(namespace),
            },
        };
        output.extend_from_slice(&entry.to_bytes());
    }

    output.extend_from_slice(ctx.pool.as_bytes());
    output.resize(blobs_base, 0);
    output.extend_from_slice(&body);
    output.resize(total_size, 0);

    let header = Header {
        n_entries,
        n_local_entries,
        directory: HEADER_SIZE as u32,
        size: total,
        namespace: str_at(ctx.directory.namespace_offset()),
        shared_library: ctx.shared_library.map_or(0, str_at),
        ..Default::default()
    };
    output[..HEADER_SIZE].copy_from_slice(&header.to_bytes());

    tracing::info!(
        "typelib `{}`: {} entries ({} local), {} strings, {} bytes",
        ctx.directory.namespace(),
        n_entries,
        n_local_entries,
        ctx.pool.len(),
        total_size
    );

    Ok(output)
}
