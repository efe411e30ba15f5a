/*!
    Staging files and the stream copies that fill and drain them.
*/

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use yuv_types::{Error, Result};

use crate::handle::DescriptorHandle;

/**
    A pipeline-owned temporary file bridging opaque descriptors and the
    path-based decode pipeline.

    Created uniquely named inside the provider's scratch directory and
    deleted unconditionally when dropped, on success and on every
    failure path. A failed deletion is logged as a warning, never
    propagated.
*/
pub struct StagingFile {
    path: PathBuf,
    file: File,
}

impl StagingFile {
    /**
        Create a staging file inside `dir`.
    */
    pub fn create_in(dir: &Path, prefix: &str, suffix: &str) -> Result<Self> {
        let staged = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(dir)
            .map_err(|e| {
                Error::resource(format!(
                    "failed to create staging file in {}: {e}",
                    dir.display()
                ))
            })?;

        // Deletion belongs to this type, not to tempfile, so that a
        // failed delete can be observed in the log.
        let (file, temp_path) = staged.into_parts();
        let path = temp_path
            .keep()
            .map_err(|e| Error::resource(format!("failed to retain staging file: {e}")))?;

        Ok(Self { path, file })
    }

    /**
        Path of the staging file, for handing to the decode pipeline.
    */
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /**
        Open a fresh read handle on the staged bytes.
    */
    pub fn reopen(&self) -> Result<File> {
        Ok(File::open(&self.path)?)
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            log::warn!("failed to delete staging file {}: {e}", self.path.display());
        }
    }
}

impl std::fmt::Debug for StagingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingFile").field("path", &self.path).finish()
    }
}

/**
    Stream-copy a descriptor's content into a staging file.

    Consumes the handle: once the bytes are staged the duplicate has
    served its purpose and is closed.
*/
pub fn stage_from_descriptor(input: DescriptorHandle, staging: &mut StagingFile) -> Result<u64> {
    let mut source = input.into_file();
    let copied = io::copy(&mut source, staging.file_mut())?;
    log::debug!("staged {copied} byte(s) from input descriptor");
    Ok(copied)
}

/**
    Stream-copy a staging file's content out through a descriptor.

    Syncs the descriptor before closing it, so a full-disk or revoked
    handle surfaces as an error here rather than being lost.
*/
pub fn deliver_to_descriptor(staging: &StagingFile, output: DescriptorHandle) -> Result<u64> {
    let mut source = staging.reopen()?;
    let mut destination = output.into_file();

    let copied = io::copy(&mut source, &mut destination)?;
    destination.sync_all()?;

    log::debug!("delivered {copied} byte(s) to output descriptor");
    Ok(copied)
}
