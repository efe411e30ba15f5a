/*!
    Pipeline-owned descriptor duplicates.
*/

use std::fs::File;
use std::os::fd::OwnedFd;

use yuv_types::{Error, Result};

use crate::provider::{ContentProvider, OpenMode, ProviderDescriptor};

/**
    A pipeline-owned duplicate of a provider descriptor.

    The provider's descriptor has a narrow, provider-defined lifetime
    ("valid until released, release promptly"), while the pipeline needs
    a descriptor it fully controls across a multi-step run. Duplication
    separates the two lifetimes: [`adopt`](Self::adopt) duplicates the
    underlying descriptor, releases the provider's original, and hands
    the pipeline sole ownership of the duplicate. The pipeline never
    closes a descriptor it did not duplicate or itself open.
*/
pub struct DescriptorHandle {
    fd: OwnedFd,
}

impl DescriptorHandle {
    /**
        Resolve `handle` through the provider and take ownership of the
        resulting channel.

        Composes the provider call with [`adopt`](Self::adopt): the
        provider's descriptor lives only for the duration of this call.
    */
    pub fn obtain(
        provider: &dyn ContentProvider,
        handle: &str,
        mode: OpenMode,
    ) -> Result<Self> {
        Self::adopt(provider.open_descriptor(handle, mode)?)
    }

    /**
        Take ownership of a provider descriptor's content channel.

        Duplicates the descriptor first, then releases the provider-owned
        original per the provider's closing contract. On duplication
        failure the original is still released.
    */
    pub fn adopt(descriptor: ProviderDescriptor) -> Result<Self> {
        let duplicate = descriptor
            .fd()
            .try_clone_to_owned()
            .map_err(|e| Error::resource(format!("descriptor duplication failed: {e}")));
        drop(descriptor);

        Ok(Self { fd: duplicate? })
    }

    /**
        Consume the handle, exposing it as a file for stream I/O.

        Dropping the file closes the duplicate; this is the handle's
        single release point.
    */
    pub fn into_file(self) -> File {
        File::from(self.fd)
    }
}

impl std::fmt::Debug for DescriptorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorHandle").finish_non_exhaustive()
    }
}
