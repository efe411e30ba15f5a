/*!
    Descriptor staging: turns opaque provider-supplied handles into local
    files the decode pipeline can consume and produce.

    The provider resolves a handle to a descriptor whose lifetime it
    controls; the pipeline immediately duplicates that descriptor,
    releases the provider's original, and works only with the duplicate.
    Bytes are bridged through pipeline-owned temporary files because the
    decode pipeline needs random access that an opaque descriptor may
    not support.
*/

mod handle;
mod provider;
mod staging;

pub use handle::DescriptorHandle;
pub use provider::{ContentProvider, OpenMode, ProviderDescriptor};
pub use staging::{StagingFile, deliver_to_descriptor, stage_from_descriptor};
