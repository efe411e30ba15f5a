/*!
    Shared types for the yuv crate ecosystem.

    Defines the vocabulary that crosses crate boundaries: the error
    taxonomy, the status codes reported to external callers, and the
    raw frame model. It has no dependency on FFmpeg, so consumers can
    depend on it without pulling in FFmpeg bindings.
*/

mod error;
mod frame;
pub mod status;

pub use error::{Error, Result};
pub use frame::{Plane, Yuv420Frame};
pub use status::Status;
