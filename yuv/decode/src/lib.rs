/*!
    Codec resolution and the packet-in/frame-out decode protocol for the
    yuv crate ecosystem.
*/

mod resolver;
mod video;

pub use resolver::resolve;
pub use video::{ReceiveStatus, VideoDecoder};
