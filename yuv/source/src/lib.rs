/*!
    Media source: container opening, stream selection, and packet reading
    for the yuv crate ecosystem.
*/

mod codec_config;
mod source;

pub use codec_config::CodecConfig;
pub use source::{Packet, Source, StreamDescriptor};
