/*!
    Frame normalization: classifies decoded frames by pixel format and
    produces the single output representation the serializer accepts.
*/

mod video;

pub use video::{FormatAction, Normalized, Normalizer, classify};
