/*!
    Raw frame sink: serializes normalized frames as header-less planar
    bytes.
*/

mod sink;

pub use sink::RawSink;
