/*!
    Raw frame sink implementation.
*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use yuv_types::{Plane, Result, Yuv420Frame};

/**
    Writes frames as raw concatenated plane data.

    Each frame is serialized as the luma plane (`height` rows of `width`
    bytes) followed by the two chroma planes (`height/2` rows of
    `width/2` bytes each). Rows are read at each plane's own stride, so
    decoder row padding never reaches the output. There is no per-frame
    header, frame count, or dimension metadata; callers must know the
    dimensions out of band.
*/
pub struct RawSink {
    writer: BufWriter<File>,
}

impl RawSink {
    /**
        Create the output file, truncating any existing content.
    */
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /**
        Serialize one frame.
    */
    pub fn write_frame(&mut self, frame: &Yuv420Frame) -> Result<()> {
        let width = frame.width as usize;
        let height = frame.height as usize;

        self.write_plane(&frame.y, width, height)?;
        self.write_plane(&frame.u, width / 2, height / 2)?;
        self.write_plane(&frame.v, width / 2, height / 2)?;

        Ok(())
    }

    fn write_plane(&mut self, plane: &Plane, row_len: usize, rows: usize) -> Result<()> {
        for row in 0..rows {
            self.writer.write_all(plane.row(row, row_len))?;
        }
        Ok(())
    }

    /**
        Flush buffered bytes and close the sink.

        Must be called on the success path; a failure here is a real
        write failure and is reported to the caller.
    */
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for RawSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawSink").finish_non_exhaustive()
    }
}
