/*!
    yuvdump: decode a video file into raw 8-bit 4:2:0 planes, or probe
    an Annex-B bitstream for its recorded resolution.

    The raw output carries no dimension metadata; `probe` exists so the
    dimensions can be recovered out of band for raw H.264/H.265 inputs.
*/

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "yuvdump", version, about = "Extract raw YUV frames from video files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a video file into raw planar 8-bit 4:2:0 frames
    Decode {
        /// Input media file
        input: PathBuf,
        /// Output file for the raw plane data
        output: PathBuf,
        /// Force a decoder family (h264, hevc) instead of trusting the
        /// container's declared codec
        #[arg(long)]
        codec: Option<String>,
    },
    /// Print the resolution recorded in an Annex-B H.264/H.265 bitstream
    Probe {
        /// Raw .h264 / .h265 elementary stream
        bitstream: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Decode {
            input,
            output,
            codec,
        } => {
            let stats = yuv_pipeline::decode_file(&input, &output, codec.as_deref())
                .with_context(|| format!("failed to decode {}", input.display()))?;
            println!(
                "wrote {} frame(s) to {} ({} skipped)",
                stats.frames_written,
                output.display(),
                stats.frames_skipped
            );
        }
        Command::Probe { bitstream } => {
            let data = std::fs::read(&bitstream)
                .with_context(|| format!("failed to read {}", bitstream.display()))?;

            if let Some(res) = yuv_params::h264::parse_sps_resolution(&data) {
                println!("h264 {}x{}", res.width, res.height);
            } else if let Some(info) = yuv_params::hevc::parse_sps_info(&data) {
                println!(
                    "hevc {}x{} (profile {}, level {}, chroma format {})",
                    info.width, info.height, info.profile_idc, info.level_idc, info.chroma_format_idc
                );
            } else {
                anyhow::bail!(
                    "no H.264/H.265 sequence parameter set found in {}",
                    bitstream.display()
                );
            }
        }
    }

    Ok(())
}
