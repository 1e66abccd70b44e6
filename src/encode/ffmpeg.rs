use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SparkError, SparkResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::surface::FrameRGBA;

/// Streams spiral frames into a system `ffmpeg` process that writes an H.264 MP4.
///
/// Frames arrive premultiplied and are composited over the background announced in
/// [`SinkConfig`] before they are piped, so the video is fully opaque. Dropping the sink before
/// `end` kills the encoder and reaps it.
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    encoder: Option<Encoder>,
    size: (u32, u32),
    background: [u8; 4],
    last_idx: Option<FrameIndex>,
    opaque: Vec<u8>,
}

impl FfmpegSink {
    /// Sink writing to `out_path`, replacing an existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            encoder: None,
            size: (0, 0),
            background: [0, 0, 0, 255],
            last_idx: None,
            opaque: Vec::new(),
        }
    }

    /// Whether an existing output file may be replaced (`true` by default).
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    /// Whether an encoder process is currently running.
    pub fn is_encoding(&self) -> bool {
        self.encoder.is_some()
    }

    /// Kill a running encoder without finalizing the file.
    pub fn abort(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            tracing::debug!(out = %self.out_path.display(), "aborting ffmpeg");
            drop(encoder);
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SparkResult<()> {
        self.abort();
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(SparkError::validation("fps must be non-zero"));
        }
        let (w, h) = (cfg.width, cfg.height);
        if w == 0 || h == 0 || !w.is_multiple_of(2) || !h.is_multiple_of(2) {
            return Err(SparkError::validation(format!(
                "mp4 output needs a non-zero even frame size (yuv420p), got {w}x{h}"
            )));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(SparkError::validation(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        if let Some(parent) = self.out_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }

        self.encoder = Some(Encoder::spawn(&self.out_path, self.overwrite, &cfg)?);
        self.size = (w, h);
        self.background = cfg.background;
        self.opaque = vec![0u8; w as usize * h as usize * 4];
        self.last_idx = None;
        tracing::debug!(out = %self.out_path.display(), width = w, height = h, "ffmpeg started");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SparkResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(SparkError::encode("ffmpeg sink is not running"));
        };
        if self.last_idx.is_some_and(|last| idx.0 <= last.0) {
            return Err(SparkError::encode(format!(
                "frame {} pushed out of order",
                idx.0
            )));
        }
        if (frame.width, frame.height) != self.size || frame.data.len() != self.opaque.len() {
            return Err(SparkError::validation(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width, frame.height, self.size.0, self.size.1
            )));
        }

        composite_over(&mut self.opaque, &frame.data, self.background);
        encoder.write(&self.opaque)?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> SparkResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| SparkError::encode("ffmpeg sink is not running"))?;
        encoder.finish()?;
        tracing::debug!(out = %self.out_path.display(), "ffmpeg finished");
        Ok(())
    }
}

/// A running `ffmpeg` child reading raw RGBA from stdin.
///
/// `stdin` is `Some` until the stream is finished; a drop while it is still open kills the
/// process.
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    log: Option<JoinHandle<std::io::Result<String>>>,
}

impl Encoder {
    fn spawn(out_path: &Path, overwrite: bool, cfg: &SinkConfig) -> SparkResult<Self> {
        let mut cmd = Command::new("ffmpeg");
        cmd.arg(if overwrite { "-y" } else { "-n" })
            .args(["-hide_banner", "-loglevel", "error"])
            .args(["-f", "rawvideo", "-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", cfg.width, cfg.height)])
            .args(["-framerate", &format!("{}/{}", cfg.fps.num, cfg.fps.den)])
            .args(["-i", "pipe:0", "-an"])
            .args(["-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .args(["-movflags", "+faststart"])
            .arg(out_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SparkError::encode("ffmpeg was not found on PATH"),
            _ => SparkError::encode(format!("failed to spawn ffmpeg: {e}")),
        })?;

        let Some(stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SparkError::encode("ffmpeg stdin is not piped"));
        };
        // stderr is drained on its own thread so a full pipe never stalls the encoder.
        let log = child.stderr.take().map(|mut stderr| {
            std::thread::spawn(move || {
                let mut text = String::new();
                stderr.read_to_string(&mut text)?;
                Ok(text)
            })
        });
        Ok(Self {
            child,
            stdin: Some(stdin),
            log,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> SparkResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| SparkError::encode("ffmpeg input is closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| SparkError::encode(format!("ffmpeg stopped reading frames: {e}")))
    }

    fn finish(mut self) -> SparkResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| SparkError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let log = match self.log.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| SparkError::encode("ffmpeg log reader panicked"))?
                .unwrap_or_default(),
            None => String::new(),
        };
        if !status.success() {
            return Err(SparkError::encode(format!(
                "ffmpeg exited with {status}: {}",
                log.trim()
            )));
        }
        Ok(())
    }
}

impl Drop for Encoder {
    fn drop(&mut self) {
        if self.stdin.take().is_some() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        if let Some(handle) = self.log.take() {
            let _ = handle.join();
        }
    }
}

/// Composite premultiplied `src` over the opaque `background` color into `dst`.
fn composite_over(dst: &mut [u8], src: &[u8], background: [u8; 4]) {
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let uncovered = 255 - u16::from(px[3]);
        for ((o, &s), &b) in out[..3].iter_mut().zip(&px[..3]).zip(&background[..3]) {
            *o = (u16::from(s) + mul_div255_u16(u16::from(b), uncovered)).min(255) as u8;
        }
        out[3] = 255;
    }
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
