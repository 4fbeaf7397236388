use crate::ParseSourceError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// UDP port the RTP receiver listens on unless told otherwise.
pub const DEFAULT_RTP_PORT: u16 = 5000;

/// Dynamic RTP payload type used for H.264.
pub const DEFAULT_H264_PAYLOAD: u8 = 96;

/// Name of the appsink element frames are pulled from.
pub const APPSINK_NAME: &str = "sink";

/// Where frames come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// A local container file, demuxed and decoded.
    File { path: PathBuf },
    /// H.264 over RTP received on a UDP port.
    Rtp { port: u16, payload: u8 },
    /// A GStreamer launch line ending in an appsink, used verbatim.
    Pipeline(String),
}

impl Default for SourceDescriptor {
    fn default() -> Self {
        SourceDescriptor::rtp(DEFAULT_RTP_PORT)
    }
}

impl SourceDescriptor {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceDescriptor::File { path: path.into() }
    }

    pub fn rtp(port: u16) -> Self {
        SourceDescriptor::Rtp {
            port,
            payload: DEFAULT_H264_PAYLOAD,
        }
    }

    /// GStreamer launch line for this source.
    pub fn to_pipeline(&self) -> String {
        match self {
            SourceDescriptor::File { path } => format!(
                "filesrc location={} ! queue ! decodebin ! videoconvert ! appsink name={}",
                quote(&path.to_string_lossy()),
                APPSINK_NAME
            ),
            SourceDescriptor::Rtp { port, payload } => format!(
                "udpsrc port={port} caps=\"application/x-rtp, media=(string)video, \
                 clock-rate=(int)90000, encoding-name=(string)H264, payload=(int){payload}\" \
                 ! rtph264depay ! h264parse ! decodebin ! videoconvert \
                 ! appsink name={APPSINK_NAME} sync=false"
            ),
            SourceDescriptor::Pipeline(launch) => launch.clone(),
        }
    }
}

// gst-launch value quoting
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::File { path } => write!(f, "file {}", path.display()),
            SourceDescriptor::Rtp { port, payload } => {
                write!(f, "rtp/h264 on udp port {port} (payload {payload})")
            }
            SourceDescriptor::Pipeline(launch) => write!(f, "pipeline `{launch}`"),
        }
    }
}

/// Accepted forms:
/// - `rtp:<port>` or `rtp:<port>/<payload>`
/// - anything containing `!` is a raw launch line
/// - `file:<path>` or any other text is a file path
impl FromStr for SourceDescriptor {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseSourceError("empty source".to_string()));
        }

        if s.contains('!') {
            return Ok(SourceDescriptor::Pipeline(s.to_string()));
        }

        if let Some(rest) = s.strip_prefix("rtp:") {
            let (port, payload) = match rest.split_once('/') {
                Some((port, payload)) => (port, Some(payload)),
                None => (rest, None),
            };
            let port = port
                .parse::<u16>()
                .map_err(|_| ParseSourceError(format!("bad rtp port `{port}`")))?;
            let payload = match payload {
                Some(p) => p
                    .parse::<u8>()
                    .ok()
                    .filter(|p| *p <= 127)
                    .ok_or_else(|| ParseSourceError(format!("bad rtp payload type `{p}`")))?,
                None => DEFAULT_H264_PAYLOAD,
            };
            return Ok(SourceDescriptor::Rtp { port, payload });
        }

        let path = s.strip_prefix("file:").unwrap_or(s);
        if path.is_empty() {
            return Err(ParseSourceError("empty file path".to_string()));
        }
        Ok(SourceDescriptor::file(path))
    }
}
