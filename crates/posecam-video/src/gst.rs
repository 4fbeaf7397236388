use crate::{
    APPSINK_NAME, CaptureSession, Frame, SourceDescriptor, VideoConfig, VideoError, VideoSource,
    pack_rows,
};
use gstreamer::prelude::*;
use gstreamer::{Bus, Caps, ClockTime, MessageType, MessageView, Pipeline, Sample, State};
use gstreamer_app::AppSink;
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;

type FrameResult = Result<Frame, VideoError>;

// how often the pull thread wakes up to look for bus errors and shutdown
const PULL_POLL_MS: u64 = 100;

/// GStreamer-backed video source.
///
/// The pipeline is built from the descriptor's launch line. Frames are pulled
/// from the appsink named `sink` (or the first appsink found), converted to
/// packed RGB.
#[derive(Debug, Clone)]
pub struct GstSource {
    descriptor: SourceDescriptor,
    config: VideoConfig,
}

impl GstSource {
    pub fn new(descriptor: SourceDescriptor, config: VideoConfig) -> Self {
        Self { descriptor, config }
    }

    pub fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &VideoConfig {
        &self.config
    }
}

impl VideoSource for GstSource {
    type Session = GstSession;

    fn describe(&self) -> String {
        self.descriptor.to_string()
    }

    fn open(&self) -> Result<GstSession, VideoError> {
        gstreamer::init().map_err(|e| {
            VideoError::SourceUnavailable(format!("failed to initialize gstreamer: {e}"))
        })?;

        let launch = self.descriptor.to_pipeline();
        log::debug!("launching pipeline: {}", launch);

        let pipeline = gstreamer::parse::launch(&launch)
            .map_err(|e| VideoError::SourceUnavailable(format!("failed to parse pipeline: {e}")))?
            .dynamic_cast::<Pipeline>()
            .map_err(|_| {
                VideoError::SourceUnavailable("launch line did not produce a pipeline".to_string())
            })?;

        let appsink = find_appsink(&pipeline)?;
        appsink.set_caps(Some(&Caps::builder("video/x-raw").field("format", "RGB").build()));
        appsink.set_max_buffers(self.config.buffer_count());

        if let Err(e) = start_pipeline(&pipeline, &self.config) {
            let _ = pipeline.set_state(State::Null);
            return Err(e);
        }

        let (tx, rx) = mpsc::channel(self.config.buffer_count() as usize);
        let bus = pipeline.bus();
        let handle = thread::spawn(move || pull_loop(appsink, bus, tx));

        log::info!("opened {}", self.descriptor);

        Ok(GstSession {
            pipeline,
            receiver: Some(rx),
            thread_handle: Some(handle),
            released: false,
        })
    }
}

fn find_appsink(pipeline: &Pipeline) -> Result<AppSink, VideoError> {
    let element = match pipeline.by_name(APPSINK_NAME) {
        Some(element) => element,
        None => pipeline
            .iterate_sinks()
            .find(|e| e.is::<AppSink>())
            .ok_or_else(|| {
                VideoError::SourceUnavailable(format!(
                    "pipeline has no appsink (expected `appsink name={APPSINK_NAME}`)"
                ))
            })?,
    };

    element.dynamic_cast::<AppSink>().map_err(|_| {
        VideoError::SourceUnavailable(format!("element `{APPSINK_NAME}` is not an appsink"))
    })
}

/// Bring the pipeline to PLAYING and wait (bounded) for the transition.
fn start_pipeline(pipeline: &Pipeline, config: &VideoConfig) -> Result<(), VideoError> {
    let bus = pipeline.bus();

    pipeline.set_state(State::Playing).map_err(|_| {
        VideoError::SourceUnavailable(bus_error(bus.as_ref()).unwrap_or_else(|| {
            "pipeline refused to start playing".to_string()
        }))
    })?;

    let millis = u64::try_from(config.open_timeout().as_millis()).unwrap_or(u64::MAX);
    let timeout = ClockTime::from_mseconds(millis.min(u64::MAX / 1_000_000));
    let (result, current, pending) = pipeline.state(timeout);
    match result {
        Ok(success) => {
            log::debug!("pipeline state {:?} ({:?}), pending {:?}", current, success, pending);
            Ok(())
        }
        Err(_) => Err(VideoError::SourceUnavailable(
            bus_error(bus.as_ref()).unwrap_or_else(|| {
                format!("pipeline did not start (state {current:?}, pending {pending:?})")
            }),
        )),
    }
}

/// Pop the first error message from the bus, if any.
fn bus_error(bus: Option<&Bus>) -> Option<String> {
    let message = bus?.pop_filtered(&[MessageType::Error])?;
    match message.view() {
        MessageView::Error(err) => Some(match err.debug() {
            Some(debug) => format!("{} ({})", err.error(), debug),
            None => err.error().to_string(),
        }),
        _ => None,
    }
}

/// Background thread: pull samples and forward frames until end-of-stream,
/// a pipeline error, or the session is released.
fn pull_loop(appsink: AppSink, bus: Option<Bus>, tx: mpsc::Sender<FrameResult>) {
    let mut index = 0u64;

    loop {
        let Some(sample) = appsink.try_pull_sample(ClockTime::from_mseconds(PULL_POLL_MS)) else {
            if appsink.is_eos() {
                log::debug!("appsink reached end-of-stream after {} frames", index);
                break;
            }
            if let Some(error) = bus_error(bus.as_ref()) {
                let _ = tx.blocking_send(Err(VideoError::Stream(error)));
                break;
            }
            if tx.is_closed() {
                break;
            }
            continue;
        };

        let frame = frame_from_sample(index, &sample);
        index += 1;

        if tx.blocking_send(frame).is_err() {
            // session released
            break;
        }
    }
}

fn frame_from_sample(index: u64, sample: &Sample) -> FrameResult {
    let caps = sample
        .caps()
        .ok_or_else(|| VideoError::Stream("sample without caps".to_string()))?;
    let structure = caps
        .structure(0)
        .ok_or_else(|| VideoError::Stream("caps without structure".to_string()))?;
    let width = structure
        .get::<i32>("width")
        .map_err(|e| VideoError::Stream(format!("caps without width: {e}")))? as usize;
    let height = structure
        .get::<i32>("height")
        .map_err(|e| VideoError::Stream(format!("caps without height: {e}")))? as usize;

    let buffer = sample
        .buffer()
        .ok_or_else(|| VideoError::Stream("sample without buffer".to_string()))?;
    let map = buffer
        .map_readable()
        .map_err(|e| VideoError::Stream(format!("failed to map buffer: {e}")))?;
    let data = map.as_slice();

    if data.is_empty() || width == 0 || height == 0 {
        return Ok(Frame::empty(index));
    }

    // RGB rows are padded to 4 bytes by videoconvert
    let stride = data.len() / height;
    Frame::from_rgb(index, width, height, pack_rows(data, width, height, stride)?)
}

/// An open GStreamer pipeline.
pub struct GstSession {
    pipeline: Pipeline,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
    released: bool,
}

impl std::fmt::Debug for GstSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GstSession")
            .field("pipeline", &self.pipeline.name())
            .field("receiver", &self.receiver.is_some())
            .field("thread_handle", &self.thread_handle.is_some())
            .field("released", &self.released)
            .finish()
    }
}

impl CaptureSession for GstSession {
    async fn next_frame(&mut self) -> Result<Option<Frame>, VideoError> {
        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| VideoError::Channel("session already released".to_string()))?;

        match receiver.recv().await {
            Some(Ok(frame)) => Ok(Some(frame)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        // closing the channel unblocks a pull thread waiting on a full queue
        drop(self.receiver.take());

        if let Err(e) = self.pipeline.set_state(State::Null) {
            log::warn!("failed to stop pipeline: {}", e);
        }

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }

        log::debug!("capture session released");
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for GstSession {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a session over an idle pipeline with a pull thread that exits on its own
    fn idle_session() -> GstSession {
        gstreamer::init().unwrap();
        let (tx, rx) = mpsc::channel::<FrameResult>(1);
        let handle = thread::spawn(move || {
            let _ = tx.blocking_send(Ok(Frame::empty(0)));
        });
        GstSession {
            pipeline: Pipeline::new(),
            receiver: Some(rx),
            thread_handle: Some(handle),
            released: false,
        }
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut session = idle_session();
        assert!(!session.is_released());

        session.release();
        assert!(session.is_released());
        assert!(session.receiver.is_none());
        assert!(session.thread_handle.is_none());

        session.release();
        assert!(session.is_released());
        drop(session);
    }

    #[tokio::test]
    async fn test_next_frame_after_release_is_an_error() {
        let mut session = idle_session();
        let first = session.next_frame().await.unwrap();
        assert!(first.is_some_and(|frame| frame.is_empty()));

        session.release();
        assert!(matches!(
            session.next_frame().await,
            Err(VideoError::Channel(_))
        ));
    }
}
