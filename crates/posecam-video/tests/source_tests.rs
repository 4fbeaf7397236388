use posecam_video::{DEFAULT_H264_PAYLOAD, DEFAULT_RTP_PORT, SourceDescriptor};
use std::path::PathBuf;

#[test]
fn test_default_is_rtp_on_5000() {
    let source = SourceDescriptor::default();
    assert_eq!(
        source,
        SourceDescriptor::Rtp {
            port: DEFAULT_RTP_PORT,
            payload: DEFAULT_H264_PAYLOAD
        }
    );
}

#[test]
fn test_file_pipeline() {
    let source = SourceDescriptor::file("/app/orga_1_1.mp4");
    assert_eq!(
        source.to_pipeline(),
        "filesrc location=\"/app/orga_1_1.mp4\" ! queue ! decodebin ! videoconvert ! appsink name=sink"
    );
}

#[test]
fn test_file_pipeline_escapes_quotes() {
    let source = SourceDescriptor::file("/tmp/my \"clip\".mp4");
    assert!(
        source
            .to_pipeline()
            .starts_with("filesrc location=\"/tmp/my \\\"clip\\\".mp4\" ! ")
    );
}

#[test]
fn test_rtp_pipeline() {
    let source = SourceDescriptor::Rtp {
        port: 5002,
        payload: 97,
    };
    assert_eq!(
        source.to_pipeline(),
        "udpsrc port=5002 caps=\"application/x-rtp, media=(string)video, clock-rate=(int)90000, \
         encoding-name=(string)H264, payload=(int)97\" ! rtph264depay ! h264parse ! decodebin \
         ! videoconvert ! appsink name=sink sync=false"
    );
}

#[test]
fn test_raw_pipeline_passes_through() {
    let launch = "videotestsrc num-buffers=3 ! videoconvert ! appsink name=sink";
    let source: SourceDescriptor = launch.parse().unwrap();
    assert_eq!(source, SourceDescriptor::Pipeline(launch.to_string()));
    assert_eq!(source.to_pipeline(), launch);
}

#[test]
fn test_parse_rtp_forms() {
    assert_eq!(
        "rtp:6000".parse::<SourceDescriptor>().unwrap(),
        SourceDescriptor::rtp(6000)
    );
    assert_eq!(
        "rtp:6000/100".parse::<SourceDescriptor>().unwrap(),
        SourceDescriptor::Rtp {
            port: 6000,
            payload: 100
        }
    );
    assert!("rtp:70000".parse::<SourceDescriptor>().is_err());
    assert!("rtp:5000/200".parse::<SourceDescriptor>().is_err());
    assert!("rtp:".parse::<SourceDescriptor>().is_err());
}

#[test]
fn test_parse_file_forms() {
    assert_eq!(
        "emptyfile".parse::<SourceDescriptor>().unwrap(),
        SourceDescriptor::File {
            path: PathBuf::from("emptyfile")
        }
    );
    assert_eq!(
        "file:/videos/part_5_1.mp4".parse::<SourceDescriptor>().unwrap(),
        SourceDescriptor::file("/videos/part_5_1.mp4")
    );
    assert!("file:".parse::<SourceDescriptor>().is_err());
}

#[test]
fn test_parse_rejects_empty() {
    let err = "   ".parse::<SourceDescriptor>().unwrap_err();
    assert!(err.to_string().contains("empty source"));
}

#[test]
fn test_display() {
    assert_eq!(
        SourceDescriptor::rtp(5000).to_string(),
        "rtp/h264 on udp port 5000 (payload 96)"
    );
    assert_eq!(SourceDescriptor::file("a.mp4").to_string(), "file a.mp4");
}
