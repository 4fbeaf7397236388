use minifb::{Key, Window, WindowOptions};
use posecam_video::Frame;
use std::fmt;

#[derive(Debug)]
pub enum DisplayError {
    /// The window could not be created or updated.
    Window(String),
    /// The frame cannot be shown.
    Frame(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Window(msg) => write!(f, "window: {msg}"),
            DisplayError::Frame(msg) => write!(f, "frame: {msg}"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<minifb::Error> for DisplayError {
    fn from(err: minifb::Error) -> Self {
        DisplayError::Window(err.to_string())
    }
}

/// Where frames end up.
pub trait DisplaySink {
    /// Show one frame. The sink owns the frame afterwards.
    fn show(&mut self, frame: Frame) -> Result<(), DisplayError>;

    /// Polled once after every frame.
    fn stop_requested(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    title: String,
    position: (isize, isize),
    topmost: bool,
    stop_key: Key,
    escape_stops: bool,
    target_fps: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "receive".to_string(),
            position: (0, 0),
            topmost: true,
            stop_key: Key::Q,
            escape_stops: false,
            target_fps: None,
        }
    }
}

impl DisplayConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_position(mut self, x: isize, y: isize) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_topmost(mut self, topmost: bool) -> Self {
        self.topmost = topmost;
        self
    }

    pub fn with_stop_key(mut self, key: Key) -> Self {
        self.stop_key = key;
        self
    }

    /// Also stop on Escape, in addition to the stop key.
    pub fn with_escape_stops(mut self, escape_stops: bool) -> Self {
        self.escape_stops = escape_stops;
        self
    }

    /// `None` shows frames as fast as they arrive.
    pub fn with_target_fps(mut self, fps: Option<usize>) -> Self {
        self.target_fps = fps.filter(|fps| *fps > 0);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> (isize, isize) {
        self.position
    }

    pub fn topmost(&self) -> bool {
        self.topmost
    }

    pub fn stop_key(&self) -> Key {
        self.stop_key
    }

    pub fn escape_stops(&self) -> bool {
        self.escape_stops
    }

    pub fn target_fps(&self) -> Option<usize> {
        self.target_fps
    }
}

/// Key names accepted on the command line: a letter, a digit, or one of
/// `escape`, `space`, `enter`.
pub fn parse_key(name: &str) -> Option<Key> {
    let name = name.trim().to_ascii_lowercase();
    let key = match name.as_str() {
        "escape" | "esc" => Key::Escape,
        "space" => Key::Space,
        "enter" | "return" => Key::Enter,
        "a" => Key::A,
        "b" => Key::B,
        "c" => Key::C,
        "d" => Key::D,
        "e" => Key::E,
        "f" => Key::F,
        "g" => Key::G,
        "h" => Key::H,
        "i" => Key::I,
        "j" => Key::J,
        "k" => Key::K,
        "l" => Key::L,
        "m" => Key::M,
        "n" => Key::N,
        "o" => Key::O,
        "p" => Key::P,
        "q" => Key::Q,
        "r" => Key::R,
        "s" => Key::S,
        "t" => Key::T,
        "u" => Key::U,
        "v" => Key::V,
        "w" => Key::W,
        "x" => Key::X,
        "y" => Key::Y,
        "z" => Key::Z,
        "0" => Key::Key0,
        "1" => Key::Key1,
        "2" => Key::Key2,
        "3" => Key::Key3,
        "4" => Key::Key4,
        "5" => Key::Key5,
        "6" => Key::Key6,
        "7" => Key::Key7,
        "8" => Key::Key8,
        "9" => Key::Key9,
        _ => return None,
    };
    Some(key)
}

/// Pack RGB bytes into `0x00RRGGBB` pixels.
pub fn rgb_to_argb(rgb: &[u8]) -> Vec<u32> {
    rgb.chunks_exact(3)
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect()
}

/// An on-screen window.
///
/// The window is opened by the first frame, sized to it, and reopened if
/// the frame size changes.
pub struct MinifbDisplay {
    config: DisplayConfig,
    window: Option<Window>,
    size: (usize, usize),
}

impl MinifbDisplay {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            window: None,
            size: (0, 0),
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.is_open())
    }

    fn open_window(&mut self, width: usize, height: usize) -> Result<(), DisplayError> {
        let options = WindowOptions {
            topmost: self.config.topmost,
            ..WindowOptions::default()
        };
        let mut window = Window::new(&self.config.title, width, height, options)?;
        let (x, y) = self.config.position;
        window.set_position(x, y);
        if let Some(fps) = self.config.target_fps {
            window.set_target_fps(fps);
        }
        log::debug!(
            "opened window `{}` {}x{} at ({}, {})",
            self.config.title,
            width,
            height,
            x,
            y
        );

        // replacing an old window closes it
        self.window = Some(window);
        self.size = (width, height);
        Ok(())
    }
}

impl DisplaySink for MinifbDisplay {
    fn show(&mut self, frame: Frame) -> Result<(), DisplayError> {
        if frame.is_empty() {
            return Err(DisplayError::Frame(format!(
                "frame {} has no pixels",
                frame.index()
            )));
        }
        let (width, height) = (frame.width(), frame.height());
        let pixels = rgb_to_argb(&frame.into_pixels().data);

        if self.window.is_none() || self.size != (width, height) {
            if self.window.is_some() {
                log::info!("frame size changed to {}x{}", width, height);
            }
            self.open_window(width, height)?;
        }
        if let Some(window) = self.window.as_mut() {
            window.update_with_buffer(&pixels, width, height)?;
        }
        Ok(())
    }

    fn stop_requested(&self) -> bool {
        match &self.window {
            Some(window) => {
                !window.is_open()
                    || window.is_key_down(self.config.stop_key)
                    || (self.config.escape_stops && window.is_key_down(Key::Escape))
            }
            None => false,
        }
    }
}
