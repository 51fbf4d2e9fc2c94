//! Brain keyboard input path
//!
//! ```text
//! ScanSource ──► ScanReader ──► KeyDecoder ──► InputEvent ──► InputSink
//!  (I2C word)    (1..3 codes)    (+ Keymap)
//! ```

pub mod decoder;
pub mod events;
pub mod keymap;
pub mod reader;
pub mod scancode;

pub use decoder::{Decoded, KeyDecoder};
pub use events::{InputEvent, KeyCode, Switch};
pub use keymap::{Keymap, KeymapBuilder, KeymapEntry, KEY_SLOTS};
pub use reader::{ScanOutcome, ScanReader, ScanReport, MAX_CODES_PER_INTERRUPT};
pub use scancode::{ScanCode, ScanKind, SwitchId};
