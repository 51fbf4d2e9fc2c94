//! ST7586 pixel pipeline
//!
//! XRGB8888 source → gray8 → 4-level panel code → packed DDRAM bytes →
//! two addressed writes (top and bottom half).

pub mod gray;
pub mod packer;
pub mod region;
pub mod source;
pub mod transmit;
pub mod window;
pub mod word;

pub use gray::{quantize_xrgb, GrayLevel, LumaWeights};
pub use packer::{pack, PackError, PackedFrame};
pub use region::{PixelRegion, RegionError};
pub use source::XrgbBuffer;
pub use transmit::{FlushError, Transmitter};
pub use window::{AddressWindow, DdramWindows};
pub use word::{PackedWord, PIXELS_PER_BYTE, PIXELS_PER_WORD};
