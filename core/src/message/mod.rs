// Message module — tags and wire codec for the wrist/handheld protocol

pub mod codec;
pub mod types;

pub use codec::{decode_heart_rate, encode_heart_rate, CodecError};
pub use types::{InboundMessage, MessageTag};
