//! Cursor module
//!
//! Opaque traversal positions for cursor pagination.
//!
//! # Overview
//!
//! A [`Cursor`] records the ordering key of the item a page ended (or began)
//! at and the direction to continue in. Cursors never carry numeric offsets,
//! so a position stays meaningful when rows are inserted or removed
//! elsewhere in the result set.
//!
//! Turning a cursor into a client token is the job of a [`CursorCodec`]:
//! - [`Base64CursorCodec`] - compact URL-safe token
//! - [`SignedCursorCodec`] - HS256-signed token, rejects tampering

mod codec;
mod key;

pub use codec::{codec_from_settings, Base64CursorCodec, CursorCodec, SignedCursorCodec};
pub use key::{Cursor, OrderingKey};

#[cfg(test)]
mod tests;
