//! Fixed-width row encoding.
//!
//! Every row occupies exactly [`ROW_SIZE`] bytes:
//!
//! ```text
//! +--------+----------------+-------------------+
//! | id     | username       | email             |
//! | 0..4   | 4..36          | 36..291           |
//! | u32 LE | UTF-8, 0-pad   | UTF-8, 0-pad      |
//! +--------+----------------+-------------------+
//! ```
//!
//! A text field that fills its column exactly has no terminating zero, so
//! decoding reads up to the first zero byte *or* the end of the column.

use crate::row::Row;
use crate::{
    EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

pub fn encode(row: &Row) -> [u8; ROW_SIZE] {
    let mut buf = [0u8; ROW_SIZE];
    encode_into(row, &mut buf);
    buf
}

/// Encodes `row` into the first [`ROW_SIZE`] bytes of `dest`, overwriting
/// whatever a previous occupant left there.
///
/// # Panics
/// Panics if `dest` is shorter than [`ROW_SIZE`].
pub fn encode_into(row: &Row, dest: &mut [u8]) {
    let dest = &mut dest[..ROW_SIZE];
    dest[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&row.id().to_le_bytes());
    write_text(
        &mut dest[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
        row.username(),
    );
    write_text(&mut dest[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], row.email());
}

/// Decodes a row from the first [`ROW_SIZE`] bytes of `src`.
///
/// # Panics
/// Panics if `src` is shorter than [`ROW_SIZE`].
pub fn decode(src: &[u8]) -> Row {
    let src = &src[..ROW_SIZE];
    let mut id = [0u8; ID_SIZE];
    id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);

    Row::from_parts(
        u32::from_le_bytes(id),
        read_text(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
        read_text(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
    )
}

fn write_text(column: &mut [u8], text: &str) {
    let bytes = text.as_bytes();
    column[..bytes.len()].copy_from_slice(bytes);
    column[bytes.len()..].fill(0);
}

fn read_text(column: &[u8]) -> String {
    let len = column.iter().position(|&b| b == 0).unwrap_or(column.len());
    String::from_utf8_lossy(&column[..len]).into_owned()
}
