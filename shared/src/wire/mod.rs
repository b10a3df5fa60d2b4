//! Framing helpers layered on the `naia-serde` bit buffer.
//!
//! Everything on the scene and object channels is written through these
//! helpers: fixed-width counts followed by the items, and one presence bit in
//! front of optional values.

mod record_writer;

pub use record_writer::RecordWriter;

use naia_serde::{BitReader, BitWrite, Serde, SerdeErr};

// never trust a count read off the wire for pre-allocation
const MAX_PREALLOCATED_ITEMS: usize = 1024;

pub(crate) fn ser_list_u16<T: Serde>(items: &[T], writer: &mut dyn BitWrite) {
    let count = u16::try_from(items.len()).unwrap_or(u16::MAX);
    count.ser(writer);
    for item in items.iter().take(count as usize) {
        item.ser(writer);
    }
}

pub(crate) fn de_list_u16<T: Serde>(reader: &mut BitReader) -> Result<Vec<T>, SerdeErr> {
    let count = u16::de(reader)? as usize;
    de_items(reader, count)
}

pub(crate) fn bit_length_list_u16<T: Serde>(items: &[T]) -> u32 {
    let count = items.len().min(u16::MAX as usize);
    0u16.bit_length() + items[..count].iter().map(Serde::bit_length).sum::<u32>()
}

pub(crate) fn ser_list_u32<T: Serde>(items: &[T], writer: &mut dyn BitWrite) {
    let count = u32::try_from(items.len()).unwrap_or(u32::MAX);
    count.ser(writer);
    for item in items.iter().take(count as usize) {
        item.ser(writer);
    }
}

pub(crate) fn de_list_u32<T: Serde>(reader: &mut BitReader) -> Result<Vec<T>, SerdeErr> {
    let count = u32::de(reader)? as usize;
    de_items(reader, count)
}

pub(crate) fn bit_length_list_u32<T: Serde>(items: &[T]) -> u32 {
    0u32.bit_length() + items.iter().map(Serde::bit_length).sum::<u32>()
}

fn de_items<T: Serde>(reader: &mut BitReader, count: usize) -> Result<Vec<T>, SerdeErr> {
    let mut items = Vec::with_capacity(count.min(MAX_PREALLOCATED_ITEMS));
    for _ in 0..count {
        items.push(T::de(reader)?);
    }
    Ok(items)
}

pub(crate) fn ser_option<T: Serde>(value: &Option<T>, writer: &mut dyn BitWrite) {
    value.is_some().ser(writer);
    if let Some(value) = value {
        value.ser(writer);
    }
}

pub(crate) fn de_option<T: Serde>(reader: &mut BitReader) -> Result<Option<T>, SerdeErr> {
    if bool::de(reader)? {
        Ok(Some(T::de(reader)?))
    } else {
        Ok(None)
    }
}

pub(crate) fn bit_length_option<T: Serde>(value: &Option<T>) -> u32 {
    1 + value.as_ref().map_or(0, Serde::bit_length)
}
