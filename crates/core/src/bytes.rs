//! Typed byte buffer value
//!
//! `Bytes` is a growable buffer with a subtype tag. Multi-byte integers are
//! read and written big-endian regardless of host order, so buffers built by
//! a UDF can be decoded by any client.
//!
//! Positional writes past the current end grow the buffer and zero-fill the
//! gap. Positional reads outside the buffer return `None`.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::hash::hash_bytes;

/// Largest capacity a buffer may be grown to
pub const MAX_BYTES_CAPACITY: usize = u32::MAX as usize;

/// Subtype tag carried alongside the raw bytes
///
/// Codes match the particle types used by the storage engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BytesType {
    /// No declared type
    #[default]
    Undef = 0,
    /// Encoded integer
    Integer = 1,
    /// Encoded double
    Double = 2,
    /// Encoded string
    String = 3,
    /// Opaque blob
    Blob = 4,
    /// Java-serialized object
    Java = 7,
    /// C#-serialized object
    CSharp = 8,
    /// Python-pickled object
    Python = 9,
    /// Ruby-marshalled object
    Ruby = 10,
    /// PHP-serialized object
    Php = 11,
    /// Erlang term
    Erlang = 12,
    /// Packed map
    Map = 19,
    /// Packed list
    List = 20,
    /// GeoJSON document
    GeoJson = 23,
}

impl BytesType {
    /// Numeric code of this subtype
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parse a numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        let ty = match code {
            0 => BytesType::Undef,
            1 => BytesType::Integer,
            2 => BytesType::Double,
            3 => BytesType::String,
            4 => BytesType::Blob,
            7 => BytesType::Java,
            8 => BytesType::CSharp,
            9 => BytesType::Python,
            10 => BytesType::Ruby,
            11 => BytesType::Php,
            12 => BytesType::Erlang,
            19 => BytesType::Map,
            20 => BytesType::List,
            23 => BytesType::GeoJson,
            _ => return None,
        };
        Some(ty)
    }
}

/// Growable, typed byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytes {
    data: Vec<u8>,
    subtype: BytesType,
}

impl Default for Bytes {
    fn default() -> Self {
        Bytes::new()
    }
}

impl Bytes {
    /// Create an empty blob buffer
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty buffer with at least `capacity` bytes reserved
    ///
    /// Capacities above [`MAX_BYTES_CAPACITY`] are clamped.
    pub fn with_capacity(capacity: usize) -> Self {
        Bytes {
            data: Vec::with_capacity(capacity.min(MAX_BYTES_CAPACITY)),
            subtype: BytesType::Blob,
        }
    }

    /// Take ownership of existing bytes
    pub fn from_vec(data: Vec<u8>) -> Self {
        Bytes {
            data,
            subtype: BytesType::Blob,
        }
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if no bytes have been written
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reserved capacity (always `>= len()`)
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Borrow the written bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Release the buffer
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Subtype tag
    pub fn subtype(&self) -> BytesType {
        self.subtype
    }

    /// Replace the subtype tag
    pub fn set_subtype(&mut self, subtype: BytesType) {
        self.subtype = subtype;
    }

    /// Ensure the buffer can hold `capacity` bytes
    ///
    /// Returns `true` if the capacity is already available. Otherwise grows
    /// the buffer only when `resize` is set and the request is within
    /// [`MAX_BYTES_CAPACITY`].
    pub fn ensure(&mut self, capacity: usize, resize: bool) -> bool {
        if capacity <= self.data.capacity() {
            return true;
        }
        if !resize || capacity > MAX_BYTES_CAPACITY {
            return false;
        }
        self.data.reserve_exact(capacity - self.data.len());
        true
    }

    /// Shrink the written length to `n` bytes
    ///
    /// Returns `false` without changes if `n` is larger than the current length.
    pub fn truncate(&mut self, n: usize) -> bool {
        if n > self.data.len() {
            return false;
        }
        self.data.truncate(n);
        true
    }

    fn reserve_to(&mut self, end: Option<usize>) -> Option<usize> {
        let end = end?;
        self.ensure(end, true).then_some(end)
    }

    // ------------------------------------------------------------------
    // append
    // ------------------------------------------------------------------

    /// Append one byte
    pub fn append_byte(&mut self, v: u8) -> bool {
        self.reserve_to(self.data.len().checked_add(1)).is_some() && {
            self.data.push(v);
            true
        }
    }

    /// Append a big-endian `i16`
    pub fn append_int16(&mut self, v: i16) -> bool {
        self.reserve_to(self.data.len().checked_add(2)).is_some()
            && self.data.write_i16::<BigEndian>(v).is_ok()
    }

    /// Append a big-endian `i32`
    pub fn append_int32(&mut self, v: i32) -> bool {
        self.reserve_to(self.data.len().checked_add(4)).is_some()
            && self.data.write_i32::<BigEndian>(v).is_ok()
    }

    /// Append a big-endian `i64`
    pub fn append_int64(&mut self, v: i64) -> bool {
        self.reserve_to(self.data.len().checked_add(8)).is_some()
            && self.data.write_i64::<BigEndian>(v).is_ok()
    }

    /// Append the UTF-8 bytes of `s` (no terminator)
    ///
    /// Empty input is rejected.
    pub fn append_string(&mut self, s: &str) -> bool {
        self.append_bytes(s.as_bytes())
    }

    /// Append raw bytes
    ///
    /// Empty input is rejected.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> bool {
        if bytes.is_empty() {
            return false;
        }
        self.reserve_to(self.data.len().checked_add(bytes.len()))
            .is_some()
            && {
                self.data.extend_from_slice(bytes);
                true
            }
    }

    // ------------------------------------------------------------------
    // set
    // ------------------------------------------------------------------

    /// Writable window `[pos, pos + width)`, growing and zero-filling as needed
    fn window(&mut self, pos: usize, width: usize) -> Option<&mut [u8]> {
        let end = self.reserve_to(pos.checked_add(width))?;
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        Some(&mut self.data[pos..end])
    }

    /// Write one byte at `pos`
    pub fn set_byte(&mut self, pos: usize, v: u8) -> bool {
        self.window(pos, 1).map(|w| w[0] = v).is_some()
    }

    /// Write a big-endian `i16` at `pos`
    pub fn set_int16(&mut self, pos: usize, v: i16) -> bool {
        self.window(pos, 2)
            .map(|w| BigEndian::write_i16(w, v))
            .is_some()
    }

    /// Write a big-endian `i32` at `pos`
    pub fn set_int32(&mut self, pos: usize, v: i32) -> bool {
        self.window(pos, 4)
            .map(|w| BigEndian::write_i32(w, v))
            .is_some()
    }

    /// Write a big-endian `i64` at `pos`
    pub fn set_int64(&mut self, pos: usize, v: i64) -> bool {
        self.window(pos, 8)
            .map(|w| BigEndian::write_i64(w, v))
            .is_some()
    }

    /// Write the UTF-8 bytes of `s` at `pos`
    pub fn set_string(&mut self, pos: usize, s: &str) -> bool {
        self.set_bytes(pos, s.as_bytes())
    }

    /// Write raw bytes at `pos`
    pub fn set_bytes(&mut self, pos: usize, bytes: &[u8]) -> bool {
        if bytes.is_empty() {
            return false;
        }
        self.window(pos, bytes.len())
            .map(|w| w.copy_from_slice(bytes))
            .is_some()
    }

    // ------------------------------------------------------------------
    // get
    // ------------------------------------------------------------------

    fn read(&self, pos: usize, width: usize) -> Option<&[u8]> {
        self.data.get(pos..pos.checked_add(width)?)
    }

    /// Read one byte at `pos`
    pub fn get_byte(&self, pos: usize) -> Option<u8> {
        self.data.get(pos).copied()
    }

    /// Read a big-endian `i16` at `pos`
    pub fn get_int16(&self, pos: usize) -> Option<i16> {
        self.read(pos, 2).map(BigEndian::read_i16)
    }

    /// Read a big-endian `i32` at `pos`
    pub fn get_int32(&self, pos: usize) -> Option<i32> {
        self.read(pos, 4).map(BigEndian::read_i32)
    }

    /// Read a big-endian `i64` at `pos`
    pub fn get_int64(&self, pos: usize) -> Option<i64> {
        self.read(pos, 8).map(BigEndian::read_i64)
    }

    /// Read `len` bytes at `pos` as UTF-8
    pub fn get_string(&self, pos: usize, len: usize) -> Option<String> {
        self.read(pos, len)
            .and_then(|b| String::from_utf8(b.to_vec()).ok())
    }

    /// Copy `len` bytes at `pos` into a new blob buffer
    pub fn get_bytes(&self, pos: usize, len: usize) -> Option<Bytes> {
        self.read(pos, len).map(|b| Bytes::from_vec(b.to_vec()))
    }

    // ------------------------------------------------------------------
    // kernel hooks
    // ------------------------------------------------------------------

    /// Kernel hash over the written bytes
    pub fn hash_value(&self) -> u32 {
        hash_bytes(&self.data)
    }

    /// Upper-case hex rendering of the written bytes
    pub fn stringify(&self) -> String {
        let mut out = String::with_capacity(self.data.len() * 2);
        for b in &self.data {
            let _ = write!(out, "{:02X}", b);
        }
        out
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        Bytes::from_vec(data)
    }
}

impl From<&[u8]> for Bytes {
    fn from(data: &[u8]) -> Self {
        Bytes::from_vec(data.to_vec())
    }
}
