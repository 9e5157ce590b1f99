//! Chained byte buffer that grows by linking fixed-capacity nodes.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

use crate::BufferError;

/// Node capacity used by [`LinkedBuffer::new`].
pub const DEFAULT_BUFFER_SIZE: usize = 512;

/// Smallest node capacity [`LinkedBuffer::allocate`] will honor.
pub const MIN_BUFFER_SIZE: usize = 256;

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(0);

/// Process-wide unique tag for one buffer generation.
fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

struct Node {
    data: Box<[u8]>,
    /// Logical start; bytes before it are never drained.
    start: usize,
    /// Write cursor.
    offset: usize,
}

impl Node {
    fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            start: 0,
            offset: 0,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    #[inline]
    fn committed(&self) -> &[u8] {
        &self.data[self.start..self.offset]
    }
}

/// Placeholder bytes handed out by [`LinkedBuffer::reserve`].
///
/// A reservation always lies inside a single node. It is consumed by
/// [`LinkedBuffer::patch`], so each placeholder can be overwritten once, and
/// only on the buffer that issued it before that buffer is cleared.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a reservation must be patched"]
pub struct Reservation {
    epoch: u64,
    node: usize,
    offset: usize,
    len: usize,
}

impl Reservation {
    /// Index of the node holding the placeholder.
    pub fn node(&self) -> usize {
        self.node
    }

    /// Offset of the placeholder inside its node.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Width of the placeholder in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A byte buffer made of linked fixed-capacity nodes.
///
/// Appending past the tail node's capacity links a new node instead of
/// reallocating, so bytes already written never move. Nodes are kept in an
/// arena (`Vec`) in chain order and addressed by index.
///
/// # Example
///
/// ```
/// use msgpackx_buffers::LinkedBuffer;
///
/// let mut buffer = LinkedBuffer::new();
/// let header = buffer.reserve(2);
/// buffer.buf(b"abc");
/// buffer.patch(header, &[0x00, 0x03]).unwrap();
/// assert_eq!(buffer.to_vec(), [0x00, 0x03, b'a', b'b', b'c']);
/// ```
pub struct LinkedBuffer {
    nodes: Vec<Node>,
    node_size: usize,
    size: usize,
    /// Changes on every `clear`; reservations from other epochs are stale.
    epoch: u64,
}

impl Default for LinkedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkedBuffer {
    /// Creates a buffer whose nodes hold [`DEFAULT_BUFFER_SIZE`] bytes.
    pub fn new() -> Self {
        Self::allocate(DEFAULT_BUFFER_SIZE)
    }

    /// Creates a buffer with a custom node capacity (at least [`MIN_BUFFER_SIZE`]).
    pub fn allocate(size: usize) -> Self {
        let node_size = size.max(MIN_BUFFER_SIZE);
        Self {
            nodes: vec![Node::new(node_size)],
            node_size,
            size: 0,
            epoch: next_epoch(),
        }
    }

    /// Creates a buffer whose head node starts writing at `start`.
    ///
    /// The first `start` bytes of the head node are never drained.
    pub fn with_start(size: usize, start: usize) -> Result<Self, BufferError> {
        let mut buffer = Self::allocate(size);
        let capacity = buffer.node_size;
        if start >= capacity {
            return Err(BufferError::StartOutOfBounds { start, capacity });
        }
        let head = &mut buffer.nodes[0];
        head.start = start;
        head.offset = start;
        Ok(buffer)
    }

    /// Returns `true` if nothing was written since creation or the last [`clear`](Self::clear).
    pub fn is_fresh(&self) -> bool {
        let head = &self.nodes[0];
        self.size == 0 && self.nodes.len() == 1 && head.offset == head.start
    }

    /// Number of committed bytes across the chain.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of linked nodes, including the head.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Capacity of a regular node.
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Drops every node after the head and rewinds the head to its start.
    ///
    /// Reservations handed out before the call can no longer be patched.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let head = &mut self.nodes[0];
        head.offset = head.start;
        self.size = 0;
        self.epoch = next_epoch();
    }

    fn link(&mut self, capacity: usize) {
        let capacity = capacity.max(self.node_size);
        trace!(
            "linking buffer node #{} ({} bytes)",
            self.nodes.len(),
            capacity
        );
        self.nodes.push(Node::new(capacity));
    }

    #[inline]
    fn tail_index(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `len` contiguous bytes at the tail, linking a node if needed.
    fn claim(&mut self, len: usize) -> (usize, &mut [u8]) {
        if self.nodes[self.tail_index()].remaining() < len {
            self.link(len);
        }
        let index = self.tail_index();
        let tail = &mut self.nodes[index];
        let offset = tail.offset;
        tail.offset += len;
        self.size += len;
        (offset, &mut tail.data[offset..offset + len])
    }

    /// Copies `bytes` into the chain, spilling into a new node when the tail is full.
    pub fn append(&mut self, bytes: &[u8]) {
        let index = self.tail_index();
        let tail = &mut self.nodes[index];
        let fit = bytes.len().min(tail.remaining());
        let offset = tail.offset;
        tail.data[offset..offset + fit].copy_from_slice(&bytes[..fit]);
        tail.offset += fit;
        self.size += fit;

        let rest = &bytes[fit..];
        if !rest.is_empty() {
            self.link(rest.len());
            let (_, dst) = self.claim(rest.len());
            dst.copy_from_slice(rest);
        }
    }

    /// Reserves `len` zeroed bytes that never straddle two nodes.
    pub fn reserve(&mut self, len: usize) -> Reservation {
        let (offset, dst) = self.claim(len);
        dst.fill(0);
        Reservation {
            epoch: self.epoch,
            node: self.tail_index(),
            offset,
            len,
        }
    }

    /// Overwrites the reserved bytes. `bytes` must be exactly as wide as the reservation.
    ///
    /// Fails with [`BufferError::StaleReservation`] if the reservation was
    /// issued by another buffer or before the last [`clear`](Self::clear).
    pub fn patch(&mut self, reservation: Reservation, bytes: &[u8]) -> Result<(), BufferError> {
        let end = reservation.offset + reservation.len;
        let in_bounds = self
            .nodes
            .get(reservation.node)
            .is_some_and(|node| end <= node.offset);
        if reservation.epoch != self.epoch || !in_bounds {
            return Err(BufferError::StaleReservation);
        }
        if bytes.len() != reservation.len {
            return Err(BufferError::PatchSizeMismatch {
                expected: reservation.len,
                actual: bytes.len(),
            });
        }
        let node = &mut self.nodes[reservation.node];
        node.data[reservation.offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Iterates over the committed bytes of each node, in chain order.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.nodes
            .iter()
            .map(Node::committed)
            .filter(|chunk| !chunk.is_empty())
    }

    /// Copies the committed bytes into one contiguous vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size);
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Writes every committed byte to `out`, head to tail.
    ///
    /// The chain is left untouched, so a failed write can be retried
    /// against another sink.
    pub fn write_to<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for chunk in self.chunks() {
            out.write_all(chunk)?;
        }
        Ok(())
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        let (_, dst) = self.claim(1);
        dst[0] = val;
    }

    /// Writes a u8 followed by another u8.
    #[inline]
    pub fn u8u8(&mut self, u8_val: u8, val: u8) {
        let (_, dst) = self.claim(2);
        dst[0] = u8_val;
        dst[1] = val;
    }

    /// Writes a u8 followed by a u16 (big-endian).
    #[inline]
    pub fn u8u16(&mut self, u8_val: u8, u16_val: u16) {
        let (_, dst) = self.claim(3);
        dst[0] = u8_val;
        dst[1..].copy_from_slice(&u16_val.to_be_bytes());
    }

    /// Writes a u8 followed by a u32 (big-endian).
    #[inline]
    pub fn u8u32(&mut self, u8_val: u8, u32_val: u32) {
        let (_, dst) = self.claim(5);
        dst[0] = u8_val;
        dst[1..].copy_from_slice(&u32_val.to_be_bytes());
    }

    /// Writes a u8 followed by a u64 (big-endian).
    #[inline]
    pub fn u8u64(&mut self, u8_val: u8, u64_val: u64) {
        let (_, dst) = self.claim(9);
        dst[0] = u8_val;
        dst[1..].copy_from_slice(&u64_val.to_be_bytes());
    }

    /// Writes a u8 followed by a f32 (big-endian).
    #[inline]
    pub fn u8f32(&mut self, u8_val: u8, f32_val: f32) {
        let (_, dst) = self.claim(5);
        dst[0] = u8_val;
        dst[1..].copy_from_slice(&f32_val.to_be_bytes());
    }

    /// Writes a u8 followed by a f64 (big-endian).
    #[inline]
    pub fn u8f64(&mut self, u8_val: u8, f64_val: f64) {
        let (_, dst) = self.claim(9);
        dst[0] = u8_val;
        dst[1..].copy_from_slice(&f64_val.to_be_bytes());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        self.append(buf);
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.append(s.as_bytes());
        s.len()
    }
}
