//! Deferred-count container framing.
//!
//! MessagePack puts the element count of a map or array in front of its
//! contents. The framer reserves a full-width header when a container opens,
//! counts what gets written into it, and patches the real count in place when
//! it closes. Nested containers are kept on an explicit stack.

use log::debug;
use msgpackx_buffers::{LinkedBuffer, Reservation};

use crate::constants::{MsgPackMarker, CONTAINER_HEADER_WIDTH};
use crate::error::{EncodeError, ValueError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Map,
    Array,
}

impl ContainerKind {
    /// 32-bit marker, wide enough for any count the format allows.
    fn marker(self) -> MsgPackMarker {
        match self {
            ContainerKind::Map => MsgPackMarker::Map32,
            ContainerKind::Array => MsgPackMarker::Array32,
        }
    }

    /// Logical elements contributed by one entry: key + value for maps.
    fn elements_per_entry(self) -> u64 {
        match self {
            ContainerKind::Map => 2,
            ContainerKind::Array => 1,
        }
    }
}

/// Lifecycle of the outermost container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerState {
    Opened,
    Counting,
    Closed,
}

struct Frame {
    kind: ContainerKind,
    header: Reservation,
    elements: u64,
    /// Field number owning this container, `None` for the outermost one.
    field: Option<u32>,
}

/// Stack of open containers over a [`LinkedBuffer`].
///
/// A framer belongs to one buffer: every `open` and `close` must be given the
/// same buffer. Closing on any other buffer fails with
/// [`BufferError::StaleReservation`](msgpackx_buffers::BufferError::StaleReservation).
pub struct ContainerFramer {
    stack: Vec<Frame>,
    root: Option<FramerState>,
}

impl Default for ContainerFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerFramer {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
        }
    }

    /// State of the outermost container, `None` before it is opened.
    pub fn state(&self) -> Option<FramerState> {
        self.root
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_closed(&self) -> bool {
        self.root == Some(FramerState::Closed)
    }

    /// Kind and owning field of the innermost open container.
    pub fn top(&self) -> Option<(ContainerKind, Option<u32>)> {
        self.stack.last().map(|frame| (frame.kind, frame.field))
    }

    /// Opens a container, reserving its header.
    ///
    /// The first call opens the outermost container; later calls nest inside
    /// the innermost open one.
    pub fn open(
        &mut self,
        buf: &mut LinkedBuffer,
        kind: ContainerKind,
        field: Option<u32>,
    ) -> Result<(), EncodeError> {
        match self.root {
            None => self.root = Some(FramerState::Opened),
            Some(FramerState::Closed) => return Err(EncodeError::NoOpenContainer),
            Some(_) => {}
        }
        let header = buf.reserve(CONTAINER_HEADER_WIDTH);
        self.stack.push(Frame {
            kind,
            header,
            elements: 0,
            field,
        });
        Ok(())
    }

    /// Counts one entry (a map field or an array element) in the innermost container.
    pub fn count_entry(&mut self) -> Result<(), EncodeError> {
        let frame = self.stack.last_mut().ok_or(EncodeError::NoOpenContainer)?;
        frame.elements += frame.kind.elements_per_entry();
        if self.root == Some(FramerState::Opened) {
            self.root = Some(FramerState::Counting);
        }
        Ok(())
    }

    /// Closes the innermost container and patches its header. Returns the entry count.
    pub fn close(&mut self, buf: &mut LinkedBuffer) -> Result<u32, EncodeError> {
        let frame = self.stack.pop().ok_or(EncodeError::UnbalancedClose)?;
        let entries = frame.elements / frame.kind.elements_per_entry();
        let count = u32::try_from(entries).map_err(|_| EncodeError::Unsupported {
            field: frame
                .field
                .map_or_else(|| "<root>".to_owned(), |n| format!("#{n}")),
            reason: ValueError::TooManyEntries(entries),
        })?;

        let mut header = [0u8; CONTAINER_HEADER_WIDTH];
        header[0] = frame.kind.marker().byte();
        header[1..].copy_from_slice(&count.to_be_bytes());
        buf.patch(frame.header, &header)?;

        if self.stack.is_empty() {
            self.root = Some(FramerState::Closed);
        }
        debug!("closed {:?} container with {} entries", frame.kind, count);
        Ok(count)
    }
}
