//! Byte-level frame acquisition.
//!
//! Finds `$...*hh\n` frames in a stream fed one byte at a time, buffering the
//! payload between `$` and the line end and XOR-ing the checksum on the fly.

use arrayvec::ArrayVec;

/// Capacity of the frame buffer. Bytes beyond it are dropped.
pub const MAX_FRAME_LEN: usize = 200;

/// Running XOR over the bytes between `$` and `*`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum(u8);

impl Checksum {
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.0 ^= byte;
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The checksum of a whole payload, without `$` and `*`.
    pub fn of(payload: &[u8]) -> u8 {
        payload.iter().fold(0, |acc, b| acc ^ b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside any frame.
    Idle,
    /// Collecting payload, accumulating the checksum.
    InFrame,
    /// Past the `*`: bytes are still buffered but not checksummed.
    InChecksum,
}

/// A terminated frame, borrowed from the acquirer's buffer.
#[derive(Debug)]
pub struct Frame<'a> {
    /// Everything between `$` and the line end, `\r` excluded.
    pub payload: &'a [u8],
    /// XOR of the payload bytes before the first `*`.
    pub checksum: u8,
    /// True if bytes had to be dropped because the buffer was full.
    pub truncated: bool,
}

#[derive(Debug)]
pub struct FrameAcquirer {
    state: State,
    buf: ArrayVec<u8, MAX_FRAME_LEN>,
    checksum: Checksum,
    truncated: bool,
}

impl Default for FrameAcquirer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAcquirer {
    pub fn new() -> Self {
        FrameAcquirer {
            state: State::Idle,
            buf: ArrayVec::new(),
            checksum: Checksum::default(),
            truncated: false,
        }
    }

    /// True while a frame has been started but not terminated.
    #[inline]
    pub fn in_frame(&self) -> bool {
        self.state != State::Idle
    }

    /// Consumes one byte. Returns the frame if this byte terminated one.
    pub fn push(&mut self, byte: u8) -> Option<Frame<'_>> {
        match (byte, self.state) {
            (b'$', _) => {
                self.buf.clear();
                self.checksum = Checksum::default();
                self.truncated = false;
                self.state = State::InFrame;
                None
            }
            (b'\r', _) | (_, State::Idle) => None,
            (b'\n', _) => {
                self.state = State::Idle;
                Some(Frame {
                    payload: &self.buf,
                    checksum: self.checksum.value(),
                    truncated: self.truncated,
                })
            }
            (b'*', State::InFrame) => {
                self.state = State::InChecksum;
                self.store(byte);
                None
            }
            (_, State::InFrame) => {
                self.checksum.push(byte);
                self.store(byte);
                None
            }
            (_, State::InChecksum) => {
                self.store(byte);
                None
            }
        }
    }

    #[inline]
    fn store(&mut self, byte: u8) {
        if self.buf.try_push(byte).is_err() {
            self.truncated = true;
        }
    }
}
