use arrayvec::ArrayString;

use std::io;

/// Length of the `<talker><type>` identifier at the start of every frame.
pub const IDENTIFIER_LENGTH: usize = 5;

/// The sentence identifier as it appeared in a frame, e.g. `GNRMC`.
pub type Identifier = ArrayString<IDENTIFIER_LENGTH>;

quick_error! {
    /// Reasons why a terminated frame did not update the navigation model.
    ///
    /// None of these are fatal: the decoder is back in its idle state and
    /// picks up again on the next `$`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum FrameError {
        MissingChecksumDelimiter {
            display("Frame does not contain a \"*\" checksum delimiter")
        }
        InvalidChecksum(expected: u8, actual: u8) {
            display("Expected checksum \"{:02X}\", calculated checksum \"{:02X}\"", expected, actual)
        }
        UnrecognizedSentence(id: Identifier) {
            display("Could not decode sentence \"{}\"", id)
        }
    }
}

quick_error! {
    /// Errors while decoding sentences from a byte source.
    #[derive(Debug)]
    pub enum ReadError {
        Io(err: io::Error) {
            from()
            display("Encountered I/O error while reading: {}", err)
            source(err)
        }
        Frame(err: FrameError) {
            from()
            display("Could not decode frame: {}", err)
            source(err)
        }
    }
}

impl From<(u8, u8)> for FrameError {
    fn from((expected, actual): (u8, u8)) -> Self {
        FrameError::InvalidChecksum(expected, actual)
    }
}

/// Builds the identifier of a frame, keeping only what fits and is ASCII.
pub(crate) fn identifier(frame: &[u8]) -> Identifier {
    let mut id = Identifier::new();
    for &b in frame.iter().take(IDENTIFIER_LENGTH) {
        if b == b',' || b == b'*' || !b.is_ascii() {
            break;
        }
        // capacity equals the `take` above
        let _ = id.try_push(b as char);
    }
    id
}
