//! Streaming copy with a reusable buffer.
//!
//! Files that are not rewritten are streamed from the archive to disk through
//! one buffer allocated per extraction, so large binaries never sit in
//! memory as a whole.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::StarterError;

/// Buffer size for I/O operations (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable buffer for [`copy_with_buffer`].
///
/// # Examples
///
/// ```no_run
/// # use starter_core::copy::{CopyBuffer, copy_with_buffer};
/// # use starter_core::StarterError;
/// # fn example() -> Result<(), StarterError> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("input.bin")?;
/// let mut output = std::fs::File::create("output.bin")?;
///
/// let bytes_copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// println!("Copied {} bytes", bytes_copied);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies everything from `reader` to `writer` through `buffer`.
///
/// Interrupted reads are retried; any other read or write error is returned
/// as `StarterError::Io`.
///
/// # Errors
///
/// Returns an error if reading from the source or writing to the destination
/// fails.
#[inline]
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, StarterError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StarterError::Io(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(StarterError::Io)?;

        total += bytes_read as u64;
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_buffer_size() {
        assert_eq!(CopyBuffer::new().size(), 64 * 1024);
        assert_eq!(CopyBuffer::default().size(), 64 * 1024);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        assert_eq!(copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap(), 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_multiple_chunks() {
        let mut buffer = CopyBuffer::new();
        let input_data = vec![0x55u8; COPY_BUFFER_SIZE * 3 + 1000];
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_copy_reusable_buffer() {
        let mut buffer = CopyBuffer::new();

        let mut output1 = Vec::new();
        copy_with_buffer(&mut Cursor::new(b"First copy"), &mut output1, &mut buffer).unwrap();
        assert_eq!(output1, b"First copy");

        let mut output2 = Vec::new();
        copy_with_buffer(&mut Cursor::new(b"Second"), &mut output2, &mut buffer).unwrap();
        assert_eq!(output2, b"Second");
    }

    #[test]
    fn test_copy_with_interrupted_reads() {
        use std::io::Error;
        use std::io::ErrorKind;

        struct InterruptedReader {
            data: Vec<u8>,
            position: usize,
            calls: usize,
        }

        impl Read for InterruptedReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                self.calls += 1;
                if self.calls % 2 == 1 && self.position < self.data.len() {
                    return Err(Error::new(ErrorKind::Interrupted, "interrupted"));
                }
                let remaining = self.data.len() - self.position;
                let to_read = remaining.min(buf.len()).min(100);
                buf[..to_read].copy_from_slice(&self.data[self.position..self.position + to_read]);
                self.position += to_read;
                Ok(to_read)
            }
        }

        let test_data = vec![0x42u8; 1000];
        let mut reader = InterruptedReader {
            data: test_data.clone(),
            position: 0,
            calls: 0,
        };

        let mut output = Vec::new();
        let result = copy_with_buffer(&mut reader, &mut output, &mut CopyBuffer::new());
        assert!(result.is_ok(), "copy should handle interrupted reads");
        assert_eq!(output, test_data);
    }

    #[test]
    fn test_copy_with_write_failure() {
        use std::io::Error;
        use std::io::ErrorKind;

        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(Error::other("disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut input = Cursor::new(vec![0x42u8; 1000]);
        let result = copy_with_buffer(&mut input, &mut FailingWriter, &mut CopyBuffer::new());

        match result {
            Err(StarterError::Io(e)) => assert_eq!(e.kind(), ErrorKind::Other),
            other => panic!("expected IO error, got {other:?}"),
        }
    }
}
