//! Random-access decoding over an index file.
//!
//! The index is read with absolute offsets: every record is reached by its
//! offset, never by assuming where the cursor was left by an unrelated read.
//! The reader tracks the cursor itself and turns each offset into a relative
//! move, which lets a `BufReader` keep its buffer for nearby records.
//! Two kinds of primitives are exposed:
//!
//! - **Absolute**: [`IndexReader::read_u32_be`] and [`IndexReader::read_cstring`]
//!   seek first, then decode
//! - **Sequential**: [`IndexReader::next_u32`] and [`IndexReader::next_cstring`]
//!   continue from the cursor and are only used right after an explicit
//!   [`IndexReader::seek`] to walk a record's fields in order
//!
//! ## Integers and strings
//!
//! All integers are 4-byte big-endian unsigned. Strings are null-terminated;
//! the terminator is located with `memchr` directly in the source's buffer,
//! so long names cost one scan rather than one read per byte.
//!
//! ## Errors
//!
//! Anything that runs past end-of-file (a seek beyond the last byte, an
//! integer cut short, a string without a terminator) is reported as
//! [`SearchError::Corrupt`] with the offset of the record being decoded.
//! Other I/O failures surface as [`SearchError::Io`].

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use doxs_types::{Result, SearchError, INDEX_MAGIC};
use memchr::memchr;

/// Owns an open index source for the duration of a query.
///
/// Dropping the reader closes the underlying file, on success and error
/// paths alike.
#[derive(Debug)]
pub struct IndexReader<R> {
    source: R,
    len: u64,
    pos: u64,
}

impl IndexReader<BufReader<File>> {
    /// Opens an index file read-only.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::NotFound` if the path does not exist and
    /// `SearchError::Io` for any other open failure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SearchError::NotFound {
                path: path.to_path_buf(),
            },
            _ => SearchError::Io(err),
        })?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead + Seek> IndexReader<R> {
    /// Wraps a buffered, seekable source.
    pub fn new(mut source: R) -> Result<Self> {
        let len = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;
        Ok(Self {
            source,
            len,
            pos: 0,
        })
    }

    /// Total size of the source in bytes.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current cursor position.
    #[inline(always)]
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Bytes left between the cursor and end-of-file.
    #[inline(always)]
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    /// Checks that the source starts with the `DOXS` magic.
    ///
    /// A source shorter than the magic fails the same way as a wrong one.
    pub fn validate_header(&mut self) -> Result<()> {
        self.seek(0)?;
        let mut found = [0u8; 4];
        let available = self.len.min(found.len() as u64) as usize;
        self.source.read_exact(&mut found[..available])?;
        self.pos = available as u64;

        if found[..available] != INDEX_MAGIC {
            return Err(SearchError::BadMagic {
                found: found[..available].to_vec(),
            });
        }
        Ok(())
    }

    /// Moves the cursor to an absolute offset.
    ///
    /// The move is issued relative to the cursor, so a buffered source whose
    /// buffer already holds `offset` serves it without a refill. Seeking
    /// exactly to end-of-file is allowed; the next read then fails.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        if offset > self.len {
            return Err(SearchError::Corrupt {
                offset,
                reason: "offset points past end of file",
            });
        }
        if offset != self.pos {
            self.source.seek_relative(offset as i64 - self.pos as i64)?;
            self.pos = offset;
        }
        Ok(())
    }

    /// Reads a big-endian `u32` at `offset`.
    pub fn read_u32_be(&mut self, offset: u64) -> Result<u32> {
        self.seek(offset)?;
        self.next_u32()
    }

    /// Reads the null-terminated byte string at `offset`, terminator excluded.
    pub fn read_cstring(&mut self, offset: u64) -> Result<Vec<u8>> {
        self.seek(offset)?;
        self.next_cstring()
    }

    /// Reads a big-endian `u32` at the cursor.
    pub fn next_u32(&mut self) -> Result<u32> {
        let start = self.pos;
        let mut buf = [0u8; 4];
        if let Err(err) = self.source.read_exact(&mut buf) {
            // a short read leaves the source somewhere past `start`
            self.pos = self.source.stream_position()?;
            return Err(truncated(err, start, "integer runs past end of file"));
        }
        self.pos += buf.len() as u64;
        Ok(u32::from_be_bytes(buf))
    }

    /// Reads a null-terminated byte string at the cursor.
    pub fn next_cstring(&mut self) -> Result<Vec<u8>> {
        let start = self.pos;
        let mut out = Vec::new();

        loop {
            let (consumed, terminated) = {
                let chunk = self.source.fill_buf()?;
                if chunk.is_empty() {
                    return Err(SearchError::Corrupt {
                        offset: start,
                        reason: "string is not null-terminated",
                    });
                }
                match memchr(0, chunk) {
                    Some(end) => {
                        out.extend_from_slice(&chunk[..end]);
                        (end + 1, true)
                    }
                    None => {
                        out.extend_from_slice(chunk);
                        (chunk.len(), false)
                    }
                }
            };

            self.source.consume(consumed);
            self.pos += consumed as u64;
            if terminated {
                return Ok(out);
            }
        }
    }

    /// Reads a null-terminated string at the cursor as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; index writers are not
    /// required to emit UTF-8 names.
    pub fn next_string(&mut self) -> Result<String> {
        self.next_cstring().map(into_text)
    }
}

/// Converts raw index bytes to text, replacing invalid UTF-8.
pub(crate) fn into_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

fn truncated(err: io::Error, offset: u64, reason: &'static str) -> SearchError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        SearchError::Corrupt { offset, reason }
    } else {
        SearchError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    fn reader(bytes: &[u8]) -> IndexReader<Cursor<Vec<u8>>> {
        IndexReader::new(Cursor::new(bytes.to_vec())).expect("cursor is seekable")
    }

    #[test]
    fn valid_magic() {
        let mut r = reader(b"DOXS\0\0\0\0");
        assert!(r.validate_header().is_ok());
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn wrong_magic() {
        let mut r = reader(b"DOXY\0\0\0\0");
        match r.validate_header() {
            Err(SearchError::BadMagic { found }) => assert_eq!(found, b"DOXY"),
            other => panic!("expected BadMagic, got {other:?}"),
        }
    }

    #[test]
    fn short_file_is_bad_magic() {
        let mut r = reader(b"DO");
        assert!(matches!(
            r.validate_header(),
            Err(SearchError::BadMagic { .. })
        ));

        let mut empty = reader(b"");
        assert!(empty.is_empty());
        assert!(matches!(
            empty.validate_header(),
            Err(SearchError::BadMagic { found }) if found.is_empty()
        ));
    }

    #[test]
    fn magic_is_case_sensitive() {
        let mut r = reader(b"doxs");
        assert!(r.validate_header().is_err());
    }

    #[test]
    fn u32_is_big_endian() {
        let mut r = reader(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x00, 0x01, 0x02]);
        assert_eq!(r.read_u32_be(0).unwrap(), 0xDEAD_BEEF);
        assert_eq!(r.read_u32_be(4).unwrap(), 0x0102);
        assert_eq!(r.position(), 8);
    }

    #[test]
    fn reads_are_absolute() {
        let mut r = reader(&[0, 0, 0, 1, 0, 0, 0, 2]);
        assert_eq!(r.read_u32_be(4).unwrap(), 2);
        assert_eq!(r.read_u32_be(0).unwrap(), 1);
    }

    #[test]
    fn truncated_u32_is_corrupt() {
        let mut r = reader(&[0, 0, 0, 1, 0, 0]);
        assert!(matches!(
            r.read_u32_be(4),
            Err(SearchError::Corrupt { offset: 4, .. })
        ));
        // the cursor is still usable afterwards
        assert_eq!(r.read_u32_be(0).unwrap(), 1);
    }

    /// Counts seeks that reach the unbuffered source.
    struct CountingSeeks {
        inner: Cursor<Vec<u8>>,
        seeks: Rc<Cell<usize>>,
    }

    impl Read for CountingSeeks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Seek for CountingSeeks {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.seeks.set(self.seeks.get() + 1);
            self.inner.seek(pos)
        }
    }

    #[test]
    fn nearby_reads_reuse_the_buffer() {
        let bytes: Vec<u8> = (0u32..64).flat_map(u32::to_be_bytes).collect();
        let seeks = Rc::new(Cell::new(0));
        let source = CountingSeeks {
            inner: Cursor::new(bytes),
            seeks: Rc::clone(&seeks),
        };
        let mut r = IndexReader::new(BufReader::with_capacity(128, source)).unwrap();

        assert_eq!(r.read_u32_be(8).unwrap(), 2);
        let filled = seeks.get();

        // forward and backward inside the 128-byte buffer
        assert_eq!(r.read_u32_be(40).unwrap(), 10);
        assert_eq!(r.read_u32_be(4).unwrap(), 1);
        assert_eq!(r.read_u32_be(4).unwrap(), 1);
        assert_eq!(seeks.get(), filled);

        assert_eq!(r.read_u32_be(200).unwrap(), 50);
        assert_eq!(seeks.get(), filled + 1);
        assert_eq!(r.read_u32_be(0).unwrap(), 0);
    }

    #[test]
    fn seek_past_end_is_corrupt() {
        let mut r = reader(b"DOXS");
        assert!(r.seek(4).is_ok());
        assert!(matches!(
            r.seek(5),
            Err(SearchError::Corrupt { offset: 5, .. })
        ));
        assert!(matches!(r.read_u32_be(100), Err(SearchError::Corrupt { .. })));
    }

    #[test]
    fn cstring_excludes_terminator() {
        let mut r = reader(b"hello\0world\0");
        assert_eq!(r.read_cstring(0).unwrap(), b"hello");
        assert_eq!(r.next_cstring().unwrap(), b"world");
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn empty_cstring() {
        let mut r = reader(b"\0x\0");
        assert!(r.read_cstring(0).unwrap().is_empty());
        assert_eq!(r.position(), 1);
    }

    #[test]
    fn unterminated_cstring_is_corrupt() {
        let mut r = reader(b"abc\0def");
        assert!(matches!(
            r.read_cstring(4),
            Err(SearchError::Corrupt { offset: 4, .. })
        ));
    }

    #[test]
    fn cstring_spans_buffer_refills() {
        let mut bytes = vec![b'x'; 100];
        bytes.push(0);
        bytes.extend_from_slice(b"tail\0");
        // 16-byte buffer forces the terminator search across several refills
        let mut r =
            IndexReader::new(BufReader::with_capacity(16, Cursor::new(bytes))).unwrap();
        assert_eq!(r.read_cstring(0).unwrap().len(), 100);
        assert_eq!(r.next_string().unwrap(), "tail");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut r = reader(b"caf\xe9\0");
        r.seek(0).unwrap();
        assert_eq!(r.next_string().unwrap(), "caf\u{FFFD}");
    }

    #[test]
    fn open_missing_file() {
        let err = IndexReader::open("/definitely/not/here.idx").unwrap_err();
        assert!(matches!(err, SearchError::NotFound { .. }));
    }
}
