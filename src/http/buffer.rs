use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Growable read buffer for incremental parsing.
///
/// Reads land in the spare capacity after the filled region. When the buffer
/// is full its capacity doubles before the next read, so a parser that needs
/// more bytes than currently buffered always gets room for them.
#[derive(Debug)]
pub struct ReadBuffer {
    inner: BytesMut,
}

impl ReadBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: BytesMut::with_capacity(capacity.max(1)),
        }
    }

    /// Reads once from `reader` into spare capacity.
    ///
    /// Returns the number of bytes read; `0` means end of stream.
    pub async fn fill_from<R>(&mut self, reader: &mut R) -> std::io::Result<usize>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        if self.inner.len() == self.inner.capacity() {
            let additional = self.inner.capacity().max(1);
            self.inner.reserve(additional);
        }

        reader.read_buf(&mut self.inner).await
    }

    /// The bytes read but not yet consumed.
    pub fn filled(&self) -> &[u8] {
        &self.inner
    }

    /// Discards the first `n` filled bytes.
    pub fn consume(&mut self, n: usize) {
        self.inner.advance(n);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}
