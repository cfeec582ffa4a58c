/// Arbitrary byte buffer carried as a queue payload by the drivers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Package {
    buf: Box<[u8]>,
}

impl Package {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self { buf: bytes.into() }
    }

    /// The one-character package the drivers attach to every key.
    pub fn placeholder() -> Self {
        Self::new(b"?\0".to_vec())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
