use std::fmt;

/// Scalar used to order queue entries.
///
/// Implementors must be totally ordered over the values actually inserted.
/// For floating point keys that means no NaN; the queue does not check.
pub trait OrderKey: Copy + PartialOrd + Send + Sync + fmt::Debug + 'static {
    /// Additive identity, returned as the span of an empty queue.
    const ZERO: Self;

    /// `high - low`, where `high >= low`.
    fn span(high: Self, low: Self) -> Self;

    /// Render the key the way the queue's drivers print it.
    fn write_key<W: fmt::Write>(self, out: &mut W) -> fmt::Result;
}

macro_rules! impl_integer_key {
    ($($t:ty),*) => {$(
        impl OrderKey for $t {
            const ZERO: Self = 0;

            #[inline]
            fn span(high: Self, low: Self) -> Self {
                high.wrapping_sub(low)
            }

            fn write_key<W: fmt::Write>(self, out: &mut W) -> fmt::Result {
                write!(out, "{}", self)
            }
        }
    )*};
}

impl_integer_key!(i32, i64);

impl OrderKey for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn span(high: Self, low: Self) -> Self {
        high - low
    }

    // fixed decimal, six fractional digits
    fn write_key<W: fmt::Write>(self, out: &mut W) -> fmt::Result {
        write!(out, "{:.6}", self)
    }
}

#[cfg(feature = "double")]
pub type Key = f64;

#[cfg(all(feature = "long", not(feature = "double")))]
pub type Key = i64;

#[cfg(not(any(feature = "long", feature = "double")))]
compile_error!("enable the `long` or the `double` feature to select the key type");

/// Owned rendering of a key.
pub fn key_to_string<K: OrderKey>(key: K) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = key.write_key(&mut out);
    out
}

// truncates silently once `buf` is full
pub(crate) struct SliceWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> SliceWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, written: 0 }
    }

    pub(crate) fn written(&self) -> usize {
        self.written
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.written;
        let n = s.len().min(room);
        self.buf[self.written..self.written + n].copy_from_slice(&s.as_bytes()[..n]);
        self.written += n;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn integer_keys_render_signed_decimal() {
        assert_eq!(key_to_string(42i64), "42");
        assert_eq!(key_to_string(-7i32), "-7");
        assert_eq!(key_to_string(i64::MIN), "-9223372036854775808");
    }

    #[test]
    fn float_keys_render_fixed_decimal() {
        assert_eq!(key_to_string(1181.5f64), "1181.500000");
        assert_eq!(key_to_string(1180.75f64), "1180.750000");
        assert_eq!(key_to_string(-0.25f64), "-0.250000");
        assert_eq!(key_to_string(0.0f64), "0.000000");
    }

    #[test]
    fn span_is_plain_difference() {
        assert_eq!(i64::span(43, 41), 2);
        assert_eq!(i32::span(5, -5), 10);
        assert_eq!(f64::span(2.5, 1.0), 1.5);
        assert_eq!(<i64 as OrderKey>::ZERO, 0);
    }

    #[test]
    fn integer_span_wraps_instead_of_panicking() {
        assert_eq!(i64::span(i64::MAX, i64::MIN), -1);
    }

    #[test]
    fn slice_writer_truncates_at_buffer_end() {
        let mut buf = [0u8; 4];
        let mut w = SliceWriter::new(&mut buf);
        write!(w, "{}", 123456).unwrap();
        assert_eq!(w.written(), 4);
        assert_eq!(&buf, b"1234");
    }

    #[test]
    fn slice_writer_on_empty_buffer_writes_nothing() {
        let mut buf = [0u8; 0];
        let mut w = SliceWriter::new(&mut buf);
        write!(w, "{}", 9).unwrap();
        assert_eq!(w.written(), 0);
    }
}
