//! Fixed-size values read and written through the cache.
//!
//! A value moves through the cache as exactly [`LineValue::SIZE`] bytes in
//! the platform's native byte order. Only types for which every byte pattern
//! is a valid value implement the trait, so decoding never fails.

/// A plain fixed-size value with a native-endian byte encoding.
pub trait LineValue: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Encodes into `out`, which is exactly `SIZE` bytes long.
    fn write_ne(&self, out: &mut [u8]);

    /// Decodes from `bytes`, which is exactly `SIZE` bytes long.
    fn read_ne(bytes: &[u8]) -> Self;
}

macro_rules! impl_line_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LineValue for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn write_ne(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                fn read_ne(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_line_value!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

impl<T: LineValue, const N: usize> LineValue for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn write_ne(&self, out: &mut [u8]) {
        for (i, item) in self.iter().enumerate() {
            item.write_ne(&mut out[i * T::SIZE..(i + 1) * T::SIZE]);
        }
    }

    fn read_ne(bytes: &[u8]) -> Self {
        std::array::from_fn(|i| T::read_ne(&bytes[i * T::SIZE..(i + 1) * T::SIZE]))
    }
}

/// Encodes `value` into a freshly allocated buffer.
pub fn to_bytes<T: LineValue>(value: &T) -> Vec<u8> {
    let mut buf = vec![0; T::SIZE];
    value.write_ne(&mut buf);
    buf
}
