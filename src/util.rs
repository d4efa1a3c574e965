use std::io::{self, Read};

/// Upper bound on upfront buffer allocations. Declared record sizes are not
/// trusted, the buffer only grows past this as actual input arrives.
const PREALLOC_LIMIT: u64 = 1 << 20;

pub trait ReadUtil: Read {
    /// Attempts to read an unsigned 16 bit little endian integer from the
    /// reader.
    fn read_le_u16(&mut self) -> io::Result<u16> {
        let mut buf = [0; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Attempts to read an unsigned 32 bit little endian integer from the
    /// reader.
    fn read_le_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Attempts to read an unsigned 64 bit little endian integer from the
    /// reader.
    fn read_le_u64(&mut self) -> io::Result<u64> {
        let mut buf = [0; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Attempts to read 8 bit unsigned integers from the reader to a vector
    /// of size length, erroring if the reader ends early.
    fn read_u8_vec(&mut self, len: u64) -> io::Result<Vec<u8>>
    where
        Self: Sized,
    {
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT) as usize);
        let read = self.by_ref().take(len).read_to_end(&mut buf)?;
        if (read as u64) < len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ends before the declared length",
            ));
        }
        Ok(buf)
    }

    /// Attempts to read a little endian utf-16 string of the given byte
    /// length from the reader, stripping trailing null code units.
    fn read_wstring(&mut self, len: u64) -> crate::Result<String>
    where
        Self: Sized,
    {
        let mut buf = self.read_u8_vec(len)?;

        let mut end = buf.len();
        while end >= 2 && buf[end - 2] == 0 && buf[end - 1] == 0 {
            end -= 2;
        }
        buf.truncate(end);

        decode_wstring(&buf)
    }
}

impl<T: Read> ReadUtil for T {}

/// Attempts to decode a little endian utf-16 string from the byte slice. A
/// trailing odd byte is ignored, the byte length is authoritative.
pub fn decode_wstring(bytes: &[u8]) -> crate::Result<String> {
    let data: Vec<u16> = bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect();

    Ok(String::from_utf16(&data)?)
}

/// Encodes the string to null terminated little endian utf-16, optionally
/// preceded by a 16 bit byte length that counts the terminator.
pub fn render_wstring(string: &str, include_length: bool) -> Vec<u8> {
    let mut data = Vec::with_capacity(string.len() * 2 + 4);

    if include_length {
        let len = string.encode_utf16().count() as u16 * 2 + 2;
        data.extend_from_slice(&len.to_le_bytes());
    }
    for c in string.encode_utf16() {
        data.extend_from_slice(&c.to_le_bytes());
    }
    data.extend_from_slice(&[0, 0]);

    data
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wstring_roundtrip() {
        let data = render_wstring("WM/AlbumArtist", false);
        assert_eq!(data.len(), "WM/AlbumArtist".len() * 2 + 2);
        assert_eq!(&data[data.len() - 2..], &[0, 0]);

        let string = (&mut &data[..]).read_wstring(data.len() as u64).unwrap();
        assert_eq!(string, "WM/AlbumArtist");
    }

    #[test]
    fn wstring_length_prefix() {
        let data = render_wstring("abc", true);
        let len = u16::from_le_bytes([data[0], data[1]]);
        assert_eq!(len, 8);
        assert_eq!(data.len(), 10);
    }

    #[test]
    fn wstring_strips_all_trailing_nulls() {
        let mut data = render_wstring("ab", false);
        data.extend_from_slice(&[0, 0]);

        let string = (&mut &data[..]).read_wstring(data.len() as u64).unwrap();
        assert_eq!(string, "ab");
    }

    #[test]
    fn wstring_ignores_trailing_odd_byte() {
        let string = decode_wstring(&[b'a', 0, b'b', 0, b'c']).unwrap();
        assert_eq!(string, "ab");
    }

    #[test]
    fn short_input_errors() {
        let data = [1, 2, 3];
        let err = (&mut &data[..]).read_u8_vec(4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
