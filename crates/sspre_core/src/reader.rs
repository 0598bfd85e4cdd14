use std::io::{self, Read, Seek};

pub struct LittleEndianReader<R> {
    inner: R,
}

impl<R: Read + Seek> LittleEndianReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        self.inner.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_f32(&mut self) -> io::Result<f32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }

    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads up to `max_len` bytes, stopping early at end of input.
    pub fn read_up_to(&mut self, max_len: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(max_len);
        self.inner
            .by_ref()
            .take(max_len as u64)
            .read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Read a `\n`-terminated line and return it with surrounding ASCII
    /// whitespace (including a trailing `\r`) removed.
    ///
    /// Running out of input before the terminator is an `UnexpectedEof`.
    pub fn read_trimmed_line(&mut self) -> io::Result<String> {
        let mut bytes = Vec::new();
        loop {
            let b = self.read_u8().map_err(|e| {
                if e.kind() == io::ErrorKind::UnexpectedEof {
                    io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("line not terminated after {} bytes", bytes.len()),
                    )
                } else {
                    e
                }
            })?;
            if b == b'\n' {
                break;
            }
            bytes.push(b);
        }
        let trimmed = bytes.trim_ascii();
        String::from_utf8(trimmed.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn read_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.inner.read_to_end(&mut buf)?;
        Ok(buf)
    }

    pub fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }
}
