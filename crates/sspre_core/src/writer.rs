use std::io::{self, Write};

pub struct LittleEndianWriter<W> {
    inner: W,
}

impl<W: Write> LittleEndianWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_all(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    pub fn write_zeros(&mut self, n: usize) -> io::Result<()> {
        for _ in 0..n {
            self.write_u8(0)?;
        }
        Ok(())
    }

    /// Writes `line` followed by a single `\n`.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
