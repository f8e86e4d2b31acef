use std::io::{self, Read, Write};

/// Write a u32 in native byte order
pub fn write_u32_ne<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_ne_bytes())
}

/// Read a u32 in native byte order
pub fn read_u32_ne<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_ne_bytes(buf))
}

/// Read `count` consecutive native-order u32s
pub fn read_u32_array<R: Read>(reader: &mut R, count: usize) -> io::Result<Vec<u32>> {
    (0..count).map(|_| read_u32_ne(reader)).collect()
}
