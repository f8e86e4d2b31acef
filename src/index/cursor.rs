//! Decoder for the cursor stream written by a Tracker SPARQL endpoint
//!
//! The endpoint writes query results to the pipe handed to it, one row after
//! another, in native byte order:
//!
//! - u32: number of columns `n`
//! - `n` x u32: value type of each column
//! - `n` x u32: end offset of each value, relative to the first value byte
//! - the values, each terminated by a NUL byte

use super::types::IndexError;
use crate::utils::{read_u32_array, read_u32_ne};
use std::io;

/// Value type of a column that had no binding (e.g. an unmatched OPTIONAL)
const VALUE_TYPE_UNBOUND: u32 = 0;

/// Sanity limit on the column count of a single row
const MAX_COLUMNS: u32 = 64;

/// Decode every row in `buf`, requiring exactly `columns` values per row
pub fn decode_rows(buf: &[u8], columns: usize) -> Result<Vec<Vec<String>>, IndexError> {
    let mut reader = buf;
    let mut rows = Vec::new();

    while !reader.is_empty() {
        let row = decode_row(&mut reader, columns)?;
        rows.push(row);
    }

    Ok(rows)
}

fn decode_row(reader: &mut &[u8], columns: usize) -> Result<Vec<String>, IndexError> {
    let n = read_u32_ne(reader).map_err(truncated)?;
    if n > MAX_COLUMNS || n as usize != columns {
        return Err(IndexError::Protocol(format!(
            "expected {} columns, got {}",
            columns, n
        )));
    }

    let n = n as usize;
    let types = read_u32_array(reader, n).map_err(truncated)?;
    let offsets = read_u32_array(reader, n).map_err(truncated)?;

    let block: &[u8] = *reader;
    let mut values = Vec::with_capacity(n);
    let mut start = 0usize;

    for (value_type, end) in types.into_iter().zip(offsets) {
        let end = end as usize;
        if end < start || end >= block.len() {
            return Err(IndexError::Protocol(format!(
                "value offset {} out of range",
                end
            )));
        }
        if block[end] != 0 {
            return Err(IndexError::Protocol("unterminated value".to_string()));
        }

        if value_type == VALUE_TYPE_UNBOUND {
            values.push(String::new());
        } else {
            values.push(String::from_utf8_lossy(&block[start..end]).into_owned());
        }
        start = end + 1;
    }

    *reader = &block[start..];
    Ok(values)
}

fn truncated(e: io::Error) -> IndexError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        IndexError::Protocol("truncated row".to_string())
    } else {
        IndexError::Io(e)
    }
}
