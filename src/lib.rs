//! Build-time generator for the escape lookup tables used by the string
//! encoder. Build an [`EscapeTable`] with `new`, populate it with `register`,
//! then render the table as source literals with `render_array` and
//! `render_bitmask`.
use anyhow::{bail, Result};
use std::fmt::Write;


/// One entry per possible byte value.
pub const TABLE_LEN: usize = 256;

/// Entries per line in the rendered array literal.
const PER_LINE: usize = 8;

/// One-shot builder for the escape tables. Populated by a sequence of
/// `register` calls, then read-only; the renderers never mutate it and may
/// run in either order.
#[derive(Debug, Clone)]
pub struct EscapeTable {
    codes: [u8; TABLE_LEN],
    used: [bool; TABLE_LEN],
}

impl Default for EscapeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EscapeTable {
    pub fn new() -> Self {
        Self {
            codes: [0; TABLE_LEN],
            used: [false; TABLE_LEN],
        }
    }

    /// Bind the source byte to `code`, the byte written after the escape
    /// character in the encoded output. Return an error if `code` was
    /// already claimed by an earlier registration; the table would silently
    /// lose a mapping otherwise. A later registration of the same source
    /// byte under a fresh code replaces the old mapping.
    pub fn register(&mut self, byte: u8, code: u8) -> Result<()> {
        if self.used[code as usize] {
            bail!("escape code {:?} is already assigned", code as char)
        }
        self.used[code as usize] = true;
        self.codes[byte as usize] = code;
        Ok(())
    }

    /// return the escape code for `byte`, 0 if it needs no escaping
    pub fn code(&self, byte: u8) -> u8 {
        self.codes[byte as usize]
    }

    /// The packed form of the table: bit `v % 64` of word `v / 64` is set
    /// iff byte value `v` is registered.
    pub fn bitmask(&self) -> [u64; 4] {
        let mut words = [0u64; 4];
        for (v, &code) in self.codes.iter().enumerate() {
            if code != 0 {
                words[v / 64] |= 1u64 << (v % 64);
            }
        }
        words
    }

    /// Render the dense table as `const {name}: [u8; 256] = [..];`, in
    /// ascending byte order, eight entries per line, each annotated with a
    /// comment giving the byte value it belongs to.
    pub fn render_array(&self, name: &str, buf: &mut String) {
        writeln!(buf, "const {name}: [u8; {TABLE_LEN}] = [").unwrap();
        for (row, chunk) in self.codes.chunks(PER_LINE).enumerate() {
            buf.push_str("    ");
            for (col, &code) in chunk.iter().enumerate() {
                if col > 0 {
                    buf.push_str(", ");
                }
                write!(buf, "{:>2} /* {:>3} */", code, row * PER_LINE + col).unwrap();
            }
            if (row + 1) * PER_LINE < TABLE_LEN {
                buf.push(',');
            }
            buf.push('\n');
        }
        buf.push_str("];\n");
    }

    /// Render the bitmask as `const {name}: [u64; 4] = [..];`, one 64-digit
    /// binary literal per word. The literal is written most-significant-bit
    /// first, so the digit string reads from byte value `64 * i + 63` down
    /// to `64 * i`; consumers test `(word >> (byte % 64)) & 1`.
    pub fn render_bitmask(&self, name: &str, buf: &mut String) {
        writeln!(buf, "const {name}: [u64; 4] = [").unwrap();
        for (i, word) in self.bitmask().iter().enumerate() {
            write!(buf, "    0b{word:064b}").unwrap();
            buf.push_str(if i + 1 < 4 { ",\n" } else { "\n" });
        }
        buf.push_str("];\n");
    }
}

/// The escape set of the string encoder: quote, backslash, and the usual
/// single-letter control character escapes.
pub fn encoder_escapes() -> Result<EscapeTable> {
    let mut table = EscapeTable::new();
    table.register(b'"', b'"')?;
    table.register(b'\\', b'\\')?;
    table.register(0x08, b'b')?;
    table.register(0x0c, b'f')?;
    table.register(b'\n', b'n')?;
    table.register(b'\r', b'r')?;
    table.register(b'\t', b't')?;
    Ok(table)
}
