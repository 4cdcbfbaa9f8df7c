use anyhow::Result;
use escape_tables::encoder_escapes;

fn main() -> Result<()> {
    let table = encoder_escapes()?;
    let mut out = String::new();
    table.render_array("LUT", &mut out);
    table.render_bitmask("LUT_BIN", &mut out);
    print!("{out}");
    Ok(())
}
