use std::io::Error;
use std::path::Path;

/// Writes an edit script with the standard header.
#[allow(dead_code)]
pub fn write_script(path: &Path, rows: &[(u64, &str, &str)]) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(["at_ms", "field", "text"])?;
    for (at_ms, field, text) in rows {
        wtr.write_record([at_ms.to_string().as_str(), *field, *text])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Appends the Luhn check digit to `partial`.
#[allow(dead_code)]
pub fn with_check_digit(partial: &str) -> String {
    let sum: u32 = partial
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();
    let check = (10 - sum % 10) % 10;
    format!("{partial}{check}")
}
