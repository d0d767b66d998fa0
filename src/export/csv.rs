use crate::errors::AppResult;
use crate::export::render::{Report, Row};
use std::io::Write;

/// Write report rows as CSV. Blank rows become empty lines; rows may have
/// different widths (the title row is shorter than the table).
pub fn write_csv<W: Write>(report: &Report, mut out: W) -> AppResult<()> {
    write_rows(report.rows(), &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_rows<W, I>(rows: I, out: &mut W) -> AppResult<()>
where
    W: Write,
    I: IntoIterator<Item = Row>,
{
    let mut builder = csv::WriterBuilder::new();
    builder.flexible(true);
    let mut wtr = builder.from_writer(out);

    for row in rows {
        if row.is_empty() {
            // the csv writer would emit `""` for an empty record
            wtr.flush()?;
            let inner = wtr.into_inner().map_err(|e| e.into_error())?;
            inner.write_all(b"\n")?;
            wtr = builder.from_writer(inner);
            continue;
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
