use crate::common::constants::CSV_HEADER;
use crate::common::error::Result;
use crate::common::types::MeetingRecord;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

const SEP: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one RFC 4180 row (CRLF-terminated) to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[&str]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEP)?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\r\n")
}

/// Header row followed by one row per record, in order.
pub fn write_records<W: Write>(mut w: W, records: &[MeetingRecord]) -> io::Result<()> {
    write_row(&mut w, &CSV_HEADER)?;
    for record in records {
        write_row(&mut w, &record.as_row())?;
    }
    Ok(())
}

/// Replace the file at `path` with the CSV rendering of `records`.
///
/// Rows go to a temp file beside the target which is renamed over it once
/// complete; on any error the temp file is removed and the target is left as
/// it was.
#[instrument(skip(records), fields(records = records.len()))]
pub fn write_csv_file(path: &Path, records: &[MeetingRecord]) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    debug!("Writing CSV to temp file {}", tmp.path().display());
    {
        let mut out = BufWriter::new(&mut tmp);
        write_records(&mut out, records)?;
        out.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(title: &str, date: &str, location: &str, url: &str) -> MeetingRecord {
        MeetingRecord {
            title: title.into(),
            date: date.into(),
            location: location.into(),
            url: url.into(),
        }
    }

    fn render(records: &[MeetingRecord]) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_fields_are_not_quoted() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["a", "b c", ""]).unwrap();
        assert_eq!(buf, b"a,b c,\r\n");
    }

    #[test]
    fn test_delimiters_quotes_and_newlines_are_quoted() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["x,y", "say \"hi\"", "two\nlines", "cr\rhere"]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\"x,y\",\"say \"\"hi\"\"\",\"two\nlines\",\"cr\rhere\"\r\n"
        );
    }

    #[test]
    fn test_empty_input_renders_header_only() {
        assert_eq!(render(&[]), "title,date,location,url\r\n");
    }

    #[test]
    fn test_records_keep_input_order() {
        let out = render(&[
            record("B", "d1", "l1", "u1"),
            record("A", "d2", "l2", "u2"),
        ]);
        assert_eq!(out, "title,date,location,url\r\nB,d1,l1,u1\r\nA,d2,l2,u2\r\n");
    }

    #[test]
    fn test_write_csv_file_overwrites_existing_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale contents that are longer than the new file\n").unwrap();

        let written = write_csv_file(&path, &[record("T", "D", "L", "U")]).unwrap();
        assert_eq!(written, path);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "title,date,location,url\r\nT,D,L,U\r\n"
        );
    }

    #[test]
    fn test_write_csv_file_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("meetings.csv");
        write_csv_file(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "title,date,location,url\r\n");
    }

    #[test]
    fn test_failed_replace_leaves_no_partial_file() {
        let dir = tempdir().unwrap();
        // A directory at the target path makes the final rename fail.
        let path = dir.path().join("out.csv");
        fs::create_dir(&path).unwrap();

        assert!(write_csv_file(&path, &[record("T", "D", "L", "U")]).is_err());
        assert!(path.is_dir());
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }
}
