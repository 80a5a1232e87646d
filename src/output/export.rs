use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::transcript::TranscriptRecord;

pub const CSV_FILENAME: &str = "youtube_transcripts.csv";
pub const TEXT_FILENAME: &str = "youtube_transcripts.txt";

/// Spreadsheet apps detect the encoding of a comma-delimited Korean-text file
/// reliably only with the BOM present.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

const CSV_HEADER: [&str; 3] = ["제목", "URL", "자막"];

/// Serialize transcripts as a UTF-8 CSV with a byte-order mark and the header
/// row 제목,URL,자막.
pub fn to_csv(records: &[TranscriptRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::from(UTF8_BOM);
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(CSV_HEADER)?;
        for r in records {
            wtr.write_record([&r.title, &r.url, &r.text])?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

/// Serialize transcripts as plain text: a `# title` heading, the URL, and the
/// text per record, blocks separated by a blank line.
pub fn to_text(records: &[TranscriptRecord]) -> Vec<u8> {
    let blocks: Vec<String> = records
        .iter()
        .map(|r| format!("# {}\n{}\n{}\n", r.title, r.url, r.text))
        .collect();
    blocks.join("\n\n").into_bytes()
}

/// Write the enabled export files into `dir`, returning the paths written.
pub fn write_exports(
    dir: &Path,
    records: &[TranscriptRecord],
    csv: bool,
    txt: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if csv {
        let path = dir.join(CSV_FILENAME);
        std::fs::write(&path, to_csv(records)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    if txt {
        let path = dir.join(TEXT_FILENAME);
        std::fs::write(&path, to_text(records))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}
