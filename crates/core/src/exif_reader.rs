use crate::moment::CaptureMoment;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads the original capture timestamp. `Ok(None)` means the EXIF block was
/// readable but carries no usable `DateTimeOriginal`.
pub fn read_capture_moment(path: &Path) -> Result<Option<CaptureMoment>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open file for EXIF reading: {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .with_context(|| format!("cannot parse EXIF: {}", path.display()))?;

    let moment = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .map(|field| field.display_value().to_string())
        .and_then(|raw| parse_date(&raw));

    Ok(moment)
}

fn parse_date(input: &str) -> Option<CaptureMoment> {
    let normalized = input.trim().trim_matches('"');

    let candidates = [
        "%Y-%m-%d %H:%M:%S",
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ];

    candidates
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(normalized, fmt).ok())
        .map(CaptureMoment::new)
}

#[cfg(test)]
pub(crate) fn jpeg_with_exif_field(tag: exif::Tag, raw: &str) -> Vec<u8> {
    use exif::experimental::Writer;
    use exif::{Field, Value};
    use std::io::Cursor;

    let field = Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![raw.as_bytes().to_vec()]),
    };
    let mut writer = Writer::new();
    writer.push_field(&field);
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).expect("write exif");
    let tiff = tiff.into_inner();

    let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("segment fits");
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

#[cfg(test)]
mod tests {
    use super::{jpeg_with_exif_field, parse_date, read_capture_moment};
    use crate::moment::moment;
    use exif::Tag;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_capture_moment_reads_date_time_original() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("IMG_0001.JPEG");
        fs::write(
            &path,
            jpeg_with_exif_field(Tag::DateTimeOriginal, "2021:05:01 10:00:00"),
        )
        .expect("write");

        let read = read_capture_moment(&path).expect("readable exif");
        assert_eq!(read, Some(moment(2021, 5, 1, 10, 0, 0)));
    }

    #[test]
    fn read_capture_moment_ignores_other_date_tags() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("IMG_0001.JPEG");
        fs::write(&path, jpeg_with_exif_field(Tag::DateTime, "2021:05:01 10:00:00"))
            .expect("write");

        let read = read_capture_moment(&path).expect("readable exif");
        assert_eq!(read, None);
    }

    #[test]
    fn parse_date_accepts_exif_and_display_forms() {
        let expected = Some(moment(2021, 5, 1, 10, 0, 0));
        assert_eq!(parse_date("2021:05:01 10:00:00"), expected);
        assert_eq!(parse_date("2021-05-01 10:00:00"), expected);
        assert_eq!(parse_date(" \"2021-05-01 10:00:00\" "), expected);
        assert_eq!(parse_date("2021-05-01T10:00:00"), expected);
    }

    #[test]
    fn parse_date_rejects_blank_exif_dates() {
        assert_eq!(parse_date("    :  :     :  :  "), None);
        assert_eq!(parse_date("0000:00:00 00:00:00"), None);
    }

    #[test]
    fn read_capture_moment_reports_unparsable_files() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("IMG_0001.JPEG");
        fs::write(&path, b"plain text").expect("write");

        let err = read_capture_moment(&path).expect_err("no EXIF container");
        assert!(err.to_string().contains("cannot parse EXIF"));
    }
}
