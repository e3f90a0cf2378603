use crate::exif_reader::read_capture_moment;
use crate::moment::CaptureMoment;
use log::debug;
use std::path::Path;

/// Supplies the embedded capture moment of a file, if it has a usable one.
pub trait CaptureTimeSource {
    fn capture_moment(&self, path: &Path) -> Option<CaptureMoment>;
}

impl<F> CaptureTimeSource for F
where
    F: Fn(&Path) -> Option<CaptureMoment>,
{
    fn capture_moment(&self, path: &Path) -> Option<CaptureMoment> {
        self(path)
    }
}

/// Reads `DateTimeOriginal` from the file's EXIF block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifCaptureReader;

impl CaptureTimeSource for ExifCaptureReader {
    fn capture_moment(&self, path: &Path) -> Option<CaptureMoment> {
        match read_capture_moment(path) {
            Ok(moment) => moment,
            Err(err) => {
                debug!("{err:#}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CaptureTimeSource, ExifCaptureReader};
    use crate::exif_reader::jpeg_with_exif_field;
    use crate::moment::{moment, CaptureMoment};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn closures_act_as_capture_sources() {
        let fixed = moment(2021, 5, 1, 10, 0, 0);
        let source = move |path: &Path| -> Option<CaptureMoment> {
            (path.file_name()?.to_str()? == "IMG_0001.JPEG").then_some(fixed)
        };

        assert_eq!(
            source.capture_moment(Path::new("/x/IMG_0001.JPEG")),
            Some(fixed)
        );
        assert_eq!(source.capture_moment(Path::new("/x/IMG_0002.JPEG")), None);
    }

    #[test]
    fn exif_reader_yields_capture_moment_from_jpeg() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("IMG_0001.JPEG");
        fs::write(
            &path,
            jpeg_with_exif_field(exif::Tag::DateTimeOriginal, "2021:05:01 10:00:00"),
        )
        .expect("write");

        assert_eq!(
            ExifCaptureReader.capture_moment(&path),
            Some(moment(2021, 5, 1, 10, 0, 0))
        );
    }

    #[test]
    fn exif_reader_yields_none_for_files_without_exif() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("IMG_0001.JPEG");
        fs::write(&path, b"not a jpeg").expect("write");

        assert_eq!(ExifCaptureReader.capture_moment(&path), None);
        assert_eq!(
            ExifCaptureReader.capture_moment(&temp.path().join("missing.jpeg")),
            None
        );
    }
}
