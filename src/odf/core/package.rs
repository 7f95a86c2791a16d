//! ODF package (ZIP archive) handling.
//!
//! An `.ods` file is a ZIP archive whose `mimetype` entry names the document
//! kind and whose `content.xml` holds the sheets.

use crate::common::{Error, Result};
use log::debug;
use std::io::{Read, Seek};

/// MIME type of an OpenDocument spreadsheet
pub const SPREADSHEET_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// MIME type of an OpenDocument spreadsheet template
pub const SPREADSHEET_TEMPLATE_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet-template";

/// An ODF package (ZIP file containing XML documents)
pub struct Package<R> {
    archive: zip::ZipArchive<R>,
    mimetype: String,
}

impl<R: Read + Seek> Package<R> {
    /// Open an ODF package from a reader
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let mimetype = Self::read_mimetype(&mut archive)?;
        debug!("opened ODF package: {} entries, mimetype {}", archive.len(), mimetype);
        Ok(Self { archive, mimetype })
    }

    fn read_mimetype(archive: &mut zip::ZipArchive<R>) -> Result<String> {
        let mut entry = archive.by_name("mimetype").map_err(|_| {
            Error::InvalidFormat("No mimetype file found in ODF package".to_string())
        })?;

        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        Ok(content.trim().to_string())
    }

    /// Get the MIME type from the mimetype file
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    /// Whether the package is a spreadsheet or spreadsheet template
    pub fn is_spreadsheet(&self) -> bool {
        matches!(
            self.mimetype.as_str(),
            SPREADSHEET_MIMETYPE | SPREADSHEET_TEMPLATE_MIMETYPE
        )
    }

    /// Read a part of the package by path
    pub fn read_part(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut entry = self
            .archive
            .by_name(path)
            .map_err(|_| Error::ComponentNotFound(path.to_string()))?;

        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_reads_mimetype_and_parts() {
        let mut package = Package::from_reader(archive(&[
            ("mimetype", SPREADSHEET_TEMPLATE_MIMETYPE),
            ("content.xml", "<office:document-content/>"),
        ]))
        .unwrap();

        assert!(package.is_spreadsheet());
        assert_eq!(package.read_part("content.xml").unwrap(), b"<office:document-content/>");
        assert!(matches!(package.read_part("styles.xml"), Err(Error::ComponentNotFound(_))));
    }

    #[test]
    fn test_text_document_is_not_a_spreadsheet() {
        let package = Package::from_reader(archive(&[(
            "mimetype",
            "application/vnd.oasis.opendocument.text",
        )]))
        .unwrap();
        assert!(!package.is_spreadsheet());
    }

    #[test]
    fn test_missing_mimetype() {
        let result = Package::from_reader(archive(&[("content.xml", "<x/>")]));
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_not_a_zip() {
        let result = Package::from_reader(Cursor::new(b"plain text".to_vec()));
        assert!(matches!(result, Err(Error::ZipError(_))));
    }
}
