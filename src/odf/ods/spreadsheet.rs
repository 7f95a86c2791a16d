//! Main Spreadsheet structure and implementation.

use super::Sheet;
use super::extract::{ExtractOptions, Grid};
use crate::common::{Error, Result};
use crate::odf::elements::element::{Element, ElementBase};
use crate::odf::elements::namespace::TABLENS;
use log::debug;
use rayon::prelude::*;

#[cfg(feature = "package")]
use crate::odf::core::Package;
#[cfg(feature = "package")]
use std::io::{Cursor, Read, Seek};
#[cfg(feature = "package")]
use std::path::Path;

/// An OpenDocument spreadsheet (.ods).
///
/// Owns the element tree of `content.xml`. Sheets are every `table:table`
/// element in document order and borrow from the spreadsheet.
///
/// # Examples
///
/// ```no_run
/// use odsgrid::{ExtractOptions, Spreadsheet};
///
/// # fn main() -> odsgrid::Result<()> {
/// let spreadsheet = Spreadsheet::open("data.ods")?;
///
/// println!("Sheets: {:?}", spreadsheet.sheet_names());
///
/// let sheet = spreadsheet.sheet_by_name("Summary")?;
/// let grid = sheet.extract(&ExtractOptions::default())?;
/// println!("{} rows", grid.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    root: Element,
}

impl Spreadsheet {
    /// Open an ODS spreadsheet from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid ODS file.
    #[cfg(feature = "package")]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Create a Spreadsheet from a byte buffer holding a complete `.ods` file.
    #[cfg(feature = "package")]
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Create a Spreadsheet from any seekable reader over an `.ods` file.
    ///
    /// The package's `mimetype` must name an OpenDocument spreadsheet or
    /// spreadsheet template.
    #[cfg(feature = "package")]
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut package = Package::from_reader(reader)?;

        if !package.is_spreadsheet() {
            return Err(Error::InvalidFormat(format!(
                "Not an ODS file: MIME type is {}",
                package.mimetype()
            )));
        }

        let content = package.read_part("content.xml")?;
        Self::from_content_xml(&content)
    }

    /// Create a Spreadsheet from the raw bytes of a `content.xml` document.
    ///
    /// Also accepts a fragment whose root is a single `table:table`.
    pub fn from_content_xml(xml: &[u8]) -> Result<Self> {
        let spreadsheet = Self::from_element(Element::from_bytes(xml)?);
        debug!("loaded spreadsheet with {} sheets", spreadsheet.sheet_count());
        Ok(spreadsheet)
    }

    /// Wrap an already-built element tree
    pub fn from_element(root: Element) -> Self {
        Self { root }
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    fn tables(&self) -> Vec<&Element> {
        if self.root.is_named(TABLENS, "table") {
            vec![&self.root]
        } else {
            self.root.descendants(TABLENS, "table")
        }
    }

    /// Get all sheets in document order
    pub fn sheets(&self) -> Vec<Sheet<'_>> {
        self.tables()
            .into_iter()
            .filter_map(Sheet::from_element)
            .collect()
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.tables().len()
    }

    /// Get the names of all sheets in document order
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets()
            .iter()
            .map(|sheet| sheet.name().to_string())
            .collect()
    }

    /// Get a sheet by zero-based position
    pub fn sheet_by_index(&self, index: usize) -> Result<Sheet<'_>> {
        let mut sheets = self.sheets();
        let count = sheets.len();
        if index >= count {
            return Err(Error::IndexOutOfRange { index, count });
        }
        Ok(sheets.swap_remove(index))
    }

    /// Get a sheet by name; the first sheet with that name wins
    pub fn sheet_by_name(&self, name: &str) -> Result<Sheet<'_>> {
        self.sheets()
            .into_iter()
            .find(|sheet| sheet.name() == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Extract every sheet in parallel, returning `(name, grid)` pairs in
    /// document order
    pub fn extract_all(&self, options: &ExtractOptions) -> Result<Vec<(String, Grid)>> {
        self.sheets()
            .into_par_iter()
            .map(|sheet| {
                sheet
                    .extract(options)
                    .map(|grid| (sheet.name().to_string(), grid))
            })
            .collect()
    }
}

/// Get the names of all sheets in document order
pub fn list_sheets(spreadsheet: &Spreadsheet) -> Vec<String> {
    spreadsheet.sheet_names()
}

/// Get a sheet by zero-based position
pub fn sheet_by_index(spreadsheet: &Spreadsheet, index: usize) -> Result<Sheet<'_>> {
    spreadsheet.sheet_by_index(index)
}

/// Get a sheet by name
pub fn sheet_by_name<'a>(spreadsheet: &'a Spreadsheet, name: &str) -> Result<Sheet<'a>> {
    spreadsheet.sheet_by_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::ods::Scalar;

    const CONTENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content
    xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
    xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0"
    xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">
  <office:body>
    <office:spreadsheet>
      <table:table table:name="First">
        <table:table-row>
          <table:table-cell office:value-type="string"><text:p>one</text:p></table:table-cell>
        </table:table-row>
      </table:table>
      <table:table table:name="Second">
        <table:table-row>
          <table:table-cell office:value-type="float" office:value="2"><text:p>2</text:p></table:table-cell>
        </table:table-row>
      </table:table>
      <table:table table:name="First">
        <table:table-row>
          <table:table-cell office:value-type="string"><text:p>shadowed</text:p></table:table-cell>
        </table:table-row>
      </table:table>
    </office:spreadsheet>
  </office:body>
</office:document-content>"#;

    fn doc() -> Spreadsheet {
        Spreadsheet::from_content_xml(CONTENT.as_bytes()).unwrap()
    }

    #[test]
    fn test_sheet_names() {
        let doc = doc();
        assert_eq!(doc.sheet_count(), 3);
        assert_eq!(list_sheets(&doc), vec!["First", "Second", "First"]);
    }

    #[test]
    fn test_sheet_by_index() {
        let doc = doc();
        assert_eq!(sheet_by_index(&doc, 1).unwrap().name(), "Second");
        match sheet_by_index(&doc, 3) {
            Err(Error::IndexOutOfRange { index, count }) => assert_eq!((index, count), (3, 3)),
            other => panic!("expected IndexOutOfRange, got {:?}", other.map(|s| s.name())),
        }
    }

    #[test]
    fn test_sheet_by_name_first_match_wins() {
        let doc = doc();
        let grid = sheet_by_name(&doc, "First")
            .unwrap()
            .extract(&ExtractOptions::default())
            .unwrap();
        assert_eq!(grid, vec![vec![Scalar::String("one".to_string())]]);

        assert!(matches!(
            sheet_by_name(&doc, "Missing"),
            Err(Error::SheetNotFound(ref name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_extract_all_keeps_document_order() {
        let all = doc().extract_all(&ExtractOptions::default()).unwrap();
        let names: Vec<_> = all.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "First"]);
        assert_eq!(all[1].1, vec![vec![Scalar::Int(2)]]);
    }

    #[test]
    fn test_extract_all_reports_first_error() {
        let doc = Spreadsheet::from_content_xml(
            br#"<office:spreadsheet>
                 <table:table table:name="Ok"/>
                 <table:table table:name="Bad">
                   <table:table-row>
                     <table:table-cell office:value-type="mystery"><text:p>?</text:p></table:table-cell>
                   </table:table-row>
                 </table:table>
               </office:spreadsheet>"#,
        )
        .unwrap();
        assert!(matches!(
            doc.extract_all(&ExtractOptions::default()),
            Err(Error::UnrecognizedCellType { .. })
        ));
    }

    #[test]
    fn test_single_table_fragment() {
        let doc = Spreadsheet::from_content_xml(b"<table:table table:name=\"Only\"/>").unwrap();
        assert_eq!(doc.sheet_names(), vec!["Only"]);
    }

    #[test]
    fn test_document_without_tables() {
        let doc = Spreadsheet::from_content_xml(b"<office:document-content/>").unwrap();
        assert_eq!(doc.sheet_count(), 0);
        assert!(matches!(doc.sheet_by_index(0), Err(Error::IndexOutOfRange { count: 0, .. })));
    }
}
