//! Table-related ODF elements.
//!
//! Typed views over `table:table`, `table:table-row` and the two kinds of
//! cell element. Views borrow the underlying [`Element`]; nothing is copied
//! out of the tree.

use super::attr_parser::count_attribute;
use super::element::{Element, ElementBase, Node};
use super::namespace::TABLENS;
use crate::common::Result;

/// A table element (one sheet of a spreadsheet)
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    element: &'a Element,
}

impl<'a> Table<'a> {
    /// View an element as a table, if it is one
    pub fn from_element(element: &'a Element) -> Option<Self> {
        element
            .is_named(TABLENS, "table")
            .then_some(Self { element })
    }

    /// Get the table name
    pub fn name(&self) -> Option<&'a str> {
        self.element.attribute(TABLENS, "name")
    }

    /// Get all rows of the table in document order.
    ///
    /// Rows grouped under `table:table-header-rows`, `table:table-row-group`
    /// or `table:table-rows` are included in place.
    pub fn rows(&self) -> impl Iterator<Item = TableRow<'a>> + use<'a> {
        self.element
            .descendants(TABLENS, "table-row")
            .into_iter()
            .map(|element| TableRow { element })
    }

    /// Get the underlying element
    pub fn element(&self) -> &'a Element {
        self.element
    }
}

/// A table row element
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    element: &'a Element,
}

impl<'a> TableRow<'a> {
    /// Number of times this row occurs (`table:number-rows-repeated`, default 1)
    pub fn repeat_count(&self) -> Result<usize> {
        count_attribute(self.element, "table:number-rows-repeated", 1)
    }

    /// Classify each child of the row, in document order
    pub fn cells(&self) -> impl Iterator<Item = CellNode<'a>> + use<'a> {
        self.element.nodes().iter().map(CellNode::classify)
    }

    /// A row is entirely empty when none of its children has children
    /// of its own, whether or not the child is a cell.
    pub fn is_empty(&self) -> bool {
        !self.element.nodes().iter().any(Node::has_children)
    }
}

/// A row child, classified once during the row scan
#[derive(Debug, Clone, Copy)]
pub enum CellNode<'a> {
    /// `table:table-cell`
    Value(TableCell<'a>),
    /// `table:covered-table-cell`: a slot spanned by a merged cell
    Covered(TableCell<'a>),
    /// Anything else a row may contain; ignored by extraction
    Other,
}

impl<'a> CellNode<'a> {
    /// Classify a row child
    pub fn classify(node: &'a Node) -> Self {
        match node {
            Node::Element(element) if element.is_named(TABLENS, "table-cell") => {
                CellNode::Value(TableCell { element })
            },
            Node::Element(element) if element.is_named(TABLENS, "covered-table-cell") => {
                CellNode::Covered(TableCell { element })
            },
            _ => CellNode::Other,
        }
    }
}

/// A table cell element (value or covered)
#[derive(Debug, Clone, Copy)]
pub struct TableCell<'a> {
    element: &'a Element,
}

impl<'a> TableCell<'a> {
    /// View an element as a cell, if it is one
    pub fn from_element(element: &'a Element) -> Option<Self> {
        (element.is_named(TABLENS, "table-cell")
            || element.is_named(TABLENS, "covered-table-cell"))
        .then_some(Self { element })
    }

    /// Number of columns this cell occupies
    /// (`table:number-columns-repeated`, default 1)
    pub fn repeat_count(&self) -> Result<usize> {
        count_attribute(self.element, "table:number-columns-repeated", 1)
    }

    /// Get the underlying element
    pub fn element(&self) -> &'a Element {
        self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with(children: Vec<Element>) -> Element {
        children
            .into_iter()
            .fold(Element::new("table:table-row"), Element::with_child)
    }

    #[test]
    fn test_classify_children() {
        let row = row_with(vec![
            Element::new("table:table-cell"),
            Element::new("table:covered-table-cell"),
            Element::new("office:annotation"),
        ]);
        let table = Element::new("table:table").with_child(row);
        let table = Table::from_element(&table).unwrap();
        let row = table.rows().next().unwrap();

        let kinds: Vec<_> = row.cells().collect();
        assert!(matches!(kinds[0], CellNode::Value(_)));
        assert!(matches!(kinds[1], CellNode::Covered(_)));
        assert!(matches!(kinds[2], CellNode::Other));
    }

    #[test]
    fn test_rows_include_header_rows() {
        let table = Element::new("table:table")
            .with_attribute("table:name", "Data")
            .with_child(
                Element::new("table:table-header-rows")
                    .with_child(Element::new("table:table-row")),
            )
            .with_child(Element::new("table:table-row"));
        let table = Table::from_element(&table).unwrap();
        assert_eq!(table.name(), Some("Data"));
        assert_eq!(table.rows().count(), 2);
    }

    #[test]
    fn test_row_emptiness() {
        let empty = row_with(vec![
            Element::new("table:table-cell").with_attribute("table:number-columns-repeated", "5"),
            Element::new("table:covered-table-cell"),
        ]);
        let holder = Element::new("table:table").with_child(empty);
        let table = Table::from_element(&holder).unwrap();
        assert!(table.rows().next().unwrap().is_empty());

        let filled = row_with(vec![
            Element::new("table:table-cell").with_child(Element::new("text:p").with_text("x")),
        ]);
        let holder = Element::new("table:table").with_child(filled);
        let table = Table::from_element(&holder).unwrap();
        assert!(!table.rows().next().unwrap().is_empty());
    }

    #[test]
    fn test_repeat_counts() {
        let cell = Element::new("table:table-cell").with_attribute("table:number-columns-repeated", "4");
        assert_eq!(TableCell::from_element(&cell).unwrap().repeat_count().unwrap(), 4);

        let plain = Element::new("table:table-cell");
        assert_eq!(TableCell::from_element(&plain).unwrap().repeat_count().unwrap(), 1);

        assert!(Table::from_element(&plain).is_none());
        assert!(TableCell::from_element(&Element::new("text:p")).is_none());
    }
}
