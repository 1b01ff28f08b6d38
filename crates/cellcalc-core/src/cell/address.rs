//! Row, column and cell identifiers

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use lazy_regex::regex_captures;
use std::fmt;
use std::str::FromStr;

/// A row identifier (0-based internally, 1-based in text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowId(pub u32);

impl RowId {
    /// 0-based row index
    pub fn index(self) -> u32 {
        self.0
    }

    /// 1-based row number, as shown in an address
    pub fn to_row_number(self) -> u32 {
        self.0 + 1
    }

    /// Parse a 1-based row number ("1" → row 0)
    pub fn parse(digits: &str) -> Result<Self> {
        let number: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number '{}'", digits)))?;

        if number == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                digits
            )));
        }

        let row = number - 1;
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }

        Ok(Self(row))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_row_number())
    }
}

/// A column identifier (0-based, A=0, B=1, ..., Z=25, AA=26)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnId(pub u16);

impl ColumnId {
    /// 0-based column index
    pub fn index(self) -> u16 {
        self.0
    }

    /// Parse column letters, case-insensitive (A = 0, Z = 25, AA = 26, etc.)
    pub fn parse(letters: &str) -> Result<Self> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::ColumnOutOfBounds(col - 1, MAX_COLS - 1));
            }
        }

        Ok(Self((col - 1) as u16))
    }

    /// Uppercase column letters for this column
    pub fn to_letters(self) -> String {
        let mut result = String::new();
        let mut n = self.0 as u32 + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_letters())
    }
}

/// A cell address (e.g., "A3")
///
/// Ordering is row-major, which is also the order in which changed cells are
/// reported back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId {
    pub row: RowId,
    pub column: ColumnId,
}

impl CellId {
    /// Create a new cell id
    pub fn new(row: RowId, column: ColumnId) -> Self {
        Self { row, column }
    }

    /// Create a cell id from 0-based row and column indices
    pub fn at(row: u32, column: u16) -> Self {
        Self::new(RowId(row), ColumnId(column))
    }

    /// Parse an address of the form `letters+digits`
    ///
    /// Letters are case-insensitive; the row number is 1-based.
    ///
    /// # Examples
    /// ```
    /// use cellcalc_core::CellId;
    ///
    /// let id = CellId::parse("a3").unwrap();
    /// assert_eq!(id.row.index(), 2);
    /// assert_eq!(id.column.index(), 0);
    /// assert_eq!(id.to_string(), "A3");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (_, letters, digits) = regex_captures!(r"^([A-Za-z]+)([0-9]+)$", s)
            .ok_or_else(|| Error::InvalidAddress(format!("Invalid CellId pattern {}", s)))?;

        Ok(Self {
            row: RowId::parse(digits)?,
            column: ColumnId::parse(letters)?,
        })
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for CellId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(ColumnId(0).to_letters(), "A");
        assert_eq!(ColumnId(1).to_letters(), "B");
        assert_eq!(ColumnId(25).to_letters(), "Z");
        assert_eq!(ColumnId(26).to_letters(), "AA");
        assert_eq!(ColumnId(701).to_letters(), "ZZ");
        assert_eq!(ColumnId(16383).to_letters(), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(ColumnId::parse("A").unwrap(), ColumnId(0));
        assert_eq!(ColumnId::parse("Z").unwrap(), ColumnId(25));
        assert_eq!(ColumnId::parse("AA").unwrap(), ColumnId(26));
        assert_eq!(ColumnId::parse("XFD").unwrap(), ColumnId(16383));

        // Case insensitive
        assert_eq!(ColumnId::parse("b").unwrap(), ColumnId(1));
        assert_eq!(ColumnId::parse("aa").unwrap(), ColumnId(26));

        assert!(ColumnId::parse("").is_err());
        assert!(ColumnId::parse("XFE").is_err());
        assert!(ColumnId::parse("ZZZZZZZZ").is_err());
    }

    #[test]
    fn test_row_number() {
        assert_eq!(RowId::parse("1").unwrap(), RowId(0));
        assert_eq!(RowId::parse("7").unwrap().to_row_number(), 7);
        assert_eq!(RowId(2).to_string(), "3");

        assert!(RowId::parse("0").is_err());
        assert!(RowId::parse("1048577").is_err());
        assert!(RowId::parse("99999999999").is_err());
    }

    #[test]
    fn test_cell_id_parse() {
        let id = CellId::parse("A3").unwrap();
        assert_eq!(id, CellId::at(2, 0));

        let id = CellId::parse("b7").unwrap();
        assert_eq!(id, CellId::at(6, 1));

        let id: CellId = "AA33".parse().unwrap();
        assert_eq!(id, CellId::at(32, 26));
    }

    #[test]
    fn test_cell_id_parse_errors() {
        assert!(CellId::parse("").is_err());
        assert!(CellId::parse("A").is_err());
        assert!(CellId::parse("3").is_err());
        assert!(CellId::parse("3A").is_err());
        assert!(CellId::parse("A0").is_err());
        assert!(CellId::parse("A3B").is_err());
        assert!(CellId::parse(" A3").is_err());
        assert!(CellId::parse("$A$3").is_err());
    }

    #[test]
    fn test_cell_id_display() {
        assert_eq!(CellId::at(0, 0).to_string(), "A1");
        assert_eq!(CellId::at(99, 2).to_string(), "C100");
        assert_eq!(CellId::at(6, 1).to_string(), "B7");
    }

    #[test]
    fn test_cell_id_ordering_is_row_major() {
        let mut ids = vec![
            CellId::parse("B1").unwrap(),
            CellId::parse("A2").unwrap(),
            CellId::parse("A1").unwrap(),
        ];
        ids.sort();
        let text: Vec<String> = ids.iter().map(CellId::to_string).collect();
        assert_eq!(text, vec!["A1", "B1", "A2"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_cell_id_serde() {
        let id = CellId::parse("B7").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"row":6,"column":1}"#);
        assert_eq!(serde_json::from_str::<CellId>(&json).unwrap(), id);
    }

    proptest! {
        #[test]
        fn test_address_round_trip(letters in "[A-Za-z]{1,3}", row in 1u32..=1_048_576) {
            let text = format!("{}{}", letters, row);
            if let Ok(decoded) = CellId::parse(&text) {
                let encoded = decoded.to_string();
                prop_assert_eq!(&encoded, &text.to_uppercase());
                prop_assert_eq!(CellId::parse(&encoded).unwrap(), decoded);
            }
        }
    }
}
