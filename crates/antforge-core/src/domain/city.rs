//! City identifiers.

use std::fmt;

/// A city in a TSP instance.
///
/// The engine only ever uses the index; the label exists for display.
///
/// # Example
///
/// ```
/// use antforge_core::City;
///
/// let cities = City::labelled(3);
/// assert_eq!(cities[0].label(), "A");
/// assert_eq!(cities[2].index(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    index: usize,
    label: String,
}

impl City {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }

    /// Creates `count` cities labelled `A`, `B`, `C`, ...
    ///
    /// Labels continue spreadsheet-style (`AA`, `AB`, ...) after `Z`.
    pub fn labelled(count: usize) -> Vec<City> {
        (0..count).map(|i| City::new(i, Self::label_for(i))).collect()
    }

    /// Returns the alphabetic label for a city index.
    pub fn label_for(index: usize) -> String {
        let mut n = index + 1;
        let mut bytes = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            bytes.push(b'A' + rem as u8);
            n = (n - 1) / 26;
        }
        bytes.reverse();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
