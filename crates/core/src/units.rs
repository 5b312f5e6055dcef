// Display units for page dimensions
// Templates always store points; units only affect what the user sees.

/// A display unit: short label plus how many points make one unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitEntry {
    pub name: &'static str,
    pub scale: f64,
}

/// Units offered to the user, in selection order. The settings store keeps
/// an index into this list.
pub static STANDARD_UNITS: [UnitEntry; 4] = [
    UnitEntry { name: "cm", scale: 72.0 / 2.54 },
    UnitEntry { name: "in", scale: 72.0 },
    UnitEntry { name: "mm", scale: 72.0 / 25.4 },
    UnitEntry { name: "pt", scale: 1.0 },
];

/// Ordered, fixed list of units
#[derive(Debug, Clone, Copy)]
pub struct UnitTable<'a> {
    entries: &'a [UnitEntry],
}

impl UnitTable<'static> {
    pub fn standard() -> Self {
        Self { entries: &STANDARD_UNITS }
    }
}

impl Default for UnitTable<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> UnitTable<'a> {
    pub const fn new(entries: &'a [UnitEntry]) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&UnitEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &'a [UnitEntry] {
        self.entries
    }

    /// Format a length (points) in unit `index`, e.g. `"21.00cm"`.
    ///
    /// # Panics
    ///
    /// If `index` is not a valid position in the table. Callers own the index.
    pub fn format(&self, length: f64, index: usize) -> String {
        match self.try_format(length, index) {
            Some(s) => s,
            None => panic!(
                "unit index {index} out of range for table of {} units",
                self.entries.len()
            ),
        }
    }

    pub fn try_format(&self, length: f64, index: usize) -> Option<String> {
        self.get(index)
            .map(|unit| format!("{:.2}{}", length / unit.scale, unit.name))
    }

    /// Page size label, e.g. `"21.00cm x 29.70cm"`.
    ///
    /// # Panics
    ///
    /// Same as [`UnitTable::format`].
    pub fn format_size(&self, width: f64, height: f64, index: usize) -> String {
        format!("{} x {}", self.format(width, index), self.format(height, index))
    }
}

/// Format with the standard table.
pub fn format(length: f64, index: usize) -> String {
    UnitTable::standard().format(length, index)
}
