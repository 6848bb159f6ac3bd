use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::Table;
use std::collections::BTreeMap;

/// Cells collected from one worksheet while it is being parsed.
pub(crate) struct Sheet {
    /// Sheet name
    pub(crate) name: String,
    /// Non-empty cells in document order
    pub(crate) cells: Vec<Cell>,
    /// Actual data range (determined from cell data)
    pub(crate) row_lower_bound: Option<usize>,
    pub(crate) row_upper_bound: Option<usize>,
    pub(crate) col_lower_bound: Option<usize>,
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            cells: Vec::new(),
            row_lower_bound: None,
            row_upper_bound: None,
            col_lower_bound: None,
            col_upper_bound: None,
        }
    }

    /// Adds a cell to the sheet, updating the data range.
    pub(crate) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        self.cells.push(cell);
    }

    fn update_bound(&mut self, row: usize, col: usize) {
        if self.row_lower_bound.map(|row_lower_bound| row < row_lower_bound).unwrap_or(true) {
            self.row_lower_bound = Some(row);
        }
        if self.row_upper_bound.map(|row_upper_bound| row_upper_bound < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
        if self.col_lower_bound.map(|col_lower_bound| col < col_lower_bound).unwrap_or(true) {
            self.col_lower_bound = Some(col);
        }
        if self.col_upper_bound.map(|col_upper_bound| col_upper_bound < col).unwrap_or(true) {
            self.col_upper_bound = Some(col);
        }
    }

    /// Lays the cells out as a table.
    ///
    /// The first row holding any cell is the header row. Header cells that are missing
    /// are named `Unnamed: <n>` after their position within the used range. Rows below
    /// the header with no cells at all are dropped.
    pub(crate) fn into_table(self) -> Table {
        let (Some(row_lower), Some(_), Some(col_lower), Some(col_upper)) = (
            self.row_lower_bound,
            self.row_upper_bound,
            self.col_lower_bound,
            self.col_upper_bound,
        ) else {
            return Table::new(&self.name, Vec::new(), Vec::new());
        };

        let width = col_upper - col_lower + 1;
        let mut grid: BTreeMap<usize, Vec<Option<Cell>>> = BTreeMap::new();
        for cell in self.cells {
            let col = cell.col - col_lower;
            let row = cell.row;
            grid.entry(row).or_insert_with(|| vec![None; width])[col] = Some(cell);
        }

        let header_row = grid.remove(&row_lower).unwrap_or_else(|| vec![None; width]);
        let headers = header_row
            .into_iter()
            .enumerate()
            .map(|(index, cell)| {
                cell.and_then(|cell| cell.to_text())
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| format!("Unnamed: {index}"))
            })
            .collect();
        let rows = grid.into_values().collect();
        Table::new(&self.name, headers, rows)
    }
}
