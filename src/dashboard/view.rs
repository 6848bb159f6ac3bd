//! Views: the filtered subset of a master record set currently shown to the user.
use crate::dashboard::records::SectionRecord;
use crate::dashboard::session::MasterRecord;
use crate::dashboard::session::RecordId;

/// Header of the editable annotation column appended to every view.
pub const ANNOTATION_COLUMN: &str = "NOTES";

/// Borrowed rows of a master set, in display order.
#[derive(Clone, Debug)]
pub struct View<'a, R> {
    rows: Vec<&'a MasterRecord<R>>,
}

impl<'a, R: SectionRecord> View<'a, R> {
    pub(crate) fn new(rows: Vec<&'a MasterRecord<R>>) -> Self {
        View { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[&'a MasterRecord<R>] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.rows.iter().map(|row| &row.record)
    }

    /// Display headers followed by the annotation column.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = R::COLUMNS.to_vec();
        columns.push(ANNOTATION_COLUMN);
        columns
    }

    /// Display strings of every row, annotation last.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut values = row.record.display_row();
                values.push(row.annotation().to_owned());
                values
            })
            .collect()
    }

    /// Captures which record sits at each position, for resolving later edits.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            ids: self.rows.iter().map(|row| row.id).collect(),
        }
    }
}

/// Position to stable identifier mapping of a displayed view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    ids: Vec<RecordId>,
}

impl ViewSnapshot {
    pub fn new(ids: Vec<RecordId>) -> Self {
        ViewSnapshot { ids }
    }

    pub fn id_at(&self, position: usize) -> Option<RecordId> {
        self.ids.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
