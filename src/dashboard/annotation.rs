//! Annotation sync: edits made on a view land on the master record they show.
//!
//! Edits are resolved through the snapshot of the view the user edited, never by
//! position against the master set, whose order differs from any filtered view.
use crate::dashboard::records::SectionRecord;
use crate::dashboard::session::RecordSet;
use crate::dashboard::view::ViewSnapshot;
use log::debug;

/// New annotation text for the row at `position` of the edited view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationEdit {
    pub position: usize,
    pub text: String,
}

impl AnnotationEdit {
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        AnnotationEdit { position, text: text.into() }
    }
}

/// Edits together with the snapshot of the view they were made on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditBatch {
    pub snapshot: ViewSnapshot,
    pub edits: Vec<AnnotationEdit>,
}

impl EditBatch {
    pub fn new(snapshot: ViewSnapshot, edits: Vec<AnnotationEdit>) -> Self {
        EditBatch { snapshot, edits }
    }
}

/// Applies `batch` to `master`; positions past the snapshot are ignored.
/// Returns the number of master records updated.
pub fn sync_annotations<R: SectionRecord>(master: &mut RecordSet<R>, batch: &EditBatch) -> usize {
    let mut updated = 0;
    for edit in &batch.edits {
        let Some(id) = batch.snapshot.id_at(edit.position) else {
            debug!("Ignoring {} edit at position {} beyond view of {} rows", R::SECTION, edit.position, batch.snapshot.len());
            continue;
        };
        match master.get_mut(id) {
            Some(record) => {
                record.set_annotation(edit.text.to_owned());
                updated += 1;
            }
            None => debug!("Ignoring {} edit for unknown record {}", R::SECTION, id),
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::filter::Choice;
    use crate::dashboard::filter::FilterCriteria;
    use crate::dashboard::records::PickupRecord;
    use crate::dashboard::session::RecordId;

    fn pickup(region: &str) -> PickupRecord {
        PickupRecord {
            origin_city: None,
            destination_city: None,
            dtm: None,
            origin_company: None,
            origin_region: Some(region.to_owned()),
            service_level: None,
            order_number: "1".to_owned(),
            pickup_date: None,
            pickup_date_label: String::new(),
        }
    }

    fn master() -> RecordSet<PickupRecord> {
        let regions = ["RJ", "SP", "RJ", "SP", "ES", "SP", "RJ", "ES", "SP"];
        RecordSet::new(regions.iter().map(|region| pickup(region)).collect())
    }

    #[test]
    fn test_edit_follows_stable_identifier_across_views() {
        let mut master = master();
        let criteria = FilterCriteria::default().with_region(Choice::parse("ES"));
        let snapshot = {
            let view = master.view(&FilterCriteria::default()).view;
            assert_eq!(view.snapshot().id_at(3), Some(RecordId(3)));
            master.view(&criteria).view.snapshot()
        };
        // ES rows are ids 4 and 7
        let batch = EditBatch::new(snapshot, vec![AnnotationEdit::new(1, "call the driver")]);
        assert_eq!(master.apply_edits(&batch), 1);

        let narrowed = master.view(&criteria);
        let rows = narrowed.view.display_rows();
        assert_eq!(rows[1].last().map(String::as_str), Some("call the driver"));
        assert_eq!(master.get(RecordId(7)).map(|record| record.annotation()), Some("call the driver"));
        assert_eq!(master.get(RecordId(1)).map(|record| record.annotation()), Some(""));
    }

    #[test]
    fn test_edit_in_one_view_shows_in_another() {
        let mut master = master();
        let by_sp = FilterCriteria::default().with_region(Choice::parse("SP"));
        let snapshot = master.view(&by_sp).view.snapshot();
        // SP rows are ids 1, 3, 5, 8: position 3 holds id 8
        master.apply_edits(&EditBatch::new(snapshot, vec![AnnotationEdit::new(3, "late")]));

        let all = master.view(&FilterCriteria::default());
        assert_eq!(all.view.rows()[8].annotation(), "late");
        assert_eq!(all.view.rows()[3].annotation(), "");
    }

    #[test]
    fn test_out_of_range_edits_are_ignored() {
        let mut master = master();
        let snapshot = master.view(&FilterCriteria::default().with_region(Choice::parse("ES"))).view.snapshot();
        let batch = EditBatch::new(snapshot, vec![AnnotationEdit::new(2, "lost"), AnnotationEdit::new(0, "kept")]);
        assert_eq!(master.apply_edits(&batch), 1);
        assert_eq!(master.get(RecordId(4)).map(|record| record.annotation()), Some("kept"));
        assert!(master.records().iter().all(|record| record.annotation() != "lost"));
    }

    #[test]
    fn test_unknown_identifier_is_ignored() {
        let mut master = master();
        let batch = EditBatch::new(ViewSnapshot::new(vec![RecordId(42)]), vec![AnnotationEdit::new(0, "x")]);
        assert_eq!(master.apply_edits(&batch), 0);
    }
}
