//! Session store: the per-session master record sets and their lifecycle.
//!
//! A session is created on the first upload of a file, survives every filter change
//! and annotation edit, and is replaced wholesale when an upload with a different
//! identity arrives.
use crate::config::DashboardConfig;
use crate::dashboard::annotation::sync_annotations;
use crate::dashboard::annotation::EditBatch;
use crate::dashboard::filter::apply_filters;
use crate::dashboard::filter::FilterCriteria;
use crate::dashboard::filter::FilteredView;
use crate::dashboard::loader::load_sections;
use crate::dashboard::normalize::normalize_deliveries;
use crate::dashboard::normalize::normalize_pickups;
use crate::dashboard::records::DeliveryRecord;
use crate::dashboard::records::PickupRecord;
use crate::dashboard::records::SectionRecord;
use crate::dashboard::summary::Overview;
use crate::error::DashboardError;
use crate::spreadsheet::Workbook;
use log::info;
use std::fmt::Display;

/// Stable record identifier, assigned once when the master set is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub usize);

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record of the master set with its identifier and user annotation.
#[derive(Clone, Debug, PartialEq)]
pub struct MasterRecord<R> {
    pub id: RecordId,
    pub record: R,
    annotation: String,
}

impl<R> MasterRecord<R> {
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    pub(crate) fn set_annotation(&mut self, text: String) {
        self.annotation = text;
    }
}

/// The full, unfiltered, annotation-bearing records of one section.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSet<R> {
    records: Vec<MasterRecord<R>>,
}

impl<R: SectionRecord> RecordSet<R> {
    /// Assigns sequential identifiers from zero and empty annotations.
    pub fn new(records: Vec<R>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| MasterRecord {
                id: RecordId(index),
                record,
                annotation: String::new(),
            })
            .collect();
        RecordSet { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MasterRecord<R>] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&MasterRecord<R>> {
        self.records.iter().find(|record| record.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: RecordId) -> Option<&mut MasterRecord<R>> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    /// Recomputes the current view from the master set and `criteria`.
    pub fn view(&self, criteria: &FilterCriteria<R::Status>) -> FilteredView<'_, R> {
        apply_filters(&self.records, criteria)
    }

    /// Writes annotation edits made on a view back into the master set.
    /// Returns how many records were updated.
    pub fn apply_edits(&mut self, batch: &EditBatch) -> usize {
        sync_annotations(self, batch)
    }
}

/// What identifies an upload: a different identity starts a new session.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UploadIdentity {
    pub file_name: String,
    pub size: usize,
}

/// An uploaded workbook file.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Upload { file_name: file_name.to_owned(), bytes }
    }

    pub fn identity(&self) -> UploadIdentity {
        UploadIdentity {
            file_name: self.file_name.to_owned(),
            size: self.bytes.len(),
        }
    }
}

/// The master record sets of one uploaded file.
#[derive(Clone, Debug)]
pub struct Session {
    pub identity: UploadIdentity,
    pub pickups: RecordSet<PickupRecord>,
    pub deliveries: RecordSet<DeliveryRecord>,
}

impl Session {
    /// Builds both master record sets from a parsed workbook.
    pub fn from_workbook(identity: UploadIdentity, workbook: &Workbook, config: &DashboardConfig) -> Result<Self, DashboardError> {
        let sections = load_sections(workbook, config)?;
        let pickups = normalize_pickups(sections.pickups, config)?;
        let deliveries = normalize_deliveries(sections.deliveries, config)?;
        Ok(Session {
            identity,
            pickups: RecordSet::new(pickups),
            deliveries: RecordSet::new(deliveries),
        })
    }

    /// Row and distinct DTM counts of both master sets.
    pub fn overview(&self) -> Overview {
        Overview::new(&self.pickups, &self.deliveries)
    }
}

/// Holds at most one session; owned by the single user interacting with it.
#[derive(Debug, Default)]
pub struct SessionStore {
    config: DashboardConfig,
    current: Option<Session>,
}

impl SessionStore {
    pub fn new(config: DashboardConfig) -> Self {
        SessionStore { config, current: None }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.current.as_mut()
    }

    /// Returns the session for `upload`.
    ///
    /// The same identity returns the existing session untouched, identifiers and
    /// annotations included, without parsing the file again. A new identity discards
    /// the previous session before parsing; if parsing fails no session remains.
    pub fn load(&mut self, upload: &Upload) -> Result<&mut Session, DashboardError> {
        let identity = upload.identity();
        let is_current = self.current.as_ref().is_some_and(|session| session.identity == identity);
        if !is_current {
            if let Some(previous) = self.current.take() {
                info!("Discarding session of '{}' for new upload '{}'", previous.identity.file_name, identity.file_name);
            }
            let workbook = Workbook::from_xlsx(&upload.file_name, upload.bytes.clone())?;
            let session = Session::from_workbook(identity, &workbook, &self.config)?;
            info!(
                "Loaded '{}': {} pickups, {} deliveries",
                session.identity.file_name,
                session.pickups.len(),
                session.deliveries.len()
            );
            self.current = Some(session);
        }
        self.current
            .as_mut()
            .ok_or_else(|| DashboardError::WithContextError("Session not initialised".to_owned()))
    }

    /// Ends the session.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
