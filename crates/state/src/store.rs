//! The in-memory service store.
//!
//! One owned object holds every record the coordinator works with. Its
//! lifecycle is explicit: [`ServiceStore::new`] starts empty,
//! [`ServiceStore::seed`] loads the demo roster, mutations go through
//! `&mut self`, and [`ServiceStore::reset`] returns to the empty state.
//! Nothing here survives the process.

use std::collections::{BTreeMap, HashSet};

use nsshub_engine::{Fingerprint, IssuePlan, Volunteer};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::debug;

const NORMAL_URGENCY: u8 = 1;
const DISASTER_URGENCY: u8 = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("activity not found: {0}")]
    ActivityNotFound(u64),
    #[error("volunteer not found: {0}")]
    VolunteerNotFound(u64),
}

/// A registered volunteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerRecord {
    pub id: u64,
    pub name: String,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub available: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

impl Volunteer for VolunteerRecord {
    fn skills(&self) -> &[String] {
        &self.skills
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// Input for registering a volunteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVolunteer {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl NewVolunteer {
    pub fn new<I, S>(name: impl Into<String>, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            skills: skills.into_iter().map(Into::into).collect(),
            location: None,
            available: true,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// Where an activity is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    Created,
    Assigned,
    ProofSubmitted,
    Verified,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Created => "CREATED",
            Self::Assigned => "ASSIGNED",
            Self::ProofSubmitted => "PROOF_SUBMITTED",
            Self::Verified => "VERIFIED",
        };
        f.write_str(label)
    }
}

/// A planned piece of service work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub skills_needed: Vec<String>,
    pub location: Option<String>,
    pub required_count: u32,
    pub estimated_hours: u32,
    pub status: ActivityStatus,
    pub assigned_volunteers: Vec<u64>,
    pub urgency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_fingerprint: Option<Fingerprint>,
}

/// Input for creating an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActivity {
    pub title: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub skills_needed: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub required_count: u32,
    #[serde(default)]
    pub estimated_hours: u32,
}

impl NewActivity {
    /// Activity input carrying a plan's type, hours, headcount, and skills.
    pub fn from_plan(
        title: impl Into<String>,
        location: Option<String>,
        plan: &IssuePlan,
    ) -> Self {
        Self {
            title: title.into(),
            activity_type: plan.activity_type.clone(),
            skills_needed: plan.skills.clone(),
            location,
            required_count: plan.count,
            estimated_hours: plan.est_hours,
        }
    }
}

/// Aggregate counters for dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub volunteers_count: usize,
    pub activities_created: usize,
    pub activities_verified: usize,
    pub total_hours: u64,
    pub proofs_rejected: u64,
}

/// All coordinator records, owned in one place.
#[derive(Debug, Clone)]
pub struct ServiceStore {
    volunteers: Vec<VolunteerRecord>,
    activities: Vec<ActivityRecord>,
    proof_fingerprints: HashSet<Fingerprint>,
    service_hours: BTreeMap<u64, u64>,
    complaints: Vec<String>,
    disaster_mode: bool,
    proofs_rejected: u64,
    next_volunteer_id: u64,
    next_activity_id: u64,
}

impl Default for ServiceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            volunteers: Vec::new(),
            activities: Vec::new(),
            proof_fingerprints: HashSet::new(),
            service_hours: BTreeMap::new(),
            complaints: Vec::new(),
            disaster_mode: false,
            proofs_rejected: 0,
            next_volunteer_id: 1,
            next_activity_id: 1,
        }
    }

    /// A store pre-loaded with the demo roster.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.seed();
        store
    }

    /// Drop every record and restart id counters.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("Service store reset");
    }

    /// Add the demo volunteers and activities.
    pub fn seed(&mut self) {
        self.add_volunteer(
            NewVolunteer::new("Arjun Kumar", ["medical", "management"]).at("North Campus"),
        );
        self.add_volunteer(
            NewVolunteer::new("Sneha Reddy", ["teaching", "art"]).at("South Campus"),
        );
        self.add_volunteer(
            NewVolunteer::new("Raj Mulligan", ["physical_labor", "logistics"]).at("Main Block"),
        );

        self.add_activity(NewActivity {
            title: "Health Camp Pre-Check".into(),
            activity_type: "medical".into(),
            skills_needed: vec!["medical".into()],
            location: Some("City Centre".into()),
            required_count: 2,
            estimated_hours: 5,
        });
        self.add_activity(NewActivity {
            title: "Campus Cleanup".into(),
            activity_type: "clean-up".into(),
            skills_needed: vec!["physical_labor".into()],
            location: Some("Hostel Area".into()),
            required_count: 10,
            estimated_hours: 3,
        });
    }

    pub fn add_volunteer(&mut self, new: NewVolunteer) -> VolunteerRecord {
        let record = VolunteerRecord {
            id: self.next_volunteer_id,
            name: new.name,
            skills: new.skills,
            location: new.location,
            available: new.available,
            joined_at: OffsetDateTime::now_utc(),
        };
        self.next_volunteer_id += 1;
        self.service_hours.insert(record.id, 0);
        self.volunteers.push(record.clone());
        debug!(id = record.id, name = %record.name, "Registered volunteer");
        record
    }

    pub fn volunteers(&self) -> &[VolunteerRecord] {
        &self.volunteers
    }

    pub fn volunteer(&self, id: u64) -> Option<&VolunteerRecord> {
        self.volunteers.iter().find(|v| v.id == id)
    }

    /// Flip a volunteer's availability.
    pub fn set_available(&mut self, id: u64, available: bool) -> Result<(), StoreError> {
        let volunteer = self
            .volunteers
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(StoreError::VolunteerNotFound(id))?;
        volunteer.available = available;
        Ok(())
    }

    /// Create an activity. In disaster mode it is marked urgent and the list
    /// is re-ordered most urgent first.
    pub fn add_activity(&mut self, new: NewActivity) -> ActivityRecord {
        let record = ActivityRecord {
            id: self.next_activity_id,
            title: new.title,
            activity_type: new.activity_type,
            skills_needed: new.skills_needed,
            location: new.location,
            required_count: new.required_count,
            estimated_hours: new.estimated_hours,
            status: ActivityStatus::Created,
            assigned_volunteers: Vec::new(),
            urgency: if self.disaster_mode {
                DISASTER_URGENCY
            } else {
                NORMAL_URGENCY
            },
            proof_fingerprint: None,
        };
        self.next_activity_id += 1;
        self.activities.push(record.clone());

        if self.disaster_mode {
            // stable: equal urgency keeps creation order
            self.activities.sort_by(|a, b| b.urgency.cmp(&a.urgency));
        }
        debug!(
            id = record.id,
            title = %record.title,
            urgency = record.urgency,
            "Created activity"
        );
        record
    }

    pub fn activities(&self) -> &[ActivityRecord] {
        &self.activities
    }

    pub fn activity(&self, id: u64) -> Result<&ActivityRecord, StoreError> {
        self.activities
            .iter()
            .find(|a| a.id == id)
            .ok_or(StoreError::ActivityNotFound(id))
    }

    fn activity_mut(&mut self, id: u64) -> Result<&mut ActivityRecord, StoreError> {
        self.activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::ActivityNotFound(id))
    }

    /// Replace an activity's assignment and mark it assigned.
    pub fn assign(
        &mut self,
        activity_id: u64,
        volunteer_ids: &[u64],
    ) -> Result<&ActivityRecord, StoreError> {
        if let Some(missing) = volunteer_ids.iter().find(|id| self.volunteer(**id).is_none()) {
            return Err(StoreError::VolunteerNotFound(*missing));
        }
        let activity = self.activity_mut(activity_id)?;
        activity.assigned_volunteers = volunteer_ids.to_vec();
        activity.status = ActivityStatus::Assigned;
        Ok(&*activity)
    }

    /// Fingerprints of every accepted proof.
    pub fn proof_fingerprints(&self) -> &HashSet<Fingerprint> {
        &self.proof_fingerprints
    }

    /// Record an accepted proof.
    ///
    /// The fingerprint is kept even when the activity id is unknown, so the
    /// same photo cannot be reused elsewhere.
    pub fn record_proof(
        &mut self,
        activity_id: u64,
        fingerprint: Fingerprint,
    ) -> Option<&ActivityRecord> {
        self.proof_fingerprints.insert(fingerprint.clone());
        match self.activity_mut(activity_id) {
            Ok(activity) => {
                activity.status = ActivityStatus::ProofSubmitted;
                activity.proof_fingerprint = Some(fingerprint);
                Some(&*activity)
            }
            Err(_) => {
                debug!(activity_id, "Proof recorded for unknown activity");
                None
            }
        }
    }

    /// Treat previously accepted fingerprints as known, e.g. from a ledger.
    pub fn import_fingerprints<I>(&mut self, fingerprints: I)
    where
        I: IntoIterator<Item = Fingerprint>,
    {
        let before = self.proof_fingerprints.len();
        self.proof_fingerprints.extend(fingerprints);
        debug!(
            imported = self.proof_fingerprints.len() - before,
            "Imported proof fingerprints"
        );
    }

    pub fn record_rejected_proof(&mut self) {
        self.proofs_rejected += 1;
    }

    /// Approve or send back a submitted activity.
    ///
    /// Approval grants the estimated hours to every assigned volunteer;
    /// rejection returns the activity to `ASSIGNED` so proof can be retried.
    pub fn review_activity(
        &mut self,
        activity_id: u64,
        approve: bool,
    ) -> Result<&ActivityRecord, StoreError> {
        let index = self
            .activities
            .iter()
            .position(|a| a.id == activity_id)
            .ok_or(StoreError::ActivityNotFound(activity_id))?;

        if approve {
            let hours = u64::from(self.activities[index].estimated_hours);
            for volunteer_id in &self.activities[index].assigned_volunteers {
                if let Some(total) = self.service_hours.get_mut(volunteer_id) {
                    *total += hours;
                }
            }
            self.activities[index].status = ActivityStatus::Verified;
        } else {
            self.activities[index].status = ActivityStatus::Assigned;
        }
        Ok(&self.activities[index])
    }

    /// Hours credited to a volunteer, if registered.
    pub fn service_hours(&self, volunteer_id: u64) -> Option<u64> {
        self.service_hours.get(&volunteer_id).copied()
    }

    pub fn set_disaster_mode(&mut self, active: bool) {
        self.disaster_mode = active;
    }

    pub fn disaster_mode(&self) -> bool {
        self.disaster_mode
    }

    pub fn submit_complaint(&mut self, text: impl Into<String>) {
        self.complaints.push(text.into());
    }

    pub fn complaints(&self) -> &[String] {
        &self.complaints
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            volunteers_count: self.volunteers.len(),
            activities_created: self.activities.len(),
            activities_verified: self
                .activities
                .iter()
                .filter(|a| a.status == ActivityStatus::Verified)
                .count(),
            total_hours: self.service_hours.values().sum(),
            proofs_rejected: self.proofs_rejected,
        }
    }
}
