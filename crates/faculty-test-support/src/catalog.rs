//! Test catalog: in-memory subject, preference and instructor collaborators.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use faculty_core::catalog::{PreferenceStatus, Subject, TeachingPreference};
use faculty_core::error::DomainError;
use faculty_core::repository::{InstructorDirectory, PreferenceRepository, SubjectRepository};

/// Builds a subject with placeholder catalog details.
#[must_use]
pub fn sample_subject(id: i64, name: &str, instructor_id: Option<i64>) -> Subject {
    Subject {
        id,
        name: name.to_owned(),
        code: format!("SUB-{id:03}"),
        classroom: "A-101".to_owned(),
        credits: 4,
        instructor_id,
    }
}

/// Builds a stored preference in the given status.
#[must_use]
pub fn sample_preference(
    id: i64,
    instructor_id: i64,
    subject_id: i64,
    status: PreferenceStatus,
) -> TeachingPreference {
    TeachingPreference {
        id: Some(id),
        instructor_id,
        subject_id,
        weekday: "Monday".to_owned(),
        time_slot: "08:00-10:00".to_owned(),
        status,
    }
}

/// An in-memory subject catalog. When built with [`Self::rejecting_writes`],
/// every `assign_instructor` call reports that no row was updated.
#[derive(Debug)]
pub struct InMemorySubjectRepository {
    subjects: Mutex<BTreeMap<i64, Subject>>,
    accept_writes: bool,
}

impl InMemorySubjectRepository {
    /// Create a catalog holding `subjects`.
    #[must_use]
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self {
            subjects: Mutex::new(subjects.into_iter().map(|s| (s.id, s)).collect()),
            accept_writes: true,
        }
    }

    /// Create a catalog whose writes never apply.
    #[must_use]
    pub fn rejecting_writes(subjects: Vec<Subject>) -> Self {
        Self {
            accept_writes: false,
            ..Self::new(subjects)
        }
    }

    /// Returns the current state of a subject.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn subject(&self, subject_id: i64) -> Option<Subject> {
        self.subjects.lock().unwrap().get(&subject_id).cloned()
    }
}

#[async_trait]
impl SubjectRepository for InMemorySubjectRepository {
    async fn find_by_id(&self, subject_id: i64) -> Result<Option<Subject>, DomainError> {
        Ok(self.subject(subject_id))
    }

    async fn assign_instructor(
        &self,
        subject_id: i64,
        instructor_id: Option<i64>,
    ) -> Result<bool, DomainError> {
        if !self.accept_writes {
            return Ok(false);
        }
        let mut subjects = self.subjects.lock().unwrap();
        match subjects.get_mut(&subject_id) {
            Some(subject) => {
                subject.instructor_id = instructor_id;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// An in-memory preference store. When built with [`Self::rejecting_writes`],
/// every `update_status` call reports that no row was updated.
#[derive(Debug)]
pub struct InMemoryPreferenceRepository {
    preferences: Mutex<BTreeMap<i64, TeachingPreference>>,
    accept_writes: bool,
}

impl InMemoryPreferenceRepository {
    /// Create a store holding `preferences`. Entries without an id are
    /// ignored.
    #[must_use]
    pub fn new(preferences: Vec<TeachingPreference>) -> Self {
        Self {
            preferences: Mutex::new(
                preferences
                    .into_iter()
                    .filter_map(|p| p.id.map(|id| (id, p)))
                    .collect(),
            ),
            accept_writes: true,
        }
    }

    /// Create a store whose status updates never apply.
    #[must_use]
    pub fn rejecting_writes(preferences: Vec<TeachingPreference>) -> Self {
        Self {
            accept_writes: false,
            ..Self::new(preferences)
        }
    }

    /// Returns the current state of a preference.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn preference(&self, preference_id: i64) -> Option<TeachingPreference> {
        self.preferences.lock().unwrap().get(&preference_id).cloned()
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn find_by_id(
        &self,
        preference_id: i64,
    ) -> Result<Option<TeachingPreference>, DomainError> {
        Ok(self.preference(preference_id))
    }

    async fn create(
        &self,
        mut preference: TeachingPreference,
    ) -> Result<TeachingPreference, DomainError> {
        let mut preferences = self.preferences.lock().unwrap();
        let id = preferences.keys().next_back().copied().unwrap_or(0) + 1;
        preference.id = Some(id);
        preferences.insert(id, preference.clone());
        Ok(preference)
    }

    async fn update_status(
        &self,
        preference_id: i64,
        status: PreferenceStatus,
    ) -> Result<bool, DomainError> {
        if !self.accept_writes {
            return Ok(false);
        }
        let mut preferences = self.preferences.lock().unwrap();
        match preferences.get_mut(&preference_id) {
            Some(preference) => {
                preference.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// An instructor directory backed by a fixed set of identifiers.
#[derive(Debug, Default)]
pub struct StaticInstructorDirectory(BTreeSet<i64>);

impl StaticInstructorDirectory {
    /// Create a directory containing `instructor_ids`.
    #[must_use]
    pub fn new(instructor_ids: impl IntoIterator<Item = i64>) -> Self {
        Self(instructor_ids.into_iter().collect())
    }
}

#[async_trait]
impl InstructorDirectory for StaticInstructorDirectory {
    async fn instructor_exists(&self, instructor_id: i64) -> Result<bool, DomainError> {
        Ok(self.0.contains(&instructor_id))
    }
}
