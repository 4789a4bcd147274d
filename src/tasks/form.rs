use super::ids::{IdSource, form_id};
use super::record::{TaskRecord, parse_hours, parse_importance};

/// Whether submitting the form appends a record or replaces one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Add,
    Edit(String),
}

/// Form inputs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    Title,
    DueDate,
    EstimatedHours,
    Importance,
    Dependencies,
}

impl FormField {
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Title,
        Self::DueDate,
        Self::EstimatedHours,
        Self::Importance,
        Self::Dependencies,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::DueDate => "due",
            Self::EstimatedHours => "hours",
            Self::Importance => "importance",
            Self::Dependencies => "deps",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Id => Self::Title,
            Self::Title => Self::DueDate,
            Self::DueDate => Self::EstimatedHours,
            Self::EstimatedHours => Self::Importance,
            Self::Importance => Self::Dependencies,
            Self::Dependencies => Self::Id,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Id => Self::Dependencies,
            Self::Title => Self::Id,
            Self::DueDate => Self::Title,
            Self::EstimatedHours => Self::DueDate,
            Self::Importance => Self::EstimatedHours,
            Self::Dependencies => Self::Importance,
        }
    }
}

/// Raw text of the candidate record plus the edit-mode marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub id: String,
    pub title: String,
    pub due_date: String,
    pub estimated_hours: String,
    pub importance: String,
    pub dependencies: String,
    pub mode: EditMode,
}

impl FormState {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Title => &self.title,
            FormField::DueDate => &self.due_date,
            FormField::EstimatedHours => &self.estimated_hours,
            FormField::Importance => &self.importance,
            FormField::Dependencies => &self.dependencies,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Id => &mut self.id,
            FormField::Title => &mut self.title,
            FormField::DueDate => &mut self.due_date,
            FormField::EstimatedHours => &mut self.estimated_hours,
            FormField::Importance => &mut self.importance,
            FormField::Dependencies => &mut self.dependencies,
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            EditMode::Add => None,
            EditMode::Edit(id) => Some(id.as_str()),
        }
    }

    /// Populate every field from `record` and enter edit mode for its id.
    ///
    /// A record with an empty id cannot be targeted, so the form stays in add mode.
    pub fn load(record: &TaskRecord) -> Self {
        let mode = if record.id.is_empty() {
            EditMode::Add
        } else {
            EditMode::Edit(record.id.clone())
        };
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            due_date: record.due_date.clone().unwrap_or_default(),
            estimated_hours: record.estimated_hours.to_string(),
            importance: record.importance.to_string(),
            dependencies: record.dependencies.join(", "),
            mode,
        }
    }

    /// Build a record from the current inputs, applying the defaulting rules.
    pub fn build_record(&self, ids: &dyn IdSource) -> TaskRecord {
        let id = match self.id.trim() {
            "" => form_id(ids),
            id => id.to_string(),
        };
        let title = match self.title.trim() {
            "" => id.clone(),
            title => title.to_string(),
        };
        let due = self.due_date.trim();
        TaskRecord {
            due_date: (!due.is_empty()).then(|| due.to_string()),
            estimated_hours: parse_hours(&self.estimated_hours),
            importance: parse_importance(&self.importance),
            dependencies: split_dependencies(&self.dependencies),
            ..TaskRecord::new(id, title)
        }
    }
}

/// Comma-separated ids, trimmed, with empty tokens dropped. Order and
/// duplicates are kept.
pub fn split_dependencies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
