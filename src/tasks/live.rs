use super::codec::ParsedBuffer;
use super::state::EditCommand;

pub const INVALID_BUFFER_WARNING: &str = "Tasks contain invalid JSON, fix them to see the live list.";

/// One row of the live list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveEntry {
    /// Index of the record in the buffer.
    pub position: usize,
    pub id: String,
    pub title: String,
}

impl LiveEntry {
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.title)
    }

    /// Remove this entry's id from the buffer, without confirmation.
    pub fn remove_command(&self) -> EditCommand {
        EditCommand::Remove(self.id.clone())
    }

    pub const fn edit_command(&self) -> EditCommand {
        EditCommand::LoadIntoForm(self.position)
    }
}

/// Read-only projection of the buffer, newest record first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveList {
    /// The buffer does not parse. Nothing else is shown.
    Warning(String),
    Entries(Vec<LiveEntry>),
}

impl Default for LiveList {
    fn default() -> Self {
        Self::Entries(Vec::new())
    }
}

impl LiveList {
    pub fn derive(parsed: &ParsedBuffer) -> Self {
        match parsed {
            ParsedBuffer::Invalid(_) => Self::Warning(INVALID_BUFFER_WARNING.to_string()),
            ParsedBuffer::Empty => Self::Entries(Vec::new()),
            ParsedBuffer::Tasks(tasks) => Self::Entries(
                tasks
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(position, task)| LiveEntry {
                        position,
                        id: task.id.clone(),
                        title: task.title.clone(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn entries(&self) -> &[LiveEntry] {
        match self {
            Self::Warning(_) => &[],
            Self::Entries(entries) => entries,
        }
    }

    /// Number of rows shown, counting the warning as one.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Warning(_) => 1,
            Self::Entries(entries) => entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::codec::read_tasks;

    #[test]
    fn test_entries_are_newest_first_with_buffer_positions() {
        let parsed = read_tasks(r#"[{"id":"a","title":"A"},{"id":"b","title":"B"},{"id":"c","title":"C"}]"#);
        let list = LiveList::derive(&parsed);
        let rows: Vec<_> = list
            .entries()
            .iter()
            .map(|e| (e.position, e.id.as_str()))
            .collect();
        assert_eq!(rows, vec![(2, "c"), (1, "b"), (0, "a")]);
        assert_eq!(list.entries()[0].label(), "c - C");
    }

    #[test]
    fn test_invalid_buffer_shows_single_warning() {
        let list = LiveList::derive(&read_tasks("{not json"));
        assert!(matches!(list, LiveList::Warning(_)));
        assert_eq!(list.row_count(), 1);
        assert!(list.entries().is_empty());
    }

    #[test]
    fn test_mistyped_hours_still_lists_entries() {
        let list = LiveList::derive(&read_tasks(r#"[{"id":"a","title":"A","estimated_hours":null}]"#));
        assert_eq!(list.row_count(), 1);
        assert_eq!(list.entries()[0].label(), "a - A");
    }

    #[test]
    fn test_blank_buffer_has_no_rows() {
        let list = LiveList::derive(&read_tasks(""));
        assert_eq!(list.row_count(), 0);
    }

    #[test]
    fn test_entry_actions() {
        let entry = LiveEntry {
            position: 4,
            id: "t9".to_string(),
            title: "T".to_string(),
        };
        assert_eq!(entry.remove_command(), EditCommand::Remove("t9".to_string()));
        assert_eq!(entry.edit_command(), EditCommand::LoadIntoForm(4));
    }
}
