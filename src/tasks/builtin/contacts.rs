//! Contact sorting

use crate::error::{AgentError, AgentResult};
use crate::tasks::{TaskContext, TaskHandler};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const INPUT: &str = "contacts.json";
const OUTPUT: &str = "contacts-sorted.json";

/// One contact record; fields beyond the sort keys pass through untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Stable, case-insensitive sort of `contacts.json` by last then first name
pub struct SortContactsTask;

impl SortContactsTask {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SortContactsTask {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort key is `(last_name.lower(), first_name.lower())`; the stable sort
/// preserves original order on ties
fn sort_contacts(contacts: &mut [Contact]) {
    contacts.sort_by_key(|c| (c.last_name.to_lowercase(), c.first_name.to_lowercase()));
}

#[async_trait]
impl TaskHandler for SortContactsTask {
    fn name(&self) -> &str {
        "sort_contacts"
    }

    async fn execute(&self, ctx: &TaskContext<'_>) -> AgentResult<String> {
        let content = ctx.workspace.read_to_string(INPUT)?;

        let mut contacts: Vec<Contact> = serde_json::from_str(&content)
            .map_err(|e| AgentError::invalid_format(format!("malformed {INPUT}: {e}")))?;

        sort_contacts(&mut contacts);

        let sorted = serde_json::to_string_pretty(&contacts)
            .map_err(|e| AgentError::internal(format!("failed to serialize contacts: {e}")))?;
        ctx.workspace.write_atomic(OUTPUT, &sorted)?;

        Ok(format!(
            "Sorted {} contacts from {INPUT} into {OUTPUT}.",
            contacts.len()
        ))
    }
}
