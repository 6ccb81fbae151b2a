// NetBox journal endpoints

use tracing::debug;

use crate::error::Error;
use crate::netbox::client::NetboxClient;
use crate::netbox::models::{JournalEntryWrite, JournalKind, ObjectType};

impl NetboxClient {
    /// Attach a journal entry to an object.
    ///
    /// `POST /api/extras/journal-entries/`
    pub async fn add_journal_entry(
        &self,
        object_type: ObjectType,
        object_id: i64,
        kind: JournalKind,
        comments: impl Into<String>,
    ) -> Result<(), Error> {
        let url = self.api_url("extras/journal-entries/")?;
        debug!(object_type = object_type.as_str(), object_id, ?kind, "adding journal entry");
        let body = JournalEntryWrite {
            assigned_object_type: object_type.as_str().to_owned(),
            assigned_object_id: object_id,
            kind,
            comments: comments.into(),
        };
        let _: serde_json::Value = self.post(url, &body).await?;
        Ok(())
    }
}
