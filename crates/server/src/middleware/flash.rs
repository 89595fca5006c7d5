//! One-shot flash messages kept in the session.

use tower_sessions::Session;

use crate::models::{FlashLevel, FlashMessage, session_keys};

/// Queue a message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn push_flash(
    session: &Session,
    level: FlashLevel,
    text: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut messages: Vec<FlashMessage> = session
        .get(session_keys::FLASH)
        .await?
        .unwrap_or_default();
    messages.push(FlashMessage {
        level,
        text: text.into(),
    });
    session.insert(session_keys::FLASH, messages).await
}

/// Remove and return all pending messages.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn take_flash(
    session: &Session,
) -> Result<Vec<FlashMessage>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<FlashMessage>>(session_keys::FLASH)
        .await?
        .unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flash_is_consumed_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        push_flash(&session, FlashLevel::Success, "saved").await.unwrap();
        push_flash(&session, FlashLevel::Error, "oops").await.unwrap();

        let messages = take_flash(&session).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "saved");
        assert_eq!(messages[1].level, FlashLevel::Error);

        assert!(take_flash(&session).await.unwrap().is_empty());
    }
}
