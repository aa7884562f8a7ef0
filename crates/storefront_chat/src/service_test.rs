// --- File: crates/storefront_chat/src/service_test.rs ---
#[cfg(test)]
mod tests {
    use crate::error::ChatError;
    use crate::service::ChatService;
    use crate::test_store::MemoryStore;
    use futures_util::StreamExt;
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use storefront_common::services::{RealtimeEvent, RealtimeEventKind};

    fn service(store: Arc<MemoryStore>) -> ChatService {
        ChatService::new(store, "chats", 20)
    }

    #[tokio::test]
    async fn test_send_message_trims_and_stores() {
        let store = Arc::new(MemoryStore::new());
        let chat = service(store.clone());

        let message = chat.send_message("general", " Ana ", "  hola  ").await.unwrap();
        assert_eq!(message.text, "hola");
        assert_eq!(message.author, "Ana");

        let stored = store.read(&format!("chats/general/messages/{}", message.id));
        assert_eq!(stored["text"], "hola");
        assert_eq!(stored["timestamp"], message.timestamp);
    }

    #[tokio::test]
    async fn test_send_message_rejects_empty_and_long_text() {
        let chat = service(Arc::new(MemoryStore::new()));
        assert!(matches!(
            chat.send_message("general", "Ana", "   ").await,
            Err(ChatError::InvalidMessage(_))
        ));
        assert!(matches!(
            chat.send_message("general", "Ana", &"x".repeat(21)).await,
            Err(ChatError::InvalidMessage(_))
        ));
        assert!(chat.send_message("general", "Ana", &"ñ".repeat(20)).await.is_ok());
    }

    #[tokio::test]
    async fn test_room_names_are_single_segments() {
        let chat = service(Arc::new(MemoryStore::new()));
        for room in ["", "a/b", "room.1", "$x"] {
            assert!(matches!(
                chat.list_messages(room).await,
                Err(ChatError::InvalidRoom(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_list_messages_sorted_by_timestamp() {
        let store = Arc::new(MemoryStore::new());
        store.set(
            "chats/general/messages",
            json!({
                "b": { "author": "Luis", "text": "segundo", "timestamp": 200 },
                "a": { "author": "Ana", "text": "tercero", "timestamp": 300 },
                "c": { "author": "Eva", "text": "primero", "timestamp": 100 },
                "broken": { "text": 1 }
            }),
        );
        let messages = service(store).list_messages("general").await.unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["primero", "segundo", "tercero"]);
    }

    #[tokio::test]
    async fn test_list_empty_room() {
        let messages = service(Arc::new(MemoryStore::new()))
            .list_messages("empty")
            .await
            .unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_delete_message() {
        let store = Arc::new(MemoryStore::new());
        let chat = service(store.clone());
        let message = chat.send_message("general", "Ana", "hola").await.unwrap();

        chat.delete_message("general", &message.id).await.unwrap();
        assert!(chat.list_messages("general").await.unwrap().is_empty());
        assert!(matches!(
            chat.delete_message("general", &message.id).await,
            Err(ChatError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_store_error() {
        let store = Arc::new(MemoryStore::new());
        store.failing.store(true, Ordering::SeqCst);
        let result = service(store).send_message("general", "Ana", "hola").await;
        assert!(matches!(result, Err(ChatError::Store(_))));
    }

    #[tokio::test]
    async fn test_subscribe_relays_events() {
        let event = RealtimeEvent {
            kind: RealtimeEventKind::Patch,
            path: "/k1".to_string(),
            data: json!({ "text": "hola" }),
        };
        let chat = service(Arc::new(MemoryStore::with_events(vec![event.clone()])));
        let received: Vec<_> = chat.subscribe("general").unwrap().collect().await;
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].as_ref().unwrap(), &event);
    }
}
