use crate::storage::{KeyValueStore, USER_ID_KEY};
use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 9;

/// `user_` followed by nine random base-36 characters.
pub fn generate_user_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("user_{}", suffix)
}

/// Returns the stored pseudo-user id, creating and storing one on first use.
///
/// Storage failures never stop start-up: the caller gets a fresh id that simply
/// won't survive a restart.
pub fn load_or_create_user_id(store: &dyn KeyValueStore) -> String {
    match store.get(USER_ID_KEY) {
        Ok(Some(id)) if !id.trim().is_empty() => return id.trim().to_string(),
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("Could not read user id, using a temporary one: {}", e);
            return generate_user_id(&mut rand::thread_rng());
        }
    }

    let id = generate_user_id(&mut rand::thread_rng());
    if let Err(e) = store.set(USER_ID_KEY, &id) {
        tracing::error!("Failed to save user id: {}", e);
    } else {
        tracing::info!("Created pseudo-user id {}", id);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_id_shape() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let id = generate_user_id(&mut rng);
            let suffix = id.strip_prefix("user_").unwrap();
            assert_eq!(suffix.len(), 9);
            assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_user_id_is_created_once() {
        let store = MemoryStore::new();
        let first = load_or_create_user_id(&store);
        let second = load_or_create_user_id(&store);
        assert_eq!(first, second);
        assert_eq!(store.get(USER_ID_KEY).unwrap().as_deref(), Some(first.as_str()));
    }

    #[test]
    fn test_blank_stored_id_is_replaced() {
        let store = MemoryStore::new();
        store.set(USER_ID_KEY, "   ").unwrap();
        let id = load_or_create_user_id(&store);
        assert!(id.starts_with("user_"));
    }
}
