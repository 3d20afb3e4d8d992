//! Serde adapters for `Arc`-wrapped collections.
//!
//! `Arc<T>` already implements `Serialize`/`Deserialize` when `T` does, but the default
//! impl round-trips through `Arc::new` on deserialize, losing any sharing the caller had.
//! These helpers keep the wire format identical to `Vec<T>` while documenting that the
//! in-memory structure is really `Vec<Arc<T>>`.

pub mod serde_vec_arc {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::sync::Arc;

    pub fn serialize<S, T>(items: &[Arc<T>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        items
            .iter()
            .map(|item| item.as_ref())
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<Arc<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Vec::<T>::deserialize(deserializer)?.into_iter().map(Arc::new).collect())
    }
}
