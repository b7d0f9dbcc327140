use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Bounded cache of destination city ids keyed by `city-province`.
///
/// Entries expire after `ttl`. When the cache is full the entry with the
/// oldest insertion time is evicted.
pub struct CityCache {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl CityCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        CityCache {
            ttl,
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn key(city: &str, province: &str) -> String {
        format!(
            "{}-{}",
            city.trim().to_lowercase(),
            province.trim().to_lowercase()
        )
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: String, city_id: String) {
        self.insert_at(key, city_id, Instant::now());
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some((id, stored)) if now.duration_since(*stored) < self.ttl => Some(id.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert_at(&self, key: String, city_id: String, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, (_, stored)| now.duration_since(*stored) < ttl);

            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, (_, stored))| *stored)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(key, (city_id, now));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
