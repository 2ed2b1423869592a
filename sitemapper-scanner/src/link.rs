use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sitemap priority for a page found `depth` hops away from the root.
///
/// Root pages get 1.0, their direct children 0.9, and everything deeper
/// approaches 0.3 from above.
pub fn priority_for_depth(depth: usize) -> f64 {
    match depth {
        0 => 1.0,
        1 => 0.9,
        d => 0.3 + 1.0 / (1.0 + d as f64),
    }
}

/// One discovered page. `url` is canonical and unique across a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    pub depth: usize,
    pub priority: f64,
    pub last_modified: Option<DateTime<Utc>>,
}

impl LinkRecord {
    pub fn new(url: String, depth: usize) -> Self {
        Self {
            url,
            depth,
            priority: priority_for_depth(depth),
            last_modified: None,
        }
    }

    /// Consumes the record, attaching the timestamp resolved at promotion.
    pub fn with_last_modified(mut self, last_modified: Option<DateTime<Utc>>) -> Self {
        self.last_modified = last_modified;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_places(p: f64) -> String {
        format!("{:.2}", p)
    }

    #[test]
    fn test_priority_known_depths() {
        assert_eq!(two_places(priority_for_depth(0)), "1.00");
        assert_eq!(two_places(priority_for_depth(1)), "0.90");
        assert_eq!(two_places(priority_for_depth(2)), "0.63");
        assert_eq!(two_places(priority_for_depth(3)), "0.55");
        assert_eq!(two_places(priority_for_depth(4)), "0.50");
    }

    #[test]
    fn test_priority_decreases_towards_floor() {
        let mut previous = priority_for_depth(0);
        for depth in 1..50 {
            let current = priority_for_depth(depth);
            assert!(current < previous, "priority must drop at depth {}", depth);
            assert!(current > 0.3);
            previous = current;
        }
    }

    #[test]
    fn test_new_record_has_no_last_modified() {
        let record = LinkRecord::new("http://example.com/about".to_string(), 1);
        assert_eq!(record.depth, 1);
        assert_eq!(record.priority, 0.9);
        assert!(record.last_modified.is_none());
    }

    #[test]
    fn test_record_json_shape() {
        use chrono::TimeZone;
        let stamp = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap();
        let record =
            LinkRecord::new("http://example.com".to_string(), 0).with_last_modified(Some(stamp));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["url"], "http://example.com");
        assert_eq!(json["depth"], 0);
        assert_eq!(json["priority"], 1.0);
        assert_eq!(json["last_modified"], "2015-10-21T07:28:00Z");
    }
}
