use serde_json::{json, Value};

pub fn log_info(component: &str, event: &str, details: Value) {
    eprintln!("{}", log_record(component, "info", event, details));
}

pub fn log_error(component: &str, event: &str, details: Value) {
    eprintln!("{}", log_record(component, "error", event, details));
}

fn log_record(component: &str, level: &str, event: &str, details: Value) -> Value {
    json!({
        "component": component,
        "level": level,
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_carries_event_metadata() {
        let record = log_record("items", "error", "get_item_failed", json!({"id": "a"}));

        assert_eq!(record["component"], "items");
        assert_eq!(record["level"], "error");
        assert_eq!(record["event"], "get_item_failed");
        assert_eq!(record["details"]["id"], "a");
        assert!(record["timestamp"].as_str().is_some());
    }
}
