const PREFIX: &str = "objectview:view";

/// Storage key for the view-type preference of a list.
///
/// Without `view_id` the key is scoped to the object. Components are
/// escaped, so `(obj, Some(id))` keys never collide with each other or with
/// any object-scoped key.
pub fn view_preference_key(object_name: &str, view_id: Option<&str>) -> String {
    let mut key = format!("{}:{}", PREFIX, escape(object_name));
    if let Some(id) = view_id {
        key.push(':');
        key.push_str(&escape(id));
    }
    key
}

fn escape(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for c in component.chars() {
        if c == '\\' || c == ':' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
