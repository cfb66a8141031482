//! Resolution of the page elements a client needs, done once at startup.
//! Every missing element is reported together instead of failing one at a time.

use std::collections::BTreeMap;

use crate::config::{BOOTSTRAP_ELEMENT_ID, ROOT_ELEMENT_ID};
use crate::error::FormError;

/// Elements every page must provide
pub const REQUIRED_ELEMENTS: [&str; 2] = [BOOTSTRAP_ELEMENT_ID, ROOT_ELEMENT_ID];

#[derive(Debug)]
pub struct ResolvedElements<E> {
    found: BTreeMap<&'static str, E>,
}

impl<E> ResolvedElements<E> {
    pub fn get(&self, id: &str) -> Option<&E> {
        self.found.get(id)
    }

    pub fn take(&mut self, id: &str) -> Option<E> {
        self.found.remove(id)
    }
}

/// Looks up each id; fails with the full list of missing ids
pub fn resolve_elements<E, F>(ids: &[&'static str], mut lookup: F) -> Result<ResolvedElements<E>, FormError>
where
    F: FnMut(&str) -> Option<E>,
{
    let mut found = BTreeMap::new();
    let mut missing = Vec::new();

    for id in ids {
        match lookup(*id) {
            Some(element) => {
                found.insert(*id, element);
            }
            None => missing.push(id.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(ResolvedElements { found })
    } else {
        Err(FormError::MissingElements(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_present() {
        let mut resolved =
            resolve_elements(&REQUIRED_ELEMENTS, |id| Some(format!("<{}>", id))).unwrap();
        assert_eq!(resolved.get("asso7-root").map(String::as_str), Some("<asso7-root>"));
        assert_eq!(resolved.take("asso7-bootstrap").as_deref(), Some("<asso7-bootstrap>"));
        assert!(resolved.get("asso7-bootstrap").is_none());
    }

    #[test]
    fn test_missing_elements_are_aggregated() {
        let err = resolve_elements::<(), _>(&["a", "b", "c"], |id| (id == "b").then_some(())).unwrap_err();
        assert_eq!(err, FormError::MissingElements(vec!["a".to_string(), "c".to_string()]));
        assert_eq!(err.to_string(), "Missing page elements: a, c");
    }
}
