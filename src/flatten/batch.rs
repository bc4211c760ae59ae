//! Batch sequencing over a document's path map
//!
//! Endpoints are enumerated lazily in document order and handed out in
//! fixed-size groups, so only one batch of rows has to be alive at a time.

use crate::flatten::types::{is_http_method, Endpoint};
use serde_json::map::Iter as MapIter;
use serde_json::Value;
use std::num::NonZeroUsize;
use tracing::warn;

/// Ordered group of endpoints processed and flushed together
pub type Batch<'a> = Vec<Endpoint<'a>>;

/// Lazy iterator over all recognized operations of a document
pub struct Endpoints<'a> {
    paths: Option<MapIter<'a>>,
    current: Option<(&'a str, MapIter<'a>)>,
}

impl<'a> Endpoints<'a> {
    /// Enumerate the operations under `document.paths`.
    ///
    /// A missing or non-mapping `paths` yields nothing; callers that care
    /// should check the document shape first.
    pub fn new(document: &'a Value) -> Self {
        Endpoints {
            paths: document.get("paths").and_then(Value::as_object).map(|p| p.iter()),
            current: None,
        }
    }
}

impl<'a> Iterator for Endpoints<'a> {
    type Item = Endpoint<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((path, entries)) = self.current.as_mut() {
                for (method, operation) in entries {
                    if is_http_method(method) {
                        return Some(Endpoint {
                            path: *path,
                            method: method.as_str(),
                            operation,
                        });
                    }
                }
                self.current = None;
            }

            let (path, item) = self.paths.as_mut()?.next()?;
            match item.as_object() {
                Some(entries) => self.current = Some((path.as_str(), entries.iter())),
                None => warn!(path = %path, "path item is not a mapping, skipping"),
            }
        }
    }
}

/// Groups endpoints into batches of at most `batch_size`
pub struct EndpointBatches<'a> {
    endpoints: Endpoints<'a>,
    batch_size: NonZeroUsize,
}

impl<'a> EndpointBatches<'a> {
    pub fn new(document: &'a Value, batch_size: NonZeroUsize) -> Self {
        EndpointBatches {
            endpoints: Endpoints::new(document),
            batch_size,
        }
    }
}

impl<'a> Iterator for EndpointBatches<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Batch<'a> = self.endpoints.by_ref().take(self.batch_size.get()).collect();
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn sample_document() -> Value {
        json!({
            "paths": {
                "/pets": {
                    "parameters": [{"name": "shared"}],
                    "get": {"summary": "list"},
                    "post": {"summary": "create"},
                    "x-internal": true
                },
                "/pets/{id}": {
                    "summary": "One pet",
                    "delete": {},
                    "trace": {}
                },
                "/broken": "not a path item",
                "/health": {
                    "head": {},
                    "options": {},
                    "put": {},
                    "patch": {}
                }
            }
        })
    }

    #[test]
    fn test_enumerates_recognized_methods_in_order() {
        let doc = sample_document();
        let found: Vec<(&str, &str)> = Endpoints::new(&doc).map(|e| (e.path, e.method)).collect();

        assert_eq!(
            found,
            vec![
                ("/pets", "get"),
                ("/pets", "post"),
                ("/pets/{id}", "delete"),
                ("/health", "head"),
                ("/health", "options"),
                ("/health", "put"),
                ("/health", "patch"),
            ]
        );
    }

    #[test]
    fn test_batches_of_one() {
        let doc = json!({"paths": {"/a": {"get": {}}, "/b": {"get": {}, "post": {}}}});
        let batches: Vec<Batch> = EndpointBatches::new(&doc, size(1)).collect();

        assert_eq!(batches.len(), 3);
        assert!(batches.iter().all(|b| b.len() == 1));
    }

    #[test]
    fn test_final_partial_batch() {
        let doc = sample_document();
        let sizes: Vec<usize> = EndpointBatches::new(&doc, size(3)).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn test_batch_size_does_not_change_content() {
        let doc = sample_document();
        let flat = |n: usize| -> Vec<(String, String)> {
            EndpointBatches::new(&doc, size(n))
                .flatten()
                .map(|e| (e.path.to_string(), e.method.to_string()))
                .collect()
        };

        assert_eq!(flat(1), flat(100));
        assert_eq!(flat(2), flat(7));
        assert_eq!(flat(100).len(), 7);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let doc = json!({"paths": {"/a": {"get": {}, "post": {}}, "/b": {"get": {}, "post": {}}}});
        let sizes: Vec<usize> = EndpointBatches::new(&doc, size(2)).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn test_no_paths() {
        let doc = json!({"openapi": "3.0.0"});
        assert_eq!(EndpointBatches::new(&doc, size(10)).count(), 0);

        let doc = json!({"paths": {}});
        assert_eq!(EndpointBatches::new(&doc, size(10)).count(), 0);
    }

    #[test]
    fn test_exhausted_iterator_stays_exhausted() {
        let doc = json!({"paths": {"/a": {"get": {}}}});
        let mut batches = EndpointBatches::new(&doc, size(5));
        assert_eq!(batches.next().map(|b| b.len()), Some(1));
        assert!(batches.next().is_none());
        assert!(batches.next().is_none());
    }
}
