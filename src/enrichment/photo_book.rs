use futures::{stream, StreamExt};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::info;

use super::resolver::{PhotoLookup, PhotoSource, SubjectKind};

/// One name the resolution phase should look up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoRequest {
    pub kind: SubjectKind,
    pub name: String,
}

impl PhotoRequest {
    pub fn team(name: impl Into<String>) -> Self {
        Self { kind: SubjectKind::Team, name: name.into() }
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self { kind: SubjectKind::Player, name: name.into() }
    }
}

/// What the insert phase knows about an entity's photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    NotAttempted,
    Resolved(PhotoLookup),
}

impl Enrichment {
    pub fn photo_url(&self) -> Option<&str> {
        match self {
            Enrichment::Resolved(lookup) => lookup.url(),
            Enrichment::NotAttempted => None,
        }
    }
}

impl fmt::Display for Enrichment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enrichment::NotAttempted => f.write_str("not attempted"),
            Enrichment::Resolved(lookup) => write!(f, "{lookup}"),
        }
    }
}

/// (kind, name) -> lookup, produced by the resolution phase and read by the
/// insert phase.
#[derive(Debug, Clone, Default)]
pub struct PhotoBook {
    entries: HashMap<(SubjectKind, String), PhotoLookup>,
}

impl PhotoBook {
    pub fn insert(&mut self, kind: SubjectKind, name: impl Into<String>, lookup: PhotoLookup) {
        self.entries.insert((kind, name.into()), lookup);
    }

    pub fn enrichment(&self, kind: SubjectKind, name: &str) -> Enrichment {
        match self.entries.get(&(kind, name.to_string())) {
            Some(lookup) => Enrichment::Resolved(lookup.clone()),
            None => Enrichment::NotAttempted,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn found(&self) -> usize {
        self.entries
            .values()
            .filter(|l| matches!(l, PhotoLookup::Found(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .values()
            .filter(|l| matches!(l, PhotoLookup::Failed(_)))
            .count()
    }
}

/// Resolution phase: look up every distinct request with at most
/// `concurrency` lookups in flight.
pub async fn resolve_all(
    source: &dyn PhotoSource,
    requests: Vec<PhotoRequest>,
    concurrency: usize,
) -> PhotoBook {
    let mut seen = HashSet::new();
    let unique: Vec<PhotoRequest> = requests
        .into_iter()
        .filter(|req| seen.insert(req.clone()))
        .collect();
    let total = unique.len();

    let results: Vec<(PhotoRequest, PhotoLookup)> = stream::iter(unique)
        .map(|req| async move {
            let lookup = source.resolve_photo(&req.name, req.kind).await;
            (req, lookup)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut book = PhotoBook::default();
    for (req, lookup) in results {
        book.insert(req.kind, req.name, lookup);
    }
    info!(
        requested = total,
        found = book.found(),
        failed = book.failed(),
        concurrency = concurrency.max(1),
        "photo resolution finished"
    );
    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct TrackingSource {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PhotoSource for TrackingSource {
        async fn resolve_photo(&self, display_name: &str, kind: SubjectKind) -> PhotoLookup {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push(display_name.to_string());
            match (kind, display_name) {
                (_, "Offline") => PhotoLookup::Failed("connection refused".into()),
                (SubjectKind::Team, name) => PhotoLookup::Found(format!("https://img/{name}.png")),
                (SubjectKind::Player, _) => PhotoLookup::NotFound,
            }
        }
    }

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let source = TrackingSource::default();
        let requests = (0..12).map(|i| PhotoRequest::team(format!("Team {i}"))).collect();
        let book = resolve_all(&source, requests, 3).await;

        assert_eq!(book.len(), 12);
        assert_eq!(book.found(), 12);
        let peak = source.peak.load(Ordering::SeqCst);
        assert!(peak <= 3, "peak in-flight lookups was {peak}");
        assert!(peak >= 2, "lookups never overlapped (peak {peak})");
    }

    #[tokio::test]
    async fn duplicate_requests_are_looked_up_once() {
        let source = TrackingSource::default();
        let requests = vec![
            PhotoRequest::player("Andrey Lunev"),
            PhotoRequest::player("Andrey Lunev"),
            PhotoRequest::team("Andrey Lunev"),
        ];
        let book = resolve_all(&source, requests, 1).await;

        assert_eq!(source.calls.lock().unwrap().len(), 2);
        assert_eq!(book.len(), 2);
    }

    #[tokio::test]
    async fn book_distinguishes_not_found_failed_and_not_attempted() {
        let source = TrackingSource::default();
        let requests = vec![
            PhotoRequest::team("Zenit"),
            PhotoRequest::team("Offline"),
            PhotoRequest::player("Malcom"),
        ];
        let book = resolve_all(&source, requests, 2).await;

        assert_eq!(
            book.enrichment(SubjectKind::Team, "Zenit").photo_url(),
            Some("https://img/Zenit.png")
        );
        assert!(matches!(
            book.enrichment(SubjectKind::Team, "Offline"),
            Enrichment::Resolved(PhotoLookup::Failed(_))
        ));
        assert_eq!(
            book.enrichment(SubjectKind::Player, "Malcom"),
            Enrichment::Resolved(PhotoLookup::NotFound)
        );
        assert_eq!(book.enrichment(SubjectKind::Player, "Zenit"), Enrichment::NotAttempted);
        assert_eq!(book.failed(), 1);
    }
}
