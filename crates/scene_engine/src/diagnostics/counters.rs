//! Resource accounting
//!
//! [`Counters`] is a cheap, clonable handle onto one shared tally. Every engine
//! resource acquires a [`ResourceGuard`] when it is created; dropping or
//! releasing the guard records the release. At shutdown the application asks
//! the counters to [`validate`](Counters::validate) that everything acquired
//! was released exactly once, then prints the table.
//!
//! Engine, camera and object releases are kept in a journal so the shutdown
//! order can be printed. Selectors and per-frame selections come and go every
//! frame, so for those only the tally and the position of the latest release
//! are kept.
//!
//! The handle is deliberately `!Send`: the engine is single-threaded.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Kind of resource tracked by the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// The engine instance itself
    Engine,
    /// The scene camera
    Camera,
    /// A placed scene object
    Object,
    /// A transient pick-volume selector
    Selector,
    /// A per-frame selected-object reference
    Selection,
}

impl ResourceKind {
    /// All kinds in display order
    pub const ALL: [Self; 5] = [
        Self::Engine,
        Self::Camera,
        Self::Object,
        Self::Selector,
        Self::Selection,
    ];

    /// Whether releases of this kind go into the release journal
    pub fn is_journaled(self) -> bool {
        matches!(self, Self::Engine | Self::Camera | Self::Object)
    }

    /// Lowercase display name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Camera => "camera",
            Self::Object => "object",
            Self::Selector => "selector",
            Self::Selection => "selection",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acquire/release tally for one resource kind
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Number of acquisitions
    pub acquired: u64,
    /// Number of releases
    pub released: u64,
    /// Highest number simultaneously alive
    pub peak: u64,
    /// Position of the latest release among all releases, starting at 1;
    /// 0 when nothing was released yet
    pub last_release: u64,
}

impl Tally {
    /// Currently alive
    pub fn live(&self) -> u64 {
        self.acquired.saturating_sub(self.released)
    }
}

/// One entry of the release journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    /// Kind of the released resource
    pub kind: ResourceKind,
    /// Label given at acquisition
    pub label: String,
}

#[derive(Debug, Default)]
struct Ledger {
    tallies: BTreeMap<ResourceKind, Tally>,
    releases: Vec<ReleaseRecord>,
    release_count: u64,
    anomalies: Vec<String>,
}

/// Shared diagnostic tally of resource acquisitions and releases
#[derive(Debug, Clone, Default)]
pub struct Counters {
    ledger: Rc<RefCell<Ledger>>,
}

impl Counters {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the acquisition of a resource and return its release guard
    #[must_use = "dropping the guard releases the resource immediately"]
    pub fn acquire(&self, kind: ResourceKind, label: impl Into<String>) -> ResourceGuard {
        let label = label.into();
        {
            let mut ledger = self.ledger.borrow_mut();
            let tally = ledger.tallies.entry(kind).or_default();
            tally.acquired += 1;
            tally.peak = tally.peak.max(tally.live());
        }
        log::trace!("acquired {} '{}'", kind, label);

        ResourceGuard {
            counters: self.clone(),
            kind,
            label,
        }
    }

    fn record_release(&self, kind: ResourceKind, label: &str) {
        let mut guard = self.ledger.borrow_mut();
        let ledger = &mut *guard;
        let tally = ledger.tallies.entry(kind).or_default();
        if tally.live() == 0 {
            let anomaly = format!("{} '{}' released more often than acquired", kind, label);
            log::error!("{}", anomaly);
            ledger.anomalies.push(anomaly);
            return;
        }
        tally.released += 1;
        ledger.release_count += 1;
        tally.last_release = ledger.release_count;
        if kind.is_journaled() {
            ledger.releases.push(ReleaseRecord {
                kind,
                label: label.to_string(),
            });
        }
        log::trace!("released {} '{}'", kind, label);
    }

    /// Tally for one kind
    pub fn tally(&self, kind: ResourceKind) -> Tally {
        self.ledger.borrow().tallies.get(&kind).copied().unwrap_or_default()
    }

    /// Number of currently alive resources of one kind
    pub fn live(&self, kind: ResourceKind) -> u64 {
        self.tally(kind).live()
    }

    /// Journaled releases in the order they happened
    pub fn releases(&self) -> Vec<ReleaseRecord> {
        self.ledger.borrow().releases.clone()
    }

    /// True when every acquired resource was released exactly once
    pub fn validate(&self) -> bool {
        let ledger = self.ledger.borrow();
        ledger.anomalies.is_empty() && ledger.tallies.values().all(|tally| tally.live() == 0)
    }

    /// Tally table; `verbose` appends the release journal and any
    /// accounting anomalies
    pub fn report(&self, verbose: bool) -> Report<'_> {
        Report { counters: self, verbose }
    }

    /// Print the tally table to stdout
    pub fn print(&self, verbose: bool) {
        print!("{}", self.report(verbose));
    }
}

/// Printable view of the counters, see [`Counters::report`]
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    counters: &'a Counters,
    verbose: bool,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ledger = self.counters.ledger.borrow();

        writeln!(f, "{:<10} {:>8} {:>8} {:>5} {:>5}", "resource", "acquired", "released", "live", "peak")?;
        for kind in ResourceKind::ALL {
            let tally = ledger.tallies.get(&kind).copied().unwrap_or_default();
            writeln!(
                f,
                "{:<10} {:>8} {:>8} {:>5} {:>5}",
                kind, tally.acquired, tally.released, tally.live(), tally.peak
            )?;
        }

        if self.verbose {
            writeln!(f, "release order:")?;
            for (index, record) in ledger.releases.iter().enumerate() {
                writeln!(f, "  {:>3}. {} '{}'", index + 1, record.kind, record.label)?;
            }
            for anomaly in &ledger.anomalies {
                writeln!(f, "  anomaly: {}", anomaly)?;
            }
        }

        let leaking = ledger.tallies.values().any(|tally| tally.live() != 0);
        let status = if leaking || !ledger.anomalies.is_empty() { "MISMATCH" } else { "OK" };
        writeln!(f, "status: {}", status)
    }
}

/// Release guard for one tracked resource
///
/// Records the release when dropped or when [`release`](Self::release) is
/// called, whichever happens first.
#[derive(Debug)]
pub struct ResourceGuard {
    counters: Counters,
    kind: ResourceKind,
    label: String,
}

impl ResourceGuard {
    /// Kind of the guarded resource
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Label given at acquisition
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Release now
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        self.counters.record_release(self.kind, &self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_acquire_release_validates() {
        let counters = Counters::new();
        let engine = counters.acquire(ResourceKind::Engine, "engine");
        let camera = counters.acquire(ResourceKind::Camera, "camera");
        assert!(!counters.validate());

        camera.release();
        drop(engine);

        assert!(counters.validate());
        assert_eq!(
            counters.tally(ResourceKind::Camera),
            Tally { acquired: 1, released: 1, peak: 1, last_release: 1 }
        );
        let order: Vec<_> = counters.releases().into_iter().map(|r| r.kind).collect();
        assert_eq!(order, vec![ResourceKind::Camera, ResourceKind::Engine]);
    }

    #[test]
    fn test_leak_is_reported() {
        let counters = Counters::new();
        let leaked = counters.acquire(ResourceKind::Object, "Maja");
        std::mem::forget(leaked);

        assert!(!counters.validate());
        assert_eq!(counters.live(ResourceKind::Object), 1);
        assert!(counters.report(false).to_string().contains("status: MISMATCH"));
    }

    #[test]
    fn test_peak_tracks_simultaneous_resources() {
        let counters = Counters::new();
        let first = counters.acquire(ResourceKind::Selection, "a");
        let second = counters.acquire(ResourceKind::Selection, "b");
        drop(first);
        drop(second);
        let _third = counters.acquire(ResourceKind::Selection, "c");

        assert_eq!(counters.tally(ResourceKind::Selection).peak, 2);
    }

    #[test]
    fn test_verbose_report_lists_release_order() {
        let counters = Counters::new();
        counters.acquire(ResourceKind::Object, "Jacek").release();

        let report = counters.report(true).to_string();
        assert!(report.contains("release order:"));
        assert!(report.contains("object 'Jacek'"));
        assert!(report.contains("status: OK"));
    }

    #[test]
    fn test_per_frame_releases_stay_out_of_the_journal() {
        let counters = Counters::new();
        let object = counters.acquire(ResourceKind::Object, "Maja");
        for _ in 0..1000 {
            counters.acquire(ResourceKind::Selection, "Maja").release();
        }
        counters.acquire(ResourceKind::Selector, "Maja").release();
        object.release();

        assert_eq!(counters.tally(ResourceKind::Selection).released, 1000);
        assert_eq!(counters.releases().len(), 1);
        assert_eq!(counters.report(true).to_string().lines().count(), 9);
        assert!(counters.tally(ResourceKind::Selector).last_release < counters.tally(ResourceKind::Object).last_release);
        assert_eq!(counters.tally(ResourceKind::Object).last_release, 1002);
    }
}
