//! The invocation contract between a reconciler and whatever runs it.
//!
//! A host decides where parameters come from and whether mutating calls may
//! be issued. Failing is expressed by the reconcilers returning
//! [`ReconcileError`](crate::ReconcileError); the host turns that into its
//! own failure report.

/// What a reconciler needs from the party invoking it.
pub trait ModuleHost {
    /// Desired state supplied by the caller.
    type Params;

    /// When true, diffs are computed and reported but no mutating API call
    /// is issued.
    fn is_dry_run(&self) -> bool;

    /// The caller-supplied parameters. Never mutated by reconcilers.
    fn params(&self) -> &Self::Params;
}

/// A single invocation: parameters plus the dry-run flag.
///
/// # Example
///
/// ```
/// use pingping::{Invocation, ModuleHost, MonitorParams};
///
/// let invocation = Invocation::new(MonitorParams::present("web", "https://example.com"))
///     .dry_run(true);
/// assert!(invocation.is_dry_run());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation<P> {
    params: P,
    dry_run: bool,
}

impl<P> Invocation<P> {
    /// Create an invocation that is allowed to mutate remote state.
    pub fn new(params: P) -> Self {
        Self {
            params,
            dry_run: false,
        }
    }

    /// Set dry-run (check) mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl<P> ModuleHost for Invocation<P> {
    type Params = P;

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn params(&self) -> &P {
        &self.params
    }
}
