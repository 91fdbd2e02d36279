// src/autotune/session.rs

//! # Autotune Session Module
//!
//! Connects gain synthesis to its collaborators: the source of identified
//! plant parameters, the operator's tuning dials and the settings store.
//!
//! ## Overview
//!
//! Gains are recomputed whenever the tuning dials change or the
//! identification source reports new data. The most recent result is kept as
//! a merged settings record ready to be written. A commit always recomputes
//! first, so it can never write gains derived from identification data older
//! than what the source currently holds.
//!
//! All mutation goes through `&mut self` and every accessor returns a copy,
//! so a commit can never observe a record that is being overwritten.

use crate::{
    compute_gains, AdminState, CommitError, ComputedGains, IdentifiedPlant, Real,
    StabilizationSettings, SynthesisError, TuningInputs,
};

/// Source of identified plant parameters.
pub trait IdentificationSource<T> {
    /// Most recent identification result.
    fn latest(&self) -> IdentifiedPlant<T>;
}

/// Persistent store for stabilization and module settings.
pub trait SettingsStore<T> {
    /// Error reported by writes.
    type Error;

    /// Current stabilization settings.
    fn read_stabilization(&self) -> StabilizationSettings<T>;

    /// Replaces the stabilization settings.
    fn write_stabilization(&mut self, settings: &StabilizationSettings<T>)
        -> Result<(), Self::Error>;

    /// Administrative state of the autotune module.
    fn autotune_state(&self) -> AdminState;

    /// Sets the administrative state of the autotune module.
    fn set_autotune_state(&mut self, state: AdminState) -> Result<(), Self::Error>;
}

/// Gain synthesis wired to an identification source and a settings store.
pub struct AutotuneSession<T, I, S> {
    source: I,
    store: S,
    tuning: TuningInputs,
    gains: Option<ComputedGains<T>>,
    pending: Option<StabilizationSettings<T>>,
}

impl<T, I, S> AutotuneSession<T, I, S>
where
    T: Real,
    I: IdentificationSource<T>,
    S: SettingsStore<T>,
{
    /// Creates a session with the default tuning dials.
    pub fn new(source: I, store: S) -> Self {
        Self::with_tuning(source, store, TuningInputs::new())
    }

    /// Creates a session with the given tuning dials.
    ///
    /// Nothing is computed until the first event or an explicit
    /// [`recompute`](Self::recompute).
    pub fn with_tuning(source: I, store: S, tuning: TuningInputs) -> Self {
        Self {
            source,
            store,
            tuning,
            gains: None,
            pending: None,
        }
    }

    /// Current tuning dials.
    pub fn tuning(&self) -> TuningInputs {
        self.tuning
    }

    /// Handles a change of the tuning dials.
    pub fn set_tuning(&mut self, tuning: TuningInputs) -> Result<ComputedGains<T>, SynthesisError> {
        self.tuning = tuning;
        self.recompute()
    }

    /// Handles a notification that new identification data is available.
    pub fn identification_updated(&mut self) -> Result<ComputedGains<T>, SynthesisError> {
        self.recompute()
    }

    /// Recomputes gains from the latest identification data and the current
    /// dials, merged into the store's current settings.
    ///
    /// On failure the previous result is discarded so stale gains are never
    /// shown or committed.
    pub fn recompute(&mut self) -> Result<ComputedGains<T>, SynthesisError> {
        let plant = self.source.latest();

        match compute_gains(&plant, &self.tuning) {
            Ok(gains) => {
                let current = self.store.read_stabilization();
                self.pending = Some(gains.merged_with(&current));
                self.gains = Some(gains);
                Ok(gains)
            }
            Err(e) => {
                self.gains = None;
                self.pending = None;
                Err(e)
            }
        }
    }

    /// Result of the last successful recompute, if it is still current.
    pub fn gains(&self) -> Option<ComputedGains<T>> {
        self.gains
    }

    /// Settings record that the next commit would write, as of the last
    /// recompute.
    pub fn pending_settings(&self) -> Option<StabilizationSettings<T>> {
        self.pending
    }

    /// Recomputes and writes the result to the store.
    ///
    /// Returns the settings record that was written.
    pub fn commit(&mut self) -> Result<StabilizationSettings<T>, CommitError<S::Error>> {
        // Identification or the stored settings may have changed since the
        // last recompute.
        self.recompute()?;

        let settings = self
            .pending
            .ok_or(CommitError::Synthesis(SynthesisError::DegenerateSolution))?;
        self.store
            .write_stabilization(&settings)
            .map_err(CommitError::Store)?;
        debug!("committed synthesized stabilization settings");

        Ok(settings)
    }

    /// Whether the autotune module is enabled in the store.
    pub fn autotune_enabled(&self) -> bool {
        self.store.autotune_state().is_enabled()
    }

    /// Enables or disables the autotune module in the store.
    pub fn set_autotune_enabled(&mut self, enabled: bool) -> Result<(), S::Error> {
        self.store.set_autotune_state(AdminState::from(enabled))
    }

    /// The identification source.
    pub fn source(&self) -> &I {
        &self.source
    }

    /// The settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the session, returning its collaborators.
    pub fn into_parts(self) -> (I, S) {
        (self.source, self.store)
    }
}
