//! Run lifecycle controller: the view state machine.
//!
//! Owns the three views (compose, history list, run detail), the fetch
//! slots backing the two asynchronous collaborator calls, and the
//! visualization selection of the loaded record. The controller never
//! performs I/O itself: navigation operations hand back fetch tickets, the
//! embedding event loop performs the HTTP call, and results come back
//! through `*_loaded` / `*_failed` carrying the ticket's token. Only the
//! result matching the most recently issued token for a slot is applied,
//! so a slow, superseded response can never overwrite newer data.

use crate::error::Error;
use crate::form::SimForm;
use crate::run::{RunId, RunRecord, RunRequest, RunSummary};
use crate::validate;
use crate::viz::{self, VizMode, VizSelection};

/// Sequence number tying a fetch result back to the issuing operation.
pub type FetchToken = u32;

/// Which screen the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Compose,
    HistoryList,
    RunDetail(RunId),
}

/// A detail fetch the embedding layer must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailFetch {
    pub run: RunId,
    pub token: FetchToken,
}

/// A history-list fetch the embedding layer must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFetch {
    pub token: FetchToken,
}

/// State of the run-detail slot.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailSlot {
    Idle,
    Loading { run: RunId, token: FetchToken },
    Loaded(Box<RunRecord>),
    Failed { run: RunId, message: String },
}

/// State of the history-list slot.
#[derive(Debug, Clone, PartialEq)]
pub enum HistorySlot {
    Idle,
    Loading { token: FetchToken },
    Loaded(Vec<RunSummary>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Controller {
    view: View,
    detail: DetailSlot,
    history: HistorySlot,
    viz: Option<VizSelection>,
    form_error: Option<String>,
    refresh: u64,
    last_token: FetchToken,
}

impl Controller {
    pub fn new() -> Controller {
        Controller {
            view: View::Compose,
            detail: DetailSlot::Idle,
            history: HistorySlot::Idle,
            viz: None,
            form_error: None,
            refresh: 0,
            last_token: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn detail(&self) -> &DetailSlot {
        &self.detail
    }

    pub fn history(&self) -> &HistorySlot {
        &self.history
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Clears the form-level message, as editing the form does in the UI.
    pub fn clear_form_error(&mut self) {
        self.form_error = None;
    }

    /// Bumped on every successful submission; an embedding that keeps the
    /// history view alive can watch this to know the listing is stale.
    pub fn refresh_counter(&self) -> u64 {
        self.refresh
    }

    fn issue_token(&mut self) -> FetchToken {
        self.last_token += 1;
        self.last_token
    }

    /// Switches to the compose view, discarding any detail payload and
    /// selected run.
    pub fn show_compose(&mut self) {
        self.view = View::Compose;
        self.detail = DetailSlot::Idle;
        self.viz = None;
        self.form_error = None;
    }

    /// Switches to the history list and issues a listing fetch. The list
    /// is refetched on every visit, so a run submitted since the last
    /// visit always shows up.
    pub fn show_history(&mut self) -> HistoryFetch {
        let token = self.issue_token();
        self.view = View::HistoryList;
        self.detail = DetailSlot::Idle;
        self.viz = None;
        self.history = HistorySlot::Loading { token };
        HistoryFetch { token }
    }

    /// Leaves a run-detail view for the history list.
    pub fn back_to_history(&mut self) -> HistoryFetch {
        self.show_history()
    }

    /// Selects a run from the history list, issuing a detail fetch.
    /// Returns `None` when a fetch for the same run is already in flight;
    /// that duplicate is debounced rather than raced. Selecting a
    /// different run supersedes the outstanding fetch: its token becomes
    /// stale and its eventual result is dropped.
    pub fn select_run(&mut self, run: RunId) -> Option<DetailFetch> {
        if let DetailSlot::Loading { run: pending, .. } = self.detail {
            if pending == run {
                return None;
            }
        }
        let token = self.issue_token();
        self.view = View::RunDetail(run);
        self.detail = DetailSlot::Loading { run, token };
        self.viz = None;
        Some(DetailFetch { run, token })
    }

    /// Validates the form and hands back the request to submit. A
    /// validation failure is recorded as the form-level message and does
    /// not change the view.
    pub fn submit(&mut self, form: &SimForm) -> Result<RunRequest, Error> {
        match validate::validate(form) {
            Ok(request) => {
                self.form_error = None;
                Ok(request)
            }
            Err(err) => {
                self.form_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Applies a successful submission: jump straight to the new run's
    /// detail view and mark the history listing stale.
    pub fn submission_succeeded(&mut self, record: RunRecord) {
        self.refresh += 1;
        self.form_error = None;
        self.view = View::RunDetail(record.id);
        self.viz = Some(VizSelection::for_model(record.model_type));
        self.detail = DetailSlot::Loaded(Box::new(record));
    }

    /// Records a collaborator failure for a submission. The user stays in
    /// the compose view with an inline message.
    pub fn submission_failed(&mut self, message: impl Into<String>) {
        self.form_error = Some(Error::SubmissionFailed(message.into()).to_string());
    }

    /// Applies a fetched run record if its token is still current. Stale
    /// results (superseded by a later selection or by navigation) are
    /// dropped silently.
    pub fn detail_loaded(&mut self, token: FetchToken, record: RunRecord) {
        match self.detail {
            DetailSlot::Loading { token: current, .. } if current == token => {
                self.viz = Some(VizSelection::for_model(record.model_type));
                self.detail = DetailSlot::Loaded(Box::new(record));
            }
            _ => {}
        }
    }

    /// Records a detail fetch failure if its token is still current. The
    /// view remains on the selected run with no data; navigating away is
    /// the only recovery.
    pub fn detail_failed(&mut self, token: FetchToken, message: impl Into<String>) {
        match self.detail {
            DetailSlot::Loading { run, token: current } if current == token => {
                self.detail = DetailSlot::Failed {
                    run,
                    message: Error::DetailFetchFailed(message.into()).to_string(),
                };
            }
            _ => {}
        }
    }

    /// Applies a fetched history listing if its token is still current.
    pub fn history_loaded(&mut self, token: FetchToken, rows: Vec<RunSummary>) {
        match self.history {
            HistorySlot::Loading { token: current } if current == token => {
                self.history = HistorySlot::Loaded(rows);
            }
            _ => {}
        }
    }

    pub fn history_failed(&mut self, token: FetchToken, message: impl Into<String>) {
        match self.history {
            HistorySlot::Loading { token: current } if current == token => {
                self.history =
                    HistorySlot::Failed(Error::HistoryFetchFailed(message.into()).to_string());
            }
            _ => {}
        }
    }

    /// The loaded record, if the detail slot holds one.
    pub fn record(&self) -> Option<&RunRecord> {
        match &self.detail {
            DetailSlot::Loaded(record) => Some(record),
            _ => None,
        }
    }

    pub fn viz(&self) -> Option<&VizSelection> {
        self.viz.as_ref()
    }

    /// Legal modes for the loaded record's model; empty when nothing is
    /// loaded.
    pub fn legal_modes(&self) -> &'static [VizMode] {
        self.viz.as_ref().map(VizSelection::legal).unwrap_or(&[])
    }

    /// Selects a visualization mode for the loaded record. Illegal modes
    /// fall back to the model's default.
    pub fn set_mode(&mut self, mode: VizMode) {
        if let Some(viz) = &mut self.viz {
            viz.select(mode);
        }
    }

    /// The projection of the loaded trajectory under the active mode.
    /// `None` for the 3-D mode (rendered from raw channels) or when no
    /// record is loaded. A projection that hits a missing channel resets
    /// the selection to the model's default mode and retries once.
    pub fn projection(&mut self) -> Option<Vec<(f64, f64)>> {
        let record = match &self.detail {
            DetailSlot::Loaded(record) => record,
            _ => return None,
        };
        let viz = self.viz.as_mut()?;
        let (ax, ay) = viz.mode().axes()?;
        match viz::project(&record.results, ax, ay) {
            Ok(pairs) => Some(pairs),
            Err(_) => {
                // Should be unreachable: only legal modes are offered.
                viz.reset();
                let (ax, ay) = viz.mode().axes()?;
                viz::project(&record.results, ax, ay).ok()
            }
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Controller::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ModelParams;
    use crate::registry::ModelId;
    use crate::run::{RunRequest, Trajectory};

    fn record(id: RunId, model: ModelId) -> RunRecord {
        let z = if model == ModelId::Henon {
            None
        } else {
            Some(vec![id as f64, 2.0])
        };
        RunRecord {
            id,
            model_type: model,
            created_at: "2025-01-07T12:30:00Z".to_string(),
            is_stable: true,
            input_params: RunRequest {
                model,
                steps: 1000,
                color: "#0000ff".to_string(),
                params: ModelParams::defaults(model),
            },
            results: Trajectory {
                x: vec![id as f64, 0.5],
                y: vec![id as f64, 1.5],
                z,
                color: "#0000ff".to_string(),
            },
        }
    }

    #[test]
    fn starts_in_compose_with_empty_slots() {
        let controller = Controller::new();
        assert_eq!(controller.view(), View::Compose);
        assert_eq!(controller.detail(), &DetailSlot::Idle);
        assert_eq!(controller.history(), &HistorySlot::Idle);
        assert!(controller.viz().is_none());
        assert!(controller.form_error().is_none());
    }

    #[test]
    fn successful_submission_opens_detail_and_bumps_refresh() {
        let mut controller = Controller::new();
        let form = SimForm::new();
        let request = controller.submit(&form).unwrap();
        assert_eq!(request.model, ModelId::Lorenz);

        controller.submission_succeeded(record(9, ModelId::Lorenz));
        assert_eq!(controller.view(), View::RunDetail(9));
        assert_eq!(controller.refresh_counter(), 1);
        assert_eq!(controller.record().unwrap().id, 9);
        // Attractor default presentation is the 3-D view.
        assert_eq!(controller.viz().unwrap().mode(), VizMode::ThreeD);
    }

    #[test]
    fn validation_failure_sets_form_error_and_keeps_view() {
        let mut controller = Controller::new();
        let mut form = SimForm::new();
        form.set_initial_text("1, 1");
        let err = controller.submit(&form).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInitialConditions {
                expected: 3,
                got: 2,
            }
        );
        assert_eq!(controller.view(), View::Compose);
        assert!(controller.form_error().unwrap().contains("exactly 3"));
        assert_eq!(controller.refresh_counter(), 0);

        controller.clear_form_error();
        assert!(controller.form_error().is_none());
    }

    #[test]
    fn submission_failure_keeps_compose_with_message() {
        let mut controller = Controller::new();
        controller.submission_failed("service unavailable");
        assert_eq!(controller.view(), View::Compose);
        assert!(controller
            .form_error()
            .unwrap()
            .contains("service unavailable"));
    }

    #[test]
    fn show_history_clears_detail_and_issues_fetch() {
        let mut controller = Controller::new();
        controller.submission_succeeded(record(3, ModelId::Thomas));

        let fetch = controller.show_history();
        assert_eq!(controller.view(), View::HistoryList);
        assert_eq!(controller.detail(), &DetailSlot::Idle);
        assert!(controller.viz().is_none());
        assert_eq!(
            controller.history(),
            &HistorySlot::Loading { token: fetch.token }
        );

        controller.history_loaded(fetch.token, vec![record(3, ModelId::Thomas).summary()]);
        match controller.history() {
            HistorySlot::Loaded(rows) => assert_eq!(rows.len(), 1),
            other => panic!("expected loaded history, got {other:?}"),
        }
    }

    #[test]
    fn stale_history_response_is_dropped() {
        let mut controller = Controller::new();
        let first = controller.show_history();
        let second = controller.show_history();
        assert_ne!(first.token, second.token);

        // The slow first response arrives after the second fetch was issued.
        controller.history_loaded(first.token, vec![record(1, ModelId::Henon).summary()]);
        assert_eq!(
            controller.history(),
            &HistorySlot::Loading {
                token: second.token
            }
        );

        controller.history_loaded(second.token, vec![]);
        assert_eq!(controller.history(), &HistorySlot::Loaded(vec![]));
    }

    #[test]
    fn selecting_a_run_issues_fetch_and_loads_it() {
        let mut controller = Controller::new();
        controller.show_history();
        let fetch = controller.select_run(5).expect("fetch should be issued");
        assert_eq!(fetch.run, 5);
        assert_eq!(controller.view(), View::RunDetail(5));

        controller.detail_loaded(fetch.token, record(5, ModelId::Henon));
        assert_eq!(controller.record().unwrap().id, 5);
        assert_eq!(controller.viz().unwrap().mode(), VizMode::XY);
    }

    #[test]
    fn duplicate_in_flight_selection_is_debounced() {
        let mut controller = Controller::new();
        controller.show_history();
        let first = controller.select_run(5);
        assert!(first.is_some());
        assert!(controller.select_run(5).is_none());
        // Still loading under the original token.
        assert_eq!(
            controller.detail(),
            &DetailSlot::Loading {
                run: 5,
                token: first.unwrap().token
            }
        );
    }

    #[test]
    fn later_selection_wins_over_slow_earlier_fetch() {
        let mut controller = Controller::new();
        controller.show_history();
        let fetch5 = controller.select_run(5).unwrap();
        let fetch7 = controller.select_run(7).unwrap();

        // Run 5's slow response lands after run 7 was selected.
        controller.detail_loaded(fetch5.token, record(5, ModelId::Lorenz));
        assert_eq!(controller.view(), View::RunDetail(7));
        assert_eq!(
            controller.detail(),
            &DetailSlot::Loading {
                run: 7,
                token: fetch7.token
            }
        );

        controller.detail_loaded(fetch7.token, record(7, ModelId::Lorenz));
        assert_eq!(controller.record().unwrap().id, 7);
    }

    #[test]
    fn reselecting_a_loaded_run_refetches() {
        let mut controller = Controller::new();
        controller.show_history();
        let fetch = controller.select_run(5).unwrap();
        controller.detail_loaded(fetch.token, record(5, ModelId::Henon));

        let again = controller.select_run(5).expect("loaded run refetches");
        assert_ne!(again.token, fetch.token);
        assert_eq!(
            controller.detail(),
            &DetailSlot::Loading {
                run: 5,
                token: again.token
            }
        );
    }

    #[test]
    fn detail_failure_stays_on_run_with_message() {
        let mut controller = Controller::new();
        controller.show_history();
        let fetch = controller.select_run(4).unwrap();
        controller.detail_failed(fetch.token, "500 from server");

        assert_eq!(controller.view(), View::RunDetail(4));
        match controller.detail() {
            DetailSlot::Failed { run, message } => {
                assert_eq!(*run, 4);
                assert!(message.contains("500 from server"));
            }
            other => panic!("expected failed detail, got {other:?}"),
        }
        assert!(controller.record().is_none());
    }

    #[test]
    fn stale_detail_failure_is_dropped() {
        let mut controller = Controller::new();
        controller.show_history();
        let fetch5 = controller.select_run(5).unwrap();
        let fetch7 = controller.select_run(7).unwrap();

        controller.detail_failed(fetch5.token, "timeout");
        assert_eq!(
            controller.detail(),
            &DetailSlot::Loading {
                run: 7,
                token: fetch7.token
            }
        );
    }

    #[test]
    fn navigation_away_invalidates_pending_detail() {
        let mut controller = Controller::new();
        controller.show_history();
        let fetch = controller.select_run(5).unwrap();
        controller.show_compose();

        controller.detail_loaded(fetch.token, record(5, ModelId::Henon));
        assert_eq!(controller.view(), View::Compose);
        assert_eq!(controller.detail(), &DetailSlot::Idle);
    }

    #[test]
    fn projection_follows_the_active_mode() {
        let mut controller = Controller::new();
        controller.show_history();
        let fetch = controller.select_run(2).unwrap();
        controller.detail_loaded(fetch.token, record(2, ModelId::Henon));

        // Henon defaults to X-Y.
        let pairs = controller.projection().unwrap();
        assert_eq!(pairs, vec![(2.0, 2.0), (0.5, 1.5)]);

        controller.set_mode(VizMode::XT);
        let pairs = controller.projection().unwrap();
        assert_eq!(pairs, vec![(0.0, 2.0), (1.0, 0.5)]);
    }

    #[test]
    fn three_d_mode_has_no_planar_projection() {
        let mut controller = Controller::new();
        controller.submission_succeeded(record(1, ModelId::Thomas));
        assert_eq!(controller.viz().unwrap().mode(), VizMode::ThreeD);
        assert!(controller.projection().is_none());

        controller.set_mode(VizMode::ZT);
        assert!(controller.projection().is_some());
    }

    #[test]
    fn illegal_mode_request_falls_back_to_default() {
        let mut controller = Controller::new();
        controller.submission_succeeded(record(1, ModelId::Henon));
        controller.set_mode(VizMode::ThreeD);
        assert_eq!(controller.viz().unwrap().mode(), VizMode::XY);
        assert!(controller.projection().is_some());
    }
}
