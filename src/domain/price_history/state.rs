//! Chart state container — app-owned, pipeline-driven.
//!
//! Every write carries the ticket of the run that produced it; writes from a
//! superseded run are refused, so stale results never reach the consumer.

use super::{ChartSeries, SeriesSummary, SummaryStatus};
use crate::domain::selection::Selection;
use crate::error::ComputeError;
use serde::Serialize;
use std::sync::Arc;

/// Pipeline phase for the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    #[default]
    Idle,
    Fetching,
    Aligning,
    Composing,
    Ready,
    /// Two-asset selection where neither asset returned data.
    Failed,
}

impl PipelineState {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            PipelineState::Fetching | PipelineState::Aligning | PipelineState::Composing
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Ready | PipelineState::Failed)
    }
}

/// The immutable result of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub selection: Selection,
    pub series: ChartSeries,
    pub summary: SeriesSummary,
}

/// What the chart widget should render.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    /// Nothing selected yet.
    Idle,
    Loading,
    NoData,
    /// Data arrived but the numbers are undefined.
    Degenerate(ComputeError),
    Ready(Arc<ChartSnapshot>),
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ChartState {
    ticket: u64,
    phase: PipelineState,
    selection: Option<Selection>,
    snapshot: Option<Arc<ChartSnapshot>>,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start run `ticket` for `selection`. The previous snapshot is dropped.
    ///
    /// Returns `false` if a newer run has already started.
    pub fn begin(&mut self, ticket: u64, selection: Selection) -> bool {
        if ticket < self.ticket {
            return false;
        }
        self.ticket = ticket;
        self.phase = PipelineState::Fetching;
        self.selection = Some(selection);
        self.snapshot = None;
        true
    }

    /// Move run `ticket` to a non-terminal phase.
    pub fn advance(&mut self, ticket: u64, phase: PipelineState) -> bool {
        if ticket != self.ticket || self.phase.is_terminal() {
            return false;
        }
        self.phase = phase;
        true
    }

    /// Publish the result of run `ticket`.
    pub fn complete(&mut self, ticket: u64, snapshot: Arc<ChartSnapshot>) -> bool {
        if ticket != self.ticket || self.phase.is_terminal() {
            return false;
        }
        self.phase = PipelineState::Ready;
        self.snapshot = Some(snapshot);
        true
    }

    pub fn fail(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.phase.is_terminal() {
            return false;
        }
        self.phase = PipelineState::Failed;
        true
    }

    /// Return to `Idle` under `ticket`; runs holding an older ticket can no
    /// longer write.
    pub fn clear(&mut self, ticket: u64) -> bool {
        if ticket < self.ticket {
            return false;
        }
        self.ticket = ticket;
        self.phase = PipelineState::Idle;
        self.selection = None;
        self.snapshot = None;
        true
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn phase(&self) -> PipelineState {
        self.phase
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn snapshot(&self) -> Option<&Arc<ChartSnapshot>> {
        self.snapshot.as_ref()
    }

    pub fn view(&self) -> ChartView {
        match self.phase {
            PipelineState::Idle => ChartView::Idle,
            PipelineState::Fetching | PipelineState::Aligning | PipelineState::Composing => {
                ChartView::Loading
            }
            PipelineState::Failed => ChartView::Failed,
            PipelineState::Ready => match &self.snapshot {
                None => ChartView::NoData,
                Some(snap) => match &snap.summary.status {
                    SummaryStatus::Degenerate(e) => ChartView::Degenerate(e.clone()),
                    SummaryStatus::NoData => ChartView::NoData,
                    SummaryStatus::Computed if snap.series.is_empty() => ChartView::NoData,
                    SummaryStatus::Computed => ChartView::Ready(snap.clone()),
                },
            },
        }
    }
}
